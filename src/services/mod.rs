//! External collaborators of the gallery
//!
//! - Source probing (ffprobe)
//! - Segment planning and background clip generation
//! - Import of generator reports
//! - Export (ffmpeg) and preview playback
//! - `ClipServices`, which wires them up as the gallery's `ClipHandler`

pub mod export;
pub mod generator;
pub mod job_runner;
pub mod player;
pub mod probe;
pub mod report;
pub mod segments;

pub use export::{ExportEvent, ExportService};
pub use generator::{ClipGenerator, GenerationEvent};
pub use report::load_report;
pub use segments::SegmentSettings;

use crate::config::Config;
use crate::dispatch::ClipHandler;
use crate::model::clip::Clip;
use std::path::{Path, PathBuf};

/// The loaded source video
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub path: PathBuf,
    /// Duration given up front, skipping ffprobe
    pub known_duration: Option<f64>,
}

/// Something the services want the user to see
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceNotice {
    Info(String),
    Success(String),
    Error(String),
}

/// Everything the app needs from the outside world: the action handlers
/// plus the inbound signals and results
pub trait ClipBackend: ClipHandler {
    fn source_present(&self) -> bool;

    fn is_generating(&self) -> bool;

    /// Human-readable name of the source
    fn source_name(&self) -> Option<String>;

    /// Latest progress message of the running generation
    fn progress(&self) -> Option<&str>;

    /// Collect finished background work. Returns a new clip set when a
    /// generation run completed.
    fn poll(&mut self) -> Option<Vec<Clip>>;

    /// Notices raised since the last call
    fn take_notices(&mut self) -> Vec<ServiceNotice>;

    /// Exports still running
    fn active_exports(&self) -> usize {
        0
    }
}

/// Real handlers behind the gallery actions.
///
/// Either a source video or an imported report counts as a loaded source.
/// Regenerating re-plans the video, or re-reads the report when only a
/// report was given.
pub struct ClipServices {
    pub source: Option<Source>,
    pub report: Option<PathBuf>,
    clip_duration: f64,
    reloaded: Option<Vec<Clip>>,
    pub generator: ClipGenerator,
    pub exporter: ExportService,
    player_command: Vec<String>,
    progress: Option<String>,
    notices: Vec<ServiceNotice>,
}

impl ClipServices {
    pub fn new(config: &Config, source: Option<Source>) -> Self {
        Self {
            source,
            report: None,
            clip_duration: config.clip_duration,
            reloaded: None,
            generator: ClipGenerator::new(
                config.ffprobe_binary_path.clone(),
                SegmentSettings::from_config(config),
            ),
            exporter: ExportService::new(
                config.ffmpeg_binary_path.clone(),
                config.output_dir.clone(),
            ),
            player_command: config.player_command.clone(),
            progress: None,
            notices: Vec::new(),
        }
    }

    /// Remember the report the initial clips were imported from
    pub fn with_report(mut self, report: Option<PathBuf>) -> Self {
        self.report = report;
        self
    }

    fn reload_report(&mut self, report: &Path) {
        match load_report(report, self.clip_duration) {
            Ok(clips) => {
                self.notices.push(ServiceNotice::Info(format!(
                    "Reloaded {} clips from {}",
                    clips.len(),
                    report.display()
                )));
                self.reloaded = Some(clips);
            }
            Err(e) => {
                tracing::warn!("report reload failed: {:#}", e);
                self.notices.push(ServiceNotice::Error(format!("{:#}", e)));
            }
        }
    }

    fn source_path(&self) -> Option<&Path> {
        self.source.as_ref().map(|s| s.path.as_path())
    }
}

impl ClipBackend for ClipServices {
    fn source_present(&self) -> bool {
        self.source.is_some() || self.report.is_some()
    }

    fn is_generating(&self) -> bool {
        self.generator.is_generating()
    }

    fn source_name(&self) -> Option<String> {
        let path = self
            .source
            .as_ref()
            .map(|s| s.path.as_path())
            .or(self.report.as_deref())?;
        Some(
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
        )
    }

    fn progress(&self) -> Option<&str> {
        self.progress.as_deref()
    }

    fn take_notices(&mut self) -> Vec<ServiceNotice> {
        std::mem::take(&mut self.notices)
    }

    fn poll(&mut self) -> Option<Vec<Clip>> {
        let mut finished = self.reloaded.take();

        for event in self.generator.poll() {
            match event {
                GenerationEvent::Progress(msg) => {
                    tracing::debug!("{}", msg);
                    self.progress = Some(msg);
                }
                GenerationEvent::Finished(clips) => {
                    self.notices
                        .push(ServiceNotice::Info(format!("Generated {} clips", clips.len())));
                    self.progress = None;
                    finished = Some(clips);
                }
                GenerationEvent::Failed(err) => {
                    self.notices
                        .push(ServiceNotice::Error(format!("Clip generation failed: {}", err)));
                    self.progress = None;
                    finished = Some(Vec::new());
                }
            }
        }

        for event in self.exporter.poll() {
            self.notices.push(match event {
                ExportEvent::Saved { title, path } => {
                    ServiceNotice::Success(format!("Saved \"{}\" to {}", title, path.display()))
                }
                ExportEvent::Failed { title, error } => {
                    ServiceNotice::Error(format!("Export of \"{}\" failed: {}", title, error))
                }
            });
        }

        finished
    }

    fn active_exports(&self) -> usize {
        self.exporter.active_exports()
    }
}

impl ClipHandler for ClipServices {
    fn on_select_clip(&mut self, clip: &Clip) {
        if let Err(e) = player::launch(&self.player_command, clip, self.source_path()) {
            tracing::warn!("preview failed: {:#}", e);
            self.notices.push(ServiceNotice::Error(format!("{:#}", e)));
        }
    }

    fn on_regenerate(&mut self) {
        let Some(source) = self.source.clone() else {
            match self.report.clone() {
                Some(report) => self.reload_report(&report),
                None => tracing::warn!("regenerate requested without a source"),
            }
            return;
        };
        self.progress = Some("Starting...".to_string());
        match source.known_duration {
            Some(duration) => self.generator.start_with_duration(&source.path, duration),
            None => self.generator.start(&source.path),
        }
    }

    fn on_export(&mut self, clip: &Clip) {
        let source = self.source.as_ref().map(|s| s.path.clone());
        if let Err(e) = self.exporter.start(clip, source.as_deref()) {
            tracing::warn!("export not started: {:#}", e);
            self.notices.push(ServiceNotice::Error(format!("{:#}", e)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn services(source: Option<Source>) -> ClipServices {
        ClipServices::new(&Config::default(), source)
    }

    #[test]
    fn test_regenerate_without_source_does_nothing() {
        let mut services = services(None);
        services.on_regenerate();
        assert!(!services.is_generating());
        assert!(!services.source_present());
        assert_eq!(services.source_name(), None);
    }

    #[test]
    fn test_regenerate_with_known_duration_delivers_clips() {
        let mut services = services(Some(Source {
            path: PathBuf::from("/v/talk.mp4"),
            known_duration: Some(80.0),
        }));
        assert_eq!(services.source_name().as_deref(), Some("talk.mp4"));
        services.on_regenerate();
        assert!(services.is_generating());
        assert!(services.progress().is_some());

        let deadline = Instant::now() + Duration::from_secs(10);
        let mut clips = None;
        while clips.is_none() && Instant::now() < deadline {
            clips = services.poll();
            std::thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(clips.map(|c| c.len()), Some(3));
        assert_eq!(
            services.take_notices(),
            vec![ServiceNotice::Info("Generated 3 clips".to_string())]
        );
        assert!(services.take_notices().is_empty());
        assert_eq!(services.progress(), None);
    }

    #[test]
    fn test_report_counts_as_source_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("report.json");
        std::fs::write(
            &report,
            r#"{"clip_details": [{"path": "a.mp4", "clip_number": 1,
                "start_time": 0, "end_time": 30, "duration": 30}]}"#,
        )
        .unwrap();

        let mut services = services(None).with_report(Some(report));
        assert!(services.source_present());
        assert_eq!(services.source_name().as_deref(), Some("report.json"));

        services.on_regenerate();
        assert!(!services.is_generating());
        assert_eq!(services.poll().map(|c| c.len()), Some(1));
        assert!(matches!(services.take_notices()[..], [ServiceNotice::Info(_)]));
        assert_eq!(services.poll(), None);
    }

    #[test]
    fn test_reload_of_broken_report_keeps_clips() {
        let mut services = services(None).with_report(Some(PathBuf::from("/missing/report.json")));
        services.on_regenerate();
        assert_eq!(services.poll(), None);
        assert!(matches!(services.take_notices()[..], [ServiceNotice::Error(_)]));
    }

    #[test]
    fn test_export_without_anything_to_cut_raises_notice() {
        let mut services = services(None);
        services.on_export(&crate::model::clip::sample_clip(0));
        let notices = services.take_notices();
        assert_eq!(notices.len(), 1);
        assert!(matches!(notices[0], ServiceNotice::Error(_)));
        assert_eq!(services.exporter.active_exports(), 0);
    }
}
