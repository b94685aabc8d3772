//! Clip generation service
//!
//! Probes the source, plans its windows and delivers the clip set from a
//! background thread. Starting a new run discards the one in flight.

use crate::model::clip::Clip;
use crate::services::job_runner::{JobMessage, JobRunner, JobSender};
use crate::services::probe::probe_duration;
use crate::services::segments::{clips_from_segments, plan_segments, SegmentSettings};
use std::path::Path;

/// Outcome of a run as seen by the app
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationEvent {
    Progress(String),
    Finished(Vec<Clip>),
    Failed(String),
}

pub struct ClipGenerator {
    runner: JobRunner<Vec<Clip>>,
    ffprobe: String,
    settings: SegmentSettings,
}

impl ClipGenerator {
    pub fn new(ffprobe: impl Into<String>, settings: SegmentSettings) -> Self {
        Self {
            runner: JobRunner::new(),
            ffprobe: ffprobe.into(),
            settings,
        }
    }

    pub fn is_generating(&self) -> bool {
        self.runner.is_running()
    }

    /// Start generating clips for `source`
    pub fn start(&mut self, source: &Path) {
        let source = source.to_path_buf();
        let ffprobe = self.ffprobe.clone();
        let settings = self.settings;
        tracing::info!(source = %source.display(), "starting clip generation");

        self.runner
            .spawn_exclusive(move |tx| generate(&ffprobe, &source, &settings, tx));
    }

    /// Start a run whose duration is already known
    pub fn start_with_duration(&mut self, source: &Path, duration: f64) {
        let source = source.to_path_buf();
        let settings = self.settings;
        self.runner.spawn_exclusive(move |tx| {
            let clips = build_clips(&source, duration, &settings);
            let _ = tx.send(JobMessage::Completed(clips));
        });
    }

    pub fn poll(&mut self) -> Vec<GenerationEvent> {
        self.runner
            .poll()
            .into_iter()
            .map(|event| match event.message {
                JobMessage::Progress(msg) => GenerationEvent::Progress(msg),
                JobMessage::Completed(clips) => {
                    tracing::info!(
                        count = clips.len(),
                        secs = event.elapsed_secs,
                        "clip generation finished"
                    );
                    GenerationEvent::Finished(clips)
                }
                JobMessage::Error(err) => {
                    tracing::error!("clip generation failed: {}", err);
                    GenerationEvent::Failed(err)
                }
            })
            .collect()
    }
}

fn build_clips(source: &Path, duration: f64, settings: &SegmentSettings) -> Vec<Clip> {
    let segments = plan_segments(duration, settings);
    clips_from_segments(source, &segments, settings)
}

fn generate(ffprobe: &str, source: &Path, settings: &SegmentSettings, tx: &JobSender<Vec<Clip>>) {
    let _ = tx.send(JobMessage::Progress("Probing source video...".to_string()));

    let duration = match probe_duration(ffprobe, source) {
        Ok(d) => d,
        Err(e) => {
            let _ = tx.send(JobMessage::Error(format!("{:#}", e)));
            return;
        }
    };

    let _ = tx.send(JobMessage::Progress("Calculating clip segments...".to_string()));
    let clips = build_clips(source, duration, settings);
    let _ = tx.send(JobMessage::Completed(clips));
}
