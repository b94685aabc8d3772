//! Clip export through ffmpeg
//!
//! Each export runs on its own worker thread. A clip that was already
//! rendered is copied; otherwise its window is cut from the source.

use crate::model::clip::Clip;
use crate::services::job_runner::{JobMessage, JobRunner, JobSender};
use anyhow::{bail, Context, Result};
use regex::Regex;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::LazyLock;
use std::thread;
use std::time::{Duration, Instant};

const VIDEO_CODEC: &str = "libx264";
const VIDEO_CRF: u32 = 18;
const AUDIO_CODEC: &str = "aac";
const AUDIO_BITRATE: &str = "192k";
const SAMPLE_RATE: u32 = 44_100;
const AUDIO_FADE_SECS: f64 = 0.2;
const MAX_FILENAME_CHARS: usize = 100;
const CUT_TIMEOUT: Duration = Duration::from_secs(180);
/// A 30 second cut below this is a broken encode
const MIN_CUT_BYTES: u64 = 500_000;
const WAIT_INTERVAL: Duration = Duration::from_millis(50);

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());

static ANSI_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*[a-zA-Z]").unwrap());

/// Make `name` safe to use as a file name
pub fn sanitize_filename(name: &str) -> String {
    let replaced = UNSAFE_FILENAME_CHARS.replace_all(name, "_");
    let truncated: String = replaced.chars().take(MAX_FILENAME_CHARS).collect();
    truncated.trim_matches(|c| c == '.' || c == ' ').to_string()
}

/// `<title>_<start>s.mp4`, e.g. `talk #003_50s.mp4`
pub fn export_filename(clip: &Clip) -> String {
    let stem = sanitize_filename(&clip.title);
    let stem = if stem.is_empty() { "clip".to_string() } else { stem };
    format!("{}_{:.0}s.mp4", stem, clip.start_time.max(0.0))
}

/// ffmpeg arguments cutting `clip` out of `source` into `output`
pub fn build_cut_args(source: &Path, clip: &Clip, output: &Path) -> Vec<String> {
    let duration = clip.duration.max(0.0);
    let fade_out_start = (duration - AUDIO_FADE_SECS).max(0.0);
    let audio_filter = format!(
        "afade=t=in:st=0:d={fade},afade=t=out:st={out:.3}:d={fade},\
         highpass=f=80,lowpass=f=12000,\
         acompressor=threshold=0.1:ratio=3:attack=5:release=50,\
         loudnorm=I=-16:LRA=11:TP=-1.5",
        fade = AUDIO_FADE_SECS,
        out = fade_out_start,
    );

    let crf = VIDEO_CRF.to_string();
    let sample_rate = SAMPLE_RATE.to_string();
    let start = format!("{:.3}", clip.start_time.max(0.0));
    let length = format!("{:.3}", duration);
    let source = source.to_string_lossy().to_string();
    let output = output.to_string_lossy().to_string();

    [
        "-y", "-ss", start.as_str(), "-i", source.as_str(), "-t", length.as_str(),
        // video
        "-c:v", VIDEO_CODEC, "-preset", "fast", "-crf", crf.as_str(), "-profile:v", "high",
        "-level", "4.0", "-pix_fmt", "yuv420p", "-movflags", "+faststart",
        // audio
        "-c:a", AUDIO_CODEC, "-b:a", AUDIO_BITRATE, "-ar", sample_rate.as_str(), "-ac", "2",
        "-af", audio_filter.as_str(),
        output.as_str(),
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// How an export will be produced
#[derive(Debug, Clone, PartialEq)]
pub enum ExportPlan {
    /// The clip is already a file; copy it
    Copy { from: PathBuf, to: PathBuf },
    /// Cut the window out of the source with ffmpeg
    Cut { args: Vec<String>, to: PathBuf },
}

impl ExportPlan {
    pub fn destination(&self) -> &Path {
        match self {
            ExportPlan::Copy { to, .. } | ExportPlan::Cut { to, .. } => to,
        }
    }
}

pub fn plan_export(clip: &Clip, source: Option<&Path>, output_dir: &Path) -> Result<ExportPlan> {
    let to = output_dir.join(export_filename(clip));
    if let Some(from) = &clip.path {
        return Ok(ExportPlan::Copy {
            from: from.clone(),
            to,
        });
    }
    let Some(source) = source else {
        bail!("\"{}\" has no rendered file and no source video is loaded", clip.title);
    };
    Ok(ExportPlan::Cut {
        args: build_cut_args(source, clip, &to),
        to,
    })
}

fn strip_ansi_codes(s: &str) -> String {
    ANSI_REGEX.replace_all(s, "").to_string()
}

/// Bounds applied to an ffmpeg cut
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutLimits {
    pub timeout: Duration,
    pub min_bytes: u64,
}

impl Default for CutLimits {
    fn default() -> Self {
        Self {
            timeout: CUT_TIMEOUT,
            min_bytes: MIN_CUT_BYTES,
        }
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Run ffmpeg with `args`, killing it once `timeout` has passed
fn run_ffmpeg(ffmpeg: &str, args: &[String], timeout: Duration) -> Result<()> {
    let mut child = Command::new(ffmpeg)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to run {ffmpeg}"))?;

    // Drained on the side so a chatty encoder can't fill the pipe and stall
    let stderr_reader = child.stderr.take().map(|mut stderr| {
        thread::spawn(move || {
            let mut buf = String::new();
            let _ = stderr.read_to_string(&mut buf);
            buf
        })
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait().context("failed to wait for ffmpeg")? {
            break status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            bail!("{ffmpeg} timed out after {}s", timeout.as_secs_f64());
        }
        thread::sleep(WAIT_INTERVAL);
    };

    if !status.success() {
        let stderr = stderr_reader
            .and_then(|reader| reader.join().ok())
            .unwrap_or_default();
        let stderr = strip_ansi_codes(&stderr);
        let last = stderr.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("");
        bail!("{ffmpeg} exited with {}: {}", status, last.trim());
    }
    Ok(())
}

/// Carry out `plan`, returning the written file
pub fn run_export(ffmpeg: &str, plan: &ExportPlan, limits: &CutLimits) -> Result<PathBuf> {
    let to = plan.destination();
    if let Some(dir) = to.parent() {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    match plan {
        ExportPlan::Copy { from, to } => {
            if same_file(from, to) {
                bail!("{} is already in the export folder", from.display());
            }
            fs::copy(from, to)
                .with_context(|| format!("Failed to copy {} to {}", from.display(), to.display()))?;
        }
        ExportPlan::Cut { args, to } => {
            run_ffmpeg(ffmpeg, args, limits.timeout)?;
            let size = match fs::metadata(to) {
                Ok(meta) => meta.len(),
                Err(_) => bail!("{ffmpeg} reported success but wrote no file"),
            };
            if size <= limits.min_bytes {
                let _ = fs::remove_file(to);
                bail!("{ffmpeg} wrote only {} bytes", size);
            }
        }
    }

    Ok(to.to_path_buf())
}

/// Finished export as seen by the app
#[derive(Debug, Clone, PartialEq)]
pub enum ExportEvent {
    Saved { title: String, path: PathBuf },
    Failed { title: String, error: String },
}

pub struct ExportService {
    runner: JobRunner<ExportEvent>,
    ffmpeg: String,
    output_dir: PathBuf,
    limits: CutLimits,
}

impl ExportService {
    pub fn new(ffmpeg: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner: JobRunner::new(),
            ffmpeg: ffmpeg.into(),
            output_dir: output_dir.into(),
            limits: CutLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: CutLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn active_exports(&self) -> usize {
        self.runner.running_count()
    }

    /// Queue an export of `clip`. Planning errors are returned immediately;
    /// everything else arrives later through `poll`.
    pub fn start(&mut self, clip: &Clip, source: Option<&Path>) -> Result<()> {
        let plan = plan_export(clip, source, &self.output_dir)?;
        let ffmpeg = self.ffmpeg.clone();
        let title = clip.title.clone();
        let limits = self.limits;
        tracing::info!(clip = %clip.id, to = %plan.destination().display(), "export started");

        self.runner.spawn(move |tx: &JobSender<ExportEvent>| {
            let event = match run_export(&ffmpeg, &plan, &limits) {
                Ok(path) => ExportEvent::Saved { title, path },
                Err(e) => ExportEvent::Failed {
                    title,
                    error: format!("{:#}", e),
                },
            };
            let _ = tx.send(JobMessage::Completed(event));
        });
        Ok(())
    }

    pub fn poll(&mut self) -> Vec<ExportEvent> {
        self.runner
            .poll()
            .into_iter()
            .filter_map(|event| match event.message {
                JobMessage::Progress(_) => None,
                JobMessage::Completed(done) => Some(done),
                // Only reached when a worker dies before reporting
                JobMessage::Error(error) => Some(ExportEvent::Failed {
                    title: format!("export #{}", event.job_id),
                    error,
                }),
            })
            .inspect(|event| match event {
                ExportEvent::Saved { title, path } => {
                    tracing::info!(%title, path = %path.display(), "export finished")
                }
                ExportEvent::Failed { title, error } => {
                    tracing::error!(%title, "export failed: {}", error)
                }
            })
            .collect()
    }
}
