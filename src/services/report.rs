//! Import of clip sets from a generator `report.json`
//!
//! The batch generator writes a report whose `clip_details` list the files
//! it rendered. Those clips already exist on disk, so they come in ready.

use crate::model::clip::{Clip, ClipStatus};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub processing_summary: Option<ProcessingSummary>,
    #[serde(default)]
    pub clip_details: Vec<ClipDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ProcessingSummary {
    #[serde(default)]
    pub video_title: Option<String>,
    #[serde(default)]
    pub total_clips_created: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ClipDetail {
    pub path: PathBuf,
    pub clip_number: usize,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub size_mb: Option<f64>,
}

pub fn parse_report(contents: &str) -> Result<Report> {
    serde_json::from_str(contents).context("Failed to parse clip report")
}

/// Locate the rendered file of `detail`.
///
/// The generator records paths relative to its own working directory and
/// writes the report next to the clips, so a relative path is tried against
/// `base_dir`, then by file name inside `base_dir`, then as given. When none
/// of them exists the file is assumed to sit next to the report.
fn resolve_clip_path(detail: &ClipDetail, base_dir: &Path) -> PathBuf {
    if detail.path.is_absolute() {
        return detail.path.clone();
    }

    let file_name = detail
        .filename
        .as_deref()
        .map(PathBuf::from)
        .or_else(|| detail.path.file_name().map(PathBuf::from));
    let beside_report = file_name.map(|name| base_dir.join(name));

    let candidates = [
        Some(base_dir.join(&detail.path)),
        beside_report.clone(),
        Some(detail.path.clone()),
    ];
    candidates
        .into_iter()
        .flatten()
        .find(|candidate| candidate.is_file())
        .or(beside_report)
        .unwrap_or_else(|| base_dir.join(&detail.path))
}

/// Convert report entries to clips.
///
/// Score is the clip length relative to the longer of `clip_duration` and
/// the longest clip.
pub fn clips_from_report(report: &Report, base_dir: &Path, clip_duration: f64) -> Vec<Clip> {
    let title = report
        .processing_summary
        .as_ref()
        .and_then(|s| s.video_title.clone())
        .unwrap_or_else(|| "clip".to_string());
    let longest = report
        .clip_details
        .iter()
        .map(|d| d.duration)
        .fold(clip_duration, f64::max);

    report
        .clip_details
        .iter()
        .map(|detail| {
            let path = resolve_clip_path(detail, base_dir);

            let score = if longest > 0.0 {
                (detail.duration / longest * 100.0).clamp(0.0, 100.0)
            } else {
                0.0
            };

            let mut tags = vec!["rendered".to_string()];
            if let Some(size) = detail.size_mb {
                tags.push(format!("{:.1} MB", size));
            }

            Clip {
                id: detail
                    .filename
                    .clone()
                    .unwrap_or_else(|| format!("{}-{:03}", title, detail.clip_number)),
                title: format!("{} #{:03}", title, detail.clip_number),
                thumbnail_time: detail.start_time + detail.duration / 2.0,
                start_time: detail.start_time,
                end_time: detail.end_time,
                duration: detail.duration,
                score,
                tags,
                status: ClipStatus::Ready,
                path: Some(path),
            }
        })
        .collect()
}

/// Load the clip set recorded in `report_path`
pub fn load_report(report_path: &Path, clip_duration: f64) -> Result<Vec<Clip>> {
    let contents = fs::read_to_string(report_path)
        .with_context(|| format!("Failed to read {}", report_path.display()))?;
    let report = parse_report(&contents)?;

    if let Some(expected) = report
        .processing_summary
        .as_ref()
        .and_then(|s| s.total_clips_created)
    {
        if expected != report.clip_details.len() {
            tracing::warn!(
                expected,
                found = report.clip_details.len(),
                "report clip count mismatch"
            );
        }
    }

    let base_dir = report_path.parent().unwrap_or_else(|| Path::new("."));
    let clips = clips_from_report(&report, base_dir, clip_duration);
    tracing::info!(count = clips.len(), report = %report_path.display(), "loaded clip report");
    Ok(clips)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"{
        "processing_summary": {
            "total_clips_created": 2,
            "video_title": "Talk",
            "processing_timestamp": "2024-01-01 10:00:00"
        },
        "clip_details": [
            {
                "path": "all_30sec_shorts/Talk_clip_001_0s.mp4",
                "clip_number": 1,
                "start_time": 0,
                "end_time": 30,
                "duration": 30,
                "filename": "Talk_clip_001_0s.mp4",
                "size_mb": 4.3
            },
            {
                "path": "/abs/Talk_clip_002_25s.mp4",
                "clip_number": 2,
                "start_time": 25,
                "end_time": 52,
                "duration": 27
            }
        ],
        "statistics": {}
    }"#;

    #[test]
    fn test_clips_from_report() {
        let report = parse_report(REPORT).unwrap();
        let clips = clips_from_report(&report, Path::new("/out"), 30.0);

        assert_eq!(clips.len(), 2);
        assert_eq!(clips[0].id, "Talk_clip_001_0s.mp4");
        assert_eq!(clips[0].title, "Talk #001");
        assert_eq!(
            clips[0].path,
            Some(PathBuf::from("/out/Talk_clip_001_0s.mp4"))
        );
        assert_eq!(clips[0].tags, vec!["rendered".to_string(), "4.3 MB".to_string()]);
        assert_eq!(clips[0].status, ClipStatus::Ready);

        assert_eq!(clips[1].id, "Talk-002");
        assert_eq!(clips[1].path, Some(PathBuf::from("/abs/Talk_clip_002_25s.mp4")));
        assert!((clips[1].score - 90.0).abs() < 1e-9);
        assert_eq!(clips[1].thumbnail_time, 38.5);
    }

    #[test]
    fn test_load_report_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        fs::write(&path, REPORT).unwrap();

        let clips = load_report(&path, 30.0).unwrap();
        assert_eq!(clips.len(), 2);
        assert!(clips[0].path.as_ref().unwrap().starts_with(dir.path()));
    }

    #[test]
    fn test_report_inside_clip_folder() {
        let dir = tempfile::tempdir().unwrap();
        let shorts = dir.path().join("all_30sec_shorts");
        fs::create_dir_all(&shorts).unwrap();
        fs::write(shorts.join("Talk_clip_001_0s.mp4"), b"clip").unwrap();
        let report_path = shorts.join("report.json");
        fs::write(&report_path, REPORT).unwrap();

        let clips = load_report(&report_path, 30.0).unwrap();
        let path = clips[0].path.as_ref().unwrap();
        assert_eq!(path, &shorts.join("Talk_clip_001_0s.mp4"));
        assert!(path.is_file());
    }

    #[test]
    fn test_relative_path_found_under_report_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("all_30sec_shorts");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("Talk_clip_001_0s.mp4"), b"clip").unwrap();

        let report = parse_report(REPORT).unwrap();
        let clips = clips_from_report(&report, dir.path(), 30.0);
        assert_eq!(clips[0].path, Some(nested.join("Talk_clip_001_0s.mp4")));
    }

    #[test]
    fn test_bad_report() {
        assert!(parse_report("{ \"clip_details\": 3 }").is_err());
        assert!(load_report(Path::new("/definitely/missing/report.json"), 30.0).is_err());
    }

    #[test]
    fn test_empty_report() {
        let report = parse_report("{}").unwrap();
        assert!(clips_from_report(&report, Path::new("."), 30.0).is_empty());
    }
}
