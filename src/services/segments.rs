//! Segment planning - every fixed-length window over the source

use crate::config::Config;
use crate::model::clip::{Clip, ClipStatus};
use std::path::Path;

/// Window settings, taken from the config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSettings {
    pub clip_duration: f64,
    pub overlap_duration: f64,
    pub min_clip_duration: f64,
    pub max_clips: usize,
}

impl Default for SegmentSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl SegmentSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            clip_duration: config.clip_duration,
            overlap_duration: config.overlap_duration,
            min_clip_duration: config.min_clip_duration,
            max_clips: config.max_clips,
        }
    }

    /// Distance between consecutive window starts. Never below one second,
    /// so a bad overlap can't stall the planner.
    pub fn step(&self) -> f64 {
        (self.clip_duration - self.overlap_duration).max(1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// 1-based
    pub number: usize,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    /// Truncated to the end of the source
    pub is_final: bool,
}

/// Plan all windows over a source of `video_duration` seconds
///
/// Windows start every `step()` seconds. The first window that would run
/// past the end is cut at the end and kept only if it is still at least
/// `min_clip_duration` long; planning stops there.
pub fn plan_segments(video_duration: f64, settings: &SegmentSettings) -> Vec<Segment> {
    let mut segments = Vec::new();
    if !video_duration.is_finite() || settings.clip_duration <= 0.0 {
        return segments;
    }

    let step = settings.step();
    let mut start = 0.0;

    while start < video_duration && segments.len() < settings.max_clips {
        let end = start + settings.clip_duration;

        if end > video_duration {
            let duration = video_duration - start;
            if duration >= settings.min_clip_duration {
                segments.push(Segment {
                    number: segments.len() + 1,
                    start_time: start,
                    end_time: video_duration,
                    duration,
                    is_final: true,
                });
            }
            break;
        }

        segments.push(Segment {
            number: segments.len() + 1,
            start_time: start,
            end_time: end,
            duration: settings.clip_duration,
            is_final: false,
        });
        start += step;
    }

    tracing::info!(count = segments.len(), video_duration, "planned segments");
    segments
}

/// Turn planned windows into gallery clips for `source`
pub fn clips_from_segments(
    source: &Path,
    segments: &[Segment],
    settings: &SegmentSettings,
) -> Vec<Clip> {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "clip".to_string());

    segments
        .iter()
        .map(|segment| {
            let mut tags = vec![if segment.is_final { "final" } else { "full" }.to_string()];
            if segment.number > 1 && settings.overlap_duration > 0.0 {
                tags.push("overlap".to_string());
            }

            let score = if settings.clip_duration > 0.0 {
                (segment.duration / settings.clip_duration * 100.0).clamp(0.0, 100.0)
            } else {
                0.0
            };

            Clip {
                id: format!("{}-{:03}-{:.0}", stem, segment.number, segment.start_time),
                title: format!("{} #{:03}", stem, segment.number),
                thumbnail_time: segment.start_time + segment.duration / 2.0,
                start_time: segment.start_time,
                end_time: segment.end_time,
                duration: segment.duration,
                score,
                tags,
                status: ClipStatus::Pending,
                path: None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;

    #[test]
    fn test_windows_step_with_overlap() {
        let segments = plan_segments(80.0, &SegmentSettings::default());
        let starts: Vec<f64> = segments.iter().map(|s| s.start_time).collect();
        assert_eq!(starts, vec![0.0, 25.0, 50.0]);
        assert!(segments.iter().all(|s| s.duration == 30.0));
        assert!(segments.iter().all(|s| !s.is_final));
        assert_eq!(segments[2].end_time, 80.0);
    }

    #[test]
    fn test_long_enough_tail_is_kept_as_final() {
        // window at 50 would end at 80, the source ends at 77
        let segments = plan_segments(77.0, &SegmentSettings::default());
        assert_eq!(segments.len(), 3);
        let last = segments.last().unwrap();
        assert!(last.is_final);
        assert_eq!(last.end_time, 77.0);
        assert_eq!(last.duration, 27.0);
    }

    #[test]
    fn test_short_tail_is_dropped() {
        // window at 50 would only cover 20s
        let segments = plan_segments(70.0, &SegmentSettings::default());
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_source_shorter_than_minimum_yields_nothing() {
        assert!(plan_segments(10.0, &SegmentSettings::default()).is_empty());
        assert!(plan_segments(0.0, &SegmentSettings::default()).is_empty());
        assert!(plan_segments(f64::NAN, &SegmentSettings::default()).is_empty());
    }

    #[test]
    fn test_max_clips_cap() {
        let settings = SegmentSettings {
            max_clips: 4,
            ..SegmentSettings::default()
        };
        let segments = plan_segments(10_000.0, &settings);
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[3].number, 4);
    }

    #[test]
    fn test_overlap_larger_than_clip_still_advances() {
        let settings = SegmentSettings {
            clip_duration: 5.0,
            overlap_duration: 10.0,
            min_clip_duration: 1.0,
            max_clips: 100,
        };
        let segments = plan_segments(6.0, &settings);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].start_time, 1.0);
        assert!(segments[2].is_final);
    }

    #[test]
    fn test_clips_from_segments() {
        let settings = SegmentSettings::default();
        let segments = plan_segments(77.0, &settings);
        let clips = clips_from_segments(&PathBuf::from("/v/keynote.mp4"), &segments, &settings);

        assert_eq!(clips.len(), 3);
        assert_eq!(clips[0].title, "keynote #001");
        assert_eq!(clips[0].tags, vec!["full".to_string()]);
        assert_eq!(clips[1].tags, vec!["full".to_string(), "overlap".to_string()]);
        assert_eq!(clips[2].tags, vec!["final".to_string(), "overlap".to_string()]);
        assert_eq!(clips[0].score, 100.0);
        assert!((clips[2].score - 90.0).abs() < 1e-9);
        assert_eq!(clips[1].thumbnail_time, 40.0);

        for clip in &clips {
            assert!(clip.start_time <= clip.thumbnail_time && clip.thumbnail_time <= clip.end_time);
            assert_eq!(clip.status, ClipStatus::Pending);
            assert!(clip.path.is_none());
        }

        let ids: HashSet<_> = clips.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), clips.len());
    }
}
