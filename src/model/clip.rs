//! Clip records produced by the generator
//!
//! The gallery never creates or edits clips; it only indexes into the
//! collection the generator hands over.

use serde::Deserialize;
use std::path::PathBuf;

/// Number of tags surfaced on a clip card
pub const VISIBLE_TAGS: usize = 2;

/// Per-clip lifecycle, independent of the collection-level generating phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipStatus {
    Ready,
    Processing,
    #[default]
    Pending,
}

impl ClipStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ClipStatus::Ready => "ready",
            ClipStatus::Processing => "processing",
            ClipStatus::Pending => "pending",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ClipStatus::Ready => "●",
            ClipStatus::Processing => "◐",
            ClipStatus::Pending => "○",
        }
    }
}

/// A candidate short segment of the source video
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub id: String,
    pub title: String,
    pub thumbnail_time: f64,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    /// Quality indicator in `[0, 100]`
    pub score: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: ClipStatus,
    /// Playable media for this clip; `None` until it has been rendered
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Clip {
    /// Tags shown on the card
    pub fn visible_tags(&self) -> &[String] {
        &self.tags[..self.tags.len().min(VISIBLE_TAGS)]
    }

    /// Score as a whole percentage, e.g. `"87%"`
    pub fn score_label(&self) -> String {
        let score = if self.score.is_finite() {
            self.score.clamp(0.0, 100.0)
        } else {
            0.0
        };
        format!("{}%", score.round() as u32)
    }

    pub fn has_preview(&self) -> bool {
        self.path.is_some()
    }
}

#[cfg(test)]
pub(crate) fn sample_clip(n: usize) -> Clip {
    Clip {
        id: format!("clip-{n}"),
        title: format!("Clip {n}"),
        thumbnail_time: n as f64 * 25.0 + 15.0,
        start_time: n as f64 * 25.0,
        end_time: n as f64 * 25.0 + 30.0,
        duration: 30.0,
        score: 80.0,
        tags: vec!["full".to_string(), "overlap".to_string(), "extra".to_string()],
        status: ClipStatus::Pending,
        path: None,
    }
}
