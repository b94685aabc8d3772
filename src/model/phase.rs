//! Display phase of the gallery

/// Mutually exclusive display mode of the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No source video loaded
    Empty,
    /// A generation run is in flight
    Generating,
    /// Source loaded, generation finished, nothing produced
    NoClips,
    /// At least one clip to show
    Ready,
}

impl Phase {
    /// Resolve the phase from the external signals.
    ///
    /// The checks form a priority chain: a missing source wins over
    /// everything, and an in-flight generation hides any stale clips.
    pub fn resolve(source_present: bool, is_generating: bool, clip_count: usize) -> Phase {
        if !source_present {
            Phase::Empty
        } else if is_generating {
            Phase::Generating
        } else if clip_count == 0 {
            Phase::NoClips
        } else {
            Phase::Ready
        }
    }

    /// Whether the regenerate control is live
    pub fn can_regenerate(&self) -> bool {
        matches!(self, Phase::NoClips | Phase::Ready)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Empty => "No source",
            Phase::Generating => "Generating",
            Phase::NoClips => "No clips",
            Phase::Ready => "Ready",
        }
    }
}
