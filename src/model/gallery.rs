//! Gallery state - the clip collection plus navigation cursor and hover
//!
//! `selected_index` is the navigation cursor moved by the keyboard.
//! Activating a clip with the mouse does not move it; see `dispatch`.

use super::clip::Clip;
use super::phase::Phase;

#[derive(Debug, Default)]
pub struct GalleryState {
    clips: Vec<Clip>,

    /// Navigation cursor, always in `[0, clips.len() - 1]` when non-empty
    selected_index: usize,

    /// Clip under the pointer
    hovered_index: Option<usize>,

    /// Bumped on every wholesale replacement of `clips`
    generation: u64,
}

impl GalleryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clips(clips: Vec<Clip>) -> Self {
        let mut state = Self::new();
        state.replace_clips(clips);
        state
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Collection
    // ─────────────────────────────────────────────────────────────────────────

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Clip> {
        self.clips.get(index)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Swap in a new generation result
    ///
    /// The cursor goes back to the first clip and the hover is dropped, so
    /// neither can point into the old collection.
    pub fn replace_clips(&mut self, clips: Vec<Clip>) {
        self.clips = clips;
        self.selected_index = 0;
        self.hovered_index = None;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn phase(&self, source_present: bool, is_generating: bool) -> Phase {
        Phase::resolve(source_present, is_generating, self.clips.len())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_clip(&self) -> Option<&Clip> {
        self.clips.get(self.selected_index)
    }

    /// Move the cursor by `delta`, clamping at both ends
    pub fn move_selection(&mut self, delta: isize) {
        if self.clips.is_empty() {
            return;
        }
        let last = (self.clips.len() - 1) as isize;
        let target = (self.selected_index as isize).saturating_add(delta);
        self.selected_index = target.clamp(0, last) as usize;
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.clips.len().saturating_sub(1);
    }

    pub fn is_selected(&self, index: usize) -> bool {
        !self.clips.is_empty() && self.selected_index == index
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Hover
    // ─────────────────────────────────────────────────────────────────────────

    pub fn hovered_index(&self) -> Option<usize> {
        self.hovered_index
    }

    /// Set or clear the hovered clip
    pub fn set_hovered(&mut self, index: Option<usize>) {
        self.hovered_index = index;
    }

    pub fn is_hovered(&self, index: usize) -> bool {
        self.hovered_index == Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::clip::sample_clip;

    fn gallery(n: usize) -> GalleryState {
        GalleryState::with_clips((0..n).map(sample_clip).collect())
    }

    #[test]
    fn test_move_selection_clamps() {
        let mut state = gallery(3);
        state.move_selection(1);
        assert_eq!(state.selected_index(), 1);
        state.move_selection(10);
        assert_eq!(state.selected_index(), 2);
        state.move_selection(1);
        assert_eq!(state.selected_index(), 2);
        state.move_selection(-1);
        assert_eq!(state.selected_index(), 1);
        state.move_selection(-10);
        assert_eq!(state.selected_index(), 0);
        state.move_selection(isize::MIN);
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn test_move_selection_never_wraps() {
        let mut state = gallery(2);
        state.move_selection(-1);
        assert_eq!(state.selected_index(), 0);
        state.select_last();
        state.move_selection(1);
        assert_eq!(state.selected_index(), 1);
    }

    #[test]
    fn test_move_selection_on_empty_is_noop() {
        let mut state = GalleryState::new();
        state.move_selection(1);
        state.move_selection(-1);
        assert_eq!(state.selected_index(), 0);
        assert!(state.selected_clip().is_none());
        assert!(!state.is_selected(0));
    }

    #[test]
    fn test_replace_clips_resets_cursor_and_hover() {
        let mut state = gallery(5);
        state.select_last();
        state.set_hovered(Some(4));
        let before = state.generation();

        state.replace_clips(vec![sample_clip(0), sample_clip(1)]);

        assert_eq!(state.selected_index(), 0);
        assert_eq!(state.hovered_index(), None);
        assert!(state.selected_clip().is_some());
        assert_ne!(state.generation(), before);
    }

    #[test]
    fn test_replace_with_empty_keeps_cursor_harmless() {
        let mut state = gallery(4);
        state.select_last();
        state.replace_clips(Vec::new());
        assert!(state.selected_clip().is_none());
        state.select_last();
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn test_hover_set_and_clear() {
        let mut state = gallery(3);
        state.set_hovered(Some(2));
        assert!(state.is_hovered(2));
        assert!(!state.is_hovered(1));
        state.set_hovered(None);
        assert_eq!(state.hovered_index(), None);
    }

    #[test]
    fn test_phase_uses_clip_count() {
        let state = GalleryState::new();
        assert_eq!(state.phase(true, false), Phase::NoClips);
        let state = gallery(1);
        assert_eq!(state.phase(true, false), Phase::Ready);
        assert_eq!(state.phase(true, true), Phase::Generating);
        assert_eq!(state.phase(false, false), Phase::Empty);
    }
}
