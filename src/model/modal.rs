//! Modal stack for managing overlays
//!
//! Only the top modal receives input; modals render bottom to top.

/// A modal overlay drawn on top of the gallery
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Keyboard and mouse reference
    Help { scroll_offset: usize },
    /// Full metadata of one clip, addressed by id so a regeneration
    /// can't make it show a different clip
    ClipDetails { clip_id: String },
}

#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Push a modal onto the stack
    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    /// Pop the top modal
    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    /// Get the top modal
    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    /// Get the top modal mutably
    pub fn top_mut(&mut self) -> Option<&mut Modal> {
        self.stack.last_mut()
    }

    /// Check if no modals are open
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Drop every modal matching `predicate`
    pub fn remove_where(&mut self, predicate: impl Fn(&Modal) -> bool) {
        self.stack.retain(|m| !predicate(m));
    }
}
