//! Action enum - All possible application actions
//!
//! Components turn key and mouse events into Actions; the App processes
//! them to update state and call out to services.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for polling jobs and aging toasts
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move the cursor one clip left
    PrevClip,
    /// Move the cursor one clip right
    NextClip,
    /// Jump to the first clip
    FirstClip,
    /// Jump to the last clip
    LastClip,
    /// Scroll the strip without moving the cursor
    ScrollGallery(i16),
    /// Pointer entered a clip card, or left all of them
    HoverClip(Option<usize>),

    // ─────────────────────────────────────────────────────────────────────────
    // Clip Actions
    // ─────────────────────────────────────────────────────────────────────────
    /// Preview the clip at this index
    SelectClip(usize),
    /// Preview the clip under the cursor
    SelectCurrent,
    /// Export the clip at this index
    ExportClip(usize),
    /// Export the clip under the cursor
    ExportCurrent,
    /// Discard the clip set and generate a new one
    Regenerate,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help overlay
    OpenHelp,
    /// Show full metadata of the clip under the cursor
    OpenClipDetails,
    /// Close the current modal
    CloseModal,
    /// Hide the newest notification
    DismissToast,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::PrevClip => write!(f, "PrevClip"),
            Action::NextClip => write!(f, "NextClip"),
            Action::FirstClip => write!(f, "FirstClip"),
            Action::LastClip => write!(f, "LastClip"),
            Action::ScrollGallery(delta) => write!(f, "ScrollGallery({})", delta),
            Action::HoverClip(Some(i)) => write!(f, "HoverClip({})", i),
            Action::HoverClip(None) => write!(f, "HoverClip(none)"),
            Action::SelectClip(i) => write!(f, "SelectClip({})", i),
            Action::SelectCurrent => write!(f, "SelectCurrent"),
            Action::ExportClip(i) => write!(f, "ExportClip({})", i),
            Action::ExportCurrent => write!(f, "ExportCurrent"),
            Action::Regenerate => write!(f, "Regenerate"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenClipDetails => write!(f, "OpenClipDetails"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::DismissToast => write!(f, "DismissToast"),
        }
    }
}
