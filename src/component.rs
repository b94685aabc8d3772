//! Component trait - Interface for UI components
//!
//! Each component keeps its own presentation state, turns input events into
//! Actions and renders itself. Domain state stays in the App.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

/// Trait for UI components
///
/// 1. `handle_key_event` / `handle_mouse_event` map input to Actions
/// 2. `update` reacts to Actions, optionally returning a follow-up
/// 3. `draw` renders into the given area
pub trait Component {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Map a key press to an Action. Should not change state.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Map a mouse event to an Action
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let _ = mouse;
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Render into `area`
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
