//! Help dialog
//!
//! Keyboard and mouse reference. The scroll position lives in
//! `Modal::Help` so it resets whenever the dialog is reopened.

use crate::action::Action;
use crate::components::centered_popup;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

const DIALOG_WIDTH: u16 = 64;

/// Handle a key while the help dialog is on top
pub fn handle_key(key: KeyEvent, scroll_offset: &mut usize) -> Option<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
        KeyCode::Char('j') | KeyCode::Down => {
            *scroll_offset = scroll_offset.saturating_add(1);
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            *scroll_offset = scroll_offset.saturating_sub(1);
            None
        }
        KeyCode::PageDown => {
            *scroll_offset = scroll_offset.saturating_add(10);
            None
        }
        KeyCode::PageUp => {
            *scroll_offset = scroll_offset.saturating_sub(10);
            None
        }
        KeyCode::Char('c')
            if key
                .modifiers
                .contains(crossterm::event::KeyModifiers::CONTROL) =>
        {
            Some(Action::ForceQuit)
        }
        _ => None,
    }
}

pub fn draw(frame: &mut Frame, area: Rect, scroll_offset: &mut usize) {
    let content = help_lines();
    let total = content.len();

    let dialog_area = centered_popup(
        area,
        DIALOG_WIDTH,
        (total as u16 + 2).min(area.height.saturating_sub(2)),
    );
    frame.render_widget(Clear, dialog_area);

    let visible_height = dialog_area.height.saturating_sub(2) as usize;
    let max_scroll = total.saturating_sub(visible_height);
    if *scroll_offset > max_scroll {
        *scroll_offset = max_scroll;
    }

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .scroll((*scroll_offset as u16, 0));
    frame.render_widget(paragraph, dialog_area);

    if total > visible_height {
        let mut scrollbar_state = ScrollbarState::new(max_scroll).position(*scroll_offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓")),
            dialog_area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

fn help_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let section = |lines: &mut Vec<Line<'static>>, title: &str| {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    };

    let entry = |lines: &mut Vec<Line<'static>>, keys: &str, description: &str| {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:14}", keys),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(description.to_string(), Style::default().fg(Color::White)),
        ]));
    };

    section(&mut lines, "Gallery");
    entry(&mut lines, "h / ←", "Previous clip (stops at the first)");
    entry(&mut lines, "l / →", "Next clip (stops at the last)");
    entry(&mut lines, "g / G", "First / last clip");
    entry(&mut lines, "PgUp / PgDn", "Scroll the strip by a page");

    section(&mut lines, "Clips");
    entry(&mut lines, "Enter / Space", "Play the highlighted clip");
    entry(&mut lines, "x", "Export the highlighted clip");
    entry(&mut lines, "i", "Show clip details");
    entry(&mut lines, "r", "Regenerate clips from the source");

    section(&mut lines, "Mouse");
    entry(&mut lines, "hover", "Highlight a card");
    entry(&mut lines, "click card", "Play that clip");
    entry(&mut lines, "click export", "Export that clip only");
    entry(&mut lines, "wheel", "Scroll the strip");

    section(&mut lines, "General");
    entry(&mut lines, "Esc", "Dismiss the latest notification");
    entry(&mut lines, "?", "Show this help");
    entry(&mut lines, "q", "Quit");
    entry(&mut lines, "Ctrl+c", "Quit immediately");

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Esc, q or ? closes this dialog",
        Style::default().fg(Color::DarkGray),
    )));

    lines
}
