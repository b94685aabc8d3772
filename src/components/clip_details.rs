//! Clip details dialog
//!
//! Everything known about one clip, including the tags a card hides.

use crate::action::Action;
use crate::components::centered_popup;
use crate::components::text::{fit_width, spread};
use crate::model::clip::Clip;
use crate::model::time::{format_duration, format_range};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const DIALOG_WIDTH: u16 = 56;

pub fn handle_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('i') => Some(Action::CloseModal),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::ForceQuit)
        }
        _ => None,
    }
}

fn field(label: &str, value: String, width: usize) -> Line<'static> {
    let label_width = label.len() + 1;
    let value = fit_width(&value, width.saturating_sub(label_width));
    let row = spread(label, &value, width);
    let (label_part, value_part) = match row.strip_prefix(label) {
        Some(rest) => (label, rest),
        None => ("", row.as_str()),
    };
    Line::from(vec![
        Span::styled(label_part.to_string(), Style::default().fg(Color::DarkGray)),
        Span::styled(value_part.to_string(), Style::default().fg(Color::White)),
    ])
}

/// Draw the dialog for `clip`, or a notice if the clip is gone
pub fn draw(frame: &mut Frame, area: Rect, clip: Option<&Clip>) {
    let popup = centered_popup(area, DIALOG_WIDTH, 16);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Clip details ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let inner_width = popup.width.saturating_sub(4) as usize;

    let Some(clip) = clip else {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                " This clip is no longer in the gallery",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(block);
        frame.render_widget(paragraph, popup);
        return;
    };

    let path = clip
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "not rendered yet".to_string());

    let mut lines = vec![
        Line::from(Span::styled(
            fit_width(&clip.title, inner_width),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field("Id", clip.id.clone(), inner_width),
        field(
            "Status",
            format!("{} {}", clip.status.icon(), clip.status.label()),
            inner_width,
        ),
        field("Score", clip.score_label(), inner_width),
        field("Range", format_range(clip.start_time, clip.end_time), inner_width),
        field("Length", format_duration(clip.duration), inner_width),
        field("Thumbnail", format_duration(clip.thumbnail_time), inner_width),
        field("File", path, inner_width),
        Line::from(""),
    ];

    if clip.tags.is_empty() {
        lines.push(Line::from(Span::styled("No tags", Style::default().fg(Color::DarkGray))));
    } else {
        lines.push(Line::from(
            clip.tags
                .iter()
                .map(|t| Span::styled(format!("#{} ", t), Style::default().fg(Color::Magenta)))
                .collect::<Vec<_>>(),
        ));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc / i to close",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .block(block.padding(ratatui::widgets::Padding::horizontal(1)))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::clip::sample_clip;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(clip: Option<&Clip>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| draw(frame, frame.area(), clip))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_shows_all_tags_and_times() {
        let clip = sample_clip(2);
        let text = render(Some(&clip));
        assert!(text.contains("Clip 2"));
        assert!(text.contains("#extra"));
        assert!(text.contains("0:50 - 1:20"));
        assert!(text.contains("not rendered yet"));
    }

    #[test]
    fn test_missing_clip() {
        let text = render(None);
        assert!(text.contains("no longer in the gallery"));
    }

    #[test]
    fn test_close_keys() {
        let close = handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(close, Some(Action::CloseModal));
        assert_eq!(handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE)), None);
    }
}
