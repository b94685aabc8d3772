//! Gallery component - the main screen
//!
//! Renders the header with the regenerate control, the horizontally
//! scrolling strip of clip cards and the status/help bars. Owns the
//! presentation state (scroll offset, hit regions from the last draw) but
//! not the clips, cursor or hover, which live in `GalleryState`.

use crate::action::Action;
use crate::component::Component;
use crate::components::calculate_main_layout;
use crate::components::text::fit_width;
use crate::model::clip::{Clip, ClipStatus};
use crate::model::gallery::GalleryState;
use crate::model::phase::Phase;
use crate::model::time::{format_duration, format_range};
use crate::model::toast::{Toast, ToastLevel};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub const CARD_WIDTH: u16 = 30;
pub const CARD_HEIGHT: u16 = 9;
pub const CARD_GAP: u16 = 1;

const PLAY_LABEL: &str = "[▶ play]";
const EXPORT_LABEL: &str = "[⇩ export]";
const REGENERATE_LABEL: &str = " ⟳ Regenerate ";
const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

// ═══════════════════════════════════════════════════════════════════════════════
// Hit Testing
// ═══════════════════════════════════════════════════════════════════════════════

/// Screen position of one rendered card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSlot {
    pub index: usize,
    pub area: Rect,
    /// Export control nested inside `area`
    pub export_button: Rect,
}

/// What the pointer is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryHit {
    Regenerate,
    Card(usize),
    /// The export control of a card. Never reported as `Card` as well.
    Export(usize),
}

impl GalleryHit {
    /// Clip under the pointer, whichever part of the card it is on
    pub fn clip_index(&self) -> Option<usize> {
        match self {
            GalleryHit::Card(i) | GalleryHit::Export(i) => Some(*i),
            GalleryHit::Regenerate => None,
        }
    }
}

/// Number of whole cards that fit in `width` columns (at least one)
pub fn visible_card_count(width: u16) -> usize {
    (((width + CARD_GAP) / (CARD_WIDTH + CARD_GAP)) as usize).max(1)
}

/// Lay out the cards of `clip_count` clips starting at `scroll_offset`
pub fn card_slots(area: Rect, clip_count: usize, scroll_offset: usize) -> Vec<CardSlot> {
    let height = CARD_HEIGHT.min(area.height);
    if height < 3 {
        return Vec::new();
    }
    let export_width = EXPORT_LABEL.width() as u16;
    let min_width = (PLAY_LABEL.width() + EXPORT_LABEL.width()) as u16 + 2;

    let mut slots = Vec::new();
    let mut x = area.x;
    for index in scroll_offset..clip_count {
        let width = CARD_WIDTH.min(area.right().saturating_sub(x));
        if width < CARD_WIDTH && !slots.is_empty() {
            break;
        }
        if width < min_width {
            break;
        }

        let card = Rect::new(x, area.y, width, height);
        let export_button = Rect::new(
            card.right().saturating_sub(export_width + 1),
            card.bottom().saturating_sub(2),
            export_width,
            1,
        );
        slots.push(CardSlot {
            index,
            area: card,
            export_button,
        });

        x = x.saturating_add(CARD_WIDTH + CARD_GAP);
        if x >= area.right() {
            break;
        }
    }
    slots
}

// ═══════════════════════════════════════════════════════════════════════════════
// Gallery Component
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
pub struct GalleryComponent {
    /// Index of the first card drawn
    pub scroll_offset: usize,

    /// Cards that fit in the strip at the last draw
    visible_cards: usize,

    /// Regions from the last draw, used for mouse hit testing
    slots: Vec<CardSlot>,
    regenerate_button: Option<Rect>,
}

impl GalleryComponent {
    pub fn new() -> Self {
        Self {
            visible_cards: 1,
            ..Self::default()
        }
    }

    pub fn slots(&self) -> &[CardSlot] {
        &self.slots
    }

    /// Go back to the start of the strip, e.g. after a new clip set arrives
    pub fn reset_scroll(&mut self) {
        self.scroll_offset = 0;
        self.slots.clear();
    }

    /// Scroll so the card at `selected` is on screen
    pub fn ensure_visible(&mut self, selected: usize) {
        let visible = self.visible_cards.max(1);
        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + visible {
            self.scroll_offset = selected + 1 - visible;
        }
    }

    /// Scroll the strip by `delta` cards without touching the cursor
    pub fn scroll(&mut self, delta: i16, clip_count: usize) {
        let target = self.scroll_offset as isize + delta as isize;
        self.scroll_offset = target.max(0) as usize;
        self.clamp_scroll(clip_count);
    }

    fn clamp_scroll(&mut self, clip_count: usize) {
        let max_offset = clip_count.saturating_sub(self.visible_cards.max(1));
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    /// What is under (`column`, `row`) according to the last draw.
    ///
    /// A nested export control is reported instead of its card, so a click
    /// there resolves to a single action.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<GalleryHit> {
        let pos = Position::new(column, row);

        if self.regenerate_button.is_some_and(|r| r.contains(pos)) {
            return Some(GalleryHit::Regenerate);
        }

        self.slots
            .iter()
            .find(|slot| slot.area.contains(pos))
            .map(|slot| {
                if slot.export_button.contains(pos) {
                    GalleryHit::Export(slot.index)
                } else {
                    GalleryHit::Card(slot.index)
                }
            })
    }
}

impl Component for GalleryComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            // Navigation
            KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevClip),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::NextClip),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstClip),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastClip),
            KeyCode::PageUp => Some(Action::ScrollGallery(-(self.visible_cards.max(1) as i16))),
            KeyCode::PageDown => Some(Action::ScrollGallery(self.visible_cards.max(1) as i16)),

            // Clip actions
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::SelectCurrent),
            KeyCode::Char('x') => Some(Action::ExportCurrent),
            KeyCode::Char('r') => Some(Action::Regenerate),
            KeyCode::Char('i') => Some(Action::OpenClipDetails),

            // Modals
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Esc => Some(Action::DismissToast),

            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ForceQuit)
            }
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let hit = self.hit_test(mouse.column, mouse.row);
        let action = match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                Some(Action::HoverClip(hit.and_then(|h| h.clip_index())))
            }
            MouseEventKind::Down(MouseButton::Left) => match hit {
                Some(GalleryHit::Regenerate) => Some(Action::Regenerate),
                Some(GalleryHit::Export(i)) => Some(Action::ExportClip(i)),
                Some(GalleryHit::Card(i)) => Some(Action::SelectClip(i)),
                None => None,
            },
            MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
                Some(Action::ScrollGallery(1))
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
                Some(Action::ScrollGallery(-1))
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the gallery state; see draw_gallery_screen
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the gallery screen
pub struct GalleryRenderContext<'a> {
    pub gallery: &'a GalleryState,
    pub phase: Phase,
    pub source_name: Option<&'a str>,
    pub progress: Option<&'a str>,
    pub toast: Option<&'a Toast>,
    /// Live toasts including the one shown
    pub queued_toasts: usize,
    pub active_exports: usize,
    pub tick: u64,
}

pub fn draw_gallery_screen(
    frame: &mut Frame,
    area: Rect,
    view: &mut GalleryComponent,
    ctx: &GalleryRenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area);

    render_header(frame, layout.header, view, ctx);

    match ctx.phase {
        Phase::Ready => render_strip(frame, layout.gallery, view, ctx),
        _ => {
            view.slots.clear();
            render_placeholder(frame, layout.gallery, ctx);
        }
    }

    render_status_bar(frame, layout.status, ctx);
    render_help_bar(frame, layout.help, ctx.phase);
    Ok(())
}

fn render_header(
    frame: &mut Frame,
    area: Rect,
    view: &mut GalleryComponent,
    ctx: &GalleryRenderContext,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" clipreel ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let phase_color = match ctx.phase {
        Phase::Empty => Color::DarkGray,
        Phase::Generating => Color::Yellow,
        Phase::NoClips => Color::Red,
        Phase::Ready => Color::Green,
    };

    let mut spans = vec![
        Span::styled(
            ctx.source_name.unwrap_or("no source video"),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", ctx.phase.label()),
            Style::default().fg(phase_color),
        ),
    ];
    if ctx.phase == Phase::Ready {
        spans.push(Span::styled(
            format!("  {} clips", ctx.gallery.len()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if ctx.active_exports > 0 {
        spans.push(Span::styled(
            format!("  ⇩ {} exporting", ctx.active_exports),
            Style::default().fg(Color::Magenta),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);

    // Regenerate control, right-aligned
    let label_width = REGENERATE_LABEL.width() as u16;
    view.regenerate_button = None;
    if inner.width > label_width && inner.height > 0 {
        let button = Rect::new(inner.right() - label_width, inner.y, label_width, 1);
        let style = if ctx.phase.can_regenerate() {
            view.regenerate_button = Some(button);
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(Paragraph::new(Span::styled(REGENERATE_LABEL, style)), button);
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, ctx: &GalleryRenderContext) {
    let dim = Style::default().fg(Color::DarkGray);
    let lines = match ctx.phase {
        Phase::Empty => vec![
            Line::from(Span::styled(
                "No source video loaded",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Start with: clipreel <video> [--report report.json]",
                dim,
            )),
        ],
        Phase::Generating => {
            let frame_idx = (ctx.tick as usize) % SPINNER.len();
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("{} Generating clips...", SPINNER[frame_idx]),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(ctx.progress.unwrap_or("Working..."), dim)),
            ];
            if !ctx.gallery.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("{} clips from the previous run will be replaced", ctx.gallery.len()),
                    dim,
                )));
            }
            lines
        }
        Phase::NoClips => vec![
            Line::from(Span::styled(
                "No clips were generated",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled("Press r to try again", dim)),
        ],
        Phase::Ready => Vec::new(),
    };

    let top_pad = area.height.saturating_sub(lines.len() as u16) / 2;
    let mut padded = vec![Line::from(""); top_pad as usize];
    padded.extend(lines);

    frame.render_widget(Paragraph::new(padded).alignment(Alignment::Center), area);
}

fn render_strip(
    frame: &mut Frame,
    area: Rect,
    view: &mut GalleryComponent,
    ctx: &GalleryRenderContext,
) {
    let gallery = ctx.gallery;

    // One row for the scroll indicator below the cards
    let cards_area = Rect::new(area.x, area.y + 1, area.width, area.height.saturating_sub(2));
    let indicator_area = Rect::new(
        area.x,
        cards_area.y + CARD_HEIGHT.min(cards_area.height),
        area.width,
        1.min(area.height),
    );

    view.visible_cards = visible_card_count(cards_area.width);
    view.clamp_scroll(gallery.len());
    view.slots = card_slots(cards_area, gallery.len(), view.scroll_offset);

    for slot in &view.slots {
        if let Some(clip) = gallery.get(slot.index) {
            render_card(
                frame,
                slot,
                clip,
                gallery.is_selected(slot.index),
                gallery.is_hovered(slot.index),
            );
        }
    }

    let first_shown = view.slots.first().map(|s| s.index).unwrap_or(0);
    let after = gallery
        .len()
        .saturating_sub(view.slots.last().map(|s| s.index + 1).unwrap_or(0));
    let dim = Style::default().fg(Color::DarkGray);
    let indicator = Line::from(vec![
        Span::styled(
            if first_shown > 0 {
                format!("◀ {} more  ", first_shown)
            } else {
                String::new()
            },
            dim,
        ),
        Span::styled(
            format!("clip {} of {}", gallery.selected_index() + 1, gallery.len()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            if after > 0 {
                format!("  {} more ▶", after)
            } else {
                String::new()
            },
            dim,
        ),
    ]);
    if indicator_area.y < area.bottom() {
        frame.render_widget(
            Paragraph::new(indicator).alignment(Alignment::Center),
            indicator_area,
        );
    }
}

fn status_color(status: ClipStatus) -> Color {
    match status {
        ClipStatus::Ready => Color::Green,
        ClipStatus::Processing => Color::Yellow,
        ClipStatus::Pending => Color::DarkGray,
    }
}

fn render_card(frame: &mut Frame, slot: &CardSlot, clip: &Clip, selected: bool, hovered: bool) {
    let border_style = if hovered {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Double
        } else {
            BorderType::Plain
        })
        .border_style(border_style)
        .title(format!(" {} ", slot.index + 1))
        .title_style(border_style);
    let inner = block.inner(slot.area);
    frame.render_widget(block, slot.area);

    let width = inner.width as usize;
    let dim = Style::default().fg(Color::DarkGray);

    let title_style = if selected || hovered {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let score = clip.score_label();
    let status_text = fit_width(
        &format!("{} {}", clip.status.icon(), clip.status.label()),
        width.saturating_sub(score.width() + 1),
    );
    let score_gap = width.saturating_sub(status_text.width() + score.width());

    let tags = clip
        .visible_tags()
        .iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ");

    let preview = if clip.has_preview() {
        Span::styled(fit_width("preview ready", width), Style::default().fg(Color::Green))
    } else {
        Span::styled(fit_width("no preview yet", width), dim)
    };

    let lines = vec![
        Line::from(Span::styled(fit_width(&clip.title, width), title_style)),
        Line::from(vec![
            Span::styled(status_text, Style::default().fg(status_color(clip.status))),
            Span::raw(" ".repeat(score_gap)),
            Span::styled(score, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(Span::raw(fit_width(&format_range(clip.start_time, clip.end_time), width))),
        Line::from(Span::styled(
            fit_width(
                &format!(
                    "⏱ {}  ▣ {}",
                    format_duration(clip.duration),
                    format_duration(clip.thumbnail_time)
                ),
                width,
            ),
            dim,
        )),
        Line::from(Span::styled(fit_width(&tags, width), Style::default().fg(Color::Magenta))),
        Line::from(preview),
    ];

    // Controls sit on the last inner row, lined up with slot.export_button
    let body = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
    frame.render_widget(Paragraph::new(lines), body);

    if inner.height == 0 {
        return;
    }
    let button_style = if hovered {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let buttons_gap = width.saturating_sub(PLAY_LABEL.width() + EXPORT_LABEL.width());
    let buttons = Line::from(vec![
        Span::styled(PLAY_LABEL, button_style),
        Span::raw(" ".repeat(buttons_gap)),
        Span::styled(EXPORT_LABEL, button_style),
    ]);
    let controls = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);
    frame.render_widget(Paragraph::new(buttons), controls);
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &GalleryRenderContext) {
    let line = match ctx.toast {
        Some(toast) => {
            let color = match toast.level {
                ToastLevel::Info => Color::Cyan,
                ToastLevel::Success => Color::Green,
                ToastLevel::Error => Color::Red,
            };
            Line::from(vec![
                Span::styled(
                    format!(" {} ", toast.level.icon()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(toast.message.clone(), Style::default().fg(color)),
                Span::styled(
                    format!("  {}", toast.formatted_time()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    if ctx.queued_toasts > 1 {
                        format!("  (+{} more, Esc to dismiss)", ctx.queued_toasts - 1)
                    } else {
                        String::new()
                    },
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, phase: Phase) {
    let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();

    if phase == Phase::Ready {
        spans.extend([
            Span::styled(" ←/→ ", key),
            Span::raw("move  "),
            Span::styled(" Enter ", key),
            Span::raw("play  "),
            Span::styled(" x ", key),
            Span::raw("export  "),
            Span::styled(" i ", key),
            Span::raw("details  "),
        ]);
    }
    if phase.can_regenerate() {
        spans.extend([Span::styled(" r ", key), Span::raw("regenerate  ")]);
    }
    spans.extend([
        Span::styled(" ? ", key),
        Span::raw("help  "),
        Span::styled(" q ", key),
        Span::raw("quit"),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::clip::sample_clip;
    use crossterm::event::KeyEventState;
    use ratatui::{backend::TestBackend, Terminal};

    fn gallery(n: usize) -> GalleryState {
        GalleryState::with_clips((0..n).map(sample_clip).collect())
    }

    fn render(view: &mut GalleryComponent, state: &GalleryState, phase: Phase) -> String {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let ctx = GalleryRenderContext {
                    gallery: state,
                    phase,
                    source_name: Some("talk.mp4"),
                    progress: Some("Probing source video..."),
                    toast: None,
                    queued_toasts: 0,
                    active_exports: 0,
                    tick: 0,
                };
                draw_gallery_screen(frame, frame.area(), view, &ctx).unwrap();
            })
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

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_visible_card_count() {
        assert_eq!(visible_card_count(10), 1);
        assert_eq!(visible_card_count(30), 1);
        assert_eq!(visible_card_count(61), 2);
        assert_eq!(visible_card_count(100), 3);
    }

    #[test]
    fn test_card_slots_nest_export_button() {
        let slots = card_slots(Rect::new(0, 5, 100, 12), 10, 2);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].index, 2);
        assert_eq!(slots[1].area.x, CARD_WIDTH + CARD_GAP);
        for slot in &slots {
            let b = slot.export_button;
            assert!(b.x >= slot.area.x && b.right() <= slot.area.right());
            assert!(b.y > slot.area.y && b.bottom() < slot.area.bottom());
        }
    }

    #[test]
    fn test_card_slots_too_short() {
        assert!(card_slots(Rect::new(0, 0, 100, 2), 3, 0).is_empty());
        assert!(card_slots(Rect::new(0, 0, 100, 10), 0, 0).is_empty());
    }

    #[test]
    fn test_ensure_visible_and_scroll() {
        let mut view = GalleryComponent::new();
        view.visible_cards = 3;

        view.ensure_visible(5);
        assert_eq!(view.scroll_offset, 3);
        view.ensure_visible(4);
        assert_eq!(view.scroll_offset, 3);
        view.ensure_visible(1);
        assert_eq!(view.scroll_offset, 1);

        view.scroll(10, 6);
        assert_eq!(view.scroll_offset, 3);
        view.scroll(-10, 6);
        assert_eq!(view.scroll_offset, 0);
    }

    #[test]
    fn test_ready_phase_renders_cards() {
        let mut view = GalleryComponent::new();
        let state = gallery(5);
        let text = render(&mut view, &state, Phase::Ready);

        assert!(text.contains("Clip 0"));
        assert!(text.contains("Clip 2"));
        assert!(text.contains("#full #overlap"));
        assert!(!text.contains("#extra"));
        assert!(text.contains("0:25 - 0:55"));
        assert!(text.contains("80%"));
        assert!(text.contains("clip 1 of 5"));
        assert!(text.contains("2 more ▶"));
        assert!(text.contains("Regenerate"));
        assert_eq!(view.slots().len(), 3);
    }

    #[test]
    fn test_placeholder_phases() {
        let mut view = GalleryComponent::new();

        let text = render(&mut view, &GalleryState::new(), Phase::Empty);
        assert!(text.contains("No source video loaded"));

        let text = render(&mut view, &GalleryState::new(), Phase::NoClips);
        assert!(text.contains("No clips were generated"));

        // stale clips stay hidden while generating
        let text = render(&mut view, &gallery(3), Phase::Generating);
        assert!(text.contains("Generating clips"));
        assert!(text.contains("Probing source video"));
        assert!(!text.contains("Clip 0"));
        assert!(view.slots().is_empty());
    }

    #[test]
    fn test_regenerate_button_only_when_settled() {
        let mut view = GalleryComponent::new();
        render(&mut view, &gallery(1), Phase::Generating);
        assert!(view.regenerate_button.is_none());

        render(&mut view, &GalleryState::new(), Phase::NoClips);
        let button = view.regenerate_button.unwrap();
        assert_eq!(view.hit_test(button.x, button.y), Some(GalleryHit::Regenerate));
    }

    #[test]
    fn test_click_on_export_only_exports() {
        let mut view = GalleryComponent::new();
        render(&mut view, &gallery(3), Phase::Ready);

        let slot = view.slots()[1];
        let b = slot.export_button;
        let action = view
            .handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), b.x, b.y))
            .unwrap();
        assert_eq!(action, Some(Action::ExportClip(1)));

        let action = view
            .handle_mouse_event(mouse(
                MouseEventKind::Down(MouseButton::Left),
                slot.area.x + 2,
                slot.area.y + 1,
            ))
            .unwrap();
        assert_eq!(action, Some(Action::SelectClip(1)));
    }

    #[test]
    fn test_hover_enter_and_leave() {
        let mut view = GalleryComponent::new();
        render(&mut view, &gallery(3), Phase::Ready);

        let slot = view.slots()[2];
        let action = view
            .handle_mouse_event(mouse(MouseEventKind::Moved, slot.area.x + 1, slot.area.y + 1))
            .unwrap();
        assert_eq!(action, Some(Action::HoverClip(Some(2))));

        let b = slot.export_button;
        let action = view
            .handle_mouse_event(mouse(MouseEventKind::Moved, b.x, b.y))
            .unwrap();
        assert_eq!(action, Some(Action::HoverClip(Some(2))));

        let action = view
            .handle_mouse_event(mouse(MouseEventKind::Moved, 0, 0))
            .unwrap();
        assert_eq!(action, Some(Action::HoverClip(None)));
    }

    #[test]
    fn test_key_bindings() {
        let mut view = GalleryComponent::new();
        assert_eq!(view.handle_key_event(key(KeyCode::Left)).unwrap(), Some(Action::PrevClip));
        assert_eq!(view.handle_key_event(key(KeyCode::Char('l'))).unwrap(), Some(Action::NextClip));
        assert_eq!(view.handle_key_event(key(KeyCode::Enter)).unwrap(), Some(Action::SelectCurrent));
        assert_eq!(view.handle_key_event(key(KeyCode::Char('x'))).unwrap(), Some(Action::ExportCurrent));
        assert_eq!(view.handle_key_event(key(KeyCode::Char('r'))).unwrap(), Some(Action::Regenerate));
        assert_eq!(view.handle_key_event(key(KeyCode::Char('z'))).unwrap(), None);
    }
}
