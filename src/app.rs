//! Root application component
//!
//! The App owns the gallery state, toasts and modal stack, routes input to
//! the child components and hands clip intents to the backend through the
//! dispatcher. It is generic over the backend so it can be driven without
//! ffmpeg in tests.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    clip_details, draw_gallery_screen, help_dialog, GalleryComponent, GalleryRenderContext,
    QuitDialog,
};
use crate::config::Config;
use crate::dispatch;
use crate::model::clip::Clip;
use crate::model::gallery::GalleryState;
use crate::model::modal::{Modal, ModalStack};
use crate::model::phase::Phase;
use crate::model::toast::{Notifier, ToastLevel, ToastQueue};
use crate::services::{ClipBackend, ServiceNotice};
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

pub struct App<B: ClipBackend> {
    pub should_quit: bool,

    /// Clips, cursor and hover
    pub gallery: GalleryState,

    /// Generation, export and preview
    pub backend: B,

    pub toasts: ToastQueue,

    pub modals: ModalStack,

    /// Drives the spinner
    pub tick_count: u64,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub gallery_view: GalleryComponent,
    pub quit_dialog: QuitDialog,
}

impl<B: ClipBackend> App<B> {
    /// Create the app. Without `initial_clips` a loaded source is generated
    /// from right away.
    pub fn new(config: &Config, backend: B, initial_clips: Option<Vec<Clip>>) -> Self {
        let mut app = Self {
            should_quit: false,
            gallery: GalleryState::new(),
            backend,
            toasts: ToastQueue::new(config.toast_ticks),
            modals: ModalStack::new(),
            tick_count: 0,
            gallery_view: GalleryComponent::new(),
            quit_dialog: QuitDialog::default(),
        };

        match initial_clips {
            Some(clips) => {
                tracing::info!("starting with {} imported clips", clips.len());
                app.gallery = GalleryState::with_clips(clips);
            }
            None if app.backend.source_present() => {
                dispatch::regenerate(&mut app.backend);
                app.drain_notices();
            }
            None => {}
        }
        app
    }

    pub fn phase(&self) -> Phase {
        self.gallery
            .phase(self.backend.source_present(), self.backend.is_generating())
    }

    /// Swap in a fresh clip set
    fn apply_clips(&mut self, clips: Vec<Clip>) {
        self.gallery.replace_clips(clips);
        tracing::info!(
            generation = self.gallery.generation(),
            "clip set replaced: {} clips",
            self.gallery.len()
        );
        self.gallery_view.reset_scroll();
        self.modals
            .remove_where(|m| matches!(m, Modal::ClipDetails { .. }));
    }

    /// Move service notices into the toast queue
    fn drain_notices(&mut self) {
        for notice in self.backend.take_notices() {
            match notice {
                ServiceNotice::Info(msg) => self.toasts.notify(ToastLevel::Info, msg),
                ServiceNotice::Success(msg) => self.toasts.success(msg),
                ServiceNotice::Error(msg) => self.toasts.error(msg),
            }
        }
    }

    /// Index of a clip the user can act on right now
    fn actionable(&self, index: usize) -> Option<usize> {
        (self.phase() == Phase::Ready && index < self.gallery.len()).then_some(index)
    }

    fn select(&mut self, index: usize) {
        let Some(index) = self.actionable(index) else {
            return;
        };
        if let Some(clip) = self.gallery.get(index) {
            dispatch::select_clip(&mut self.backend, clip);
        }
        self.drain_notices();
    }

    fn export(&mut self, index: usize) {
        let Some(index) = self.actionable(index) else {
            return;
        };
        if let Some(clip) = self.gallery.get(index) {
            dispatch::export_clip(&mut self.backend, &mut self.toasts, clip);
        }
        self.drain_notices();
    }

    fn regenerate(&mut self) {
        if !self.phase().can_regenerate() {
            tracing::debug!("regenerate ignored in phase {:?}", self.phase());
            return;
        }
        self.modals
            .remove_where(|m| matches!(m, Modal::ClipDetails { .. }));
        dispatch::regenerate(&mut self.backend);
        self.drain_notices();
    }

    fn move_cursor(&mut self, apply: impl FnOnce(&mut GalleryState)) {
        if self.phase() != Phase::Ready {
            return;
        }
        apply(&mut self.gallery);
        self.gallery_view.ensure_visible(self.gallery.selected_index());
    }

    fn handle_modal_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.modals.top_mut() {
            Some(Modal::QuitConfirm) => self.quit_dialog.handle_key_event(key),
            Some(Modal::Help { scroll_offset }) => Ok(help_dialog::handle_key(key, scroll_offset)),
            Some(Modal::ClipDetails { .. }) => Ok(clip_details::handle_key(key)),
            None => Ok(None),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match self.modals.top_mut() {
            Some(Modal::QuitConfirm) => self.quit_dialog.draw(frame, area)?,
            Some(Modal::Help { scroll_offset }) => help_dialog::draw(frame, area, scroll_offset),
            Some(Modal::ClipDetails { clip_id }) => {
                let clip = self.gallery.clips().iter().find(|c| c.id == *clip_id);
                clip_details::draw(frame, area, clip);
            }
            None => {}
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl<B: ClipBackend> Component for App<B> {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.modals.is_empty() {
            self.gallery_view.handle_key_event(key)
        } else {
            self.handle_modal_key_event(key)
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        // Cards under a dialog are not interactive
        if !self.modals.is_empty() {
            return Ok(None);
        }
        self.gallery_view.handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                self.tick_count = self.tick_count.wrapping_add(1);
                self.toasts.tick();
                if let Some(clips) = self.backend.poll() {
                    self.apply_clips(clips);
                }
                self.drain_notices();
            }
            Action::Resize(w, h) => {
                tracing::debug!("resized to {}x{}", w, h);
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::PrevClip => self.move_cursor(|g| g.move_selection(-1)),
            Action::NextClip => self.move_cursor(|g| g.move_selection(1)),
            Action::FirstClip => self.move_cursor(GalleryState::select_first),
            Action::LastClip => self.move_cursor(GalleryState::select_last),
            Action::ScrollGallery(delta) => {
                self.gallery_view.scroll(delta, self.gallery.len());
            }
            Action::HoverClip(index) => {
                let index = index.and_then(|i| self.actionable(i));
                self.gallery.set_hovered(index);
            }

            // ─────────────────────────────────────────────────────────────────
            // Clip Actions
            // ─────────────────────────────────────────────────────────────────
            Action::SelectClip(index) => self.select(index),
            Action::SelectCurrent => self.select(self.gallery.selected_index()),
            Action::ExportClip(index) => self.export(index),
            Action::ExportCurrent => self.export(self.gallery.selected_index()),
            Action::Regenerate => self.regenerate(),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.quit_dialog.pending_exports = self.backend.active_exports();
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.modals.push(Modal::Help { scroll_offset: 0 });
            }
            Action::OpenClipDetails => {
                if self.phase() == Phase::Ready {
                    if let Some(clip) = self.gallery.selected_clip() {
                        self.modals.push(Modal::ClipDetails {
                            clip_id: clip.id.clone(),
                        });
                    }
                }
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::DismissToast => {
                self.toasts.dismiss_latest();
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let source_name = self.backend.source_name();
        let ctx = GalleryRenderContext {
            gallery: &self.gallery,
            phase: self.phase(),
            source_name: source_name.as_deref(),
            progress: self.backend.progress(),
            toast: self.toasts.latest(),
            queued_toasts: self.toasts.len(),
            active_exports: self.backend.active_exports(),
            tick: self.tick_count,
        };
        draw_gallery_screen(frame, area, &mut self.gallery_view, &ctx)?;

        if self.modals.top().is_some() {
            self.draw_modal(frame, area)?;
        }
        Ok(())
    }
}
