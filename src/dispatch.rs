//! Action dispatcher - forwards clip intents to external handlers
//!
//! The dispatcher holds no state. It only calls the handler and, for
//! exports, raises the confirmation toast.

use crate::model::clip::Clip;
use crate::model::toast::Notifier;

/// Receiver of user intents on the clip set
///
/// Implementations own failure handling; nothing is reported back here.
pub trait ClipHandler {
    /// Begin previewing the clip
    fn on_select_clip(&mut self, clip: &Clip);

    /// Discard the current clips and start a new generation pass
    fn on_regenerate(&mut self);

    /// Produce a downloadable file for the clip
    fn on_export(&mut self, clip: &Clip);
}

/// Confirmation shown as soon as an export is requested
pub fn export_notice(title: &str) -> String {
    format!("Downloading \"{}\"...", title)
}

pub fn select_clip<H: ClipHandler + ?Sized>(handler: &mut H, clip: &Clip) {
    tracing::debug!(clip = %clip.id, "select");
    handler.on_select_clip(clip);
}

pub fn regenerate<H: ClipHandler + ?Sized>(handler: &mut H) {
    tracing::debug!("regenerate");
    handler.on_regenerate();
}

/// Request an export and confirm it right away.
///
/// The confirmation is optimistic: it fires when the request is made, not
/// when the file exists. The export service reports the real outcome in a
/// later toast.
pub fn export_clip<H, N>(handler: &mut H, notifier: &mut N, clip: &Clip)
where
    H: ClipHandler + ?Sized,
    N: Notifier + ?Sized,
{
    tracing::debug!(clip = %clip.id, "export");
    handler.on_export(clip);
    notifier.success(export_notice(&clip.title));
}
