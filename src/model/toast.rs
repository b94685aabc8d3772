//! Transient user-facing notifications

use chrono::{DateTime, Local};

/// Severity of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl ToastLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastLevel::Info => "ℹ",
            ToastLevel::Success => "✓",
            ToastLevel::Error => "✗",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub created_at: DateTime<Local>,
    /// Ticks left before the toast disappears
    pub ticks_left: u32,
}

impl Toast {
    pub fn formatted_time(&self) -> String {
        self.created_at.format("%H:%M:%S").to_string()
    }
}

/// Anything that can show a notification to the user
pub trait Notifier {
    fn notify(&mut self, level: ToastLevel, message: String);

    fn success(&mut self, message: String) {
        self.notify(ToastLevel::Success, message);
    }

    fn error(&mut self, message: String) {
        self.notify(ToastLevel::Error, message);
    }
}

/// Queue of live toasts, newest last
#[derive(Debug)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    lifetime_ticks: u32,
}

impl ToastQueue {
    pub fn new(lifetime_ticks: u32) -> Self {
        Self {
            toasts: Vec::new(),
            lifetime_ticks: lifetime_ticks.max(1),
        }
    }

    /// Age all toasts by one tick and drop the expired ones
    pub fn tick(&mut self) {
        for toast in &mut self.toasts {
            toast.ticks_left = toast.ticks_left.saturating_sub(1);
        }
        self.toasts.retain(|t| t.ticks_left > 0);
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn dismiss_latest(&mut self) {
        self.toasts.pop();
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, level: ToastLevel, message: String) {
        tracing::info!(?level, %message, "toast");
        self.toasts.push(Toast {
            level,
            message,
            created_at: Local::now(),
            ticks_left: self.lifetime_ticks,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expires_after_lifetime() {
        let mut queue = ToastQueue::new(2);
        queue.success("done".to_string());
        assert_eq!(queue.len(), 1);

        queue.tick();
        assert_eq!(queue.len(), 1);
        queue.tick();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_latest_is_newest() {
        let mut queue = ToastQueue::new(10);
        queue.success("first".to_string());
        queue.error("second".to_string());

        let latest = queue.latest().unwrap();
        assert_eq!(latest.message, "second");
        assert_eq!(latest.level, ToastLevel::Error);

        queue.dismiss_latest();
        assert_eq!(queue.latest().unwrap().message, "first");
    }

    #[test]
    fn test_zero_lifetime_still_shows_once() {
        let mut queue = ToastQueue::new(0);
        queue.success("hi".to_string());
        assert_eq!(queue.len(), 1);
        queue.tick();
        assert!(queue.is_empty());
    }
}
