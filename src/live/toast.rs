//! Ephemeral notifications
//!
//! At most one toast is visible. Showing a new one replaces the current one
//! and invalidates the dismissal scheduled for it: each toast gets a
//! generation number and only a dismissal carrying the current generation
//! takes effect.

use std::time::Duration;

use crate::protocol::ToastData;

/// Used when the server sends `toast_time: 0`
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(5000);

/// Display style derived from the message text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Info,
    Neutral,
}

impl Severity {
    /// `disconnected` must be checked before `connected`, which it contains
    pub fn classify(message: &str) -> Self {
        if message.contains("disconnected") {
            Severity::Error
        } else if message.contains("connected") {
            Severity::Info
        } else {
            Severity::Neutral
        }
    }
}

/// A notification ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub color: String,
    pub duration: Duration,
    pub severity: Severity,
}

impl From<ToastData> for Toast {
    fn from(data: ToastData) -> Self {
        let duration = if data.toast_time == 0 {
            DEFAULT_TOAST_DURATION
        } else {
            Duration::from_millis(data.toast_time)
        };

        Self {
            severity: Severity::classify(&data.message),
            message: data.message,
            color: data.color,
            duration,
        }
    }
}

/// Tells the host environment when to call [`ToastChannel::dismiss`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissTicket {
    pub generation: u64,
    pub after: Duration,
}

/// Last-writer-wins toast slot
#[derive(Debug, Default)]
pub struct ToastChannel {
    current: Option<Toast>,
    generation: u64,
}

impl ToastChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast, replacing whatever is visible
    pub fn show(&mut self, toast: Toast) -> DismissTicket {
        self.generation += 1;
        let ticket = DismissTicket {
            generation: self.generation,
            after: toast.duration,
        };
        self.current = Some(toast);
        ticket
    }

    /// Dismiss the toast of `generation`; stale tickets are ignored
    pub fn dismiss(&mut self, generation: u64) -> bool {
        if generation == self.generation && self.current.is_some() {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Dismiss immediately (user closed it)
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(message: &str, toast_time: u64) -> ToastData {
        ToastData {
            message: message.to_string(),
            color: "blue".to_string(),
            toast_time,
        }
    }

    #[test]
    fn test_severity_classification() {
        assert_eq!(Severity::classify("desk disconnected"), Severity::Error);
        assert_eq!(Severity::classify("desk connected"), Severity::Info);
        assert_eq!(Severity::classify("hello"), Severity::Neutral);
    }

    #[test]
    fn test_zero_duration_uses_default() {
        let toast = Toast::from(data("x", 0));
        assert_eq!(toast.duration, DEFAULT_TOAST_DURATION);
        let toast = Toast::from(data("x", 1200));
        assert_eq!(toast.duration, Duration::from_millis(1200));
    }

    #[test]
    fn test_last_writer_wins() {
        let mut channel = ToastChannel::new();
        let first = channel.show(Toast::from(data("first", 1000)));
        let second = channel.show(Toast::from(data("second", 3000)));

        // The first toast's timer fires but must not hide the second one
        assert!(!channel.dismiss(first.generation));
        assert_eq!(channel.current().unwrap().message, "second");

        assert!(channel.dismiss(second.generation));
        assert!(channel.current().is_none());
    }

    #[test]
    fn test_clear() {
        let mut channel = ToastChannel::new();
        let ticket = channel.show(Toast::from(data("x", 10)));
        channel.clear();
        assert!(channel.current().is_none());
        assert!(!channel.dismiss(ticket.generation));
    }
}
