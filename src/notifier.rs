//! # Module: Status Notifier
//!
//! ## Responsibility
//! Transient user-facing message channel. Any component can post a message;
//! the dashboard shows at most one at a time and keeps a bounded history for
//! the activity panel.
//!
//! ## Guarantees
//! - A new message supersedes the visible one
//! - A message is visible only until its time-to-live elapses or it is
//!   dismissed
//! - History is bounded; the oldest entry is evicted first
//!
//! ## NOT Responsible For
//! - Persisting messages across sessions

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Default time a message stays visible.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

/// Maximum number of messages retained in history.
pub const HISTORY_CAP: usize = 50;

/// Message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Informational.
    Info,
    /// Operation succeeded.
    Success,
    /// Degraded but recoverable.
    Warning,
    /// Operation failed.
    Danger,
}

impl Severity {
    /// Fixed-width label for the activity panel.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "INFO   ",
            Self::Success => "SUCCESS",
            Self::Warning => "WARNING",
            Self::Danger => "DANGER ",
        }
    }
}

/// One posted message.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    /// Message text.
    pub message: String,
    /// Severity.
    pub severity: Severity,
    /// When the message was posted.
    pub posted_at: Instant,
    /// Local wall-clock time of posting, `HH:MM:SS`.
    pub clock: String,
}

#[derive(Debug)]
struct NotifierInner {
    current: Option<Notice>,
    history: VecDeque<Notice>,
    ttl: Duration,
}

/// Cloneable handle to the shared message channel.
#[derive(Debug, Clone)]
pub struct Notifier {
    inner: Arc<Mutex<NotifierInner>>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl Notifier {
    /// Creates a notifier whose messages self-dismiss after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(NotifierInner {
                current: None,
                history: VecDeque::with_capacity(HISTORY_CAP),
                ttl,
            })),
        }
    }

    /// Posts a message, superseding any visible one.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) {
        self.notify_at(message, severity, Instant::now());
    }

    /// Posts a message with an explicit timestamp.
    pub fn notify_at(&self, message: impl Into<String>, severity: Severity, now: Instant) {
        let notice = Notice {
            message: message.into(),
            severity,
            posted_at: now,
            clock: crate::format::format_clock(&chrono::Local::now()),
        };
        match severity {
            Severity::Danger => tracing::error!(message = %notice.message, "notice"),
            Severity::Warning => tracing::warn!(message = %notice.message, "notice"),
            Severity::Info | Severity::Success => {
                tracing::info!(message = %notice.message, "notice")
            }
        }

        let mut inner = self.inner.lock();
        if inner.history.len() >= HISTORY_CAP {
            inner.history.pop_front();
        }
        inner.history.push_back(notice.clone());
        inner.current = Some(notice);
    }

    /// Dismisses the visible message early.
    pub fn dismiss(&self) {
        self.inner.lock().current = None;
    }

    /// The message visible at `now`, if any.
    pub fn visible_at(&self, now: Instant) -> Option<Notice> {
        let mut inner = self.inner.lock();
        let expired = match &inner.current {
            Some(n) => now.saturating_duration_since(n.posted_at) >= inner.ttl,
            None => return None,
        };
        if expired {
            inner.current = None;
            return None;
        }
        inner.current.clone()
    }

    /// The message visible now, if any.
    pub fn visible(&self) -> Option<Notice> {
        self.visible_at(Instant::now())
    }

    /// Snapshot of the message history, oldest first.
    pub fn history(&self) -> Vec<Notice> {
        self.inner.lock().history.iter().cloned().collect()
    }

    /// Number of retained messages with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.inner
            .lock()
            .history
            .iter()
            .filter(|n| n.severity == severity)
            .count()
    }

    /// Clears the visible message and the history.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.current = None;
        inner.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_supersedes_visible() {
        let n = Notifier::default();
        let t0 = Instant::now();
        n.notify_at("first", Severity::Info, t0);
        n.notify_at("second", Severity::Danger, t0);
        let visible = n.visible_at(t0).map(|v| v.message);
        assert_eq!(visible.as_deref(), Some("second"));
        assert_eq!(n.history().len(), 2);
    }

    #[test]
    fn test_message_self_dismisses_after_ttl() {
        let n = Notifier::new(Duration::from_secs(5));
        let t0 = Instant::now();
        n.notify_at("hello", Severity::Success, t0);
        assert!(n.visible_at(t0 + Duration::from_millis(4_999)).is_some());
        assert!(n.visible_at(t0 + Duration::from_secs(5)).is_none());
        // stays gone once expired
        assert!(n.visible_at(t0).is_none());
    }

    #[test]
    fn test_superseding_restarts_ttl() {
        let n = Notifier::new(Duration::from_secs(5));
        let t0 = Instant::now();
        n.notify_at("one", Severity::Info, t0);
        n.notify_at("two", Severity::Info, t0 + Duration::from_secs(4));
        let visible = n.visible_at(t0 + Duration::from_secs(6)).map(|v| v.message);
        assert_eq!(visible.as_deref(), Some("two"));
    }

    #[test]
    fn test_dismiss_clears_visible_but_keeps_history() {
        let n = Notifier::default();
        n.notify("bye", Severity::Warning);
        n.dismiss();
        assert!(n.visible().is_none());
        assert_eq!(n.count(Severity::Warning), 1);
    }

    #[test]
    fn test_history_bounded() {
        let n = Notifier::default();
        for i in 0..(HISTORY_CAP + 7) {
            n.notify(format!("m{i}"), Severity::Info);
        }
        let history = n.history();
        assert_eq!(history.len(), HISTORY_CAP);
        assert_eq!(history.first().map(|h| h.message.as_str()), Some("m7"));
    }

    #[test]
    fn test_clones_share_state() {
        let a = Notifier::default();
        let b = a.clone();
        b.notify("shared", Severity::Danger);
        assert_eq!(a.count(Severity::Danger), 1);
        a.clear();
        assert!(b.history().is_empty());
    }

    #[test]
    fn test_severity_labels_fixed_width() {
        for s in [Severity::Info, Severity::Success, Severity::Warning, Severity::Danger] {
            assert_eq!(s.label().len(), 7);
        }
    }
}
