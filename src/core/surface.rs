//! # Notification/Modal Surface
//!
//! Transient overlays: a single toast slot and a set of named modals.
//!
//! The toast slot never queues. A new notification replaces whatever is
//! showing and its deadline is measured from the new call, so an earlier
//! notification's timer can never hide a later one.
//!
//! Modals share one scroll lock. It stays engaged while any modal is open,
//! and `hide_all_modals` always releases it.
//!
//! Time is passed in rather than read, so expiry is deterministic in tests.

use std::fmt;
use std::time::{Duration, Instant};

pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub duration: Duration,
}

#[derive(Debug, Clone)]
struct Toast {
    notification: Notification,
    hide_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    ArticleDetail,
    ProcessUrl,
}

impl fmt::Display for Modal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modal::ArticleDetail => write!(f, "article-detail"),
            Modal::ProcessUrl => write!(f, "process-url"),
        }
    }
}

#[derive(Debug, Default)]
pub struct Surface {
    toast: Option<Toast>,
    /// Open modals in opening order, no duplicates.
    open: Vec<Modal>,
    scroll_locked: bool,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `message`, pre-empting any visible toast and restarting the timer.
    pub fn notify(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        duration: Duration,
        now: Instant,
    ) {
        let notification = Notification {
            message: message.into(),
            severity,
            duration,
        };
        log::debug!(
            "Notification ({}): {}",
            severity.label(),
            notification.message
        );
        self.toast = Some(Toast {
            notification,
            hide_at: now + duration,
        });
    }

    /// The toast visible at `now`, if its deadline has not passed.
    pub fn visible_notification(&self, now: Instant) -> Option<&Notification> {
        self.toast
            .as_ref()
            .filter(|toast| now < toast.hide_at)
            .map(|toast| &toast.notification)
    }

    /// Drops an expired toast. Returns true if something was hidden.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.toast.as_ref().is_some_and(|toast| now >= toast.hide_at) {
            self.toast = None;
            return true;
        }
        false
    }

    /// When the current toast will hide, for scheduling redraws.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.toast.as_ref().map(|toast| toast.hide_at)
    }

    pub fn show_modal(&mut self, modal: Modal) {
        if !self.open.contains(&modal) {
            self.open.push(modal);
        }
        self.scroll_locked = true;
    }

    /// Hides one modal. The lock is released only when nothing else is open.
    pub fn hide_modal(&mut self, modal: Modal) {
        self.open.retain(|m| *m != modal);
        if self.open.is_empty() {
            self.scroll_locked = false;
        }
    }

    /// Escape / backdrop dismissal: closes everything and always unlocks.
    pub fn hide_all_modals(&mut self) {
        self.open.clear();
        self.scroll_locked = false;
    }

    pub fn is_open(&self, modal: Modal) -> bool {
        self.open.contains(&modal)
    }

    /// The most recently opened modal still showing.
    pub fn top_modal(&self) -> Option<Modal> {
        self.open.last().copied()
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }
}
