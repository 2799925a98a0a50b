//! Transient success/error notifications (toasts)

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

/// Default time a notification stays visible
pub const DEFAULT_AUTO_HIDE: Duration = Duration::from_millis(6000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Why a close was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Close button or equivalent
    Explicit,
    /// Auto-hide duration elapsed
    Timeout,
    /// Interaction outside the notification; ignored
    ClickAway,
}

/// What the notification currently shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub visible: bool,
    pub severity: Severity,
    pub message: String,
}

impl Default for Notification {
    fn default() -> Self {
        Self {
            visible: false,
            severity: Severity::Success,
            message: String::new(),
        }
    }
}

/// Notification presenter with auto-hide
#[derive(Debug, Clone)]
pub struct Toast {
    current: Notification,
    shown_at: Option<Instant>,
    auto_hide: Duration,
}

impl Default for Toast {
    fn default() -> Self {
        Self::new(DEFAULT_AUTO_HIDE)
    }
}

impl Toast {
    pub fn new(auto_hide: Duration) -> Self {
        Self {
            current: Notification::default(),
            shown_at: None,
            auto_hide,
        }
    }

    pub fn current(&self) -> &Notification {
        &self.current
    }

    pub fn is_visible(&self) -> bool {
        self.current.visible
    }

    pub fn auto_hide(&self) -> Duration {
        self.auto_hide
    }

    /// Replace whatever is shown and restart the auto-hide clock
    pub fn show(&mut self, severity: Severity, message: impl Into<String>) {
        self.show_at(severity, message, Instant::now());
    }

    pub fn show_at(&mut self, severity: Severity, message: impl Into<String>, now: Instant) {
        self.current = Notification {
            visible: true,
            severity,
            message: message.into(),
        };
        self.shown_at = Some(now);
        tracing::debug!(%severity, message = %self.current.message, "notification shown");
    }

    /// Hide the notification unless the reason is a click-away.
    ///
    /// Returns whether the notification was closed.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if reason == CloseReason::ClickAway || !self.current.visible {
            return false;
        }
        self.current.visible = false;
        self.shown_at = None;
        tracing::debug!(?reason, "notification closed");
        true
    }

    /// Close with `Timeout` once the auto-hide duration has elapsed
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.shown_at {
            Some(shown) if now.saturating_duration_since(shown) >= self.auto_hide => {
                self.close(CloseReason::Timeout)
            }
            _ => false,
        }
    }
}
