//! User-facing transient notifications
//!
//! Every boundary failure (network, malformed response, missing credential)
//! is converted into a human-readable notice rather than an error that
//! propagates. Notices auto-dismiss: informational ones after a short
//! duration, errors after a longer one.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::debug;

/// How long informational notices stay visible
pub const INFO_DURATION: Duration = Duration::from_secs(4);

/// How long error notices stay visible
pub const ERROR_DURATION: Duration = Duration::from_secs(8);

/// Notice severity, which determines display duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

impl Severity {
    /// Display duration for this severity
    pub fn duration(self) -> Duration {
        match self {
            Severity::Info => INFO_DURATION,
            Severity::Error => ERROR_DURATION,
        }
    }
}

/// A single transient notice
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub severity: Severity,
    posted: Instant,
}

impl Notice {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity,
            posted: Instant::now(),
        }
    }

    /// Whether the notice has outlived its display duration
    pub fn is_expired(&self) -> bool {
        self.posted.elapsed() >= self.severity.duration()
    }
}

/// Sink for user-visible notices
pub trait Notify: Send + Sync {
    fn notify(&self, severity: Severity, text: &str);

    fn info(&self, text: &str) {
        self.notify(Severity::Info, text);
    }

    fn error(&self, text: &str) {
        self.notify(Severity::Error, text);
    }
}

/// Shared queue of live notices, rendered by the TUI
#[derive(Clone, Default)]
pub struct NoticeBoard {
    inner: Arc<RwLock<Vec<Notice>>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices still within their display window, oldest first
    pub fn active(&self) -> Vec<Notice> {
        let mut notices = self.inner.write().unwrap();
        notices.retain(|n| !n.is_expired());
        notices.clone()
    }
}

impl Notify for NoticeBoard {
    fn notify(&self, severity: Severity, text: &str) {
        debug!("notice ({:?}): {}", severity, text);
        self.inner
            .write()
            .unwrap()
            .push(Notice::new(severity, text));
    }
}

/// Notice sink for the one-shot CLI mode, printing to stderr
pub struct ConsoleNotifier;

impl Notify for ConsoleNotifier {
    fn notify(&self, severity: Severity, text: &str) {
        match severity {
            Severity::Info => eprintln!("{text}"),
            Severity::Error => eprintln!("error: {text}"),
        }
    }
}
