//! Notification events emitted toward an external log sink.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Notification severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Diagnostic detail.
    Debug,
    /// Normal completion.
    Info,
    /// A precondition was not met; the caller can fix it.
    Warning,
    /// The operation failed.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// One notification event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Human-readable message.
    pub message: String,
    /// Severity.
    pub severity: Severity,
    /// When the event was created.
    pub timestamp: DateTime<Utc>,
    /// Emitting component, usually the remote function name.
    pub source: String,
}

impl Notification {
    /// Create a notification stamped with the current time.
    pub fn new(source: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            timestamp: Utc::now(),
            source: source.into(),
        }
    }

    /// `HH:MM:SS.mmm` form of the timestamp, for compact log lines.
    pub fn timestamp_string(&self) -> String {
        self.timestamp.format("%H:%M:%S%.3f").to_string()
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.timestamp_string(),
            self.severity,
            self.source,
            self.message
        )
    }
}

/// Receives notifications.
///
/// Sinks are called synchronously on the invoking thread and SHOULD
/// return quickly; buffering or forwarding is the sink's own business.
pub trait NotificationSink: Send + Sync {
    /// Deliver one notification.
    fn notify(&self, notification: &Notification);
}

impl<F> NotificationSink for F
where
    F: Fn(&Notification) + Send + Sync,
{
    fn notify(&self, notification: &Notification) {
        self(notification)
    }
}
