//! Concrete [`NotificationSink`] using the [`tracing`] crate.
//!
//! Wire to any `tracing`-compatible subscriber (`tracing-subscriber` for
//! stdout, an OpenTelemetry layer for export).

use remcall_types::{Notification, NotificationSink, Severity};

/// A [`NotificationSink`] that emits structured [`tracing`] events.
///
/// # Levels
///
/// | Severity | Level |
/// |----------|-------|
/// | Debug | `DEBUG` |
/// | Info | `INFO` |
/// | Warning | `WARN` |
/// | Error | `ERROR` |
///
/// # Example
///
/// ```no_run
/// use remcall_hooks::{NotificationHub, TracingSink};
/// use std::sync::Arc;
///
/// let mut hub = NotificationHub::new();
/// hub.add(Arc::new(TracingSink::new()));
/// ```
pub struct TracingSink;

impl TracingSink {
    /// Create a new `TracingSink`.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for TracingSink {
    fn notify(&self, n: &Notification) {
        let source = n.source.as_str();
        let message = n.message.as_str();
        match n.severity {
            Severity::Debug => tracing::debug!(source, "{message}"),
            Severity::Info => tracing::info!(source, "{message}"),
            Severity::Warning => tracing::warn!(source, "{message}"),
            Severity::Error => tracing::error!(source, "{message}"),
        }
    }
}
