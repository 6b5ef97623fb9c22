#![deny(missing_docs)]
//! Notification fan-out and built-in sinks for remcall.
//!
//! The [`NotificationHub`] collects multiple [`NotificationSink`]
//! implementations into an ordered pipeline. Each notification is
//! delivered to every sink in registration order, subject to the hub's
//! minimum severity. Sinks never influence the invocation that produced
//! the notification.

mod log_buffer;
mod tracing_sink;

pub use log_buffer::{DEFAULT_LOG_CAPACITY, LogBuffer};
pub use tracing_sink::TracingSink;

use remcall_types::{Notification, NotificationSink, Severity};
use std::sync::Arc;

/// A sink that forwards notifications to an ordered list of sinks.
pub struct NotificationHub {
    sinks: Vec<Arc<dyn NotificationSink>>,
    min_severity: Severity,
}

impl NotificationHub {
    /// Create an empty hub that forwards every severity.
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            min_severity: Severity::Debug,
        }
    }

    /// Drop notifications below `severity`.
    #[must_use]
    pub fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }

    /// Add a sink to the end of the pipeline.
    pub fn add(&mut self, sink: Arc<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    /// Number of registered sinks.
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether no sinks are registered.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// The minimum severity forwarded.
    pub fn min_severity(&self) -> Severity {
        self.min_severity
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for NotificationHub {
    fn notify(&self, notification: &Notification) {
        if notification.severity < self.min_severity {
            return;
        }
        for sink in &self.sinks {
            sink.notify(notification);
        }
    }
}
