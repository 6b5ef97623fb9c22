//! RecordingSink: records every notification.

use crate::notify::{Notification, NotificationSink, Severity};
use std::sync::Mutex;

/// A sink that keeps every notification it receives.
/// Use `.events()` to inspect what was recorded.
pub struct RecordingSink {
    events: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of all recorded notifications.
    pub fn events(&self) -> Vec<Notification> {
        self.events.lock().unwrap().clone()
    }

    /// Recorded notifications at exactly `severity`.
    pub fn with_severity(&self, severity: Severity) -> Vec<Notification> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.severity == severity)
            .cloned()
            .collect()
    }

    /// Number of recorded notifications at exactly `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.with_severity(severity).len()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: &Notification) {
        self.events.lock().unwrap().push(notification.clone());
    }
}
