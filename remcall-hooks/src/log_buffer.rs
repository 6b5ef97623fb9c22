//! Bounded in-memory log of recent notifications.

use remcall_types::{Notification, NotificationSink, Severity};
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Capacity of [`LogBuffer::default`].
pub const DEFAULT_LOG_CAPACITY: usize = 1000;

/// Keeps the most recent notifications, evicting the oldest when full.
///
/// Backs log views: read everything with [`latest`](Self::latest) or only
/// what clears a severity threshold with [`filtered`](Self::filtered).
pub struct LogBuffer {
    capacity: NonZeroUsize,
    entries: Mutex<VecDeque<Notification>>,
}

impl LogBuffer {
    /// Create a buffer holding at most `capacity` entries.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity.get())),
        }
    }

    /// Maximum number of entries kept.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// All held entries, oldest first.
    pub fn latest(&self) -> Vec<Notification> {
        self.entries().iter().cloned().collect()
    }

    /// Held entries at or above `min`, oldest first.
    pub fn filtered(&self, min: Severity) -> Vec<Notification> {
        self.entries()
            .iter()
            .filter(|n| n.severity >= min)
            .cloned()
            .collect()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries().clear();
    }

    fn entries(&self) -> MutexGuard<'_, VecDeque<Notification>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_LOG_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}

impl NotificationSink for LogBuffer {
    fn notify(&self, notification: &Notification) {
        let mut entries = self.entries();
        while entries.len() >= self.capacity.get() {
            entries.pop_front();
        }
        entries.push_back(notification.clone());
    }
}
