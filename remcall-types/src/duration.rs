//! Millisecond timeouts.
//!
//! [`DurationMs`] is a plain integer on the wire, so `"timeout": 5000` in a
//! config file and `REMCALL_TIMEOUT_MS=5000` in the environment mean the
//! same thing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A timeout in whole milliseconds.
///
/// # Examples
///
/// ```
/// use remcall_types::DurationMs;
///
/// let timeout = DurationMs::from_millis(2500);
/// assert_eq!(serde_json::to_string(&timeout).unwrap(), "2500");
/// assert_eq!(timeout.to_std().as_secs_f32(), 2.5);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DurationMs(u64);

impl DurationMs {
    /// No timeout. Rejected by config validation.
    pub const ZERO: Self = Self(0);

    /// Wrap a millisecond count.
    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// The millisecond count.
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Whether this is [`DurationMs::ZERO`].
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// As a [`Duration`], for handing to socket and connect APIs.
    pub fn to_std(&self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl From<DurationMs> for Duration {
    fn from(timeout: DurationMs) -> Self {
        timeout.to_std()
    }
}

impl fmt::Display for DurationMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ms", self.0)
    }
}
