//! In-memory implementations for testing.
//!
//! Available behind the `test-utils` feature flag. These stand in for the
//! vendor library and for a log sink so invocation paths can be exercised
//! without hardware.

mod recording_sink;
mod stub_connection;

pub use recording_sink::RecordingSink;
pub use stub_connection::{RecordedCall, StubConnection};
