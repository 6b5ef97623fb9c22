//! The native call boundary.
//!
//! The vendor library lives behind [`Connection`]. Each remote function
//! wraps exactly one native operation, identified by name; inputs go in as
//! an ordered argument list and outputs come back in declared order with a
//! numeric status code. This crate consumes the boundary, it never
//! implements the protocol behind it.

use std::sync::Arc;

use crate::config::ConnectionConfig;
use crate::error::NativeFault;
use crate::value::ParamValue;

/// What the native call returned.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeReply {
    /// Device status code. `0` is success.
    pub status: i16,
    /// Output values in declared order. `None` is a null from the native
    /// side; for array outputs it is stored as an empty array.
    pub outputs: Vec<Option<ParamValue>>,
}

impl NativeReply {
    /// A successful reply carrying `outputs`.
    pub fn ok(outputs: Vec<Option<ParamValue>>) -> Self {
        Self { status: 0, outputs }
    }

    /// A reply with only a status code.
    pub fn status(status: i16) -> Self {
        Self {
            status,
            outputs: Vec::new(),
        }
    }
}

/// An open handle to one remote machine.
///
/// Shared read-only by every function bound to it. `call` is blocking;
/// asynchrony is layered by the caller.
pub trait Connection: Send + Sync {
    /// Whether the handle currently reports a live connection.
    fn is_connected(&self) -> bool;

    /// Invoke the native operation `function` with `args` in declared order.
    fn call(&self, function: &str, args: &[ParamValue]) -> Result<NativeReply, NativeFault>;
}

/// Opens connections from validated configuration.
pub trait Connector: Send + Sync {
    /// Open a connection to the configured host.
    fn connect(&self, config: &ConnectionConfig) -> Result<Arc<dyn Connection>, NativeFault>;
}
