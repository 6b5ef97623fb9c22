#![deny(missing_docs)]
//! # remcall: umbrella crate
//!
//! A single import surface for the remcall crates. Re-exports the value
//! model and call boundary unconditionally, the invoker and sinks behind
//! `core`, and the CNC call catalog behind `catalog`, plus a `prelude`
//! for the happy path.

#[cfg(feature = "catalog")]
pub use remcall_catalog;
#[cfg(feature = "core")]
pub use remcall_function;
#[cfg(feature = "core")]
pub use remcall_hooks;
pub use remcall_types;

/// Happy-path imports for building and running remote functions.
pub mod prelude {
    pub use remcall_types::{
        Connection, ConnectionConfig, Connector, DurationMs, FailureKind, InvocationResult,
        NativeFault, NativeReply, Notification, NotificationSink, ParamError, ParamType,
        ParamValue, Severity,
    };

    #[cfg(feature = "core")]
    pub use remcall_function::{
        CallSpec, FunctionRegistry, RangeSpec, RemoteFunction, spawn_execute,
    };

    #[cfg(feature = "core")]
    pub use remcall_hooks::{LogBuffer, NotificationHub, TracingSink};

    #[cfg(feature = "catalog")]
    pub use remcall_catalog::{OfflineCnc, build_registry, catalog};
}
