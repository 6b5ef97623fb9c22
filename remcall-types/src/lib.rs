//! # remcall-types: shared vocabulary for remote function invocation
//!
//! This crate defines the value model and the boundaries that every other
//! remcall crate composes against.
//!
//! | Concern | Types | What it does |
//! |---------|-------|-------------|
//! | Values | [`ParamType`], [`ParamValue`] | Closed set of wire-level value shapes |
//! | Parameters | [`Parameter`], [`ParamObserver`] | Named, typed, described value slots |
//! | Native boundary | [`Connection`], [`Connector`], [`NativeReply`] | The vendor call, consumed not implemented |
//! | Results | [`InvocationResult`], [`Outcome`] | Uniform structured result of one call |
//! | Status codes | [`StatusCode`] | Fixed code → description table |
//! | Notifications | [`Notification`], [`NotificationSink`] | Events toward an external log sink |
//! | Configuration | [`ConnectionConfig`] | Host, timeout, and offline mode |
//!
//! ## Value model
//!
//! Every remote call shape is expressed with [`ParamType`]: scalars
//! (`bool`, `uint8`, `int16`, `int32`, `int64`, `float32`, `float64`,
//! `string`, `datetime`) and arrays of any of them, nested arbitrarily.
//! There is no runtime type introspection: a value is assignable to a
//! parameter exactly when [`ParamValue::conforms_to`] says so.

#![deny(missing_docs)]

pub mod config;
pub mod connection;
pub mod duration;
pub mod error;
pub mod notify;
pub mod param;
pub mod result;
pub mod status;
pub mod value;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use config::ConnectionConfig;
pub use connection::{Connection, Connector, NativeReply};
pub use duration::DurationMs;
pub use error::{ConfigError, NativeFault, ParamError};
pub use notify::{Notification, NotificationSink, Severity};
pub use param::{ParamChange, ParamObserver, ParamSnapshot, Parameter};
pub use result::{FailureKind, InvocationResult, Outcome, format_result};
pub use status::{StatusCode, describe_status};
pub use value::{ParamType, ParamValue, TypedValue};
