//! Error types for parameters, the native boundary, and configuration.

use crate::value::ParamType;
use thiserror::Error;

/// Parameter assignment and lookup errors.
///
/// These are usage errors: they surface immediately to whoever tried the
/// assignment and are never deferred to invocation time.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// A value was assigned to a parameter whose declared type it does not match.
    #[error("parameter {name}: value of type {actual} is not compatible with declared type {expected}")]
    TypeMismatch {
        /// Parameter name.
        name: String,
        /// The parameter's declared type.
        expected: ParamType,
        /// The runtime type of the rejected value.
        actual: ParamType,
    },

    /// No parameter with this name exists in the list.
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// Two parameters in the same list share a name.
    #[error("duplicate parameter: {0}")]
    DuplicateParameter(String),

    /// An array item does not match the array's element type.
    #[error("array element of type {actual} does not match element type {expected}")]
    InvalidArray {
        /// The declared element type.
        expected: ParamType,
        /// The offending item's type.
        actual: ParamType,
    },
}

/// HRESULT-style code for an invalid handle.
const E_HANDLE: i32 = 0x8007_0006_u32 as i32;
/// HRESULT-style code for an invalid argument.
const E_INVALIDARG: i32 = 0x8007_0057_u32 as i32;
/// HRESULT-style code for a marshaling failure.
const E_MARSHAL: i32 = 0x8013_1535_u32 as i32;
/// HRESULT-style code for an I/O failure.
const E_IO: i32 = 0x8013_1620_u32 as i32;
/// HRESULT-style code for a missing handle.
const E_POINTER: i32 = 0x8000_4003_u32 as i32;

/// The native call could not be completed at all.
///
/// Distinct from a non-zero status code: a status code means the remote
/// device answered, a fault means the call never got that far.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NativeFault {
    /// The connection handle is invalid or has been disposed.
    #[error("invalid connection handle: {0}")]
    InvalidHandle(String),

    /// Input values could not be marshaled into the native argument list.
    #[error("argument marshaling failed: {0}")]
    Marshaling(String),

    /// The native layer rejected an argument.
    #[error("invalid argument: {0}")]
    Argument(String),

    /// Transport-level failure (socket closed, library not loaded, etc.).
    #[error("transport failure: {0}")]
    Transport(String),

    /// No connection handle is bound to the function.
    #[error("no connection handle bound")]
    Unbound,
}

impl NativeFault {
    /// Fault-specific numeric code reported as the result code.
    ///
    /// Codes are negative HRESULT-style values and never collide with
    /// device status codes, which are small non-negative numbers.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidHandle(_) => E_HANDLE,
            Self::Marshaling(_) => E_MARSHAL,
            Self::Argument(_) => E_INVALIDARG,
            Self::Transport(_) => E_IO,
            Self::Unbound => E_POINTER,
        }
    }
}

/// Connection configuration errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The host string is empty or whitespace.
    #[error("host must not be empty")]
    EmptyHost,

    /// The timeout is zero.
    #[error("timeout must be positive")]
    InvalidTimeout,

    /// The config document could not be parsed.
    #[error("config parse error: {0}")]
    Parse(String),

    /// An environment override holds an unusable value.
    #[error("environment variable {var}: {reason}")]
    Env {
        /// Variable name.
        var: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
