#![deny(missing_docs)]
//! Remote function descriptors, the invoker, and the function registry.
//!
//! A [`CallSpec`] declares one native operation: its name, description,
//! signature text, tags, and ordered typed input/output slots. A
//! [`RemoteFunction`] instantiates a spec, owns its parameter lists, and
//! executes the operation against a bound [`Connection`], always producing
//! an [`InvocationResult`]. The [`FunctionRegistry`] holds many functions
//! bound to the same connection.
//!
//! [`Connection`]: remcall_types::Connection
//! [`InvocationResult`]: remcall_types::InvocationResult

pub mod call_spec;
pub mod function;
pub mod registry;
pub mod task;

pub use call_spec::{CallSpec, RangeSpec, SlotSpec};
pub use function::{Phase, RemoteFunction};
pub use registry::{FunctionRegistry, RegistryError};
pub use task::spawn_execute;
