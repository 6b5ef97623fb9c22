#![deny(missing_docs)]
//! Declarative catalog of the CNC remote calls.
//!
//! Every call the controller library exposes is described here as a
//! [`CallSpec`]: name, description, native signature, tags, and typed
//! slots with their initial values. Nothing in this crate talks to a
//! machine; the call specs are instantiated against whatever [`Connection`] the
//! caller supplies.
//!
//! | Module | Calls |
//! |--------|-------|
//! | `system` | use time, information, status, machine time, part count, alarms, parameters, debug and system variables, clock |
//! | `motion` | positions, relative moves, G/other codes, spindle, work coordinates |
//! | `macros` | macro variables |
//! | `plc` | bits, registers, timers, counters, typed address access, ladder |
//! | `nc` | tool offsets, NC program pointer, memory and operation log |
//!
//! [`OfflineCnc`] answers every catalog call with status 0 and zero values,
//! for running the whole harness without hardware.

mod macros;
mod motion;
mod nc;
mod offline;
mod plc;
mod system;

pub use offline::OfflineCnc;

use std::sync::Arc;

use remcall_function::{CallSpec, FunctionRegistry, RegistryError};
use remcall_types::{Connection, ParamType};

/// Every catalog call, grouped by area in a stable order.
pub fn catalog() -> Vec<CallSpec> {
    let mut specs = system::specs();
    specs.extend(motion::specs());
    specs.extend(macros::specs());
    specs.extend(plc::specs());
    specs.extend(nc::specs());
    specs
}

/// Look up one catalog call by name.
pub fn find(name: &str) -> Option<CallSpec> {
    catalog().into_iter().find(|spec| spec.name == name)
}

/// Register every catalog call into `registry`.
pub fn register_catalog(registry: &mut FunctionRegistry) -> Result<(), RegistryError> {
    registry.register_all(catalog())?;
    tracing::debug!(functions = registry.len(), "remcall.catalog.registered");
    Ok(())
}

/// A registry holding one function per catalog call.
///
/// `connection` is bound to every function when given. With `offline`
/// set and no connection, an [`OfflineCnc`] is bound so that every call
/// succeeds with zero values.
pub fn build_registry(
    connection: Option<Arc<dyn Connection>>,
    offline: bool,
) -> Result<FunctionRegistry, RegistryError> {
    let connection = match connection {
        Some(connection) => Some(connection),
        None if offline => Some(Arc::new(OfflineCnc::new()) as Arc<dyn Connection>),
        None => None,
    };
    let mut registry = FunctionRegistry::new().offline(offline);
    if let Some(connection) = connection {
        registry = registry.with_connection(connection);
    }
    register_catalog(&mut registry)?;
    Ok(registry)
}

fn array(element: ParamType) -> ParamType {
    ParamType::array_of(element)
}

fn matrix(element: ParamType) -> ParamType {
    ParamType::array_of(ParamType::array_of(element))
}

fn default_download_dir() -> String {
    std::env::temp_dir().display().to_string()
}
