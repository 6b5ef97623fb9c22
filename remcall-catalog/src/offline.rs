//! A connection that answers without hardware.

use std::collections::HashMap;

use remcall_function::CallSpec;
use remcall_types::{Connection, NativeFault, NativeReply, ParamType, ParamValue};

/// Answers every known call with status 0 and the zero value of each
/// declared output. Arrays come back empty.
///
/// Unknown call names fault with [`NativeFault::Argument`].
///
/// # Example
///
/// ```
/// use remcall_catalog::OfflineCnc;
/// use remcall_types::Connection;
///
/// let cnc = OfflineCnc::new();
/// let reply = cnc.call("READ_part_count", &[]).unwrap();
/// assert_eq!(reply.status, 0);
/// assert_eq!(reply.outputs.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct OfflineCnc {
    outputs: HashMap<String, Vec<ParamType>>,
}

impl OfflineCnc {
    /// Offline answers for the whole catalog.
    pub fn new() -> Self {
        Self::from_specs(&crate::catalog())
    }

    /// Offline answers for `specs` only.
    pub fn from_specs(specs: &[CallSpec]) -> Self {
        let outputs = specs
            .iter()
            .map(|spec| {
                let types = spec.outputs.iter().map(|slot| slot.ty.clone()).collect();
                (spec.name.clone(), types)
            })
            .collect();
        Self { outputs }
    }

    /// Number of calls this connection answers.
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Whether no calls are known.
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

impl Default for OfflineCnc {
    fn default() -> Self {
        Self::new()
    }
}

impl Connection for OfflineCnc {
    fn is_connected(&self) -> bool {
        true
    }

    fn call(&self, function: &str, args: &[ParamValue]) -> Result<NativeReply, NativeFault> {
        let types = self
            .outputs
            .get(function)
            .ok_or_else(|| NativeFault::Argument(format!("unknown function {function}")))?;
        tracing::trace!(function, args = args.len(), "remcall.offline.call");
        Ok(NativeReply::ok(
            types.iter().map(|ty| Some(ty.default_value())).collect(),
        ))
    }
}
