//! One remote function: descriptor plus invoker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use remcall_hooks::TracingSink;
use remcall_types::{
    Connection, InvocationResult, NativeFault, Notification, NotificationSink, ParamError,
    ParamObserver, ParamSnapshot, ParamValue, Parameter, Severity,
};

use crate::call_spec::{CallSpec, RangeSpec};

/// Where a function is in its invocation lifecycle.
///
/// `Idle → Validating → Invoking → {Succeeded, Failed}`. The terminal
/// state of the last invocation is kept until the next one starts or the
/// connection is rebound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Never invoked since construction or the last rebind.
    Idle,
    /// Checking preconditions.
    Validating,
    /// The native call is in flight.
    Invoking,
    /// The last invocation returned status 0.
    Succeeded,
    /// The last invocation failed.
    Failed,
}

struct Slots {
    inputs: Vec<Parameter>,
    outputs: Vec<Parameter>,
    connection: Option<Arc<dyn Connection>>,
    last_result: Option<InvocationResult>,
    phase: Phase,
}

/// A self-describing remote function bound to one connection.
///
/// Built from a [`CallSpec`]; owns its input and output parameters.
/// [`execute`](Self::execute) is blocking and never fails loudly: every
/// outcome, including a missing connection or a native fault, comes back
/// as an [`InvocationResult`] and exactly one Info, Warning, or Error
/// notification.
///
/// Only one invocation per instance may be in flight. A concurrent
/// [`execute`](Self::execute) is rejected with a `Rejected` result and a
/// Warning; it does not touch the in-flight invocation or `last_result`.
pub struct RemoteFunction {
    spec: CallSpec,
    offline_mode: bool,
    sink: Arc<dyn NotificationSink>,
    in_flight: AtomicBool,
    slots: Mutex<Slots>,
}

impl RemoteFunction {
    /// Build from a spec, with no connection, offline mode off, and
    /// notifications going to [`TracingSink`].
    ///
    /// Fails if slot names repeat or an initial value does not match
    /// its slot's type.
    pub fn new(spec: CallSpec) -> Result<Self, ParamError> {
        let inputs = spec.build_inputs()?;
        let outputs = spec.build_outputs()?;
        Ok(Self {
            spec,
            offline_mode: false,
            sink: Arc::new(TracingSink::new()),
            in_flight: AtomicBool::new(false),
            slots: Mutex::new(Slots {
                inputs,
                outputs,
                connection: None,
                last_result: None,
                phase: Phase::Idle,
            }),
        })
    }

    /// Bind a connection handle.
    #[must_use]
    pub fn with_connection(mut self, connection: Arc<dyn Connection>) -> Self {
        self.slots_mut().connection = Some(connection);
        self
    }

    /// Run even without a live connection.
    ///
    /// For exercising callers without hardware. The bound handle, if any,
    /// is still called; with no handle the invocation fails with a
    /// transport fault instead of `NotConnected`.
    #[must_use]
    pub fn offline(mut self, offline_mode: bool) -> Self {
        self.offline_mode = offline_mode;
        self
    }

    /// Send notifications to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Native call identifier.
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// What the call does.
    pub fn description(&self) -> &str {
        &self.spec.description
    }

    /// Native call shape.
    pub fn signature(&self) -> &str {
        &self.spec.signature
    }

    /// Categorization tags.
    pub fn tags(&self) -> &[String] {
        &self.spec.tags
    }

    /// Whether the function carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.spec.has_tag(tag)
    }

    /// The call spec this function was built from.
    pub fn definition(&self) -> &CallSpec {
        &self.spec
    }

    /// Whether offline mode is on.
    pub fn offline_mode(&self) -> bool {
        self.offline_mode
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.slots().phase
    }

    /// Whether an invocation is in flight.
    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Result of the last completed invocation since the last rebind.
    pub fn last_result(&self) -> Option<InvocationResult> {
        self.slots().last_result.clone()
    }

    /// Snapshot of the input parameters.
    pub fn inputs(&self) -> Vec<ParamSnapshot> {
        snapshot(&self.slots().inputs)
    }

    /// Snapshot of the output parameters.
    pub fn outputs(&self) -> Vec<ParamSnapshot> {
        snapshot(&self.slots().outputs)
    }

    /// Current value of input `name`.
    pub fn input_value(&self, name: &str) -> Option<ParamValue> {
        let slots = self.slots();
        find(&slots.inputs, name).and_then(|p| p.value().cloned())
    }

    /// Current value of output `name`.
    pub fn output_value(&self, name: &str) -> Option<ParamValue> {
        let slots = self.slots();
        find(&slots.outputs, name).and_then(|p| p.value().cloned())
    }

    /// Strictly assign input `name`.
    pub fn set_input(&self, name: &str, value: impl Into<ParamValue>) -> Result<(), ParamError> {
        let mut slots = self.slots();
        find_mut(&mut slots.inputs, name)?.set_value(value)
    }

    /// Forgivingly assign input `name` from an untyped value.
    ///
    /// Returns `false` for an unknown name or an unconvertible value.
    pub fn try_set_input(&self, name: &str, raw: &serde_json::Value) -> bool {
        let mut slots = self.slots();
        match find_mut(&mut slots.inputs, name) {
            Ok(param) => param.try_convert_and_set(raw),
            Err(_) => false,
        }
    }

    /// Forgivingly assign input `name` from text.
    pub fn try_set_input_text(&self, name: &str, text: &str) -> bool {
        self.try_set_input(name, &serde_json::Value::String(text.to_owned()))
    }

    /// Observe changes to input `name`.
    ///
    /// Observers run while the function's parameter lock is held and must
    /// not call back into this function.
    pub fn observe_input(
        &self,
        name: &str,
        observer: Arc<dyn ParamObserver>,
    ) -> Result<(), ParamError> {
        let mut slots = self.slots();
        find_mut(&mut slots.inputs, name)?.observe(observer);
        Ok(())
    }

    /// Observe changes to output `name`. Same constraints as
    /// [`observe_input`](Self::observe_input).
    pub fn observe_output(
        &self,
        name: &str,
        observer: Arc<dyn ParamObserver>,
    ) -> Result<(), ParamError> {
        let mut slots = self.slots();
        find_mut(&mut slots.outputs, name)?.observe(observer);
        Ok(())
    }

    /// Swap the connection handle.
    ///
    /// Clears `last_result` and resets the phase to `Idle`; the parameter
    /// lists keep their shape and values. Must not race an in-flight
    /// invocation.
    pub fn bind_connection(&self, connection: Option<Arc<dyn Connection>>) {
        let mut slots = self.slots();
        slots.connection = connection;
        slots.last_result = None;
        slots.phase = Phase::Idle;
        tracing::debug!(
            function = %self.spec.name,
            bound = slots.connection.is_some(),
            "remcall.function.rebind"
        );
    }

    /// Whether the function may run now.
    ///
    /// True in offline mode. Otherwise requires a bound handle reporting
    /// connected; when that fails a Debug diagnostic is emitted.
    pub fn can_execute(&self) -> bool {
        if self.offline_mode {
            return true;
        }
        let connection = self.slots().connection.clone();
        match connection {
            Some(c) if c.is_connected() => true,
            Some(_) => {
                self.notify(Severity::Debug, "connection handle reports not connected");
                false
            }
            None => {
                self.notify(Severity::Debug, "no connection handle bound");
                false
            }
        }
    }

    /// Invoke the native call and record the outcome.
    ///
    /// Blocks for the duration of the native call. Outputs are written only
    /// on status 0, all at once, in declared order.
    pub fn execute(&self) -> InvocationResult {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            let result = {
                let slots = self.slots();
                InvocationResult::rejected(snapshot(&slots.inputs), snapshot(&slots.outputs))
            };
            tracing::warn!(function = %self.spec.name, "remcall.function.rejected");
            self.notify(
                Severity::Warning,
                "invocation already in progress, call rejected",
            );
            return result;
        }
        let _guard = InFlight(&self.in_flight);
        self.run()
    }

    /// Render `result` as indented structured text.
    pub fn format_result(&self, result: &InvocationResult) -> String {
        remcall_types::format_result(result)
    }

    fn run(&self) -> InvocationResult {
        self.set_phase(Phase::Validating);
        self.notify(
            Severity::Debug,
            format!("starting {}: {}", self.spec.name, self.spec.description),
        );

        if !self.can_execute() {
            let result = {
                let slots = self.slots();
                InvocationResult::not_connected(snapshot(&slots.inputs), snapshot(&slots.outputs))
            };
            return self.settle(result, Severity::Warning, "CNC not connected".into());
        }

        self.set_phase(Phase::Invoking);
        let (connection, args, inputs) = {
            let slots = self.slots();
            let args = check_ranges(&self.spec, &slots.inputs)
                .and_then(|()| marshal(&slots.inputs));
            (slots.connection.clone(), args, snapshot(&slots.inputs))
        };

        let reply = args.and_then(|args| {
            let connection = connection.ok_or(NativeFault::Unbound)?;
            tracing::debug!(
                function = %self.spec.name,
                args = args.len(),
                "remcall.function.invoke"
            );
            connection.call(&self.spec.name, &args)
        });

        match reply {
            Ok(reply) if reply.status == 0 => self.apply_outputs(inputs, reply.outputs),
            Ok(reply) => {
                let result = InvocationResult::status(reply.status, inputs, self.outputs());
                let message = format!(
                    "error [{}]: {}",
                    result.result_code, result.result_description
                );
                self.settle(result, Severity::Error, message)
            }
            Err(fault) => {
                let result = InvocationResult::fault(&fault, inputs, self.outputs());
                self.settle(result, Severity::Error, format!("critical error: {fault}"))
            }
        }
    }

    fn apply_outputs(
        &self,
        inputs: Vec<ParamSnapshot>,
        reply: Vec<Option<ParamValue>>,
    ) -> InvocationResult {
        let result = {
            let mut slots = self.slots();
            let committed = decode(&slots.outputs, reply).and_then(|values| {
                slots
                    .outputs
                    .iter_mut()
                    .zip(values)
                    .try_for_each(|(param, value)| param.set_value(value))
                    .map_err(|e| e.to_string())
            });
            match committed {
                Ok(()) => InvocationResult::success(inputs, snapshot(&slots.outputs)),
                Err(detail) => {
                    InvocationResult::contract_violation(&detail, inputs, snapshot(&slots.outputs))
                }
            }
        };
        if result.is_success() {
            self.settle(result, Severity::Info, "completed successfully".into())
        } else {
            let message = result.result_description.clone();
            self.settle(result, Severity::Error, message)
        }
    }

    fn settle(
        &self,
        result: InvocationResult,
        severity: Severity,
        message: String,
    ) -> InvocationResult {
        {
            let mut slots = self.slots();
            slots.phase = if result.is_success() {
                Phase::Succeeded
            } else {
                Phase::Failed
            };
            slots.last_result = Some(result.clone());
        }
        tracing::debug!(
            function = %self.spec.name,
            code = result.result_code,
            success = result.is_success(),
            "remcall.function.settled"
        );
        self.notify(severity, message);
        result
    }

    fn set_phase(&self, phase: Phase) {
        self.slots().phase = phase;
    }

    fn notify(&self, severity: Severity, message: impl Into<String>) {
        self.sink
            .notify(&Notification::new(self.spec.name.as_str(), message, severity));
    }

    fn slots(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn slots_mut(&mut self) -> &mut Slots {
        self.slots.get_mut().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for RemoteFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteFunction")
            .field("name", &self.spec.name)
            .field("offline_mode", &self.offline_mode)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

/// Clears the in-flight flag when the invocation ends, including by unwind.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn snapshot(params: &[Parameter]) -> Vec<ParamSnapshot> {
    params.iter().map(Parameter::snapshot).collect()
}

fn find<'a>(params: &'a [Parameter], name: &str) -> Option<&'a Parameter> {
    params.iter().find(|p| p.name() == name)
}

fn find_mut<'a>(params: &'a mut [Parameter], name: &str) -> Result<&'a mut Parameter, ParamError> {
    params
        .iter_mut()
        .find(|p| p.name() == name)
        .ok_or_else(|| ParamError::UnknownParameter(name.to_owned()))
}

/// Input values in declared order. An unbound input is a marshaling fault.
fn marshal(inputs: &[Parameter]) -> Result<Vec<ParamValue>, NativeFault> {
    inputs
        .iter()
        .map(|p| {
            p.value()
                .cloned()
                .ok_or_else(|| NativeFault::Marshaling(format!("input {} has no value", p.name())))
        })
        .collect()
}

/// Reject address ranges the device would refuse.
fn check_ranges(spec: &CallSpec, inputs: &[Parameter]) -> Result<(), NativeFault> {
    let bound = |name: &str| {
        find(inputs, name)
            .and_then(Parameter::value)
            .and_then(ParamValue::as_i64)
    };
    spec.ranges.iter().try_for_each(|range: &RangeSpec| {
        match (bound(range.start.as_str()), bound(range.end.as_str())) {
            (Some(first), Some(last)) if !range.accepts(first, last) => {
                Err(NativeFault::Argument(format!(
                    "invalid range {}..{}: {first}..{last}",
                    range.start, range.end
                )))
            }
            // Unbound bounds surface as marshaling faults.
            _ => Ok(()),
        }
    })
}

/// Check a reply against the declared outputs. Null arrays become empty arrays.
fn decode(
    outputs: &[Parameter],
    reply: Vec<Option<ParamValue>>,
) -> Result<Vec<ParamValue>, String> {
    if reply.len() != outputs.len() {
        return Err(format!(
            "expected {} outputs, got {}",
            outputs.len(),
            reply.len()
        ));
    }
    outputs
        .iter()
        .zip(reply)
        .map(|(param, value)| {
            let declared = param.declared_type();
            match value {
                Some(v) if v.conforms_to(declared) => Ok(v),
                Some(v) => Err(format!(
                    "output {} expected {declared}, got {}",
                    param.name(),
                    v.param_type()
                )),
                None => declared
                    .element()
                    .map(|element| ParamValue::empty_array(element.clone()))
                    .ok_or_else(|| format!("output {} is null", param.name())),
            }
        })
        .collect()
}
