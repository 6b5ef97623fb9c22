use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

use remcall_function::{CallSpec, Phase, RangeSpec, RemoteFunction};
use remcall_types::result::{CONTRACT_VIOLATION_CODE, NOT_CONNECTED_CODE, REJECTED_CODE};
use remcall_types::test_utils::{RecordingSink, StubConnection};
use remcall_types::{
    Connection, FailureKind, NativeFault, NativeReply, ParamChange, ParamError, ParamType,
    ParamValue, Severity, describe_status,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn relpos_spec() -> CallSpec {
    CallSpec::new("WRITE_relpos", "Move an axis by a relative distance")
        .signature("short WRITE_relpos(string AxisName, double PosValue)")
        .tags(["write", "axis"])
        .input_with("AxisName", ParamType::String, "X", "Axis name")
        .input_with("PosValue", ParamType::Float64, 0.0_f64, "Relative distance")
}

fn position_spec() -> CallSpec {
    CallSpec::new("READ_position", "Read axis positions")
        .input_with("Axis", ParamType::Int16, -1_i16, "Axis index, -1 for all")
        .output("AxisCount", ParamType::Int16, "Number of axes")
        .output("Positions", ParamType::array_of(ParamType::Float64), "Positions")
}

fn build(
    spec: CallSpec,
    stub: &Arc<StubConnection>,
) -> (RemoteFunction, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let function = RemoteFunction::new(spec)
        .unwrap()
        .with_connection(stub.clone())
        .with_sink(sink.clone());
    (function, sink)
}

fn failures(sink: &RecordingSink) -> usize {
    sink.count(Severity::Warning) + sink.count(Severity::Error)
}

// ━━━ Concrete scenarios ━━━

#[test]
fn relpos_success_reports_inputs_and_one_info() {
    init_tracing();
    let stub = Arc::new(StubConnection::new());
    let (function, sink) = build(relpos_spec(), &stub);

    let result = function.execute();

    assert_eq!(result.result_code, 0);
    assert_eq!(result.result_description, "Successful execution");
    assert!(result.is_success());
    assert_eq!(result.input_data.len(), 2);
    assert_eq!(result.input_data[0].name, "AxisName");
    assert_eq!(result.input_data[0].value, Some(ParamValue::from("X")));
    assert_eq!(result.input_data[1].name, "PosValue");
    assert_eq!(result.input_data[1].value, Some(ParamValue::Float64(0.0)));
    assert!(result.output_data.is_empty());

    assert_eq!(sink.count(Severity::Info), 1);
    assert_eq!(failures(&sink), 0);
    assert_eq!(function.phase(), Phase::Succeeded);
    assert_eq!(function.last_result(), Some(result));
}

#[test]
fn relpos_status_three_is_protocol_error() {
    let stub = Arc::new(StubConnection::replying(NativeReply::status(3)));
    let (function, sink) = build(relpos_spec(), &stub);

    let result = function.execute();

    assert_eq!(result.result_code, 3);
    assert_eq!(result.result_description, "Protocol error");
    assert_eq!(result.failure(), Some(FailureKind::DomainStatus(3)));
    assert_eq!(sink.count(Severity::Error), 1);
    assert_eq!(sink.count(Severity::Warning), 0);
    assert_eq!(sink.count(Severity::Info), 0);
    assert!(sink.with_severity(Severity::Error)[0].message.contains("Protocol error"));
    assert_eq!(function.phase(), Phase::Failed);
}

#[test]
fn null_array_output_becomes_empty_array() {
    let spec = CallSpec::new("READ_plc_register", "Read PLC registers")
        .output("Values", ParamType::array_of(ParamType::Int32), "Register values");
    let stub = Arc::new(StubConnection::replying(NativeReply::ok(vec![None])));
    let (function, _sink) = build(spec, &stub);

    let result = function.execute();

    assert!(result.is_success());
    let expected = ParamValue::empty_array(ParamType::Int32);
    assert_eq!(function.output_value("Values"), Some(expected.clone()));
    assert_eq!(result.output_data[0].value, Some(expected));
}

// ━━━ Invocation ━━━

#[test]
fn inputs_are_passed_in_declared_order() {
    let stub = Arc::new(StubConnection::new());
    let (function, _sink) = build(relpos_spec(), &stub);
    function.set_input("AxisName", "Z").unwrap();
    function.set_input("PosValue", 12.5_f64).unwrap();

    function.execute();

    let calls = stub.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].function, "WRITE_relpos");
    assert_eq!(
        calls[0].args,
        vec![ParamValue::from("Z"), ParamValue::Float64(12.5)]
    );
}

#[test]
fn success_writes_every_output_in_order() {
    let positions = ParamValue::from(vec![1.5_f64, -2.0, 3.25]);
    let stub = Arc::new(StubConnection::replying(NativeReply::ok(vec![
        Some(ParamValue::Int16(3)),
        Some(positions.clone()),
    ])));
    let (function, _sink) = build(position_spec(), &stub);

    let result = function.execute();

    assert!(result.is_success());
    let names: Vec<_> = result.output_data.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["AxisCount", "Positions"]);
    assert_eq!(function.output_value("AxisCount"), Some(ParamValue::Int16(3)));
    assert_eq!(function.output_value("Positions"), Some(positions));
}

#[test]
fn failed_status_leaves_outputs_untouched() {
    let stub = Arc::new(StubConnection::new());
    stub.push_reply(Ok(NativeReply::ok(vec![
        Some(ParamValue::Int16(2)),
        Some(ParamValue::from(vec![1.0_f64, 2.0])),
    ])));
    stub.push_reply(Ok(NativeReply {
        status: 12,
        outputs: vec![Some(ParamValue::Int16(9)), None],
    }));
    let (function, sink) = build(position_spec(), &stub);

    assert!(function.execute().is_success());
    let before = function.outputs();
    let result = function.execute();

    assert_eq!(result.failure(), Some(FailureKind::DomainStatus(12)));
    assert_eq!(function.outputs(), before);
    assert_eq!(result.output_data, before);
    assert_eq!(sink.count(Severity::Error), 1);
}

#[test]
fn native_fault_becomes_structured_result() {
    let fault = NativeFault::InvalidHandle("handle 0 closed".into());
    let stub = Arc::new(StubConnection::faulting(fault.clone()));
    let (function, sink) = build(position_spec(), &stub);

    let result = function.execute();

    assert_eq!(result.result_code, fault.code());
    assert_eq!(result.result_description, fault.to_string());
    assert_eq!(
        result.failure(),
        Some(FailureKind::TransportFault(fault.code()))
    );
    assert!(function.outputs().iter().all(|s| s.value.is_none()));
    assert_eq!(sink.count(Severity::Error), 1);
    assert_eq!(sink.count(Severity::Info), 0);
}

#[test]
fn unknown_status_uses_fallback_description() {
    let stub = Arc::new(StubConnection::replying(NativeReply::status(-8)));
    let (function, _sink) = build(relpos_spec(), &stub);

    let result = function.execute();

    assert_eq!(result.result_code, -8);
    assert_eq!(result.result_description, "Unknown error (code: -8)");
    assert_eq!(result.result_description, describe_status(-8));
}

// ━━━ Preconditions ━━━

#[test]
fn disconnected_never_calls_native_boundary() {
    let stub = Arc::new(StubConnection::disconnected());
    let (function, sink) = build(relpos_spec(), &stub);

    assert!(!function.can_execute());
    let result = function.execute();

    assert_eq!(result.result_code, NOT_CONNECTED_CODE);
    assert_eq!(result.failure(), Some(FailureKind::NotConnected));
    assert_eq!(stub.call_count(), 0);
    assert_eq!(sink.count(Severity::Warning), 1);
    assert_eq!(sink.count(Severity::Error), 0);
}

#[test]
fn unbound_handle_is_not_connected() {
    let sink = Arc::new(RecordingSink::new());
    let function = RemoteFunction::new(relpos_spec())
        .unwrap()
        .with_sink(sink.clone());

    assert!(!function.can_execute());
    assert!(sink.count(Severity::Debug) >= 1);
    let result = function.execute();
    assert_eq!(result.failure(), Some(FailureKind::NotConnected));
}

#[test]
fn offline_mode_calls_through_disconnected_handle() {
    let stub = Arc::new(StubConnection::disconnected());
    let sink = Arc::new(RecordingSink::new());
    let function = RemoteFunction::new(relpos_spec())
        .unwrap()
        .offline(true)
        .with_connection(stub.clone())
        .with_sink(sink.clone());

    assert!(function.can_execute());
    let result = function.execute();

    assert!(result.is_success());
    assert_eq!(stub.call_count(), 1);
}

#[test]
fn offline_mode_without_handle_is_a_fault() {
    let function = RemoteFunction::new(relpos_spec()).unwrap().offline(true);

    let result = function.execute();

    assert_eq!(result.result_code, NativeFault::Unbound.code());
    assert!(matches!(
        result.failure(),
        Some(FailureKind::TransportFault(_))
    ));
}

#[test]
fn unset_input_is_a_marshaling_fault() {
    let spec = CallSpec::new("READ_macro_single", "Read one macro variable")
        .input("Address", ParamType::Int32, "Macro address");
    let stub = Arc::new(StubConnection::new());
    let (function, sink) = build(spec, &stub);

    let result = function.execute();

    assert_eq!(stub.call_count(), 0);
    assert!(result.result_description.contains("Address"));
    assert_eq!(sink.count(Severity::Error), 1);
}

#[test]
fn reversed_range_is_an_argument_fault() {
    let spec = CallSpec::new("READ_plc_register", "Read PLC registers")
        .input_with("PlcStart", ParamType::Int32, 8_i32, "First register")
        .input_with("PlcEnd", ParamType::Int32, 2_i32, "Last register")
        .range(RangeSpec::new("PlcStart", "PlcEnd").max_span(100))
        .output("PlcData", ParamType::array_of(ParamType::Int32), "Register values");
    let stub = Arc::new(StubConnection::new());
    let (function, sink) = build(spec, &stub);

    let result = function.execute();

    assert_eq!(stub.call_count(), 0);
    assert_eq!(
        result.failure(),
        Some(FailureKind::TransportFault(
            NativeFault::Argument(String::new()).code()
        ))
    );
    assert!(result.result_description.contains("8..2"));
    assert_eq!(sink.count(Severity::Error), 1);

    function.set_input("PlcEnd", 200_i32).unwrap();
    assert!(function.execute().result_description.contains("8..200"));

    function.set_input("PlcEnd", 8_i32).unwrap();
    stub.fallback(Ok(NativeReply::ok(vec![Some(ParamValue::from(vec![5_i32]))])));
    assert!(function.execute().is_success());
}

#[test]
fn span_check_survives_extreme_bounds() {
    let spec = CallSpec::new("READ_counter_scope", "Read wide counters")
        .input_with("First", ParamType::Int64, i64::MIN, "First counter")
        .input_with("Last", ParamType::Int64, i64::MAX, "Last counter")
        .range(RangeSpec::new("First", "Last").min(i64::MIN).max_span(10));
    let stub = Arc::new(StubConnection::new());
    let (function, _sink) = build(spec, &stub);

    let result = function.execute();

    assert_eq!(stub.call_count(), 0);
    assert!(matches!(
        result.failure(),
        Some(FailureKind::TransportFault(_))
    ));
}

// ━━━ Contract violations ━━━

#[test]
fn wrong_output_count_is_contract_violation() {
    let stub = Arc::new(StubConnection::replying(NativeReply::ok(vec![Some(
        ParamValue::Int16(1),
    )])));
    let (function, sink) = build(position_spec(), &stub);

    let result = function.execute();

    assert_eq!(result.result_code, CONTRACT_VIOLATION_CODE);
    assert_eq!(result.failure(), Some(FailureKind::ContractViolation));
    assert!(function.outputs().iter().all(|s| s.value.is_none()));
    assert_eq!(sink.count(Severity::Error), 1);
}

#[test]
fn wrong_output_type_is_contract_violation() {
    let stub = Arc::new(StubConnection::replying(NativeReply::ok(vec![
        Some(ParamValue::Int32(1)),
        Some(ParamValue::empty_array(ParamType::Float64)),
    ])));
    let (function, _sink) = build(position_spec(), &stub);

    let result = function.execute();

    assert_eq!(result.failure(), Some(FailureKind::ContractViolation));
    assert!(result.result_description.contains("AxisCount"));
    assert_eq!(function.output_value("Positions"), None);
}

#[test]
fn null_scalar_output_is_contract_violation() {
    let stub = Arc::new(StubConnection::replying(NativeReply::ok(vec![
        None,
        Some(ParamValue::empty_array(ParamType::Float64)),
    ])));
    let (function, _sink) = build(position_spec(), &stub);

    assert_eq!(
        function.execute().failure(),
        Some(FailureKind::ContractViolation)
    );
}

// ━━━ Parameters ━━━

#[test]
fn set_input_rejects_wrong_type() {
    let stub = Arc::new(StubConnection::new());
    let (function, _sink) = build(relpos_spec(), &stub);

    let err = function.set_input("PosValue", 3_i32).unwrap_err();
    assert!(matches!(err, ParamError::TypeMismatch { .. }));
    assert_eq!(function.input_value("PosValue"), Some(ParamValue::Float64(0.0)));

    let err = function.set_input("Feed", 1.0_f64).unwrap_err();
    assert_eq!(err, ParamError::UnknownParameter("Feed".into()));
}

#[test]
fn try_set_input_converts_text() {
    let stub = Arc::new(StubConnection::new());
    let (function, _sink) = build(relpos_spec(), &stub);

    assert!(function.try_set_input_text("PosValue", "2.5"));
    assert_eq!(function.input_value("PosValue"), Some(ParamValue::Float64(2.5)));
    assert!(!function.try_set_input_text("PosValue", "fast"));
    assert_eq!(function.input_value("PosValue"), Some(ParamValue::Float64(2.5)));
    assert!(!function.try_set_input_text("Feed", "1"));
    assert!(function.try_set_input("AxisName", &serde_json::json!("Y")));
}

#[test]
fn output_observers_fire_once_per_change() {
    let stub = Arc::new(StubConnection::replying(NativeReply::ok(vec![
        Some(ParamValue::Int16(3)),
        Some(ParamValue::empty_array(ParamType::Float64)),
    ])));
    let (function, _sink) = build(position_spec(), &stub);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    function
        .observe_output(
            "AxisCount",
            Arc::new(move |change: &ParamChange<'_>| {
                log.lock().unwrap().push(change.current.cloned());
            }),
        )
        .unwrap();

    function.execute();
    function.execute();

    assert_eq!(*seen.lock().unwrap(), vec![Some(ParamValue::Int16(3))]);
}

#[test]
fn input_observer_sees_assignment() {
    let stub = Arc::new(StubConnection::new());
    let (function, _sink) = build(relpos_spec(), &stub);
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    function
        .observe_input(
            "AxisName",
            Arc::new(move |_: &ParamChange<'_>| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .unwrap();

    function.set_input("AxisName", "Y").unwrap();
    function.set_input("AxisName", "Y").unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(function.observe_input("Nope", Arc::new(|_: &ParamChange<'_>| {})).is_err());
}

// ━━━ Lifecycle ━━━

#[test]
fn rebind_clears_last_result_and_keeps_values() {
    let stub = Arc::new(StubConnection::new());
    let (function, _sink) = build(relpos_spec(), &stub);
    function.set_input("AxisName", "B").unwrap();
    function.execute();
    assert!(function.last_result().is_some());

    let other = Arc::new(StubConnection::new());
    function.bind_connection(Some(other.clone()));

    assert_eq!(function.last_result(), None);
    assert_eq!(function.phase(), Phase::Idle);
    assert_eq!(function.input_value("AxisName"), Some(ParamValue::from("B")));
    function.execute();
    assert_eq!(other.call_count(), 1);
    assert_eq!(stub.call_count(), 1);
}

#[test]
fn format_result_orders_fields() {
    let stub = Arc::new(StubConnection::new());
    let (function, _sink) = build(relpos_spec(), &stub);
    let result = function.execute();

    let text = function.format_result(&result);

    let code = text.find("\"ResultCode\"").unwrap();
    let description = text.find("\"ResultDescription\"").unwrap();
    let inputs = text.find("\"InputData\"").unwrap();
    let outputs = text.find("\"OutputData\"").unwrap();
    assert!(code < description && description < inputs && inputs < outputs);
    assert!(text.contains('\n'));
}

#[test]
fn descriptor_metadata_comes_from_spec() {
    let function = RemoteFunction::new(relpos_spec()).unwrap();
    assert_eq!(function.name(), "WRITE_relpos");
    assert_eq!(function.description(), "Move an axis by a relative distance");
    assert!(function.signature().starts_with("short WRITE_relpos"));
    assert!(function.has_tag("axis"));
    assert!(!function.offline_mode());
    assert_eq!(function.phase(), Phase::Idle);
    assert_eq!(function.inputs()[1].declared_type, ParamType::Float64);
}

#[test]
fn invalid_initial_value_fails_construction() {
    let spec = CallSpec::new("WRITE_relpos", "")
        .input_with("PosValue", ParamType::Float64, "ten", "Relative distance");
    assert!(matches!(
        RemoteFunction::new(spec),
        Err(ParamError::TypeMismatch { .. })
    ));
}

// ━━━ Re-entrancy ━━━

/// Blocks inside `call` until released, so a second caller can collide.
struct GateConnection {
    entered: Mutex<Option<mpsc::Sender<()>>>,
    release: Mutex<mpsc::Receiver<()>>,
}

impl Connection for GateConnection {
    fn is_connected(&self) -> bool {
        true
    }

    fn call(&self, _function: &str, _args: &[ParamValue]) -> Result<NativeReply, NativeFault> {
        if let Some(entered) = self.entered.lock().unwrap().take() {
            entered.send(()).unwrap();
        }
        self.release.lock().unwrap().recv().unwrap();
        Ok(NativeReply::ok(Vec::new()))
    }
}

#[test]
fn concurrent_execute_is_rejected() {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let gate = Arc::new(GateConnection {
        entered: Mutex::new(Some(entered_tx)),
        release: Mutex::new(release_rx),
    });
    let sink = Arc::new(RecordingSink::new());
    let function = Arc::new(
        RemoteFunction::new(relpos_spec())
            .unwrap()
            .with_connection(gate)
            .with_sink(sink.clone()),
    );

    let first = {
        let function = Arc::clone(&function);
        thread::spawn(move || function.execute())
    };
    entered_rx.recv().unwrap();
    assert!(function.is_running());

    let rejected = function.execute();
    assert_eq!(rejected.result_code, REJECTED_CODE);
    assert_eq!(rejected.failure(), Some(FailureKind::Rejected));
    assert_eq!(sink.count(Severity::Warning), 1);
    assert_eq!(function.last_result(), None);

    release_tx.send(()).unwrap();
    let completed = first.join().unwrap();
    assert!(completed.is_success());
    assert!(!function.is_running());
    assert_eq!(function.last_result(), Some(completed));
}
