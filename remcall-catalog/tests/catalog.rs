use std::collections::HashSet;
use std::sync::Arc;

use remcall_catalog::{OfflineCnc, build_registry, catalog, find};
use remcall_types::test_utils::StubConnection;
use remcall_types::{Connection, FailureKind, NativeFault, ParamType, ParamValue};

// ━━━ Catalog shape ━━━

#[test]
fn names_are_unique() {
    let specs = catalog();
    let names: HashSet<_> = specs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names.len(), specs.len());
}

#[test]
fn every_spec_is_documented_and_tagged() {
    for spec in catalog() {
        assert!(!spec.description.is_empty(), "{} has no description", spec.name);
        assert!(
            spec.signature.starts_with("short "),
            "{} signature: {}",
            spec.name,
            spec.signature
        );
        let verb = spec.name.split('_').next().unwrap().to_ascii_lowercase();
        assert!(spec.has_tag(&verb), "{} lacks tag {verb}", spec.name);
    }
}

#[test]
fn covers_every_area() {
    for name in [
        "READ_useTime",
        "READ_status",
        "WRITE_relpos",
        "READ_alm_history",
        "READ_work_coord_scope",
        "WRITE_macro_all",
        "READ_param_schema",
        "READ_plc_abit",
        "WRITE_plc_sbit",
        "READ_plc_register_string",
        "WRITE_plc_addr",
        "DOWNLOAD_plc_ladder",
        "WRITE_offset_single",
        "READ_nc_mem_list",
        "WRITE_remoteTime",
    ] {
        assert!(find(name).is_some(), "missing {name}");
    }
}

#[test]
fn relpos_matches_native_shape() {
    let spec = find("WRITE_relpos").unwrap();
    assert_eq!(spec.inputs.len(), 2);
    assert_eq!(spec.inputs[0].ty, ParamType::String);
    assert_eq!(spec.inputs[0].initial, Some(ParamValue::from("X")));
    assert_eq!(spec.inputs[1].ty, ParamType::Float64);
    assert!(spec.outputs.is_empty());
}

#[test]
fn nested_arrays_are_declared() {
    let spec = find("READ_work_coord_scope").unwrap();
    assert_eq!(spec.outputs[1].ty.to_string(), "float32[][]");
    assert_eq!(spec.ranges.len(), 1);
    assert_eq!(spec.ranges[0].min, 1);
}

// ━━━ Offline connection ━━━

#[test]
fn offline_cnc_answers_zero_values() {
    let cnc = OfflineCnc::new();
    assert_eq!(cnc.len(), catalog().len());

    let reply = cnc.call("READ_alm_current", &[]).unwrap();
    assert_eq!(reply.status, 0);
    assert_eq!(
        reply.outputs,
        vec![
            Some(ParamValue::Bool(false)),
            Some(ParamValue::empty_array(ParamType::String)),
            Some(ParamValue::empty_array(ParamType::DateTime)),
        ]
    );
}

#[test]
fn offline_cnc_rejects_unknown_calls() {
    let cnc = OfflineCnc::new();
    assert!(matches!(
        cnc.call("READ_everything", &[]),
        Err(NativeFault::Argument(_))
    ));
}

// ━━━ Registry ━━━

#[test]
fn offline_registry_runs_every_call() {
    let registry = build_registry(None, true).unwrap();
    assert_eq!(registry.len(), catalog().len());

    for function in registry.iter() {
        let result = function.execute();
        assert!(
            result.is_success(),
            "{}: {}",
            function.name(),
            result.result_description
        );
        assert_eq!(result.output_data.len(), function.definition().outputs.len());
        assert!(result.output_data.iter().all(|s| s.value.is_some()));
    }
}

#[test]
fn online_registry_without_connection_is_not_connected() {
    let registry = build_registry(None, false).unwrap();
    let result = registry.execute("READ_status").unwrap();
    assert_eq!(result.failure(), Some(FailureKind::NotConnected));
}

#[test]
fn supplied_connection_is_used() {
    let stub = Arc::new(StubConnection::new());
    let registry = build_registry(Some(stub.clone() as Arc<dyn Connection>), false).unwrap();

    let result = registry.execute("WRITE_nc_main").unwrap();

    assert!(result.is_success());
    assert_eq!(stub.calls()[0].function, "WRITE_nc_main");
    assert_eq!(stub.calls()[0].args, vec![ParamValue::from("")]);
}

#[test]
fn catalog_ranges_guard_native_calls() {
    let stub = Arc::new(StubConnection::new());
    let registry = build_registry(Some(stub.clone() as Arc<dyn Connection>), false).unwrap();
    let function = registry.get("READ_plc_counter").unwrap();
    function.set_input("PlcEnd", 500_i32).unwrap();

    let result = function.execute();

    assert_eq!(stub.call_count(), 0);
    assert!(matches!(
        result.failure(),
        Some(FailureKind::TransportFault(_))
    ));
}

#[test]
fn parameter_ranges_start_at_one() {
    let stub = Arc::new(StubConnection::new());
    let registry = build_registry(Some(stub.clone() as Arc<dyn Connection>), false).unwrap();
    let function = registry.get("READ_param_data").unwrap();
    function.set_input("ParamStart", 0_i32).unwrap();

    let zero_based = function.execute();

    function.set_input("ParamStart", 5_i32).unwrap();
    function.set_input("ParamEnd", -5_i32).unwrap();
    let reversed = function.execute();

    assert_eq!(stub.call_count(), 0);
    for result in [zero_based, reversed] {
        assert!(matches!(
            result.failure(),
            Some(FailureKind::TransportFault(_))
        ));
    }
    assert_eq!(function.output_value("ParamData"), None);
}

#[test]
fn tags_group_plc_calls() {
    let registry = build_registry(None, true).unwrap();
    let bits = registry.with_all_tags(&["read", "plc", "bits"]);
    assert_eq!(bits.len(), 5);
    assert!(registry.tags().contains(&"macro".to_owned()));
}
