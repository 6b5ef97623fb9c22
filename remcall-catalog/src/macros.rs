//! Macro variables.

use remcall_function::{CallSpec, RangeSpec};
use remcall_types::ParamType::{Float64, Int32};

use crate::{array, matrix};

pub(crate) fn specs() -> Vec<CallSpec> {
    vec![
        CallSpec::new("READ_macro_all", "Read every macro variable")
            .signature("short READ_macro_all(out int[] MacroNumber, out double[] MacroData)")
            .tags(["read", "macro"])
            .output("MacroNumber", array(Int32), "Variable numbers")
            .output("MacroValues", array(Float64), "Variable values"),
        CallSpec::new("READ_macro_scope", "Read a range of macro variables")
            .signature("short READ_macro_scope(int StartNumber, int EndNumber, out int[] MacroNumber, out double[] MacroData)")
            .tags(["read", "macro"])
            .input_with("StartNumber", Int32, 1_i32, "First variable")
            .input_with("EndNumber", Int32, 10_i32, "Last variable")
            .range(RangeSpec::new("StartNumber", "EndNumber").min(1))
            .output("MacroNumber", array(Int32), "Variable numbers")
            .output("MacroData", array(Float64), "Variable values"),
        // The device status is reported in the result, never copied into MacroData.
        CallSpec::new("READ_macro_single", "Read one macro variable")
            .signature("short READ_macro_single(int MacroNumber, out double MacroData)")
            .tags(["read", "macro"])
            .input_with("MacroNumber", Int32, 1_i32, "Variable number")
            .output("MacroData", Float64, "Variable value"),
        CallSpec::new("READ_macro_variable", "Read the macro variable table")
            .signature("short READ_macro_variable(out int[][] Variable)")
            .tags(["read", "macro"])
            .output("Variables", matrix(Int32), "Variable rows"),
        CallSpec::new("WRITE_macro_all", "Write several macro variables")
            .signature("short WRITE_macro_all(int[] MacroNumber, double[] MacroData)")
            .tags(["write", "macro"])
            .input_with("MacroNumber", array(Int32), vec![1_i32, 2, 3], "Variable numbers")
            .input_with("MacroData", array(Float64), vec![0.0_f64; 3], "Values to write"),
        CallSpec::new("WRITE_macro_single", "Write one macro variable")
            .signature("short WRITE_macro_single(int MacroNumber, double MacroData)")
            .tags(["write", "macro"])
            .input_with("MacroNumber", Int32, 1_i32, "Variable number")
            .input_with("MacroValue", Float64, 0.0_f64, "Value to write"),
    ]
}
