//! Tool offsets and NC program state.

use remcall_function::{CallSpec, RangeSpec};
use remcall_types::ParamType::{Float64, Int16, Int32, Int64, String as Text};

use crate::{array, matrix};

pub(crate) fn specs() -> Vec<CallSpec> {
    vec![
        CallSpec::new("READ_offset_title", "Read tool offset column titles")
            .signature("short READ_offset_title(out string[] OffsetTitle)")
            .tags(["read", "tool"])
            .output("OffsetTitle", array(Text), "Column titles"),
        CallSpec::new("READ_offset_count", "Read the number of tool offsets")
            .signature("short READ_offset_count(out short Count)")
            .tags(["read", "tool"])
            .output("Count", Int16, "Offset count"),
        CallSpec::new("READ_offset_all", "Read every tool offset")
            .signature("short READ_offset_all(out double[][] OffsetData)")
            .tags(["read", "tool"])
            .output("OffsetData", matrix(Float64), "Offset rows"),
        CallSpec::new("READ_offset_scope", "Read a range of tool offsets")
            .signature("short READ_offset_scope(short StartNumber, short EndNumber, out double[][] OffsetData)")
            .tags(["read", "tool"])
            .input_with("StartNumber", Int16, 1_i16, "First offset")
            .input_with("EndNumber", Int16, 10_i16, "Last offset")
            .range(RangeSpec::new("StartNumber", "EndNumber"))
            .output("OffsetData", matrix(Float64), "Offset rows"),
        CallSpec::new("READ_offset_single", "Read one tool offset")
            .signature("short READ_offset_single(short ofNumber, out double[] OffsetData)")
            .tags(["read", "tool"])
            .input_with("ofNumber", Int16, 1_i16, "Offset number")
            .output("OffsetData", array(Float64), "Offset values"),
        CallSpec::new("WRITE_offset_all", "Write every tool offset")
            .signature("short WRITE_offset_all(double[][] OffsetData)")
            .tags(["write", "tool"])
            .input_with(
                "OffsetData",
                matrix(Float64),
                Vec::<Vec<f64>>::new(),
                "Offset rows [axis][value]",
            ),
        CallSpec::new("WRITE_offset_single", "Write one tool offset")
            .signature("short WRITE_offset_single(short ofNumber, double[] OffsetData)")
            .tags(["write", "tool"])
            .input_with("OffsetNumber", Int16, 1_i16, "Offset number")
            .input_with(
                "OffsetData",
                array(Float64),
                vec![0.0_f64; 3],
                "Offset values for X, Y, Z",
            ),
        CallSpec::new("READ_nc_OPLog", "Read the operator log")
            .signature("short READ_nc_OPLog(out string[] OPLog, ref int count)")
            .tags(["read", "nc"])
            .output("OPLog", array(Text), "Log lines")
            .output("count", Int32, "Line count"),
        CallSpec::new("WRITE_nc_main", "Select the main NC program")
            .signature("short WRITE_nc_main(string NcName)")
            .tags(["write", "nc"])
            .input_with("NcName", Text, "", "Program name"),
        CallSpec::new("READ_nc_pointer", "Read the NC block pointer")
            .signature("short READ_nc_pointer(out int BlkPointer)")
            .tags(["read", "nc"])
            .output("BlkPointer", Int32, "Current block"),
        CallSpec::new("READ_nc_current_block", "Read the executing NC block")
            .signature("short READ_nc_current_block(out string Block)")
            .tags(["read", "nc"])
            .output("Block", Text, "Block text"),
        CallSpec::new("READ_nc_freespace", "Read free NC program memory")
            .signature("short READ_nc_freespace(out long FreeSpace)")
            .tags(["read", "nc"])
            .output("FreeSpace", Int64, "Free bytes"),
        CallSpec::new("READ_nc_mem_list", "List NC programs in memory")
            .signature("short READ_nc_mem_list(out string[][] NcList)")
            .tags(["read", "nc"])
            .output("NcList", matrix(Text), "Program rows"),
    ]
}
