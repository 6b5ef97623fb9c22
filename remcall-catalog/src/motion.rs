//! Axes, positions, modal codes, spindle, and work coordinates.

use remcall_function::{CallSpec, RangeSpec};
use remcall_types::ParamType::{Float32, Float64, Int16, Int32, String as Text};

use crate::{array, matrix};

pub(crate) fn specs() -> Vec<CallSpec> {
    vec![
        CallSpec::new("READ_position", "Read current axis positions")
            .signature("short READ_position(out string[] AxisName, out short DecPoint, out string[] Unit, out float[] Mach, out float[] Abs, out float[] Rel, out float[] Dist)")
            .tags(["read", "axis", "position"])
            .output("AxisName", array(Text), "Axis names")
            .output("DecPoint", Int16, "Decimal places")
            .output("Unit", array(Text), "Unit per axis")
            .output("Mach", array(Float32), "Machine coordinates")
            .output("Abs", array(Float32), "Absolute coordinates")
            .output("Rel", array(Float32), "Relative coordinates")
            .output("Dist", array(Float32), "Distance to go"),
        CallSpec::new("WRITE_relpos", "Write a relative position for one axis")
            .signature("short WRITE_relpos(string AxisName, double PosValue)")
            .tags(["write", "axis", "position"])
            .input_with("AxisName", Text, "X", "Axis name, e.g. X, Y, Z")
            .input_with("PosValue", Float64, 0.0_f64, "Position value to set"),
        CallSpec::new("READ_gcode", "Read active G codes")
            .signature("short READ_gcode(out string[] GData)")
            .tags(["read", "codes"])
            .output("GData", array(Text), "Active G codes"),
        CallSpec::new("READ_othercode", "Read H, D, T, M, F and S codes")
            .signature("short READ_othercode(out int HCode, out int DCode, out int TCode, out int MCode, out int FCode, out int SCode)")
            .tags(["read", "codes"])
            .output("HCode", Int32, "Tool length compensation")
            .output("DCode", Int32, "Tool radius compensation")
            .output("TCode", Int32, "Tool number")
            .output("MCode", Int32, "Miscellaneous function")
            .output("FCode", Int32, "Feed rate")
            .output("SCode", Int32, "Spindle speed"),
        CallSpec::new("READ_spindle", "Read spindle and feed state")
            .signature("short READ_spindle(out float OvFeed, out float OvSpindle, out float ActFeed, out int ActSpindle)")
            .tags(["read", "spindle", "position"])
            .output("OvFeed", Float32, "Feed override, percent")
            .output("OvSpindle", Float32, "Spindle override, percent")
            .output("ActFeed", Float32, "Actual feed, mm/min")
            .output("ActSpindle", Int32, "Actual spindle speed, rpm"),
        CallSpec::new("READ_work_coord_axis", "Read work coordinate column titles")
            .signature("short READ_work_coord_axis(out string[] WorkCoordTitle)")
            .tags(["read", "axis"])
            .output("WorkCoordTitle", array(Text), "Column titles"),
        CallSpec::new("READ_work_coord_scope", "Read a range of work coordinate systems")
            .signature("short READ_work_coord_scope(int StartNumber, int EndNumber, out string[] CoordName, out float[][] WorkCoord)")
            .tags(["read", "axis", "range", "coordinates"])
            .input_with("StartNumber", Int32, 1_i32, "First system, 1 is G54")
            .input_with("EndNumber", Int32, 6_i32, "Last system, 6 is G59")
            .range(RangeSpec::new("StartNumber", "EndNumber").min(1))
            .output("CoordName", array(Text), "System names")
            .output("WorkCoord", matrix(Float32), "Coordinates per system"),
        CallSpec::new("READ_work_coord_single", "Read one work coordinate system")
            .signature("short READ_work_coord_single(string CoordName, out float[] WorkCoord)")
            .tags(["read", "coordinates"])
            .input_with("CoordName", Text, "G54", "System name")
            .output("WorkCoord", array(Float32), "Coordinates [X, Y, Z, ...]"),
        CallSpec::new("WRITE_work_coord_all", "Write several work coordinate systems")
            .signature("short WRITE_work_coord_all(string[] CoordName, float[][] WorkCoord)")
            .tags(["write", "coordinates"])
            .input_with("CoordName", array(Text), vec!["G54".to_owned()], "System names")
            .input_with(
                "WorkCoord",
                matrix(Float32),
                vec![vec![0.0_f32; 3]],
                "Coordinates per system",
            ),
        CallSpec::new("WRITE_work_coord_single", "Write one work coordinate system")
            .signature("short WRITE_work_coord_single(string CoordName, float[] WorkCoord)")
            .tags(["write", "coordinates"])
            .input_with("CoordName", Text, "G54", "System name")
            .input_with(
                "WorkCoord",
                array(Float32),
                vec![0.0_f32; 3],
                "Coordinates [X, Y, Z, ...]",
            ),
        CallSpec::new("READ_work_coord_count", "Read the number of work coordinate systems")
            .signature("short READ_work_coord_count(out short Count)")
            .tags(["read", "coordinates"])
            .output("Count", Int16, "System count"),
    ]
}
