//! Controller state, alarms, parameters, variables, and the remote clock.

use chrono::{Datelike, Local, Timelike};
use remcall_function::{CallSpec, RangeSpec};
use remcall_types::ParamType::{Bool, DateTime, Float64, Int16, Int32, String as Text};

use crate::{array, default_download_dir};

pub(crate) fn specs() -> Vec<CallSpec> {
    let now = Local::now().naive_local();
    vec![
        CallSpec::new("READ_useTime", "Read the controller usage period")
            .signature("short READ_useTime(out string Status, out string TimeStart, out string TimeExpire, out int TimeRemain)")
            .tags(["read", "system", "time"])
            .output("Status", Text, "Usage state as text")
            .output("TimeStart", Text, "Start of the usage period")
            .output("TimeExpire", Text, "End of the usage period")
            .output("TimeRemain", Int32, "Remaining time"),
        CallSpec::new("READ_information", "Read the controller configuration")
            .signature("short READ_information(out short Axes, out string CncType, out short MaxAxes, out string Series, out string Nc_Ver, out string[] AxisName)")
            .tags(["read", "system", "info"])
            .output("Axes", Int16, "Active axis count")
            .output("CncType", Text, "Controller type")
            .output("MaxAxes", Int16, "Maximum supported axis count")
            .output("Series", Text, "Equipment series")
            .output("Nc_Ver", Text, "NC software version")
            .output("AxisName", array(Text), "Axis names"),
        CallSpec::new("READ_status", "Read the current controller status")
            .signature("short READ_status(out string MainProg, out string CurProg, out int CurSeq, out string Mode, out string Status, out string Alarm, out string EMG)")
            .tags(["read", "system", "state", "alarm"])
            .output("MainProg", Text, "Main program name")
            .output("CurProg", Text, "Running program name")
            .output("CurSeq", Int32, "Current sequence number")
            .output("Mode", Text, "Operating mode")
            .output("Status", Text, "Run status")
            .output("Alarm", Text, "Current alarm")
            .output("EMG", Text, "Emergency stop state"),
        CallSpec::new("READ_time", "Read machine running times")
            .signature("short READ_time(out int PowerOnTime, out int AccumulateCuttingTime, out int CuttingTimePerCycle, out int WorkTime)")
            .tags(["read", "time", "system"])
            .output("PowerOnTime", Int32, "Total power-on time, minutes")
            .output("AccumulateCuttingTime", Int32, "Accumulated cutting time, minutes")
            .output("CuttingTimePerCycle", Int32, "Cutting time of the current cycle, minutes")
            .output("WorkTime", Int32, "Total working time, minutes"),
        CallSpec::new("READ_part_count", "Read the part counters")
            .signature("short READ_part_count(out int part_count, out int require_part_count, out int total_part_count)")
            .tags(["read", "counter", "system"])
            .output("CurrentCount", Int32, "Parts made in the current batch")
            .output("RequiredCount", Int32, "Planned part count")
            .output("TotalCount", Int32, "Total parts made"),
        CallSpec::new("DOWNLOAD_work_record", "Download the machine work record file")
            .signature("short DOWNLOAD_work_record(string Destination)")
            .tags(["download", "system", "file"])
            .input_with(
                "DestinationPath",
                Text,
                default_download_dir(),
                "Local directory to save into",
            ),
        CallSpec::new("READ_alm_current", "Read active alarms")
            .signature("short READ_alm_current(out bool IsAlarm, out string[] AlmMsg, out DateTime[] AlmTime)")
            .tags(["read", "system", "alarm"])
            .output("IsAlarm", Bool, "Whether any alarm is active")
            .output("AlmMsg", array(Text), "Alarm messages")
            .output("AlmTime", array(DateTime), "Alarm times"),
        CallSpec::new("READ_alm_history", "Read the alarm history")
            .signature("short READ_alm_history(out string[] AlmMsg, out DateTime[] AlmTime)")
            .tags(["read", "system", "alarm"])
            .output("AlmMsg", array(Text), "Historical alarm messages")
            .output("AlmTime", array(DateTime), "Alarm times"),
        CallSpec::new("READ_param_max", "Read the highest parameter number")
            .signature("short READ_param_max(out int MaxNumber)")
            .tags(["read", "system"])
            .output("MaxNumber", Int32, "Highest parameter number"),
        CallSpec::new("READ_param_data", "Read a range of parameters")
            .signature("short READ_param_data(int ParamStart, int ParamEnd, out int[] ParamData)")
            .tags(["read", "system", "parameters"])
            .input_with("ParamStart", Int32, 1_i32, "First parameter number")
            .input_with("ParamEnd", Int32, 10_i32, "Last parameter number")
            .range(RangeSpec::new("ParamStart", "ParamEnd").min(1))
            .output("ParamData", array(Int32), "Parameter values"),
        CallSpec::new("READ_param_schema", "Read the parameter schema")
            .signature("short READ_param_schema(out int[] index, out int[] value, out string[] context, out string[] bound, out int count)")
            .tags(["read", "system", "parameters"])
            .output("index", array(Int32), "Parameter numbers")
            .output("value", array(Int32), "Parameter values")
            .output("context", array(Text), "Parameter descriptions")
            .output("bound", array(Text), "Valid value ranges")
            .output("count", Int32, "Number of parameters"),
        CallSpec::new("WRITE_param_single", "Write one parameter")
            .signature("short WRITE_param_single(int ParamID, int val)")
            .tags(["write", "system", "parameters"])
            .input_with("ParamID", Int32, 1_i32, "Parameter number")
            .input_with("val", Int32, 0_i32, "Value to write"),
        CallSpec::new("READ_debug_variable", "Read a range of debug variables")
            .signature("short READ_debug_variable(int DebugStart, int DebugEnd, out int[] DebugVariable)")
            .tags(["read", "system", "variables"])
            .input_with("DebugStart", Int32, 0_i32, "First variable")
            .input_with("DebugEnd", Int32, 10_i32, "Last variable")
            .range(RangeSpec::new("DebugStart", "DebugEnd"))
            .output("DebugVariables", array(Int32), "Variable values"),
        CallSpec::new("READ_system_variable", "Read a range of system variables")
            .signature("short READ_system_variable(int SystemID, int SystemStart, int SystemEnd, out double[] SystemVariable)")
            .tags(["read", "system", "variables"])
            .input_with("SystemID", Int32, 1_i32, "Variable group")
            .input_with("SystemStart", Int32, 0_i32, "First variable")
            .input_with("SystemEnd", Int32, 10_i32, "Last variable")
            .range(RangeSpec::new("SystemStart", "SystemEnd"))
            .output("SystemVariables", array(Float64), "Variable values"),
        CallSpec::new("READ_remoteTime", "Read the controller clock")
            .signature("short READ_remoteTime(out DateTime remoteTime)")
            .tags(["read", "time"])
            .output("remoteTime", DateTime, "Controller date and time"),
        CallSpec::new("WRITE_remoteDate", "Set the controller date")
            .signature("short WRITE_remoteDate(int Year, int Month, int Day)")
            .tags(["write", "time"])
            .input_with("Year", Int32, now.year(), "Year")
            .input_with("Month", Int32, now.month() as i32, "Month, 1-12")
            .input_with("Day", Int32, now.day() as i32, "Day of month"),
        CallSpec::new("WRITE_remoteTime", "Set the controller time of day")
            .signature("short WRITE_remoteTime(int Hour, int Minute, int Second)")
            .tags(["write", "time"])
            .input_with("Hour", Int32, now.hour() as i32, "Hour, 0-23")
            .input_with("Minute", Int32, now.minute() as i32, "Minute")
            .input_with("Second", Int32, now.second() as i32, "Second"),
    ]
}
