//! PLC bits, registers, timers, counters, typed address access, and ladder.

use remcall_function::{CallSpec, RangeSpec};
use remcall_types::ParamType::{Int16, Int32, String as Text, UInt8};

use crate::{array, default_download_dir};

const READ_BITS: [(&str, &str); 5] = [
    ("READ_plc_ibit", "Read PLC input bits"),
    ("READ_plc_obit", "Read PLC output bits"),
    ("READ_plc_cbit", "Read PLC internal bits"),
    ("READ_plc_sbit", "Read PLC status bits"),
    ("READ_plc_abit", "Read PLC analog bits"),
];

const WRITE_BITS: [(&str, &str); 3] = [
    ("WRITE_plc_ibit", "Write PLC input bits"),
    ("WRITE_plc_cbit", "Write PLC internal bits"),
    ("WRITE_plc_sbit", "Write PLC status bits"),
];

fn read_bits(name: &str, description: &str) -> CallSpec {
    CallSpec::new(name, description)
        .signature(format!("short {name}(int PlcStart, int PlcEnd, out byte[] PlcData)"))
        .tags(["read", "plc", "bits"])
        .input_with("PlcStart", Int32, 0_i32, "First bit address")
        .input_with("PlcEnd", Int32, 10_i32, "Last bit address")
        .range(RangeSpec::new("PlcStart", "PlcEnd"))
        .output("PlcData", array(UInt8), "Bit values")
}

fn write_bits(name: &str, description: &str) -> CallSpec {
    CallSpec::new(name, description)
        .signature(format!("short {name}(int PlcStart, int PlcEnd, byte[] PlcData)"))
        .tags(["write", "plc", "bits"])
        .input_with("PlcStart", Int32, 0_i32, "First bit address")
        .input_with("PlcEnd", Int32, 10_i32, "Last bit address")
        .input_with("BitData", array(UInt8), vec![0_u8; 2], "Bit values to write")
        .range(RangeSpec::new("PlcStart", "PlcEnd"))
}

pub(crate) fn specs() -> Vec<CallSpec> {
    let mut specs: Vec<CallSpec> = READ_BITS
        .iter()
        .map(|(name, description)| read_bits(name, description))
        .collect();
    specs.extend(
        WRITE_BITS
            .iter()
            .map(|(name, description)| write_bits(name, description)),
    );
    specs.extend([
        CallSpec::new("READ_plc_register", "Read a range of PLC registers")
            .signature("short READ_plc_register(int PlcStart, int PlcEnd, out int[] PlcData)")
            .tags(["read", "plc", "registers"])
            .input_with("PlcStart", Int32, 0_i32, "First register")
            .input_with("PlcEnd", Int32, 10_i32, "Last register")
            .range(RangeSpec::new("PlcStart", "PlcEnd").max_span(100))
            .output("PlcData", array(Int32), "Register values"),
        // Native overload of READ_plc_register, registered under its own name.
        CallSpec::new("READ_plc_register_string", "Read one PLC register as text")
            .signature("short READ_plc_register(int Raddress, out string PlcData)")
            .tags(["read", "plc", "registers"])
            .input_with("Raddress", Int32, 0_i32, "Register address")
            .output("PlcData", Text, "Register value"),
        CallSpec::new("READ_plc_timer", "Read a range of PLC timers")
            .signature("short READ_plc_timer(int PlcStart, int PlcEnd, out int[] PlcTimerValue, out int[] PlcTimerSetting, out short[] PlcTimerState)")
            .tags(["read", "plc", "timer"])
            .input_with("PlcStart", Int32, 0_i32, "First timer")
            .input_with("PlcEnd", Int32, 5_i32, "Last timer")
            .range(RangeSpec::new("PlcStart", "PlcEnd"))
            .output("PlcTimerValue", array(Int32), "Current values, ms")
            .output("PlcTimerSetting", array(Int32), "Preset values, ms")
            .output("PlcTimerState", array(Int16), "States: 0 off, 1 on, 2 done"),
        CallSpec::new("READ_plc_counter", "Read a range of PLC counters")
            .signature("short READ_plc_counter(int PlcStart, int PlcEnd, out int[] PlcCounterValue, out int[] PlcCounterSetting, out short[] PlcCounterState)")
            .tags(["read", "plc", "counter"])
            .input_with("PlcStart", Int32, 0_i32, "First counter")
            .input_with("PlcEnd", Int32, 5_i32, "Last counter")
            .range(RangeSpec::new("PlcStart", "PlcEnd").max_span(100))
            .output("PlcCounterValue", array(Int32), "Current values")
            .output("PlcCounterSetting", array(Int32), "Preset values")
            .output("PlcCounterState", array(Int16), "States"),
        CallSpec::new("WRITE_plc_register", "Write a range of PLC registers")
            .signature("short WRITE_plc_register(int PlcStart, int PlcEnd, int[] PlcData)")
            .tags(["write", "plc", "registers"])
            .input_with("PlcStart", Int32, 0_i32, "First register")
            .input_with("PlcEnd", Int32, 10_i32, "Last register")
            .input_with("PlcData", array(Int32), vec![0_i32], "32-bit values to write")
            .range(RangeSpec::new("PlcStart", "PlcEnd")),
        CallSpec::new("READ_plc_type", "Read the data type of a PLC address")
            .signature("short READ_plc_type(string Addr, out short PlcType)")
            .tags(["read", "plc"])
            .input_with("Addr", Text, "localhost", "PLC address")
            .output("PlcType", Int16, "Data type code"),
        CallSpec::new("READ_plc_type2", "Read the data type and bounds of a PLC address")
            .signature("short READ_plc_type2(string Addr, out short PlcType, out int PlcStart, out int PlcEnd)")
            .tags(["read", "plc"])
            .input_with("Addr", Text, "localhost", "PLC address")
            .output("PlcType", Int16, "Data type code")
            .output("PlcStart", Int32, "First valid address")
            .output("PlcEnd", Int32, "Last valid address"),
        CallSpec::new("READ_plc_addr", "Read typed data from a PLC address range")
            .signature("short READ_plc_addr(string Addr, int PlcStart, int PlcEnd, out short PlcType, out byte[] PlcDataB, out short[] PlcDataS, out int[] PlcDataI)")
            .tags(["read", "plc"])
            .input_with("Addr", Text, "192.168.1.1:102", "PLC address")
            .input_with("PlcStart", Int32, 0_i32, "First address")
            .input_with("PlcEnd", Int32, 10_i32, "Last address")
            .range(RangeSpec::new("PlcStart", "PlcEnd"))
            .output("PlcType", Int16, "Data type code")
            .output("PlcDataB", array(UInt8), "Byte data")
            .output("PlcDataS", array(Int16), "Short data")
            .output("PlcDataI", array(Int32), "Int data"),
        CallSpec::new("WRITE_plc_addr", "Write typed data to a PLC address range")
            .signature("short WRITE_plc_addr(string Addr, int PlcStart, int PlcEnd, short PlcType, byte[] PlcDataB, short[] PlcDataS, int[] PlcDataI)")
            .tags(["write", "plc"])
            .input_with("Addr", Text, "0", "PLC address")
            .input_with("PlcStart", Int32, 0_i32, "First address")
            .input_with("PlcEnd", Int32, 10_i32, "Last address")
            .input_with("PlcType", Int16, 0_i16, "Data type code")
            .input_with("PlcDataB", array(UInt8), Vec::<u8>::new(), "Byte data")
            .input_with("PlcDataS", array(Int16), Vec::<i16>::new(), "Short data")
            .input_with("PlcDataI", array(Int32), Vec::<i32>::new(), "Int data"),
        CallSpec::new("READ_plc_ver", "Read the PLC version")
            .signature("short READ_plc_ver(out string Version)")
            .tags(["read", "plc"])
            .output("Version", Text, "Version string"),
        CallSpec::new("DOWNLOAD_plc_ladder", "Download the PLC ladder program")
            .signature("short DOWNLOAD_plc_ladder(string Destination)")
            .tags(["download", "plc"])
            .input_with(
                "DestinationPath",
                Text,
                default_download_dir(),
                "Local directory to save into",
            ),
    ]);
    specs
}
