//! Device status codes returned by the native call.
//!
//! `0` means success. Every other known code has a fixed description;
//! unknown codes fall back to `"Unknown error (code: N)"`.

use std::borrow::Cow;

macro_rules! status_codes {
    ($($variant:ident = $code:literal => $desc:literal, $retry:literal;)*) => {
        /// Known status codes of the remote CNC library.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i16)]
        pub enum StatusCode {
            $(
                #[doc = $desc]
                $variant = $code,
            )*
        }

        impl StatusCode {
            /// Every known code, in numeric order.
            pub const ALL: &'static [StatusCode] = &[$(Self::$variant),*];

            /// Look up a known code.
            pub fn from_code(code: i16) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Fixed human-readable description.
            pub fn description(self) -> &'static str {
                match self {
                    $(Self::$variant => $desc,)*
                }
            }

            /// Whether re-invoking later may succeed.
            pub fn is_retryable(self) -> bool {
                match self {
                    $(Self::$variant => $retry,)*
                }
            }
        }
    };
}

status_codes! {
    Success = 0 => "Successful execution", false;
    FunctionNotExecuted = 1 => "Function was not executed", false;
    NotSupported = 2 => "Function not supported", false;
    ProtocolError = 3 => "Protocol error", true;
    SocketError = 4 => "Socket error (connection problem)", true;
    LibraryLoadError = 5 => "Library load error", false;
    UsbEmpty = 6 => "USB device contains no data", false;
    NoUsb = 7 => "USB device not detected", false;
    HandleNumber = 8 => "Invalid handle number", false;
    VersionMismatch = 9 => "Software version mismatch", false;
    AbnormalLibraryState = 10 => "Library is in an abnormal state", false;
    ResetOrStopRequest = 11 => "Reset or stop requested", true;
    CncBusy = 12 => "CNC busy (another operation in progress)", true;
    NormalTermination = 13 => "Normal termination (not an error)", false;
    DataBlockLength = 14 => "Invalid data block length", false;
    DataNumber = 15 => "Invalid data number", false;
    DataAttribute = 16 => "Invalid data attribute", false;
    InvalidData = 17 => "Invalid or corrupted data", false;
    NoOption = 18 => "Option not available", false;
    WriteProtected = 19 => "Write protected", false;
    MemoryOverflow = 20 => "Memory overflow", false;
    CncParameter = 21 => "CNC parameter error", false;
    BufferEmptyOrFull = 22 => "Buffer empty or full", true;
    PathNumber = 23 => "Invalid path number", false;
    CncMode = 24 => "Invalid CNC mode", false;
    ExecutionRejected = 25 => "CNC rejected the command", true;
    DataServer = 26 => "Data server error", true;
    Alarm = 27 => "Alarm condition", false;
    Stopped = 28 => "Execution stopped", false;
    DataProtected = 29 => "Data protection error", false;
    MachineIdNotFound = 30 => "Machine ID not found", false;
    NoOutput = 31 => "No output data", false;
}

impl StatusCode {
    /// Numeric value.
    pub fn code(self) -> i16 {
        self as i16
    }

    /// Whether this is the success sentinel.
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

/// Description for any status code, known or not.
pub fn describe_status(code: i16) -> Cow<'static, str> {
    match StatusCode::from_code(code) {
        Some(known) => Cow::Borrowed(known.description()),
        None => Cow::Owned(format!("Unknown error (code: {code})")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_lookup() {
        for status in StatusCode::ALL {
            assert_eq!(StatusCode::from_code(status.code()), Some(*status));
        }
    }

    #[test]
    fn table_is_dense_from_zero() {
        for (i, status) in StatusCode::ALL.iter().enumerate() {
            assert_eq!(status.code() as usize, i);
        }
    }
}
