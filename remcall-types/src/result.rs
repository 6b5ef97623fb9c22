//! The uniform structured result of one invocation.
//!
//! Success, device status failures, native faults, and precondition
//! failures all produce the same shape:
//!
//! ```json
//! {
//!   "ResultCode": 0,
//!   "ResultDescription": "Successful execution",
//!   "InputData": [{"Name": "AxisName", "Type": "string", "Value": "X", "Description": "..."}],
//!   "OutputData": []
//! }
//! ```
//!
//! Callers that need to branch look at [`InvocationResult::outcome`];
//! display code only ever needs [`format_result`].

use serde::Serialize;

use crate::error::NativeFault;
use crate::param::ParamSnapshot;
use crate::status::describe_status;

/// Result code when no live connection was available.
pub const NOT_CONNECTED_CODE: i32 = -1;
/// Result code when a second invocation was attempted while one was in flight.
pub const REJECTED_CODE: i32 = -2;
/// Result code when the native reply did not match the declared outputs.
pub const CONTRACT_VIOLATION_CODE: i32 = -3;

/// Why an invocation failed.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No active connection, and offline mode is off.
    NotConnected,
    /// The device answered with a non-zero status.
    DomainStatus(i16),
    /// The native call could not be completed; carries the fault code.
    TransportFault(i32),
    /// The native reply's shape or types did not match the declared outputs.
    ContractViolation,
    /// Another invocation of the same function was already in flight.
    Rejected,
}

/// Terminal state of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Status 0; outputs were written.
    Succeeded,
    /// Anything else; outputs were left untouched.
    Failed(FailureKind),
}

/// Structured result of one invocation.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvocationResult {
    /// Status code, fault code, or one of the negative harness codes.
    pub result_code: i32,
    /// Human-readable description of the code.
    pub result_description: String,
    /// Inputs as they were sent.
    pub input_data: Vec<ParamSnapshot>,
    /// Outputs after the invocation.
    pub output_data: Vec<ParamSnapshot>,
    /// How the invocation ended. Not part of the display shape.
    #[serde(skip)]
    pub outcome: Outcome,
}

impl InvocationResult {
    /// Status 0.
    pub fn success(inputs: Vec<ParamSnapshot>, outputs: Vec<ParamSnapshot>) -> Self {
        Self::status(0, inputs, outputs)
    }

    /// A device status code, described from the fixed table.
    pub fn status(code: i16, inputs: Vec<ParamSnapshot>, outputs: Vec<ParamSnapshot>) -> Self {
        let outcome = if code == 0 {
            Outcome::Succeeded
        } else {
            Outcome::Failed(FailureKind::DomainStatus(code))
        };
        Self {
            result_code: i32::from(code),
            result_description: describe_status(code).into_owned(),
            input_data: inputs,
            output_data: outputs,
            outcome,
        }
    }

    /// The native call never completed.
    pub fn fault(
        fault: &NativeFault,
        inputs: Vec<ParamSnapshot>,
        outputs: Vec<ParamSnapshot>,
    ) -> Self {
        Self {
            result_code: fault.code(),
            result_description: fault.to_string(),
            input_data: inputs,
            output_data: outputs,
            outcome: Outcome::Failed(FailureKind::TransportFault(fault.code())),
        }
    }

    /// No connection available.
    pub fn not_connected(inputs: Vec<ParamSnapshot>, outputs: Vec<ParamSnapshot>) -> Self {
        Self {
            result_code: NOT_CONNECTED_CODE,
            result_description: "CNC not connected".into(),
            input_data: inputs,
            output_data: outputs,
            outcome: Outcome::Failed(FailureKind::NotConnected),
        }
    }

    /// Re-entrant invocation refused.
    pub fn rejected(inputs: Vec<ParamSnapshot>, outputs: Vec<ParamSnapshot>) -> Self {
        Self {
            result_code: REJECTED_CODE,
            result_description: "Invocation already in progress".into(),
            input_data: inputs,
            output_data: outputs,
            outcome: Outcome::Failed(FailureKind::Rejected),
        }
    }

    /// The reply did not match the declared outputs.
    pub fn contract_violation(
        detail: &str,
        inputs: Vec<ParamSnapshot>,
        outputs: Vec<ParamSnapshot>,
    ) -> Self {
        Self {
            result_code: CONTRACT_VIOLATION_CODE,
            result_description: format!("Native reply does not match declared outputs: {detail}"),
            input_data: inputs,
            output_data: outputs,
            outcome: Outcome::Failed(FailureKind::ContractViolation),
        }
    }

    /// Whether the invocation succeeded.
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Succeeded
    }

    /// The failure kind, if any.
    pub fn failure(&self) -> Option<FailureKind> {
        match self.outcome {
            Outcome::Succeeded => None,
            Outcome::Failed(kind) => Some(kind),
        }
    }
}

/// Render a result as indented JSON for display and logging.
///
/// Field order is ResultCode, ResultDescription, InputData, OutputData.
pub fn format_result(result: &InvocationResult) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|e| format!("{result:?} ({e})"))
}
