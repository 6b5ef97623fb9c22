//! Declarative description of one native call.

use remcall_types::{ParamError, ParamType, ParamValue, Parameter};
use serde::Serialize;
use std::collections::HashSet;

/// One typed slot of a call: an argument or an out-argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotSpec {
    /// Slot name, unique within its list.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: ParamType,
    /// Human-readable description.
    pub description: String,
    /// Value bound when the function is built, inputs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial: Option<ParamValue>,
}

/// An inclusive address range carried by two integer inputs.
///
/// Checked before the native call: the start must be at least `min`, the
/// end not before the start, and the span no wider than `max_span`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeSpec {
    /// Name of the input holding the first address.
    pub start: String,
    /// Name of the input holding the last address.
    pub end: String,
    /// Lowest valid first address.
    pub min: i64,
    /// Largest allowed `end - start`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_span: Option<i64>,
}

impl RangeSpec {
    /// Range over inputs `start` and `end`, starting at 0, unbounded span.
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_owned(),
            end: end.to_owned(),
            min: 0,
            max_span: None,
        }
    }

    /// Lowest valid first address.
    #[must_use]
    pub fn min(mut self, min: i64) -> Self {
        self.min = min;
        self
    }

    /// Largest allowed `end - start`.
    #[must_use]
    pub fn max_span(mut self, span: i64) -> Self {
        self.max_span = Some(span);
        self
    }

    /// Whether `first..=last` satisfies this range.
    pub fn accepts(&self, first: i64, last: i64) -> bool {
        first >= self.min
            && last >= first
            && self
                .max_span
                .is_none_or(|span| last.checked_sub(first).is_some_and(|d| d <= span))
    }
}

/// Name, documentation, tags, and slot layout of one native call.
///
/// Slot order is the native argument order.
///
/// # Example
///
/// ```
/// use remcall_function::CallSpec;
/// use remcall_types::ParamType;
///
/// let spec = CallSpec::new("WRITE_relpos", "Move an axis by a relative distance")
///     .signature("short WRITE_relpos(string AxisName, double PosValue)")
///     .tags(["write", "axis", "position"])
///     .input_with("AxisName", ParamType::String, "X", "Axis name")
///     .input_with("PosValue", ParamType::Float64, 0.0_f64, "Relative distance");
/// assert_eq!(spec.inputs.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CallSpec {
    /// Native call identifier.
    pub name: String,
    /// What the call does.
    pub description: String,
    /// Native call shape, for documentation.
    pub signature: String,
    /// Categorization tags, insertion-ordered and deduplicated.
    pub tags: Vec<String>,
    /// Arguments, in native order.
    pub inputs: Vec<SlotSpec>,
    /// Out-arguments, in native order.
    pub outputs: Vec<SlotSpec>,
    /// Address ranges checked before each call.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<RangeSpec>,
}

impl CallSpec {
    /// Start a spec with no slots.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Set the signature text.
    #[must_use]
    pub fn signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    /// Add tags, skipping ones already present.
    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in tags {
            let tag = tag.into();
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self
    }

    /// Append an unbound argument.
    #[must_use]
    pub fn input(mut self, name: &str, ty: ParamType, description: &str) -> Self {
        self.inputs.push(slot(name, ty, description, None));
        self
    }

    /// Append an argument with an initial value.
    #[must_use]
    pub fn input_with(
        mut self,
        name: &str,
        ty: ParamType,
        initial: impl Into<ParamValue>,
        description: &str,
    ) -> Self {
        self.inputs
            .push(slot(name, ty, description, Some(initial.into())));
        self
    }

    /// Append an out-argument.
    #[must_use]
    pub fn output(mut self, name: &str, ty: ParamType, description: &str) -> Self {
        self.outputs.push(slot(name, ty, description, None));
        self
    }

    /// Require two inputs to form a valid address range.
    #[must_use]
    pub fn range(mut self, range: RangeSpec) -> Self {
        self.ranges.push(range);
        self
    }

    /// Whether this call spec carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Instantiate the input parameter list.
    pub fn build_inputs(&self) -> Result<Vec<Parameter>, ParamError> {
        build(&self.inputs)
    }

    /// Instantiate the output parameter list, all slots empty.
    pub fn build_outputs(&self) -> Result<Vec<Parameter>, ParamError> {
        build(&self.outputs)
    }
}

fn slot(name: &str, ty: ParamType, description: &str, initial: Option<ParamValue>) -> SlotSpec {
    SlotSpec {
        name: name.to_owned(),
        ty,
        description: description.to_owned(),
        initial,
    }
}

fn build(slots: &[SlotSpec]) -> Result<Vec<Parameter>, ParamError> {
    let mut seen = HashSet::new();
    slots
        .iter()
        .map(|slot| {
            if !seen.insert(slot.name.as_str()) {
                return Err(ParamError::DuplicateParameter(slot.name.clone()));
            }
            let param = Parameter::new(slot.name.as_str(), slot.ty.clone())
                .with_description(slot.description.as_str());
            match &slot.initial {
                Some(value) => param.with_value(value.clone()),
                None => Ok(param),
            }
        })
        .collect()
}
