//! Named, typed, described value slots.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::error::ParamError;
use crate::value::{ParamType, ParamValue};

/// A change to a parameter's value, delivered to observers.
#[derive(Debug, Clone, Copy)]
pub struct ParamChange<'a> {
    /// Name of the parameter that changed.
    pub name: &'a str,
    /// Value before the change.
    pub previous: Option<&'a ParamValue>,
    /// Value after the change (`None` when cleared).
    pub current: Option<&'a ParamValue>,
}

/// Receives "value changed" events from a [`Parameter`].
///
/// Called synchronously on the assigning thread, after the new value is
/// committed, and only when the value actually changed. Observers must not
/// call back into the function that owns the parameter.
pub trait ParamObserver: Send + Sync {
    /// Called once per committed change.
    fn value_changed(&self, change: &ParamChange<'_>);
}

impl<F> ParamObserver for F
where
    F: Fn(&ParamChange<'_>) + Send + Sync,
{
    fn value_changed(&self, change: &ParamChange<'_>) {
        self(change)
    }
}

/// One named, typed value slot of a remote function.
///
/// The value is either absent or conforms to the declared type; every
/// assignment path enforces this.
#[derive(Clone)]
pub struct Parameter {
    name: String,
    declared: ParamType,
    value: Option<ParamValue>,
    description: String,
    observers: Vec<Arc<dyn ParamObserver>>,
}

impl Parameter {
    /// Create an empty parameter.
    pub fn new(name: impl Into<String>, declared: ParamType) -> Self {
        Self {
            name: name.into(),
            declared,
            value: None,
            description: String::new(),
            observers: Vec::new(),
        }
    }

    /// Set the human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set an initial value, validated immediately.
    pub fn with_value(mut self, value: impl Into<ParamValue>) -> Result<Self, ParamError> {
        self.set_value(value)?;
        Ok(self)
    }

    /// Parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    pub fn declared_type(&self) -> &ParamType {
        &self.declared
    }

    /// Current value, if bound.
    pub fn value(&self) -> Option<&ParamValue> {
        self.value.as_ref()
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Register an observer for value changes.
    pub fn observe(&mut self, observer: Arc<dyn ParamObserver>) {
        self.observers.push(observer);
    }

    /// Strict assignment.
    ///
    /// Fails with [`ParamError::TypeMismatch`] when the value does not
    /// conform to the declared type; the previous value is kept.
    pub fn set_value(&mut self, value: impl Into<ParamValue>) -> Result<(), ParamError> {
        let value = value.into();
        if !value.conforms_to(&self.declared) {
            return Err(ParamError::TypeMismatch {
                name: self.name.clone(),
                expected: self.declared.clone(),
                actual: value.param_type(),
            });
        }
        self.commit(Some(value));
        Ok(())
    }

    /// Forgiving assignment from an untyped source.
    ///
    /// Converts `raw` to the declared type and assigns it. JSON `null`
    /// clears the slot. Returns `false` (leaving the value untouched) when
    /// no conversion exists. Never fails loudly.
    pub fn try_convert_and_set(&mut self, raw: &serde_json::Value) -> bool {
        if raw.is_null() {
            self.clear();
            return true;
        }
        match ParamValue::convert(raw, &self.declared) {
            Some(value) => {
                self.commit(Some(value));
                true
            }
            None => false,
        }
    }

    /// [`try_convert_and_set`](Self::try_convert_and_set) for text input.
    pub fn try_set_text(&mut self, text: &str) -> bool {
        self.try_convert_and_set(&serde_json::Value::String(text.to_owned()))
    }

    /// Remove the bound value.
    pub fn clear(&mut self) {
        self.commit(None);
    }

    /// Serializable copy of name, type, value, and description.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            name: self.name.clone(),
            declared_type: self.declared.clone(),
            value: self.value.clone(),
            description: self.description.clone(),
        }
    }

    fn commit(&mut self, value: Option<ParamValue>) {
        if self.value == value {
            return;
        }
        let previous = std::mem::replace(&mut self.value, value);
        let change = ParamChange {
            name: &self.name,
            previous: previous.as_ref(),
            current: self.value.as_ref(),
        };
        for observer in &self.observers {
            observer.value_changed(&change);
        }
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("declared", &self.declared)
            .field("value", &self.value)
            .field("description", &self.description)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Point-in-time copy of a parameter, as it appears in results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParamSnapshot {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "Type")]
    pub declared_type: ParamType,
    /// Bound value, `null` when absent.
    pub value: Option<ParamValue>,
    /// Human-readable description.
    pub description: String,
}
