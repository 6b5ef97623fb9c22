//! The closed value model: [`ParamType`] tags and [`ParamValue`] payloads.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as Json;
use std::fmt;
use std::str::FromStr;

use crate::error::ParamError;

/// Semantic type tag of a parameter slot.
///
/// Displays (and serializes) as a short name: `int32`, `float64`,
/// `string[]`, `float32[][]`, ...
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// `bool`
    Bool,
    /// `uint8`, used for PLC bit and byte data.
    UInt8,
    /// `int16`
    Int16,
    /// `int32`
    Int32,
    /// `int64`
    Int64,
    /// `float32`
    Float32,
    /// `float64`
    Float64,
    /// `string`
    String,
    /// `datetime`, a wall-clock timestamp without zone.
    DateTime,
    /// Array of the boxed element type. Arrays nest.
    Array(Box<ParamType>),
}

impl ParamType {
    /// Array of `element`.
    pub fn array_of(element: ParamType) -> Self {
        Self::Array(Box::new(element))
    }

    /// Whether this is an array type.
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Element type if this is an array type.
    pub fn element(&self) -> Option<&ParamType> {
        match self {
            Self::Array(element) => Some(element),
            _ => None,
        }
    }

    /// The zero value of this type. Arrays default to empty.
    pub fn default_value(&self) -> ParamValue {
        match self {
            Self::Bool => ParamValue::Bool(false),
            Self::UInt8 => ParamValue::UInt8(0),
            Self::Int16 => ParamValue::Int16(0),
            Self::Int32 => ParamValue::Int32(0),
            Self::Int64 => ParamValue::Int64(0),
            Self::Float32 => ParamValue::Float32(0.0),
            Self::Float64 => ParamValue::Float64(0.0),
            Self::String => ParamValue::String(String::new()),
            Self::DateTime => ParamValue::DateTime(NaiveDateTime::default()),
            Self::Array(element) => ParamValue::empty_array((**element).clone()),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::UInt8 => f.write_str("uint8"),
            Self::Int16 => f.write_str("int16"),
            Self::Int32 => f.write_str("int32"),
            Self::Int64 => f.write_str("int64"),
            Self::Float32 => f.write_str("float32"),
            Self::Float64 => f.write_str("float64"),
            Self::String => f.write_str("string"),
            Self::DateTime => f.write_str("datetime"),
            Self::Array(element) => write!(f, "{element}[]"),
        }
    }
}

impl FromStr for ParamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(inner) = s.strip_suffix("[]") {
            return inner.parse().map(Self::array_of);
        }
        match s.to_ascii_lowercase().as_str() {
            "bool" => Ok(Self::Bool),
            "uint8" | "byte" => Ok(Self::UInt8),
            "int16" | "short" => Ok(Self::Int16),
            "int32" | "int" => Ok(Self::Int32),
            "int64" | "long" => Ok(Self::Int64),
            "float32" | "float" => Ok(Self::Float32),
            "float64" | "double" => Ok(Self::Float64),
            "string" => Ok(Self::String),
            "datetime" => Ok(Self::DateTime),
            other => Err(format!("unknown parameter type: {other}")),
        }
    }
}

impl Serialize for ParamType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ParamType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A bound parameter value.
///
/// Arrays carry their element type so that an empty array still knows
/// what it is an array of.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// `bool`
    Bool(bool),
    /// `uint8`
    UInt8(u8),
    /// `int16`
    Int16(i16),
    /// `int32`
    Int32(i32),
    /// `int64`
    Int64(i64),
    /// `float32`
    Float32(f32),
    /// `float64`
    Float64(f64),
    /// `string`
    String(String),
    /// `datetime`
    DateTime(NaiveDateTime),
    /// Array of values sharing one element type.
    Array {
        /// Element type of every item.
        element: ParamType,
        /// The items, in order.
        items: Vec<ParamValue>,
    },
}

impl ParamValue {
    /// Build an array, checking every item against `element`.
    pub fn array(element: ParamType, items: Vec<ParamValue>) -> Result<Self, ParamError> {
        if let Some(bad) = items.iter().find(|item| !item.conforms_to(&element)) {
            return Err(ParamError::InvalidArray {
                expected: element,
                actual: bad.param_type(),
            });
        }
        Ok(Self::Array { element, items })
    }

    /// An empty array of `element`.
    pub fn empty_array(element: ParamType) -> Self {
        Self::Array {
            element,
            items: Vec::new(),
        }
    }

    /// The runtime type of this value.
    pub fn param_type(&self) -> ParamType {
        match self {
            Self::Bool(_) => ParamType::Bool,
            Self::UInt8(_) => ParamType::UInt8,
            Self::Int16(_) => ParamType::Int16,
            Self::Int32(_) => ParamType::Int32,
            Self::Int64(_) => ParamType::Int64,
            Self::Float32(_) => ParamType::Float32,
            Self::Float64(_) => ParamType::Float64,
            Self::String(_) => ParamType::String,
            Self::DateTime(_) => ParamType::DateTime,
            Self::Array { element, .. } => ParamType::array_of(element.clone()),
        }
    }

    /// Whether this value is assignable to `declared`.
    ///
    /// Assignability is exact: no numeric widening. For arrays the
    /// element type must match and every item must conform recursively.
    pub fn conforms_to(&self, declared: &ParamType) -> bool {
        match (self, declared) {
            (Self::Array { element, items }, ParamType::Array(expected)) => {
                element == expected.as_ref() && items.iter().all(|item| item.conforms_to(expected))
            }
            (Self::Array { .. }, _) => false,
            (value, declared) => value.param_type() == *declared,
        }
    }

    /// Best-effort conversion of an untyped value to `target`.
    ///
    /// Accepts what arrives from text boxes and config files: numbers as
    /// strings (`"5"` → `int32 5`), `"true"`/`"1"` for booleans, ISO-8601
    /// timestamps, JSON arrays, and comma-separated lists for flat arrays.
    /// Returns `None` when no lossless conversion exists; JSON `null`
    /// never converts.
    pub fn convert(raw: &Json, target: &ParamType) -> Option<Self> {
        match target {
            ParamType::Bool => to_bool(raw).map(Self::Bool),
            ParamType::UInt8 => to_integer(raw)
                .and_then(|i| u8::try_from(i).ok())
                .map(Self::UInt8),
            ParamType::Int16 => to_integer(raw)
                .and_then(|i| i16::try_from(i).ok())
                .map(Self::Int16),
            ParamType::Int32 => to_integer(raw)
                .and_then(|i| i32::try_from(i).ok())
                .map(Self::Int32),
            ParamType::Int64 => to_integer(raw).map(Self::Int64),
            ParamType::Float32 => to_float(raw).and_then(narrow_f32).map(Self::Float32),
            ParamType::Float64 => to_float(raw).map(Self::Float64),
            ParamType::String => match raw {
                Json::String(s) => Some(Self::String(s.clone())),
                Json::Number(n) => Some(Self::String(n.to_string())),
                Json::Bool(b) => Some(Self::String(b.to_string())),
                _ => None,
            },
            ParamType::DateTime => raw.as_str().and_then(parse_datetime).map(Self::DateTime),
            ParamType::Array(element) => convert_array(raw, element),
        }
    }

    /// Render as JSON for display and logging.
    ///
    /// Non-finite floats render as `null`.
    pub fn to_json(&self) -> Json {
        match self {
            Self::Bool(b) => Json::Bool(*b),
            Self::UInt8(v) => Json::from(*v),
            Self::Int16(v) => Json::from(*v),
            Self::Int32(v) => Json::from(*v),
            Self::Int64(v) => Json::from(*v),
            Self::Float32(v) => Json::from(f64::from(*v)),
            Self::Float64(v) => Json::from(*v),
            Self::String(s) => Json::String(s.clone()),
            Self::DateTime(dt) => Json::String(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
            Self::Array { items, .. } => Json::Array(items.iter().map(Self::to_json).collect()),
        }
    }

    /// The boolean, if this is a `bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Any integer variant widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::UInt8(v) => Some(i64::from(*v)),
            Self::Int16(v) => Some(i64::from(*v)),
            Self::Int32(v) => Some(i64::from(*v)),
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Any float variant widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float32(v) => Some(f64::from(*v)),
            Self::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// The string slice, if this is a `string`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The items, if this is an array.
    pub fn as_array(&self) -> Option<&[ParamValue]> {
        match self {
            Self::Array { items, .. } => Some(items),
            _ => None,
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

fn to_bool(raw: &Json) -> Option<bool> {
    match raw {
        Json::Bool(b) => Some(*b),
        Json::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Json::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn to_integer(raw: &Json) -> Option<i64> {
    match raw {
        Json::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Json::String(s) => s.trim().parse().ok(),
        Json::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

fn to_float(raw: &Json) -> Option<f64> {
    match raw {
        Json::Number(n) => n.as_f64(),
        Json::String(s) => s.trim().parse().ok(),
        Json::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn narrow_f32(x: f64) -> Option<f32> {
    let narrowed = x as f32;
    if x.is_finite() && narrowed.is_infinite() {
        None
    } else {
        Some(narrowed)
    }
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn convert_array(raw: &Json, element: &ParamType) -> Option<ParamValue> {
    match raw {
        Json::Array(items) => items
            .iter()
            .map(|item| ParamValue::convert(item, element))
            .collect::<Option<Vec<_>>>()
            .map(|items| ParamValue::Array {
                element: element.clone(),
                items,
            }),
        Json::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Some(ParamValue::empty_array(element.clone()));
            }
            if trimmed.starts_with('[') {
                let parsed: Json = serde_json::from_str(trimmed).ok()?;
                return convert_array(&parsed, element);
            }
            // Comma lists only make sense for flat arrays.
            if element.is_array() {
                return None;
            }
            trimmed
                .split(',')
                .map(|part| ParamValue::convert(&Json::String(part.trim().to_owned()), element))
                .collect::<Option<Vec<_>>>()
                .map(|items| ParamValue::Array {
                    element: element.clone(),
                    items,
                })
        }
        _ => None,
    }
}

/// Rust types with a fixed [`ParamType`].
///
/// Lets `Vec<T>` (and `Vec<Vec<T>>`, ...) convert into a typed
/// [`ParamValue::Array`] without spelling out the element type.
pub trait TypedValue: Into<ParamValue> {
    /// The parameter type this Rust type maps to.
    fn param_type() -> ParamType;
}

macro_rules! scalar_value {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for ParamValue {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }

        impl TypedValue for $ty {
            fn param_type() -> ParamType {
                ParamType::$variant
            }
        }
    };
}

scalar_value!(bool, Bool);
scalar_value!(u8, UInt8);
scalar_value!(i16, Int16);
scalar_value!(i32, Int32);
scalar_value!(i64, Int64);
scalar_value!(f32, Float32);
scalar_value!(f64, Float64);
scalar_value!(String, String);
scalar_value!(NaiveDateTime, DateTime);

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl<T: TypedValue> From<Vec<T>> for ParamValue {
    fn from(items: Vec<T>) -> Self {
        Self::Array {
            element: T::param_type(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

impl<T: TypedValue> TypedValue for Vec<T> {
    fn param_type() -> ParamType {
        ParamType::array_of(T::param_type())
    }
}
