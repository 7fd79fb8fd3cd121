//! Attribute values as the host sees them
//!
//! A configuration or state attribute is either known, explicitly null, or
//! unknown (its value depends on something not yet applied). On the JSON
//! wire, null is `null` and unknown is the host's legacy sentinel string.

use crate::error::ConversionError;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire encoding of an unknown value
pub const UNKNOWN_SENTINEL: &str = "74D93920-ED26-11E3-AC10-0800200C9A66";

/// Returns the JSON encoding of an unknown value
pub fn unknown_json() -> serde_json::Value {
    serde_json::Value::String(UNKNOWN_SENTINEL.to_string())
}

pub fn is_unknown_json(value: &serde_json::Value) -> bool {
    matches!(value, serde_json::Value::String(s) if s == UNKNOWN_SENTINEL)
}

/// A single attribute value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value<T> {
    Unknown,
    #[default]
    Null,
    Known(T),
}

impl<T> Value<T> {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Value::Known(_))
    }

    /// The value if known; null and unknown both read as absent
    pub fn optional(&self) -> Option<&T> {
        match self {
            Value::Known(v) => Some(v),
            _ => None,
        }
    }

    /// The value, or an error naming `attribute` when it is null or unknown
    pub fn required(&self, attribute: &str) -> Result<&T, ConversionError> {
        match self {
            Value::Known(v) => Ok(v),
            Value::Null => Err(ConversionError::missing(attribute)),
            Value::Unknown => Err(ConversionError::unknown(attribute)),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Value<U> {
        match self {
            Value::Known(v) => Value::Known(f(v)),
            Value::Null => Value::Null,
            Value::Unknown => Value::Unknown,
        }
    }
}

impl<T> From<Option<T>> for Value<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Value::Known(v),
            None => Value::Null,
        }
    }
}

impl From<&str> for Value<String> {
    fn from(value: &str) -> Self {
        Value::Known(value.to_string())
    }
}

impl<T: Clone + Default> Value<T> {
    /// Known value, or `T::default()` for null and unknown
    pub fn or_default(&self) -> T {
        self.optional().cloned().unwrap_or_default()
    }
}

impl<T> Value<Vec<T>> {
    /// Empty lists become null, so an absent remote collection never diffs
    /// against an unset attribute.
    pub fn non_empty(items: Vec<T>) -> Self {
        if items.is_empty() {
            Value::Null
        } else {
            Value::Known(items)
        }
    }
}

impl Value<i64> {
    /// Converts a remote identifier into an Int64 attribute
    pub fn from_u64(attribute: &str, value: u64) -> Result<Self, ConversionError> {
        i64::try_from(value)
            .map(Value::Known)
            .map_err(|_| ConversionError::out_of_range(attribute, value))
    }

    /// Converts an Int64 attribute back to its unsigned remote form
    pub fn to_u64(&self, attribute: &str) -> Result<Option<u64>, ConversionError> {
        match self {
            Value::Known(v) => u64::try_from(*v)
                .map(Some)
                .map_err(|_| ConversionError::out_of_range(attribute, v)),
            _ => Ok(None),
        }
    }

    pub fn required_u64(&self, attribute: &str) -> Result<u64, ConversionError> {
        let value = *self.required(attribute)?;
        u64::try_from(value).map_err(|_| ConversionError::out_of_range(attribute, value))
    }
}

impl<T: Serialize> Serialize for Value<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Unknown => serializer.serialize_str(UNKNOWN_SENTINEL),
            Value::Null => serializer.serialize_none(),
            Value::Known(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Value<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        if raw.is_null() {
            return Ok(Value::Null);
        }
        if is_unknown_json(&raw) {
            return Ok(Value::Unknown);
        }
        serde_json::from_value(raw).map(Value::Known).map_err(D::Error::custom)
    }
}

/// Replaces every unknown inside `planned` with the value found at the same
/// path in `fallback`, or null when there is none.
pub fn resolve_unknowns(
    planned: &serde_json::Value,
    fallback: Option<&serde_json::Value>,
) -> serde_json::Value {
    use serde_json::Value as Json;

    if is_unknown_json(planned) {
        return fallback.cloned().unwrap_or(Json::Null);
    }
    match planned {
        Json::Object(map) => Json::Object(
            map.iter()
                .map(|(k, v)| {
                    let prior = fallback.and_then(|f| f.get(k));
                    (k.clone(), resolve_unknowns(v, prior))
                })
                .collect(),
        ),
        Json::Array(items) => Json::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| resolve_unknowns(v, fallback.and_then(|f| f.get(i))))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// True when `value` contains an unknown anywhere
pub fn contains_unknown(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Object(map) => map.values().any(contains_unknown),
        serde_json::Value::Array(items) => items.iter().any(contains_unknown),
        other => is_unknown_json(other),
    }
}
