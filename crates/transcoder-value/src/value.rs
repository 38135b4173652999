//! Runtime values

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use num_bigint::BigInt;

/// Largest integer an `f64` represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// A value handed to or produced by the transcoder.
///
/// Absent object fields are not a variant of their own: a missing key reads
/// as [`Value::Null`] through [`Value::get_or_null`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    /// Raw integer of arbitrary precision, coerced to `Number` on validation.
    BigInt(BigInt),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
    Binary(Vec<u8>),
    /// Calendar date with no zone attached.
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

static NULL: Value = Value::Null;

impl Value {
    /// Wrap a byte buffer. `Vec<u8>` already converts into an array of numbers,
    /// so binary data gets its own constructor.
    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Binary(bytes.into())
    }

    /// Build an object from `(field, value)` pairs.
    pub fn object<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Field lookup on objects. Any other variant has no fields.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.as_object().and_then(|fields| fields.get(field))
    }

    /// Field lookup that reads a missing field as `Null`.
    pub fn get_or_null(&self, field: &str) -> &Value {
        self.get(field).unwrap_or(&NULL)
    }

    /// Short name of the variant, for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Binary(_) => "binary",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
        }
    }

    /// Compact JSON rendering used in diagnostics.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("undefined"))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_json_string())
    }
}

// ============================================================================
// From implementations
// ============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        if (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&v) {
            Value::Number(v as f64)
        } else {
            Value::BigInt(BigInt::from(v))
        }
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        if v <= MAX_SAFE_INTEGER as u64 {
            Value::Number(v as f64)
        } else {
            Value::BigInt(BigInt::from(v))
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Value::BigInt(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Object(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::object(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_reads_as_null() {
        let value = Value::object([("name", "Ada")]);
        assert_eq!(value.get_or_null("name"), &Value::from("Ada"));
        assert!(value.get_or_null("age").is_null());
        assert!(Value::from(3).get_or_null("anything").is_null());
    }

    #[test]
    fn wide_integers_become_bigint() {
        assert_eq!(Value::from(42i64), Value::Number(42.0));
        assert_eq!(
            Value::from(i64::MAX),
            Value::BigInt(BigInt::from(i64::MAX))
        );
        assert_eq!(
            Value::from(MAX_SAFE_INTEGER as u64 + 1),
            Value::BigInt(BigInt::from(MAX_SAFE_INTEGER as u64 + 1))
        );
    }

    #[test]
    fn option_maps_none_to_null() {
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(Value::from(Some(true)), Value::Bool(true));
    }

    #[test]
    fn vec_converts_to_array() {
        let value = Value::from(vec![1, 2]);
        assert_eq!(
            value.as_array(),
            Some(&[Value::Number(1.0), Value::Number(2.0)][..])
        );
    }
}
