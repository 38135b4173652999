//! Scalar validators shared by both directions.
//!
//! Every built-in [`ScalarKind`] is checked and normalized by the one
//! function here, whether the walker is encoding or decoding.

use base64::{engine::general_purpose::STANDARD, Engine};
use num_traits::ToPrimitive;
use url::Url;

use super::error::TranscodeError;
use super::path::Path;
use super::pattern;
use crate::schema::ScalarKind;
use crate::Value;

/// Validate `value` against `kind` and return its normalized form.
///
/// Arbitrary-precision integers are first coerced to `f64`, losing
/// precision past 2^53.
pub fn check_scalar(
    path: &Path<'_>,
    kind: ScalarKind,
    value: &Value,
) -> Result<Value, TranscodeError> {
    let coerced;
    let value = match value {
        Value::BigInt(n) => {
            coerced = Value::Number(n.to_f64().unwrap_or(f64::NAN));
            &coerced
        }
        other => other,
    };
    let mismatch = || TranscodeError::mismatch(path, kind, value);

    match (kind, value) {
        (ScalarKind::Json, Value::Null) => Ok(Value::Null),
        (ScalarKind::Json, other) => deep_clone(other).ok_or_else(mismatch),
        (ScalarKind::Bool, Value::Bool(b)) => Ok(Value::Bool(*b)),
        (kind, Value::String(s)) if kind.is_plain_string() => Ok(Value::String(s.clone())),
        (ScalarKind::Hex, Value::String(s)) if pattern::HEX.is_match(s) => {
            Ok(Value::String(s.to_lowercase()))
        }
        (ScalarKind::Uuid, Value::String(s)) if pattern::UUID.is_match(s) => {
            Ok(Value::String(s.to_lowercase()))
        }
        (ScalarKind::Base64, Value::String(s)) if decode_canonical_base64(s).is_some() => {
            Ok(Value::String(s.clone()))
        }
        (ScalarKind::Int, Value::Number(n)) if is_int32(*n) => Ok(Value::Number(*n)),
        (ScalarKind::Uint, Value::Number(n)) if is_int32(*n) && *n >= 0.0 => {
            Ok(Value::Number(*n))
        }
        (ScalarKind::Float, Value::Number(n)) => Ok(Value::Number(*n)),
        (ScalarKind::Money, Value::Number(n)) if n.is_finite() && n.fract() == 0.0 => {
            Ok(Value::Number(*n))
        }
        (ScalarKind::Url, Value::String(s)) => Url::parse(s)
            .map(|url| Value::String(url.to_string()))
            .map_err(|_| mismatch()),
        (ScalarKind::Void, _) => Ok(Value::Null),
        (ScalarKind::LatLng, Value::Object(fields))
            if matches!(fields.get("lat"), Some(Value::Number(_)))
                && matches!(fields.get("lng"), Some(Value::Number(_))) =>
        {
            Ok(value.clone())
        }
        _ => Err(mismatch()),
    }
}

/// Decode standard base64 only when re-encoding gives back the exact input,
/// which rules out missing padding and stray bits.
pub(crate) fn decode_canonical_base64(text: &str) -> Option<Vec<u8>> {
    let bytes = STANDARD.decode(text).ok()?;
    (STANDARD.encode(&bytes) == text).then_some(bytes)
}

/// Integral and inside the signed 32-bit range.
fn is_int32(n: f64) -> bool {
    n.fract() == 0.0 && n >= f64::from(i32::MIN) && n <= f64::from(i32::MAX)
}

/// Copy through a JSON serialize/deserialize pass, leaving only the JSON
/// subset behind.
fn deep_clone(value: &Value) -> Option<Value> {
    serde_json::to_value(value)
        .and_then(serde_json::from_value)
        .ok()
}
