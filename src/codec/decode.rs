//! Wire → native.

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

use super::error::TranscodeError;
use super::path::Path;
use super::pattern;
use super::scalar::decode_canonical_base64;
use super::walk::{Direction, Walker};
use super::Limits;
use crate::schema::{TypeDescription, TypeTable};
use crate::Value;

pub(crate) struct Decoding;

impl Direction for Decoding {
    const NAME: &'static str = "decode";

    fn bytes(path: &Path<'_>, value: &Value) -> Result<Value, TranscodeError> {
        match value {
            Value::String(text) => decode_canonical_base64(text)
                .map(Value::Binary)
                .ok_or_else(|| TranscodeError::mismatch(path, "bytes (base64)", value)),
            _ => Err(TranscodeError::mismatch(path, "bytes (base64)", value)),
        }
    }

    /// `YYYY-MM-DD` naming a real calendar day.
    fn date(path: &Path<'_>, value: &Value) -> Result<Value, TranscodeError> {
        match value {
            Value::String(text) if pattern::DATE.is_match(text) => {
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .map(Value::Date)
                    .map_err(|_| TranscodeError::mismatch(path, "date", value))
            }
            _ => Err(TranscodeError::mismatch(path, "date", value)),
        }
    }

    /// `YYYY-MM-DDTHH:MM:SS[.ffffff][Z]`, read as UTC whether or not the
    /// zone marker is present.
    fn datetime(path: &Path<'_>, value: &Value) -> Result<Value, TranscodeError> {
        match value {
            Value::String(text) if pattern::DATETIME.is_match(text) => parse_utc(text)
                .map(Value::DateTime)
                .ok_or_else(|| TranscodeError::mismatch(path, "datetime", value)),
            _ => Err(TranscodeError::mismatch(path, "datetime", value)),
        }
    }
}

fn parse_utc(text: &str) -> Option<chrono::DateTime<Utc>> {
    let body = text.strip_suffix('Z').unwrap_or(text);
    let format = if body.contains('.') {
        "%Y-%m-%dT%H:%M:%S%.f"
    } else {
        "%Y-%m-%dT%H:%M:%S"
    };
    let naive = NaiveDateTime::parse_from_str(body, format).ok()?;
    // chrono reads second 60 as a leap second; no real instant has one.
    if naive.nanosecond() >= 1_000_000_000 {
        return None;
    }
    Some(Utc.from_utc_datetime(&naive))
}

/// Validate a wire value against `ty` and produce its native form.
///
/// Mirrors `encode` step for step; only `bytes`, `date` and
/// `datetime` leaves convert differently.
pub fn decode(
    table: &TypeTable,
    path: &str,
    ty: &TypeDescription,
    value: &Value,
) -> Result<Value, TranscodeError> {
    decode_with_limits(table, path, ty, value, None)
}

/// [`decode`] with explicit limits; `None` means [`Limits::default`].
pub fn decode_with_limits(
    table: &TypeTable,
    path: &str,
    ty: &TypeDescription,
    value: &Value,
    limits: Option<&Limits>,
) -> Result<Value, TranscodeError> {
    Walker::<Decoding>::new(table, limits).run(path, ty, value)
}
