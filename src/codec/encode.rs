//! Native → wire.

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};

use super::error::TranscodeError;
use super::path::Path;
use super::walk::{Direction, Walker};
use super::Limits;
use crate::schema::{TypeDescription, TypeTable};
use crate::Value;

pub(crate) struct Encoding;

impl Direction for Encoding {
    const NAME: &'static str = "encode";

    /// Binary data is never validated here, only rendered as base64.
    fn bytes(path: &Path<'_>, value: &Value) -> Result<Value, TranscodeError> {
        match value {
            Value::Binary(bytes) => Ok(Value::String(STANDARD.encode(bytes))),
            _ => Err(TranscodeError::mismatch(path, "bytes", value)),
        }
    }

    fn date(path: &Path<'_>, value: &Value) -> Result<Value, TranscodeError> {
        let date = match value {
            Value::Date(date) => *date,
            Value::DateTime(dt) => dt.date_naive(),
            _ => return Err(TranscodeError::mismatch(path, "date", value)),
        };
        Ok(Value::String(date.format("%Y-%m-%d").to_string()))
    }

    fn datetime(path: &Path<'_>, value: &Value) -> Result<Value, TranscodeError> {
        let dt = match value {
            Value::DateTime(dt) => *dt,
            Value::Date(date) => midnight_utc(*date)
                .ok_or_else(|| TranscodeError::mismatch(path, "datetime", value))?,
            _ => return Err(TranscodeError::mismatch(path, "datetime", value)),
        };
        let stamp = dt.to_rfc3339_opts(SecondsFormat::Millis, true);
        let stamp = stamp.strip_suffix('Z').unwrap_or(&stamp);
        Ok(Value::String(stamp.to_string()))
    }
}

fn midnight_utc(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Validate a native value against `ty` and produce its wire form.
///
/// `path` labels the root in error messages. Object shapes drop fields they
/// do not declare. The first violation aborts the whole call.
pub fn encode(
    table: &TypeTable,
    path: &str,
    ty: &TypeDescription,
    value: &Value,
) -> Result<Value, TranscodeError> {
    encode_with_limits(table, path, ty, value, None)
}

/// [`encode`] with explicit limits; `None` means [`Limits::default`].
pub fn encode_with_limits(
    table: &TypeTable,
    path: &str,
    ty: &TypeDescription,
    value: &Value,
    limits: Option<&Limits>,
) -> Result<Value, TranscodeError> {
    Walker::<Encoding>::new(table, limits).run(path, ty, value)
}
