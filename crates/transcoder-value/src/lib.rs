//! Runtime values for the transcoder.
//!
//! A [`Value`] is the dynamically shaped data the engine walks: the JSON
//! subset that arrives over the wire, plus the native leaves produced by
//! decoding (binary buffers, calendar dates, UTC timestamps) and the
//! arbitrary-precision integers some callers hand in.

mod serde_impl;
mod value;

pub use value::{Value, MAX_SAFE_INTEGER};

pub use chrono::{DateTime, NaiveDate, Utc};
pub use num_bigint::BigInt;
