//! Codec: schema-driven encoding and decoding of [`Value`](crate::Value)s.
//!
//! [`encode`] turns native values into their wire-safe form, [`decode`] goes
//! the other way. Both validate every node against a [`TypeDescription`]
//! (resolving names through a [`TypeTable`]) and stop at the first
//! violation.
//!
//! [`TypeDescription`]: crate::schema::TypeDescription
//! [`TypeTable`]: crate::schema::TypeTable

mod decode;
mod encode;
mod error;
mod path;
mod pattern;
mod scalar;
mod walk;

pub use decode::{decode, decode_with_limits};
pub use encode::{encode, encode_with_limits};
pub use error::{ErrorKind, TranscodeError};
pub use path::Path;
pub use scalar::check_scalar;

/// Bounds applied to a single call.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Levels of value nesting allowed. Each step into an object's fields
    /// or an array's elements counts as one level.
    pub max_depth: usize,
    /// Type-table references followed in a row without stepping into the
    /// value. Bounds alias cycles such as `{"A": "A"}`.
    pub max_alias_hops: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 512,
            max_alias_hops: 64,
        }
    }
}
