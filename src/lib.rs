//! Transcoder: schema-driven validation and conversion of dynamic values
//!
//! Values are checked against descriptions written in a small type language
//! and converted between a wire-safe form (for transmission or storage) and
//! a native form (for application code).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │               Transcoder                │
//! │                                         │
//! │  schema  - Type descriptions + table    │
//! │  codec   - encode / decode walkers      │
//! │                                         │
//! ├─────────────────────────────────────────┤
//! │      transcoder-value (Value type)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Type language
//!
//! ```json
//! {
//!     "Customer": { "id": "uuid", "name": "string", "tags": "string[]?" },
//!     "Status": ["active", "blocked"]
//! }
//! ```
//!
//! Named types may be suffixed with `?` (nullable) and `[]` (array). Names
//! that are not built in are looked up in the [`TypeTable`].
//!
//! ```
//! use transcoder::{decode, TypeDescription, TypeTable, Value};
//!
//! let ty = TypeDescription::named("uuid");
//! let wire = Value::from("A1B2C3D4-0000-0000-0000-000000000000");
//! let native = decode(&TypeTable::new(), "root", &ty, &wire).unwrap();
//! assert_eq!(native, Value::from("a1b2c3d4-0000-0000-0000-000000000000"));
//! ```

pub mod codec;
pub mod schema;

pub use codec::{
    decode, decode_with_limits, encode, encode_with_limits, ErrorKind, Limits, TranscodeError,
};
pub use schema::{BaseType, ScalarKind, TypeDescription, TypeName, TypeTable};
pub use transcoder_value::Value;
