//! Struct-like record values with a fixed, ordered field declaration.
//!
//! A [`Schema`] declares the named fields of a record type once, optionally
//! with default values. A [`Record`] holds exactly one dynamically typed
//! [`Value`] per declared field and supports positional/named construction,
//! lookup by name, structural equality and ordering over the field tuple,
//! hashing, iteration as `(name, value)` pairs, mapping snapshots, state
//! capture/restore for generic persistence, and JSON encoding/decoding.
//!
//! ```
//! use basic_struct::{Record, Schema, Value};
//!
//! let point = Schema::ordered("Point", ["x", "y"])?;
//!
//! let a = Record::from_positional(point.clone(), [Value::from(2), Value::from("blah")])?;
//! let b = Record::from_named(point, [("x", Value::from(2)), ("y", Value::from("blah"))])?;
//!
//! assert_eq!(a, b);
//! assert_eq!(a.to_string(), "Point(x=2, y='blah')");
//! assert_eq!(basic_struct::json::encode(&a)?, r#"{"x":2,"y":"blah"}"#);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod json;
pub mod record;
pub mod schema;
pub mod value;

pub use record::{CopyMode, Record, RecordError, RecordState};
pub use schema::{FieldDef, Schema, SchemaError};
pub use value::{Number, Value, ValueKind};
