//! Type-driven JSON coercion engine.
//!
//! The sole wire-format boundary of the surrounding remote-control stack:
//! an extensible registry of type-to-JSON coercers, a generic-type
//! resolution scheme built on explicit [`TargetType`] descriptors, and the
//! streaming reader/writer (from `json-wire-stream`) they drive.
//!
//! ```
//! use json_wire_coerce::{Json, TargetType, Value};
//!
//! let json = Json::new();
//! let ty = TargetType::map_of(TargetType::string(), TargetType::i64());
//! let value = json.decode(r#"{"a":1,"b":2}"#, &ty).unwrap();
//! assert_eq!(
//!     value,
//!     Value::Object(vec![
//!         (Value::Str("a".into()), Value::Int(1)),
//!         (Value::Str("b".into()), Value::Int(2)),
//!     ])
//! );
//! ```

pub mod coercer;
mod error;
mod fold;
mod registry;
mod setting;
mod types;
mod value;

pub use coercer::Coercer;
pub use error::Error;
pub use fold::{Fold, ListFold, MapFold, SetFold};
pub use registry::{DecodeContext, EncodeContext, Json, JsonBuilder};
pub use setting::{DuplicateKeyPolicy, NamingPolicy, NullPolicy, PropertySetting};
pub use types::{BeanField, BeanShape, EnumShape, FloatWidth, IntWidth, RawShape, TargetType};
pub use value::Value;

// Stream-layer types, re-exported for user-defined coercers.
pub use json_wire_stream::{JsonNumber, JsonReader, JsonType, JsonWriter, StreamError};
