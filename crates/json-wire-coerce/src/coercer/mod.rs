//! The coercer family: one stateless handler per family of shapes.
//!
//! Each coercer pairs a predicate over [`RawShape`] with decode and encode
//! logic. Decode consumes exactly one JSON value from the reader,
//! recursively asking the dispatcher (through the context) to decode any
//! nested element, key, or value types. A JSON `null` passes through every
//! coercer as [`Value::Null`].

mod bean;
mod collection;
mod enumeration;
mod map;
mod primitive;
mod untyped;

pub use bean::BeanCoercer;
pub use collection::CollectionCoercer;
pub use enumeration::EnumCoercer;
pub use map::MapCoercer;
pub use primitive::PrimitiveCoercer;
pub use untyped::UntypedCoercer;

use json_wire_stream::JsonType;

use crate::registry::{DecodeContext, EncodeContext};
use crate::types::{RawShape, TargetType};
use crate::{Error, Value};

pub trait Coercer: Send + Sync {
    /// Whether this coercer covers the given raw shape. The first
    /// registered coercer whose predicate matches wins.
    fn test(&self, shape: &RawShape) -> bool;

    /// Consume exactly one JSON value and coerce it to `ty`.
    fn decode(&self, cx: &mut DecodeContext<'_, '_>, ty: &TargetType) -> Result<Value, Error>;

    /// Write `value` as exactly one JSON value.
    fn encode(&self, cx: &mut EncodeContext<'_>, value: &Value) -> Result<(), Error>;
}

/// Name of a token kind, for `TypeMismatch` messages.
pub(crate) fn token_name(t: JsonType) -> &'static str {
    match t {
        JsonType::BeginObject | JsonType::EndObject => "object",
        JsonType::BeginArray | JsonType::EndArray => "array",
        JsonType::Name => "name",
        JsonType::String => "string",
        JsonType::Number => "number",
        JsonType::Boolean => "boolean",
        JsonType::Null => "null",
        JsonType::End => "end of document",
    }
}

pub(crate) fn mismatch(expected: &TargetType, found: JsonType) -> Error {
    Error::TypeMismatch {
        expected: expected.to_string(),
        found: token_name(found).to_string(),
    }
}
