//! Untyped coercer: the dynamic fallback.
//!
//! When no narrowing is declared, values land in the engine's natural
//! dynamic representation: boolean, integer/float, string, ordered list,
//! ordered map. Containers delegate to the bare list and map shapes, so
//! they follow the same recursion and the same duplicate-key policy as
//! typed containers.

use json_wire_stream::{JsonNumber, JsonType, StreamError};

use super::Coercer;
use crate::registry::{DecodeContext, EncodeContext};
use crate::types::{RawShape, TargetType};
use crate::{Error, Value};

pub struct UntypedCoercer;

impl Coercer for UntypedCoercer {
    fn test(&self, shape: &RawShape) -> bool {
        matches!(shape, RawShape::Untyped)
    }

    fn decode(&self, cx: &mut DecodeContext<'_, '_>, _ty: &TargetType) -> Result<Value, Error> {
        match cx.reader.peek()? {
            JsonType::Null => {
                cx.reader.next_null()?;
                Ok(Value::Null)
            }
            JsonType::Boolean => Ok(Value::Bool(cx.reader.next_boolean()?)),
            JsonType::Number => Ok(match cx.reader.next_number()? {
                JsonNumber::Int(i) => Value::Int(i),
                JsonNumber::UInt(u) => Value::UInt(u),
                JsonNumber::Float(f) => Value::Float(f),
            }),
            JsonType::String => Ok(Value::Str(cx.reader.next_string()?)),
            JsonType::BeginArray => cx.coerce(&TargetType::new(RawShape::List)),
            JsonType::BeginObject => cx.coerce(&TargetType::new(RawShape::Map)),
            JsonType::Name | JsonType::EndObject | JsonType::EndArray | JsonType::End => {
                Err(Error::MalformedDocument(StreamError::Expected {
                    expected: "value",
                    offset: cx.reader.offset(),
                }))
            }
        }
    }

    fn encode(&self, cx: &mut EncodeContext<'_>, value: &Value) -> Result<(), Error> {
        match value {
            Value::Null => {
                cx.writer.null()?;
                Ok(())
            }
            other => cx.emit(other),
        }
    }
}
