//! Enum coercer: case-sensitive variant matching.

use json_wire_stream::JsonType;

use super::{mismatch, Coercer};
use crate::registry::{DecodeContext, EncodeContext};
use crate::types::{RawShape, TargetType};
use crate::{Error, Value};

pub struct EnumCoercer;

impl Coercer for EnumCoercer {
    fn test(&self, shape: &RawShape) -> bool {
        matches!(shape, RawShape::Enum(_))
    }

    fn decode(&self, cx: &mut DecodeContext<'_, '_>, ty: &TargetType) -> Result<Value, Error> {
        let decl = match &ty.raw {
            RawShape::Enum(decl) => decl.clone(),
            other => return Err(Error::UnsupportedType(other.to_string())),
        };
        match cx.reader.peek()? {
            JsonType::Null => {
                cx.reader.next_null()?;
                Ok(Value::Null)
            }
            JsonType::String => {
                let name = cx.reader.next_string()?;
                match decl.variant_index(&name) {
                    Some(index) => Ok(Value::Variant { decl, index }),
                    None => Err(Error::UnknownVariant {
                        decl: decl.name.clone(),
                        variant: name,
                    }),
                }
            }
            other => Err(mismatch(ty, other)),
        }
    }

    fn encode(&self, cx: &mut EncodeContext<'_>, value: &Value) -> Result<(), Error> {
        match value.variant_name() {
            Some(name) => {
                cx.writer.string(name)?;
                Ok(())
            }
            None => Err(Error::TypeMismatch {
                expected: "enum variant".to_string(),
                found: value.type_name().to_string(),
            }),
        }
    }
}
