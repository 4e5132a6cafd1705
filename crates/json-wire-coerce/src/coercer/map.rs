//! Map coercer: objects into keyed containers.
//!
//! Entry names arrive as strings and are further coerced to the declared
//! key type when that type is not itself a string; values decode against
//! the declared value type. Accumulation goes through the same fold
//! mechanism as collections, which is where the duplicate-key policy is
//! enforced.

use json_wire_stream::{JsonNumber, JsonType};

use super::primitive::{narrow_float, narrow_int};
use super::{mismatch, Coercer};
use crate::fold::{Fold, MapFold};
use crate::registry::{DecodeContext, EncodeContext};
use crate::setting::{NullPolicy, PropertySetting};
use crate::types::{RawShape, TargetType};
use crate::{Error, Value};

pub struct MapCoercer<F = MapFold> {
    fold: F,
}

impl MapCoercer<MapFold> {
    pub fn new() -> Self {
        Self { fold: MapFold }
    }
}

impl Default for MapCoercer<MapFold> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Fold<(Value, Value)>> Coercer for MapCoercer<F> {
    fn test(&self, shape: &RawShape) -> bool {
        matches!(shape, RawShape::Map)
    }

    fn decode(&self, cx: &mut DecodeContext<'_, '_>, ty: &TargetType) -> Result<Value, Error> {
        match cx.reader.peek()? {
            JsonType::Null => {
                cx.reader.next_null()?;
                return Ok(Value::Null);
            }
            JsonType::BeginObject => {}
            other => return Err(mismatch(ty, other)),
        }
        let key_ty = ty.arg(0);
        let value_ty = ty.arg(1);
        cx.reader.begin_object()?;
        let mut acc = self.fold.seed();
        while cx.reader.peek()? != JsonType::EndObject {
            let name = cx.reader.next_name()?;
            let key = coerce_key(name, &key_ty, cx.setting)?;
            let value = cx.coerce(&value_ty)?;
            self.fold.step(&mut acc, (key, value), cx.setting)?;
        }
        cx.reader.end_object()?;
        Ok(self.fold.finish(acc))
    }

    fn encode(&self, cx: &mut EncodeContext<'_>, value: &Value) -> Result<(), Error> {
        let entries = match value {
            Value::Object(entries) => entries,
            other => {
                return Err(Error::TypeMismatch {
                    expected: "map".to_string(),
                    found: other.type_name().to_string(),
                })
            }
        };
        cx.writer.begin_object()?;
        for (key, entry_value) in entries {
            if matches!(entry_value, Value::Null) && cx.setting.nulls == NullPolicy::SkipNulls {
                continue;
            }
            let name = key_wire_name(key)?;
            cx.writer.name(&name)?;
            cx.emit(entry_value)?;
        }
        cx.writer.end_object()?;
        Ok(())
    }
}

/// Coerce an entry name to the declared key type.
fn coerce_key(name: String, ty: &TargetType, setting: &PropertySetting) -> Result<Value, Error> {
    match &ty.raw {
        RawShape::String | RawShape::Untyped => Ok(Value::Str(name)),
        RawShape::Bool => match name.as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(key_mismatch(ty, &name)),
        },
        RawShape::Integer(width) => {
            if let Ok(i) = name.parse::<i64>() {
                narrow_int(JsonNumber::Int(i), *width, setting)
            } else if let Ok(u) = name.parse::<u64>() {
                narrow_int(JsonNumber::UInt(u), *width, setting)
            } else {
                Err(key_mismatch(ty, &name))
            }
        }
        RawShape::Float(width) => match name.parse::<f64>() {
            Ok(f) => narrow_float(JsonNumber::Float(f), *width, setting),
            Err(_) => Err(key_mismatch(ty, &name)),
        },
        RawShape::Enum(decl) => match decl.variant_index(&name) {
            Some(index) => Ok(Value::Variant {
                decl: decl.clone(),
                index,
            }),
            None => Err(Error::UnknownVariant {
                decl: decl.name.clone(),
                variant: name,
            }),
        },
        _ => Err(key_mismatch(ty, &name)),
    }
}

fn key_mismatch(ty: &TargetType, name: &str) -> Error {
    Error::TypeMismatch {
        expected: format!("map key of type {ty}"),
        found: format!("\"{name}\""),
    }
}

/// Render a decoded key back into an entry name.
fn key_wire_name(key: &Value) -> Result<String, Error> {
    match key {
        Value::Str(s) => Ok(s.clone()),
        Value::Bool(_) | Value::Int(_) | Value::UInt(_) | Value::Float(_) => Ok(key.to_string()),
        Value::Variant { .. } => Ok(key.to_string()),
        other => Err(Error::TypeMismatch {
            expected: "map key".to_string(),
            found: other.type_name().to_string(),
        }),
    }
}
