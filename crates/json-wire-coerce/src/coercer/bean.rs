//! Bean coercer: the reflective-record fallback for object shapes.
//!
//! Document field names are matched to declared fields through the active
//! naming policy. Unmatched document fields are skipped so newer producers
//! keep working; declared fields with no document counterpart come out as
//! their default/zero value so older producers do too. That tolerance is a
//! compatibility contract of the wire format, not error suppression: a
//! matched field whose value has the wrong shape still fails.

use json_wire_stream::JsonType;

use super::{mismatch, Coercer};
use crate::registry::{DecodeContext, EncodeContext};
use crate::setting::NullPolicy;
use crate::types::{RawShape, TargetType};
use crate::{Error, Value};

pub struct BeanCoercer;

impl Coercer for BeanCoercer {
    fn test(&self, shape: &RawShape) -> bool {
        matches!(shape, RawShape::Bean(_))
    }

    fn decode(&self, cx: &mut DecodeContext<'_, '_>, ty: &TargetType) -> Result<Value, Error> {
        let decl = match &ty.raw {
            RawShape::Bean(decl) => decl.clone(),
            other => return Err(Error::UnsupportedType(other.to_string())),
        };
        match cx.reader.peek()? {
            JsonType::Null => {
                cx.reader.next_null()?;
                return Ok(Value::Null);
            }
            JsonType::BeginObject => {}
            other => return Err(mismatch(ty, other)),
        }
        cx.reader.begin_object()?;
        let mut seen: Vec<Option<Value>> = vec![None; decl.fields.len()];
        while cx.reader.peek()? != JsonType::EndObject {
            let name = cx.reader.next_name()?;
            let position = decl
                .fields
                .iter()
                .position(|field| cx.setting.naming.wire_name(&field.name) == name);
            match position {
                Some(i) => {
                    // A repeated field overwrites; beans tolerate drift.
                    seen[i] = Some(cx.coerce(&decl.fields[i].ty)?);
                }
                None => cx.reader.skip_value()?,
            }
        }
        cx.reader.end_object()?;
        let fields = decl
            .fields
            .iter()
            .zip(seen)
            .map(|(field, value)| {
                let value = value.unwrap_or_else(|| field.ty.zero_value());
                (field.name.clone(), value)
            })
            .collect();
        Ok(Value::Bean { decl, fields })
    }

    fn encode(&self, cx: &mut EncodeContext<'_>, value: &Value) -> Result<(), Error> {
        let fields = match value {
            Value::Bean { fields, .. } => fields,
            other => {
                return Err(Error::TypeMismatch {
                    expected: "bean".to_string(),
                    found: other.type_name().to_string(),
                })
            }
        };
        cx.writer.begin_object()?;
        for (name, field_value) in fields {
            if matches!(field_value, Value::Null) && cx.setting.nulls == NullPolicy::SkipNulls {
                continue;
            }
            let wire = cx.setting.naming.wire_name(name);
            cx.writer.name(&wire)?;
            cx.emit(field_value)?;
        }
        cx.writer.end_object()?;
        Ok(())
    }
}
