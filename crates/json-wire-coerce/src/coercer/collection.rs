//! Collection coercer: arrays into sequence or set containers.
//!
//! One instantiation per container kind, parameterized by the fold that
//! accumulates decoded elements. The element type is the descriptor's
//! first argument, resolved recursively through the dispatcher.

use json_wire_stream::JsonType;

use super::{mismatch, Coercer};
use crate::fold::{Fold, ListFold, SetFold};
use crate::registry::{DecodeContext, EncodeContext};
use crate::types::{RawShape, TargetType};
use crate::{Error, Value};

pub struct CollectionCoercer<F> {
    shape: RawShape,
    fold: F,
}

impl CollectionCoercer<ListFold> {
    /// The ordered-sequence instantiation.
    pub fn list() -> Self {
        Self {
            shape: RawShape::List,
            fold: ListFold,
        }
    }
}

impl CollectionCoercer<SetFold> {
    /// The unique-element instantiation.
    pub fn set() -> Self {
        Self {
            shape: RawShape::Set,
            fold: SetFold,
        }
    }
}

impl<F: Fold<Value>> Coercer for CollectionCoercer<F> {
    fn test(&self, shape: &RawShape) -> bool {
        *shape == self.shape
    }

    fn decode(&self, cx: &mut DecodeContext<'_, '_>, ty: &TargetType) -> Result<Value, Error> {
        match cx.reader.peek()? {
            JsonType::Null => {
                cx.reader.next_null()?;
                return Ok(Value::Null);
            }
            JsonType::BeginArray => {}
            other => return Err(mismatch(ty, other)),
        }
        let element = ty.arg(0);
        cx.reader.begin_array()?;
        let mut acc = self.fold.seed();
        while cx.reader.peek()? != JsonType::EndArray {
            let item = cx.coerce(&element)?;
            self.fold.step(&mut acc, item, cx.setting)?;
        }
        cx.reader.end_array()?;
        Ok(self.fold.finish(acc))
    }

    fn encode(&self, cx: &mut EncodeContext<'_>, value: &Value) -> Result<(), Error> {
        let items = match value {
            Value::List(items) | Value::Set(items) => items,
            other => {
                return Err(Error::TypeMismatch {
                    expected: self.shape.to_string(),
                    found: other.type_name().to_string(),
                })
            }
        };
        cx.writer.begin_array()?;
        for item in items {
            cx.emit(item)?;
        }
        cx.writer.end_array()?;
        Ok(())
    }
}
