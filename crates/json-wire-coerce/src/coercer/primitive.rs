//! Primitive coercer: booleans, strings, and numeric narrowing.
//!
//! Null, boolean, and string pass through unchanged. Numbers narrow to the
//! requested width here, never in the reader: a shape with no narrowing
//! rule to the requested type is a `TypeMismatch`, and a narrowing that
//! would lose precision is a `NumericRange` unless the setting permits
//! lossy narrowing.

use json_wire_stream::{JsonNumber, JsonType};

use super::{mismatch, Coercer};
use crate::registry::{DecodeContext, EncodeContext};
use crate::setting::PropertySetting;
use crate::types::{FloatWidth, IntWidth, RawShape, TargetType};
use crate::{Error, Value};

pub struct PrimitiveCoercer;

impl Coercer for PrimitiveCoercer {
    fn test(&self, shape: &RawShape) -> bool {
        matches!(
            shape,
            RawShape::Bool | RawShape::String | RawShape::Integer(_) | RawShape::Float(_)
        )
    }

    fn decode(&self, cx: &mut DecodeContext<'_, '_>, ty: &TargetType) -> Result<Value, Error> {
        let token = cx.reader.peek()?;
        if token == JsonType::Null {
            cx.reader.next_null()?;
            return Ok(Value::Null);
        }
        match &ty.raw {
            RawShape::Bool => match token {
                JsonType::Boolean => Ok(Value::Bool(cx.reader.next_boolean()?)),
                other => Err(mismatch(ty, other)),
            },
            RawShape::String => match token {
                JsonType::String => Ok(Value::Str(cx.reader.next_string()?)),
                other => Err(mismatch(ty, other)),
            },
            RawShape::Integer(width) => match token {
                JsonType::Number => narrow_int(cx.reader.next_number()?, *width, cx.setting),
                other => Err(mismatch(ty, other)),
            },
            RawShape::Float(width) => match token {
                JsonType::Number => narrow_float(cx.reader.next_number()?, *width, cx.setting),
                other => Err(mismatch(ty, other)),
            },
            other => Err(Error::UnsupportedType(other.to_string())),
        }
    }

    fn encode(&self, cx: &mut EncodeContext<'_>, value: &Value) -> Result<(), Error> {
        match value {
            Value::Null => cx.writer.null()?,
            Value::Bool(b) => cx.writer.boolean(*b)?,
            Value::Int(i) => cx.writer.int(*i)?,
            Value::UInt(u) => cx.writer.uint(*u)?,
            Value::Float(f) => cx.writer.float(*f)?,
            Value::Str(s) => cx.writer.string(s)?,
            other => {
                return Err(Error::TypeMismatch {
                    expected: "primitive".to_string(),
                    found: other.type_name().to_string(),
                })
            }
        }
        Ok(())
    }
}

fn int_bounds(width: IntWidth) -> (i128, i128) {
    match width {
        IntWidth::I8 => (i8::MIN as i128, i8::MAX as i128),
        IntWidth::I16 => (i16::MIN as i128, i16::MAX as i128),
        IntWidth::I32 => (i32::MIN as i128, i32::MAX as i128),
        IntWidth::I64 => (i64::MIN as i128, i64::MAX as i128),
        IntWidth::U8 => (0, u8::MAX as i128),
        IntWidth::U16 => (0, u16::MAX as i128),
        IntWidth::U32 => (0, u32::MAX as i128),
        IntWidth::U64 => (0, u64::MAX as i128),
    }
}

fn is_unsigned(width: IntWidth) -> bool {
    matches!(
        width,
        IntWidth::U8 | IntWidth::U16 | IntWidth::U32 | IntWidth::U64
    )
}

fn fit_int(wide: i128, width: IntWidth, shown: &dyn std::fmt::Display) -> Result<Value, Error> {
    let (min, max) = int_bounds(width);
    if wide < min || wide > max {
        return Err(Error::NumericRange {
            value: format!("{shown}"),
            target: RawShape::Integer(width).to_string(),
        });
    }
    if is_unsigned(width) {
        Ok(Value::UInt(wide as u64))
    } else {
        Ok(Value::Int(wide as i64))
    }
}

/// Narrow a parsed number to the requested integral width.
pub(crate) fn narrow_int(
    num: JsonNumber,
    width: IntWidth,
    setting: &PropertySetting,
) -> Result<Value, Error> {
    match num {
        JsonNumber::Int(i) => fit_int(i as i128, width, &i),
        JsonNumber::UInt(u) => fit_int(u as i128, width, &u),
        JsonNumber::Float(f) => {
            // Any integral f64 converts to i128 exactly; the cast
            // saturates, so out-of-range values fail the width check.
            let whole = f.is_finite() && f.fract() == 0.0;
            if !whole && !setting.lossy_narrowing {
                return Err(Error::NumericRange {
                    value: f.to_string(),
                    target: RawShape::Integer(width).to_string(),
                });
            }
            if !f.is_finite() {
                return Err(Error::NumericRange {
                    value: f.to_string(),
                    target: RawShape::Integer(width).to_string(),
                });
            }
            fit_int(f.trunc() as i128, width, &f)
        }
    }
}

/// Narrow a parsed number to the requested floating width.
pub(crate) fn narrow_float(
    num: JsonNumber,
    width: FloatWidth,
    setting: &PropertySetting,
) -> Result<Value, Error> {
    let f = match num {
        JsonNumber::Int(i) => {
            // Exactness, not magnitude: the i128 comparison avoids the
            // saturating round trip at the i64 boundary.
            let widened = i as f64;
            if widened as i128 != i as i128 && !setting.lossy_narrowing {
                return Err(Error::NumericRange {
                    value: i.to_string(),
                    target: RawShape::Float(width).to_string(),
                });
            }
            widened
        }
        JsonNumber::UInt(u) => {
            let widened = u as f64;
            if widened as u128 != u as u128 && !setting.lossy_narrowing {
                return Err(Error::NumericRange {
                    value: u.to_string(),
                    target: RawShape::Float(width).to_string(),
                });
            }
            widened
        }
        JsonNumber::Float(f) => f,
    };
    match width {
        FloatWidth::F64 => Ok(Value::Float(f)),
        FloatWidth::F32 => {
            let narrowed = f as f32;
            if narrowed.is_infinite() && f.is_finite() {
                return Err(Error::NumericRange {
                    value: f.to_string(),
                    target: RawShape::Float(width).to_string(),
                });
            }
            Ok(Value::Float(narrowed as f64))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict() -> PropertySetting {
        PropertySetting::default()
    }

    fn lossy() -> PropertySetting {
        PropertySetting::new().lossy_narrowing(true)
    }

    #[test]
    fn whole_numbers_narrow_to_any_width() {
        assert_eq!(
            narrow_int(JsonNumber::Int(42), IntWidth::I8, &strict()),
            Ok(Value::Int(42))
        );
        assert_eq!(
            narrow_int(JsonNumber::Int(42), IntWidth::U64, &strict()),
            Ok(Value::UInt(42))
        );
        assert_eq!(
            narrow_int(JsonNumber::Float(3.0), IntWidth::I32, &strict()),
            Ok(Value::Int(3))
        );
    }

    #[test]
    fn out_of_range_is_numeric_range() {
        assert!(matches!(
            narrow_int(JsonNumber::Int(300), IntWidth::I8, &strict()),
            Err(Error::NumericRange { .. })
        ));
        assert!(matches!(
            narrow_int(JsonNumber::Int(-1), IntWidth::U32, &strict()),
            Err(Error::NumericRange { .. })
        ));
    }

    #[test]
    fn fractional_to_integer_needs_lossy_permission() {
        assert!(matches!(
            narrow_int(JsonNumber::Float(1.5), IntWidth::I32, &strict()),
            Err(Error::NumericRange { .. })
        ));
        assert_eq!(
            narrow_int(JsonNumber::Float(1.5), IntWidth::I32, &lossy()),
            Ok(Value::Int(1))
        );
    }

    #[test]
    fn integers_widen_to_float() {
        assert_eq!(
            narrow_float(JsonNumber::Int(2), FloatWidth::F64, &strict()),
            Ok(Value::Float(2.0))
        );
    }

    #[test]
    fn exactly_representable_large_integers_widen_to_float() {
        // Above 2^53 but exactly representable: must not be rejected.
        assert_eq!(
            narrow_float(
                JsonNumber::Int(10_000_000_000_000_000),
                FloatWidth::F64,
                &strict()
            ),
            Ok(Value::Float(1e16))
        );
        assert_eq!(
            narrow_float(JsonNumber::UInt(1 << 60), FloatWidth::F64, &strict()),
            Ok(Value::Float((1u64 << 60) as f64))
        );
    }

    #[test]
    fn integral_float_above_2_pow_53_narrows_to_integer() {
        assert_eq!(
            narrow_int(JsonNumber::Float(1e16), IntWidth::I64, &strict()),
            Ok(Value::Int(10_000_000_000_000_000))
        );
        // Integral but beyond the width: range, not precision.
        assert!(matches!(
            narrow_int(JsonNumber::Float(1e30), IntWidth::I64, &strict()),
            Err(Error::NumericRange { .. })
        ));
    }

    #[test]
    fn huge_integer_to_float_needs_lossy_permission() {
        let big = i64::MAX;
        assert!(matches!(
            narrow_float(JsonNumber::Int(big), FloatWidth::F64, &strict()),
            Err(Error::NumericRange { .. })
        ));
        assert!(narrow_float(JsonNumber::Int(big), FloatWidth::F64, &lossy()).is_ok());
    }

    #[test]
    fn f32_overflow_is_numeric_range() {
        assert!(matches!(
            narrow_float(JsonNumber::Float(1e200), FloatWidth::F32, &strict()),
            Err(Error::NumericRange { .. })
        ));
    }
}
