//! `Value` — the engine's dynamic in-memory representation.
//!
//! Every decode produces a `Value`, narrowed as far as the target type
//! descriptor asked for; `Value` is also the untyped fallback when no
//! narrowing is declared. Containers are insertion-ordered vectors, so
//! encode order follows decode order.

use std::fmt;
use std::sync::Arc;

use crate::types::{BeanShape, EnumShape, FloatWidth, IntWidth, RawShape, TargetType};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    /// Signed integer (also the natural form of whole JSON numbers).
    Int(i64),
    /// Unsigned integer above `i64::MAX`.
    UInt(u64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    /// Unordered-container semantics with insertion order preserved;
    /// elements are unique.
    Set(Vec<Value>),
    /// Ordered entries, insertion order preserved. Keys are `Str` unless a
    /// map descriptor declared a non-string key type.
    Object(Vec<(Value, Value)>),
    /// A declared enum variant, by position in its variant set.
    Variant { decl: Arc<EnumShape>, index: usize },
    /// A decoded bean: declared shape plus fields in declared order.
    Bean {
        decl: Arc<BeanShape>,
        fields: Vec<(String, Value)>,
    },
}

impl Value {
    /// The natural target type of this value, used to pick a coercer on
    /// the encode side.
    pub fn natural_type(&self) -> TargetType {
        match self {
            Value::Null => TargetType::untyped(),
            Value::Bool(_) => TargetType::boolean(),
            Value::Int(_) => TargetType::new(RawShape::Integer(IntWidth::I64)),
            Value::UInt(_) => TargetType::new(RawShape::Integer(IntWidth::U64)),
            Value::Float(_) => TargetType::new(RawShape::Float(FloatWidth::F64)),
            Value::Str(_) => TargetType::string(),
            Value::List(_) => TargetType::new(RawShape::List),
            Value::Set(_) => TargetType::new(RawShape::Set),
            Value::Object(_) => TargetType::new(RawShape::Map),
            Value::Variant { decl, .. } => TargetType::new(RawShape::Enum(decl.clone())),
            Value::Bean { decl, .. } => TargetType::new(RawShape::Bean(decl.clone())),
        }
    }

    /// Short shape name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::UInt(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Object(_) => "object",
            Value::Variant { .. } => "enum variant",
            Value::Bean { .. } => "bean",
        }
    }

    /// The symbolic name of an enum variant value.
    pub fn variant_name(&self) -> Option<&str> {
        match self {
            Value::Variant { decl, index } => decl.variants.get(*index).map(String::as_str),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::UInt(u) => write!(f, "{u}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::List(items) | Value::Set(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Object(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Variant { .. } => {
                write!(f, "{}", self.variant_name().unwrap_or("<out of range>"))
            }
            Value::Bean { decl, .. } => write!(f, "{}", decl.name),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(arr) => {
                Value::List(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (Value::Str(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::from(i),
            Value::UInt(u) => serde_json::Value::from(u),
            Value::Float(x) => {
                serde_json::Number::from_f64(x).map_or(serde_json::Value::Null, Into::into)
            }
            Value::Str(s) => serde_json::Value::String(s),
            Value::List(items) | Value::Set(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Object(entries) => serde_json::Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::from(v)))
                    .collect(),
            ),
            Value::Variant { decl, index } => serde_json::Value::String(
                decl.variants.get(index).cloned().unwrap_or_default(),
            ),
            Value::Bean { fields, .. } => serde_json::Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}
