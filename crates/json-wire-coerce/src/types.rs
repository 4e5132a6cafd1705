//! Target type descriptors.
//!
//! A [`TargetType`] is the declared shape a caller wants a JSON value
//! decoded into: a raw shape identifier plus an ordered list of
//! type-argument descriptors, supporting nested parameterization such as
//! a map of string to a list of integers. A bare container descriptor
//! implies untyped arguments, so its contents decode into the engine's
//! dynamic representation with no further narrowing.

use std::fmt;
use std::sync::Arc;

use crate::Value;

/// Requested integral width for number narrowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

/// Requested floating width for number narrowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    F32,
    F64,
}

/// The raw shape identifier of a target type, without its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawShape {
    /// No declared narrowing: decode into the dynamic representation.
    Untyped,
    Bool,
    String,
    Integer(IntWidth),
    Float(FloatWidth),
    List,
    Set,
    Map,
    Enum(Arc<EnumShape>),
    Bean(Arc<BeanShape>),
    /// A shape only a user-registered coercer can cover. Unmatched, it is
    /// the unsupported-type path.
    Custom(&'static str),
}

impl fmt::Display for RawShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawShape::Untyped => write!(f, "untyped"),
            RawShape::Bool => write!(f, "bool"),
            RawShape::String => write!(f, "string"),
            RawShape::Integer(w) => write!(f, "{}", format!("{w:?}").to_lowercase()),
            RawShape::Float(w) => write!(f, "{}", format!("{w:?}").to_lowercase()),
            RawShape::List => write!(f, "list"),
            RawShape::Set => write!(f, "set"),
            RawShape::Map => write!(f, "map"),
            RawShape::Enum(decl) => write!(f, "enum {}", decl.name),
            RawShape::Bean(decl) => write!(f, "bean {}", decl.name),
            RawShape::Custom(name) => write!(f, "custom {name}"),
        }
    }
}

/// Declared variant set of an enum target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumShape {
    pub name: String,
    pub variants: Vec<String>,
}

impl EnumShape {
    pub fn new(name: impl Into<String>, variants: &[&str]) -> Self {
        Self {
            name: name.into(),
            variants: variants.iter().map(|v| (*v).to_string()).collect(),
        }
    }

    /// Case-sensitive variant lookup.
    pub fn variant_index(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| v == name)
    }
}

/// One declared field of a bean target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BeanField {
    pub name: String,
    pub ty: TargetType,
}

/// Declared field set of a bean (reflective-record) target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BeanShape {
    pub name: String,
    pub fields: Vec<BeanField>,
}

impl BeanShape {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, ty: TargetType) -> Self {
        self.fields.push(BeanField {
            name: name.into(),
            ty,
        });
        self
    }
}

/// A raw shape plus its ordered type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetType {
    pub raw: RawShape,
    pub args: Vec<TargetType>,
}

impl TargetType {
    pub fn new(raw: RawShape) -> Self {
        Self {
            raw,
            args: Vec::new(),
        }
    }

    pub fn parameterized(raw: RawShape, args: Vec<TargetType>) -> Self {
        Self { raw, args }
    }

    pub fn untyped() -> Self {
        Self::new(RawShape::Untyped)
    }

    pub fn boolean() -> Self {
        Self::new(RawShape::Bool)
    }

    pub fn string() -> Self {
        Self::new(RawShape::String)
    }

    pub fn i8() -> Self {
        Self::new(RawShape::Integer(IntWidth::I8))
    }

    pub fn i16() -> Self {
        Self::new(RawShape::Integer(IntWidth::I16))
    }

    pub fn i32() -> Self {
        Self::new(RawShape::Integer(IntWidth::I32))
    }

    pub fn i64() -> Self {
        Self::new(RawShape::Integer(IntWidth::I64))
    }

    pub fn u8() -> Self {
        Self::new(RawShape::Integer(IntWidth::U8))
    }

    pub fn u16() -> Self {
        Self::new(RawShape::Integer(IntWidth::U16))
    }

    pub fn u32() -> Self {
        Self::new(RawShape::Integer(IntWidth::U32))
    }

    pub fn u64() -> Self {
        Self::new(RawShape::Integer(IntWidth::U64))
    }

    pub fn f32() -> Self {
        Self::new(RawShape::Float(FloatWidth::F32))
    }

    pub fn f64() -> Self {
        Self::new(RawShape::Float(FloatWidth::F64))
    }

    pub fn list_of(element: TargetType) -> Self {
        Self::parameterized(RawShape::List, vec![element])
    }

    pub fn set_of(element: TargetType) -> Self {
        Self::parameterized(RawShape::Set, vec![element])
    }

    pub fn map_of(key: TargetType, value: TargetType) -> Self {
        Self::parameterized(RawShape::Map, vec![key, value])
    }

    pub fn enumeration(decl: EnumShape) -> Self {
        Self::new(RawShape::Enum(Arc::new(decl)))
    }

    pub fn bean(decl: BeanShape) -> Self {
        Self::new(RawShape::Bean(Arc::new(decl)))
    }

    /// The type argument at `index`, or the untyped descriptor when the
    /// declared type is bare at that position. This is the permissive
    /// fallback that lets a raw `Map` or `List` carry dynamic content.
    pub fn arg(&self, index: usize) -> TargetType {
        self.args.get(index).cloned().unwrap_or_else(Self::untyped)
    }

    /// The backward-compatibility default for a declared field with no
    /// corresponding document field.
    pub fn zero_value(&self) -> Value {
        match &self.raw {
            RawShape::Bool => Value::Bool(false),
            RawShape::Integer(
                IntWidth::U8 | IntWidth::U16 | IntWidth::U32 | IntWidth::U64,
            ) => Value::UInt(0),
            RawShape::Integer(_) => Value::Int(0),
            RawShape::Float(_) => Value::Float(0.0),
            RawShape::String => Value::Str(String::new()),
            RawShape::List => Value::List(Vec::new()),
            RawShape::Set => Value::Set(Vec::new()),
            RawShape::Map => Value::Object(Vec::new()),
            // No meaningful zero exists for these.
            RawShape::Untyped
            | RawShape::Enum(_)
            | RawShape::Bean(_)
            | RawShape::Custom(_) => Value::Null,
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)?;
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl From<RawShape> for TargetType {
    fn from(raw: RawShape) -> Self {
        Self::new(raw)
    }
}
