//! `Json` — the coercion registry and dispatcher.
//!
//! The registry owns an ordered sequence of coercers: user-registered
//! first, then the built-ins, which together cover every JSON shape.
//! Dispatch is deterministic: the first coercer whose predicate matches
//! the target's raw shape handles it, and the `(shape, coercer)` pair is
//! cached for the duration of the current call only, since generic
//! arguments vary per call site.
//!
//! Once built, a `Json` is immutable and safe for unsynchronized
//! concurrent use: every decode or encode owns its own cursor and cache.

use std::collections::HashMap;

use json_wire_stream::{JsonReader, JsonWriter};

use crate::coercer::{
    BeanCoercer, Coercer, CollectionCoercer, EnumCoercer, MapCoercer, PrimitiveCoercer,
    UntypedCoercer,
};
use crate::setting::PropertySetting;
use crate::types::{RawShape, TargetType};
use crate::{Error, Value};

type ResolveCache = HashMap<RawShape, usize>;

pub struct Json {
    coercers: Vec<Box<dyn Coercer>>,
}

impl Default for Json {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Json {
    /// A registry with only the built-in coercers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a registry build phase. Registration is only possible here;
    /// `build` consumes the builder, so there is no registration after the
    /// first resolve by construction.
    pub fn builder() -> JsonBuilder {
        JsonBuilder {
            coercers: Vec::new(),
        }
    }

    /// Decode one JSON document into a value of the target type, under the
    /// default setting.
    pub fn decode(&self, doc: &str, ty: &TargetType) -> Result<Value, Error> {
        self.decode_with(doc, ty, &PropertySetting::default())
    }

    pub fn decode_with(
        &self,
        doc: &str,
        ty: &TargetType,
        setting: &PropertySetting,
    ) -> Result<Value, Error> {
        let mut reader = JsonReader::new(doc.as_bytes());
        let mut cache = ResolveCache::new();
        let mut cx = DecodeContext {
            reader: &mut reader,
            setting,
            registry: self,
            cache: &mut cache,
        };
        let value = cx.coerce(ty)?;
        cx.reader.expect_end()?;
        Ok(value)
    }

    /// Encode a value as a JSON document, under the default setting.
    pub fn encode(&self, value: &Value) -> Result<String, Error> {
        self.encode_with(value, &PropertySetting::default())
    }

    pub fn encode_with(&self, value: &Value, setting: &PropertySetting) -> Result<String, Error> {
        let mut writer = JsonWriter::new();
        let mut cache = ResolveCache::new();
        let mut cx = EncodeContext {
            writer: &mut writer,
            setting,
            registry: self,
            cache: &mut cache,
        };
        cx.emit(value)?;
        Ok(writer.finish()?)
    }

    /// First-match resolution over the ordered coercer list, memoized in
    /// the per-call cache.
    fn resolve_index(&self, cache: &mut ResolveCache, shape: &RawShape) -> Result<usize, Error> {
        if let Some(&index) = cache.get(shape) {
            return Ok(index);
        }
        for (index, coercer) in self.coercers.iter().enumerate() {
            if coercer.test(shape) {
                cache.insert(shape.clone(), index);
                return Ok(index);
            }
        }
        Err(Error::UnsupportedType(shape.to_string()))
    }
}

pub struct JsonBuilder {
    coercers: Vec<Box<dyn Coercer>>,
}

impl JsonBuilder {
    /// Register a user coercer. User coercers are consulted before the
    /// built-ins, in registration order.
    pub fn register(mut self, coercer: impl Coercer + 'static) -> Self {
        self.coercers.push(Box::new(coercer));
        self
    }

    pub fn build(mut self) -> Json {
        self.coercers.push(Box::new(PrimitiveCoercer));
        self.coercers.push(Box::new(EnumCoercer));
        self.coercers.push(Box::new(CollectionCoercer::list()));
        self.coercers.push(Box::new(CollectionCoercer::set()));
        self.coercers.push(Box::new(MapCoercer::new()));
        self.coercers.push(Box::new(UntypedCoercer));
        self.coercers.push(Box::new(BeanCoercer));
        Json {
            coercers: self.coercers,
        }
    }
}

/// Per-call decode state threaded through the recursion: the reader
/// cursor, the immutable setting, and the call-scoped resolve cache.
pub struct DecodeContext<'a, 'r> {
    pub reader: &'a mut JsonReader<'r>,
    pub setting: &'a PropertySetting,
    registry: &'a Json,
    cache: &'a mut ResolveCache,
}

impl DecodeContext<'_, '_> {
    /// Resolve a coercer for the target's raw shape and decode one value
    /// with it. Nested types recurse through here.
    pub fn coerce(&mut self, ty: &TargetType) -> Result<Value, Error> {
        let registry = self.registry;
        let index = registry.resolve_index(self.cache, &ty.raw)?;
        registry.coercers[index].decode(self, ty)
    }
}

/// Per-call encode state, mirroring [`DecodeContext`].
pub struct EncodeContext<'a> {
    pub writer: &'a mut JsonWriter,
    pub setting: &'a PropertySetting,
    registry: &'a Json,
    cache: &'a mut ResolveCache,
}

impl EncodeContext<'_> {
    /// Resolve a coercer from the value's natural type and write one value
    /// with it.
    pub fn emit(&mut self, value: &Value) -> Result<(), Error> {
        let registry = self.registry;
        let ty = value.natural_type();
        let index = registry.resolve_index(self.cache, &ty.raw)?;
        registry.coercers[index].encode(self, value)
    }
}
