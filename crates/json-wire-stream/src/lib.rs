//! Forward-only streaming JSON tokenizer and emitter.
//!
//! [`JsonReader`] consumes a document token by token: `peek` inspects the
//! next token kind without consuming it, the `begin_*`/`end_*` pairs
//! validate structural brackets, and the `next_*` reads consume exactly one
//! token each. [`JsonWriter`] mirrors that contract outward, inserting
//! separators from its own context stack. Both fail with [`StreamError`]
//! on any read or write that is inconsistent with the current structural
//! position, so a truncated or misshapen document always surfaces as a
//! malformed-document error and never as something lower level.

mod error;
mod reader;
mod writer;

pub use error::StreamError;
pub use reader::{JsonNumber, JsonReader, JsonType};
pub use writer::JsonWriter;
