//! Error taxonomy for decode and encode.

use json_wire_stream::StreamError;
use thiserror::Error;

/// Everything that can go wrong while coercing between a JSON document and
/// a typed value. Each failure surfaces synchronously and distinguishably;
/// nothing is downgraded to a default value.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Structural token violation in the document or the call sequence.
    #[error("malformed document: {0}")]
    MalformedDocument(#[from] StreamError),

    /// The value's shape has no rule taking it to the requested type.
    #[error("cannot coerce {found} to {expected}")]
    TypeMismatch { expected: String, found: String },

    /// Narrowing the number to the requested width would lose precision.
    #[error("narrowing {value} to {target} would lose precision")]
    NumericRange { value: String, target: String },

    /// The string names no variant of the declared enum.
    #[error("unknown variant \"{variant}\" for enum {decl}")]
    UnknownVariant { decl: String, variant: String },

    /// A map key repeated under the fail policy.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// No registered coercer's predicate matches the target shape.
    #[error("no coercer registered for {0}")]
    UnsupportedType(String),
}
