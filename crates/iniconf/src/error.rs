//! Error types for schema introspection, encoding and decoding.

use crate::value::ScalarKind;
use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the schema introspector, the encoder and the decoder.
///
/// Decode errors carry the 1-based line number of the offending line. A failed
/// decode may leave the target partially populated: fields assigned before the
/// failing line keep their new values.
#[derive(Debug, Error)]
pub enum IniError {
    /// The root type handed to the engine is not a struct.
    #[error("invalid schema: `{type_name}` is not a struct")]
    InvalidSchemaKind { type_name: &'static str },
    /// A field is not one of the supported scalar kinds, or its value does not
    /// match the kind it was declared with.
    #[error("unsupported type `{type_name}` for field {section}.{key}")]
    UnsupportedType {
        section: String,
        key: String,
        type_name: &'static str,
    },
    /// A section or key name cannot be expressed in the text format.
    #[error("invalid name `{name}`: {reason}")]
    InvalidName { name: String, reason: &'static str },
    /// Two sections resolve to the same external name.
    #[error("duplicate section `{0}`")]
    DuplicateSection(String),
    /// Two fields of one section resolve to the same external name.
    #[error("duplicate key `{key}` in section `{section}`")]
    DuplicateKey { section: String, key: String },
    /// A `[...]` line is not a well-formed section header.
    #[error("line {line}: malformed section header `{text}`: {reason}")]
    MalformedSection {
        line: usize,
        text: String,
        reason: &'static str,
    },
    /// An item line has no `=`.
    #[error("line {line}: assignment (=) not found in `{text}`")]
    MissingAssignment { line: usize, text: String },
    /// An item line has nothing before its `=`.
    #[error("line {line}: empty key in `{text}`")]
    EmptyKey { line: usize, text: String },
    /// A value could not be coerced to its field's declared kind.
    #[error("line {line}: cannot set {section}.{key} from `{value}`: {source}")]
    ValueConversion {
        line: usize,
        section: String,
        key: String,
        value: String,
        #[source]
        source: CoercionError,
    },
    /// The input is not valid UTF-8.
    #[error("line {line}: input is not valid utf-8: {source}")]
    InvalidUtf8 {
        line: usize,
        #[source]
        source: std::str::Utf8Error,
    },
    /// Reading a config file failed.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing a config file failed.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IniError {
    /// Line number the error points at, for errors raised while decoding.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedSection { line, .. }
            | Self::MissingAssignment { line, .. }
            | Self::EmptyKey { line, .. }
            | Self::ValueConversion { line, .. }
            | Self::InvalidUtf8 { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Failure converting between text, [`crate::ScalarValue`] and a concrete
/// Rust scalar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("invalid integer: {0}")]
    Int(#[from] ParseIntError),
    #[error("invalid float: {0}")]
    Float(#[from] ParseFloatError),
    #[error("{value} is out of range for {target}")]
    OutOfRange { value: String, target: &'static str },
    #[error("expected {expected} value, found {found}")]
    KindMismatch {
        expected: ScalarKind,
        found: ScalarKind,
    },
}
