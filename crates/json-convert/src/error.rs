//! Decode failures.
//!
//! Every failure is fail-fast: the first field that cannot be decoded aborts
//! the whole decode. Errors raised below a record field or an array element
//! are wrapped in [`DecodeError::Field`] / [`DecodeError::Element`] on the way
//! up, so the outermost error carries the full location of the failure.

use serde_json::Value;
use thiserror::Error;

use crate::node::{JsonNode, Kind};

pub type Result<T, E = DecodeError> = std::result::Result<T, E>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Input text is not well-formed JSON.
    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: Kind },
    #[error("missing required field")]
    MissingRequiredField,
    #[error("element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<DecodeError>,
    },
    /// Reported by a caller-supplied codec.
    #[error("custom codec failure: {0}")]
    Custom(String),
    #[error("field \"{key}\": {source}")]
    Field {
        key: String,
        #[source]
        source: Box<DecodeError>,
    },
}

/// The root-cause category of a [`DecodeError`], with location wrappers
/// stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    TypeMismatch,
    MissingRequiredField,
    Custom,
}

impl DecodeError {
    pub fn mismatch(expected: &'static str, node: &Value) -> Self {
        DecodeError::TypeMismatch {
            expected,
            found: node.kind(),
        }
    }

    pub fn custom(message: impl Into<String>) -> Self {
        DecodeError::Custom(message.into())
    }

    /// Attach the record key this error occurred under.
    pub fn in_field(self, key: impl Into<String>) -> Self {
        DecodeError::Field {
            key: key.into(),
            source: Box::new(self),
        }
    }

    /// Attach the array index this error occurred at.
    pub fn at_index(self, index: usize) -> Self {
        DecodeError::Element {
            index,
            source: Box::new(self),
        }
    }

    /// The innermost error, below all field and element wrappers.
    pub fn root(&self) -> &DecodeError {
        let mut current = self;
        loop {
            match current {
                DecodeError::Field { source, .. } | DecodeError::Element { source, .. } => {
                    current = source
                }
                _ => return current,
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::Parse { .. } => ErrorKind::Parse,
            DecodeError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            DecodeError::MissingRequiredField => ErrorKind::MissingRequiredField,
            DecodeError::Custom(_) => ErrorKind::Custom,
            DecodeError::Field { source, .. } | DecodeError::Element { source, .. } => {
                source.kind()
            }
        }
    }

    /// JSON Pointer (RFC 6901) of the value that failed to decode.
    ///
    /// Empty for failures at the document root.
    pub fn pointer(&self) -> String {
        let mut out = String::new();
        let mut current = self;
        loop {
            match current {
                DecodeError::Field { key, source } => {
                    out.push('/');
                    push_escaped(&mut out, key);
                    current = source;
                }
                DecodeError::Element { index, source } => {
                    out.push('/');
                    out.push_str(&index.to_string());
                    current = source;
                }
                _ => return out,
            }
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Parse {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

// `~` must be escaped before `/`.
fn push_escaped(out: &mut String, key: &str) {
    for c in key.chars() {
        match c {
            '~' => out.push_str("~0"),
            '/' => out.push_str("~1"),
            _ => out.push(c),
        }
    }
}
