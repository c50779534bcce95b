use serde_json::Value;

use super::Codec;
use crate::error::{DecodeError, Result};
use crate::node::JsonNode;
use crate::writer::JsonWrite;

type DecodeFn<F> = Box<dyn Fn(&Value) -> Result<F> + Send + Sync>;
type EncodeFn<F> = Box<dyn Fn(&F, &mut dyn JsonWrite) + Send + Sync>;

/// Caller-supplied encoding for a field type the built-in codecs don't cover.
///
/// The decode function sees the node stored under the field's key; the
/// encode function gets the writer positioned right after that key and must
/// write exactly one value.
pub struct Custom<F> {
    decode: DecodeFn<F>,
    encode: EncodeFn<F>,
}

impl<F: 'static> Custom<F> {
    pub fn new<D, E>(decode: D, encode: E) -> Self
    where
        D: Fn(&Value) -> Result<F> + Send + Sync + 'static,
        E: Fn(&F, &mut dyn JsonWrite) + Send + Sync + 'static,
    {
        Self {
            decode: Box::new(decode),
            encode: Box::new(encode),
        }
    }
}

impl<F: 'static> Codec for Custom<F> {
    type Target = F;

    fn decode(&self, node: &Value) -> Result<F> {
        (self.decode)(node)
    }

    fn encode(&self, value: &F, out: &mut dyn JsonWrite) {
        (self.encode)(value, out);
    }
}

/// Enumeration encoded as one of a closed set of string literals.
///
/// Unknown literals fail with [`DecodeError::Custom`] unless a decode
/// fallback is set with [`StrEnum::or_decode`]. Values missing from the table
/// encode as the literal given to [`StrEnum::or_encode`], or `null`.
///
/// # Example
///
/// ```
/// use json_convert::codec::{Codec, StrEnum};
/// use serde_json::json;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Color { Red, Green }
///
/// let colors = StrEnum::new(&[("red", Color::Red), ("green", Color::Green)]);
/// assert_eq!(colors.decode(&json!("green")), Ok(Color::Green));
/// assert!(colors.decode(&json!("blue")).is_err());
/// ```
pub struct StrEnum<F: 'static> {
    table: &'static [(&'static str, F)],
    decode_fallback: Option<F>,
    encode_fallback: Option<&'static str>,
}

impl<F> StrEnum<F>
where
    F: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(table: &'static [(&'static str, F)]) -> Self {
        Self {
            table,
            decode_fallback: None,
            encode_fallback: None,
        }
    }

    /// Decode unknown literals as `fallback` instead of failing.
    pub fn or_decode(mut self, fallback: F) -> Self {
        self.decode_fallback = Some(fallback);
        self
    }

    /// Encode values missing from the table as `literal` instead of `null`.
    pub fn or_encode(mut self, literal: &'static str) -> Self {
        self.encode_fallback = Some(literal);
        self
    }

    pub fn literal(&self, value: &F) -> Option<&'static str> {
        self.table
            .iter()
            .find(|(_, v)| v == value)
            .map(|(literal, _)| *literal)
    }

    pub fn value(&self, literal: &str) -> Option<&F> {
        self.table
            .iter()
            .find(|(l, _)| *l == literal)
            .map(|(_, v)| v)
    }
}

impl<F> Codec for StrEnum<F>
where
    F: Clone + PartialEq + Send + Sync + 'static,
{
    type Target = F;

    fn decode(&self, node: &Value) -> Result<F> {
        let literal = node
            .get_string()
            .ok_or_else(|| DecodeError::mismatch("string", node))?;
        if let Some(value) = self.value(literal) {
            return Ok(value.clone());
        }
        self.decode_fallback
            .clone()
            .ok_or_else(|| DecodeError::custom(format!("unknown literal \"{literal}\"")))
    }

    fn encode(&self, value: &F, out: &mut dyn JsonWrite) {
        match self.literal(value).or(self.encode_fallback) {
            Some(literal) => out.write_string(literal),
            None => out.write_null(),
        }
    }
}
