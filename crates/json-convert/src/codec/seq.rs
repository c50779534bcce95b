use serde_json::Value;

use super::Codec;
use crate::error::{DecodeError, Result};
use crate::writer::JsonWrite;

fn elements(node: &Value) -> Result<&[Value]> {
    node.as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| DecodeError::mismatch("array", node))
}

/// `Vec<E>` as a JSON array, element order preserved.
///
/// Decoding builds a new vector and only replaces the slot once every element
/// decoded; the first failing element fails the whole field.
pub struct Seq<C> {
    element: C,
}

impl<C: Codec> Seq<C> {
    pub fn new(element: C) -> Self {
        Self { element }
    }
}

impl<C: Codec> Codec for Seq<C> {
    type Target = Vec<C::Target>;

    fn decode(&self, node: &Value) -> Result<Self::Target> {
        elements(node)?
            .iter()
            .enumerate()
            .map(|(i, item)| self.element.decode(item).map_err(|e| e.at_index(i)))
            .collect()
    }

    fn encode(&self, value: &Self::Target, out: &mut dyn JsonWrite) {
        out.start_array();
        for item in value {
            self.element.encode(item, out);
        }
        out.end_array();
    }
}

/// `Vec<Box<E>>` as a JSON array: one heap allocation per element, each
/// owned by the vector alone.
pub struct Owned<C> {
    element: C,
}

impl<C: Codec> Owned<C> {
    pub fn new(element: C) -> Self {
        Self { element }
    }
}

impl<C: Codec> Codec for Owned<C> {
    type Target = Vec<Box<C::Target>>;

    fn decode(&self, node: &Value) -> Result<Self::Target> {
        let items = elements(node)?;
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let value = self.element.decode(item).map_err(|e| e.at_index(i))?;
            out.push(Box::new(value));
        }
        Ok(out)
    }

    fn encode(&self, value: &Self::Target, out: &mut dyn JsonWrite) {
        out.start_array();
        for item in value {
            self.element.encode(item, out);
        }
        out.end_array();
    }
}
