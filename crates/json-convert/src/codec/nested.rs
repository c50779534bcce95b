use std::marker::PhantomData;

use serde_json::Value;

use super::Codec;
use crate::error::Result;
use crate::registry::{registry, Record};
use crate::writer::JsonWrite;

/// An embedded record, encoded as a nested JSON object.
///
/// The nested registry is looked up on each call rather than at registration,
/// so a record may contain sequences of itself.
pub struct Nested<R>(PhantomData<fn() -> R>);

impl<R: Record> Nested<R> {
    pub fn new() -> Self {
        Nested(PhantomData)
    }
}

impl<R: Record> Default for Nested<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Codec for Nested<R> {
    type Target = R;

    fn decode(&self, node: &Value) -> Result<R> {
        let mut record = R::default();
        registry::<R>().decode_into(node, &mut record)?;
        Ok(record)
    }

    /// Decodes in place: keys missing from `node` keep the slot's values.
    fn decode_into(&self, node: &Value, slot: &mut R) -> Result<()> {
        registry::<R>().decode_into(node, slot)
    }

    fn encode(&self, value: &R, out: &mut dyn JsonWrite) {
        registry::<R>().encode(value, out);
    }
}
