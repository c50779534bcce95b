//! Value codecs: how one field value maps to one JSON node.
//!
//! A field is bound to exactly one [`Codec`]. Codecs compose: [`Seq`] and
//! [`Owned`] wrap an element codec, [`Nested`] defers to another record's
//! registry, and [`Custom`] / [`StrEnum`] carry caller-defined encodings.
//! Dispatch happens through the codec's type at registration time, so no
//! runtime type inspection is involved.

mod custom;
mod nested;
mod primitive;
mod seq;

pub use custom::{Custom, StrEnum};
pub use nested::Nested;
pub use primitive::{Prim, Primitive};
pub use seq::{Owned, Seq};

use serde_json::Value;

use crate::error::Result;
use crate::registry::Record;
use crate::writer::JsonWrite;

/// Maps one in-memory value to one JSON node and back.
pub trait Codec: Send + Sync + 'static {
    /// The in-memory value this codec reads and writes.
    type Target;

    /// Decode a fresh value from `node`.
    fn decode(&self, node: &Value) -> Result<Self::Target>;

    /// Decode `node` into an existing slot.
    ///
    /// On failure the slot is left in an unspecified state.
    fn decode_into(&self, node: &Value, slot: &mut Self::Target) -> Result<()> {
        *slot = self.decode(node)?;
        Ok(())
    }

    /// Encode never fails; every representable value has a JSON form.
    fn encode(&self, value: &Self::Target, out: &mut dyn JsonWrite);
}

pub fn primitive<P: Primitive>() -> Prim<P> {
    Prim::new()
}

pub fn nested<R: Record>() -> Nested<R> {
    Nested::new()
}

/// Sequence of inline elements, `Vec<E>`.
pub fn seq<C: Codec>(element: C) -> Seq<C> {
    Seq::new(element)
}

/// Sequence of individually boxed elements, `Vec<Box<E>>`.
pub fn owned<C: Codec>(element: C) -> Owned<C> {
    Owned::new(element)
}

pub fn custom<F, D, E>(decode: D, encode: E) -> Custom<F>
where
    F: 'static,
    D: Fn(&Value) -> Result<F> + Send + Sync + 'static,
    E: Fn(&F, &mut dyn JsonWrite) + Send + Sync + 'static,
{
    Custom::new(decode, encode)
}
