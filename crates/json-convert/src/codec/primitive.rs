use std::marker::PhantomData;

use serde_json::Value;

use super::Codec;
use crate::error::{DecodeError, Result};
use crate::node::JsonNode;
use crate::writer::JsonWrite;

/// A scalar with a fixed JSON kind.
///
/// Decoding checks the node's kind exactly; there is no coercion between
/// integers, doubles and strings. Anything looser belongs in a custom codec.
pub trait Primitive: Sized + Send + Sync + 'static {
    /// Name of the accepted kind, used in mismatch errors.
    const EXPECTED: &'static str;

    fn read(node: &Value) -> Option<Self>;
    fn write(&self, out: &mut dyn JsonWrite);
}

macro_rules! primitive {
    ($ty:ty, $expected:literal, $get:ident, $write:ident) => {
        impl Primitive for $ty {
            const EXPECTED: &'static str = $expected;

            fn read(node: &Value) -> Option<Self> {
                node.$get()
            }

            fn write(&self, out: &mut dyn JsonWrite) {
                out.$write(*self);
            }
        }
    };
}

primitive!(bool, "bool", get_bool, write_bool);
primitive!(i32, "int32", get_int, write_int);
primitive!(u32, "uint32", get_uint, write_uint);
primitive!(i64, "int64", get_int64, write_int64);
primitive!(u64, "uint64", get_uint64, write_uint64);
primitive!(f64, "double", get_double, write_double);

impl Primitive for String {
    const EXPECTED: &'static str = "string";

    fn read(node: &Value) -> Option<Self> {
        node.get_string().map(str::to_owned)
    }

    fn write(&self, out: &mut dyn JsonWrite) {
        out.write_string(self);
    }
}

/// Codec for a [`Primitive`] value.
pub struct Prim<P>(PhantomData<fn() -> P>);

impl<P: Primitive> Prim<P> {
    pub fn new() -> Self {
        Prim(PhantomData)
    }
}

impl<P: Primitive> Default for Prim<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Primitive> Codec for Prim<P> {
    type Target = P;

    fn decode(&self, node: &Value) -> Result<P> {
        P::read(node).ok_or_else(|| DecodeError::mismatch(P::EXPECTED, node))
    }

    fn encode(&self, value: &P, out: &mut dyn JsonWrite) {
        value.write(out);
    }
}
