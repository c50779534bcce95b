//! Event-style JSON output.
//!
//! Codecs emit JSON through [`JsonWrite`] one event at a time. The same codec
//! can therefore produce text ([`TextWriter`]) or a [`serde_json::Value`]
//! tree ([`ValueWriter`]).
//!
//! Writers trust their caller to emit a well-formed event sequence: every
//! `start_*` matched by its `end_*`, and exactly one `key` before each object
//! member value. The registry guarantees that for encoded records.

mod text;
mod value;

pub use text::{Style, TextWriter};
pub use value::ValueWriter;

pub trait JsonWrite {
    fn start_object(&mut self);
    fn end_object(&mut self);
    fn start_array(&mut self);
    fn end_array(&mut self);
    /// Emit an object member name. The next value written belongs to it.
    fn key(&mut self, key: &str);

    fn write_null(&mut self);
    fn write_bool(&mut self, value: bool);
    fn write_int(&mut self, value: i32);
    fn write_uint(&mut self, value: u32);
    fn write_int64(&mut self, value: i64);
    fn write_uint64(&mut self, value: u64);
    /// Non-finite values have no JSON form and are written as `null`.
    fn write_double(&mut self, value: f64);
    fn write_string(&mut self, value: &str);
}
