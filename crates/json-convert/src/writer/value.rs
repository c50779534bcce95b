use serde_json::{Map, Number, Value};

use super::JsonWrite;

/// An open container and the key it will be stored under in its parent.
struct Frame {
    key: Option<String>,
    open: Open,
}

enum Open {
    Object(Map<String, Value>),
    Array(Vec<Value>),
}

/// Builds a [`serde_json::Value`] tree from write events.
///
/// Object members keep the order they were written in. A key whose value
/// never arrives is stored as `null`, as [`TextWriter`](super::TextWriter)
/// writes it.
#[derive(Default)]
pub struct ValueWriter {
    stack: Vec<Frame>,
    pending_key: Option<String>,
    root: Option<Value>,
}

impl ValueWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The completed root value, or `null` if nothing was written.
    pub fn finish(self) -> Value {
        self.root.unwrap_or(Value::Null)
    }

    fn push(&mut self, value: Value) {
        match self.stack.last_mut() {
            Some(Frame {
                open: Open::Object(map),
                ..
            }) => {
                let key = self.pending_key.take().unwrap_or_default();
                map.insert(key, value);
            }
            Some(Frame {
                open: Open::Array(arr),
                ..
            }) => arr.push(value),
            None => self.root = Some(value),
        }
    }

    fn flush_dangling_key(&mut self) {
        if self.pending_key.is_some() {
            self.push(Value::Null);
        }
    }

    fn open(&mut self, open: Open) {
        let key = self.pending_key.take();
        self.stack.push(Frame { key, open });
    }

    fn close(&mut self) {
        self.flush_dangling_key();
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let value = match frame.open {
            Open::Object(map) => Value::Object(map),
            Open::Array(arr) => Value::Array(arr),
        };
        self.pending_key = frame.key;
        self.push(value);
    }
}

impl JsonWrite for ValueWriter {
    fn start_object(&mut self) {
        self.open(Open::Object(Map::new()));
    }

    fn end_object(&mut self) {
        self.close();
    }

    fn start_array(&mut self) {
        self.open(Open::Array(Vec::new()));
    }

    fn end_array(&mut self) {
        self.close();
    }

    fn key(&mut self, key: &str) {
        self.flush_dangling_key();
        self.pending_key = Some(key.to_owned());
    }

    fn write_null(&mut self) {
        self.push(Value::Null);
    }

    fn write_bool(&mut self, value: bool) {
        self.push(Value::Bool(value));
    }

    fn write_int(&mut self, value: i32) {
        self.push(Value::from(value));
    }

    fn write_uint(&mut self, value: u32) {
        self.push(Value::from(value));
    }

    fn write_int64(&mut self, value: i64) {
        self.push(Value::from(value));
    }

    fn write_uint64(&mut self, value: u64) {
        self.push(Value::from(value));
    }

    fn write_double(&mut self, value: f64) {
        let value = Number::from_f64(value).map_or(Value::Null, Value::Number);
        self.push(value);
    }

    fn write_string(&mut self, value: &str) {
        self.push(Value::String(value.to_owned()));
    }
}
