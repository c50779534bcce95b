//! Typed read access to a parsed JSON tree.
//!
//! Codecs never match on [`serde_json::Value`] directly; they go through
//! [`JsonNode`], which classifies numbers the way the field types need them.
//! An integer node is never a double and a double node is never an integer,
//! so `5` and `5.0` are different kinds.

use std::fmt;

use serde_json::Value;

/// The kind tag of a JSON node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Integer,
    Double,
    String,
    Array,
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Integer => "integer",
            Kind::Double => "double",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        };
        f.write_str(name)
    }
}

pub trait JsonNode {
    fn kind(&self) -> Kind;

    fn get_bool(&self) -> Option<bool>;
    /// An integer within `i32` range.
    fn get_int(&self) -> Option<i32>;
    /// A non-negative integer within `u32` range.
    fn get_uint(&self) -> Option<u32>;
    fn get_int64(&self) -> Option<i64>;
    fn get_uint64(&self) -> Option<u64>;
    /// A number written with a fraction or exponent.
    fn get_double(&self) -> Option<f64>;
    fn get_string(&self) -> Option<&str>;

    fn member(&self, key: &str) -> Option<&Self>;
    fn element(&self, index: usize) -> Option<&Self>;
    /// Number of elements of an array, members of an object, zero otherwise.
    fn size(&self) -> usize;

    fn is_null(&self) -> bool {
        self.kind() == Kind::Null
    }
    fn is_bool(&self) -> bool {
        self.kind() == Kind::Bool
    }
    fn is_int(&self) -> bool {
        self.get_int().is_some()
    }
    fn is_uint(&self) -> bool {
        self.get_uint().is_some()
    }
    fn is_int64(&self) -> bool {
        self.get_int64().is_some()
    }
    fn is_uint64(&self) -> bool {
        self.get_uint64().is_some()
    }
    fn is_double(&self) -> bool {
        self.kind() == Kind::Double
    }
    fn is_string(&self) -> bool {
        self.kind() == Kind::String
    }
    fn is_array(&self) -> bool {
        self.kind() == Kind::Array
    }
    fn is_object(&self) -> bool {
        self.kind() == Kind::Object
    }

    fn get_string_length(&self) -> Option<usize> {
        self.get_string().map(str::len)
    }

    fn has_member(&self, key: &str) -> bool {
        self.member(key).is_some()
    }
}

impl JsonNode for Value {
    fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(n) if n.is_f64() => Kind::Double,
            Value::Number(_) => Kind::Integer,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    fn get_bool(&self) -> Option<bool> {
        self.as_bool()
    }

    fn get_int(&self) -> Option<i32> {
        self.as_i64().and_then(|v| i32::try_from(v).ok())
    }

    fn get_uint(&self) -> Option<u32> {
        self.as_u64().and_then(|v| u32::try_from(v).ok())
    }

    fn get_int64(&self) -> Option<i64> {
        self.as_i64()
    }

    fn get_uint64(&self) -> Option<u64> {
        self.as_u64()
    }

    fn get_double(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_f64() => n.as_f64(),
            _ => None,
        }
    }

    fn get_string(&self) -> Option<&str> {
        self.as_str()
    }

    fn member(&self, key: &str) -> Option<&Self> {
        self.as_object()?.get(key)
    }

    fn element(&self, index: usize) -> Option<&Self> {
        self.as_array()?.get(index)
    }

    fn size(&self) -> usize {
        match self {
            Value::Array(arr) => arr.len(),
            Value::Object(obj) => obj.len(),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind() {
        assert_eq!(json!(null).kind(), Kind::Null);
        assert_eq!(json!(true).kind(), Kind::Bool);
        assert_eq!(json!(5).kind(), Kind::Integer);
        assert_eq!(json!(-5).kind(), Kind::Integer);
        assert_eq!(json!(u64::MAX).kind(), Kind::Integer);
        assert_eq!(json!(5.0).kind(), Kind::Double);
        assert_eq!(json!("x").kind(), Kind::String);
        assert_eq!(json!([]).kind(), Kind::Array);
        assert_eq!(json!({}).kind(), Kind::Object);
    }

    #[test]
    fn test_integer_ranges() {
        let small = json!(-7);
        assert_eq!(small.get_int(), Some(-7));
        assert_eq!(small.get_uint(), None);
        assert_eq!(small.get_int64(), Some(-7));
        assert_eq!(small.get_uint64(), None);

        let big = json!(3_000_000_000u64);
        assert!(!big.is_int());
        assert!(big.is_uint());
        assert!(big.is_int64());
        assert!(big.is_uint64());

        let huge = json!(u64::MAX);
        assert!(!huge.is_int64());
        assert!(huge.is_uint64());

        let low = json!(i64::MIN);
        assert!(low.is_int64());
        assert!(!low.is_int());
    }

    #[test]
    fn test_no_cross_kind_numbers() {
        assert_eq!(json!(5).get_double(), None);
        assert!(!json!(5).is_double());
        assert_eq!(json!(5.0).get_int(), None);
        assert_eq!(json!(5.0).get_int64(), None);
        assert_eq!(json!(5.5).get_double(), Some(5.5));
    }

    #[test]
    fn test_object_and_array_queries() {
        let doc = json!({"a": [1, "two"], "b": null});
        assert!(doc.has_member("a"));
        assert!(doc.has_member("b"));
        assert!(!doc.has_member("c"));
        assert_eq!(doc.size(), 2);

        let arr = doc.member("a").unwrap();
        assert_eq!(arr.size(), 2);
        assert_eq!(arr.element(1).and_then(|v| v.get_string()), Some("two"));
        assert_eq!(arr.element(2), None);
        assert_eq!(json!("héllo").get_string_length(), Some(6));
    }
}
