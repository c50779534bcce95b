//! `json-convert`: registration-driven conversion between Rust records and
//! JSON, without reflection and without per-type serialization code.
//!
//! A record implements [`Record`] by listing its fields once. Each field binds
//! a JSON key to an access path ([`field!`]) and a [`codec::Codec`]. Encoding
//! and decoding walk that list in registration order, so encoded keys always
//! come out in the same order.
//!
//! # Example
//!
//! ```
//! use json_convert::codec::{primitive, StrEnum};
//! use json_convert::{field, Fields, Record};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Default)]
//! enum Level {
//!     #[default]
//!     Low,
//!     High,
//! }
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Reading {
//!     id: u64,
//!     level: Level,
//!     samples: Vec<f64>,
//! }
//!
//! impl Record for Reading {
//!     fn register(fields: &mut Fields<Self>) {
//!         fields.field("id", field!(Reading, id)).required();
//!         fields.add(
//!             "level",
//!             field!(Reading, level),
//!             StrEnum::new(&[("low", Level::Low), ("high", Level::High)]),
//!         );
//!         fields.repeated("samples", field!(Reading, samples), primitive());
//!     }
//! }
//!
//! let reading = Reading { id: 7, level: Level::High, samples: vec![0.5, 2.0] };
//! let text = json_convert::to_string(&reading);
//! assert_eq!(text, r#"{"id":7,"level":"high","samples":[0.5,2.0]}"#);
//! assert_eq!(json_convert::from_str::<Reading>(&text), Ok(reading));
//! ```

pub mod codec;
pub mod converter;
pub mod error;
pub mod node;
pub mod registry;
pub mod writer;

pub use converter::{from_str, from_value, to_string, to_string_pretty, to_value, Converter};
pub use error::{DecodeError, ErrorKind, Result};
pub use node::{JsonNode, Kind};
pub use registry::{registry, Access, FieldDescriptor, Fields, Presence, Record, Registry};
pub use writer::{JsonWrite, Style, TextWriter, ValueWriter};
