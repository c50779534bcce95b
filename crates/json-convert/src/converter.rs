//! Entry points: records to and from JSON trees and text.

use std::any::type_name;

use serde_json::Value;

use crate::error::{DecodeError, Result};
use crate::registry::{registry, Record, Registry};
use crate::writer::{JsonWrite, Style, TextWriter, ValueWriter};

/// Converter for one record type.
///
/// Cheap to copy; all converters of a type share the same registry.
pub struct Converter<T: 'static> {
    registry: &'static Registry<T>,
    style: Style,
}

impl<T: Record> Converter<T> {
    pub fn get() -> Self {
        Self {
            registry: registry::<T>(),
            style: Style::Compact,
        }
    }

    /// Text layout used by [`Converter::to_text`].
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn pretty(self) -> Self {
        self.with_style(Style::pretty())
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn registry(&self) -> &'static Registry<T> {
        self.registry
    }

    pub fn encode(&self, record: &T) -> Value {
        let mut out = ValueWriter::new();
        self.write_to(record, &mut out);
        out.finish()
    }

    pub fn write_to(&self, record: &T, out: &mut dyn JsonWrite) {
        self.registry.encode(record, out);
    }

    pub fn to_text(&self, record: &T) -> String {
        let mut out = TextWriter::with_style(self.style);
        self.write_to(record, &mut out);
        out.into_string()
    }

    /// Decode into a default-constructed record.
    pub fn decode(&self, node: &Value) -> Result<T> {
        let mut record = T::default();
        self.decode_into(node, &mut record)?;
        Ok(record)
    }

    /// Decode into an existing record; keys missing from `node` keep the
    /// record's values for optional fields.
    ///
    /// On error the record is partially updated and should be discarded.
    pub fn decode_into(&self, node: &Value, record: &mut T) -> Result<()> {
        let result = self.registry.decode_into(node, record);
        if let Err(err) = &result {
            tracing::debug!(
                record = type_name::<T>(),
                pointer = %err.pointer(),
                error = %err.root(),
                "decode failed"
            );
        }
        result
    }

    pub fn from_text(&self, text: &str) -> Result<T> {
        let mut record = T::default();
        self.from_text_into(text, &mut record)?;
        Ok(record)
    }

    pub fn from_text_into(&self, text: &str, record: &mut T) -> Result<()> {
        let node: Value = serde_json::from_str(text).map_err(|e| {
            let err = DecodeError::from(e);
            tracing::debug!(record = type_name::<T>(), error = %err, "parse failed");
            err
        })?;
        self.decode_into(&node, record)
    }
}

impl<T: 'static> Clone for Converter<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Converter<T> {}

impl<T: Record> Default for Converter<T> {
    fn default() -> Self {
        Self::get()
    }
}

pub fn to_value<T: Record>(record: &T) -> Value {
    Converter::<T>::get().encode(record)
}

pub fn from_value<T: Record>(node: &Value) -> Result<T> {
    Converter::<T>::get().decode(node)
}

pub fn to_string<T: Record>(record: &T) -> String {
    Converter::<T>::get().to_text(record)
}

pub fn to_string_pretty<T: Record>(record: &T) -> String {
    Converter::<T>::get().pretty().to_text(record)
}

pub fn from_str<T: Record>(text: &str) -> Result<T> {
    Converter::<T>::get().from_text(text)
}
