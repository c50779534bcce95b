//! Per-type field registries.
//!
//! A [`Record`] lists its fields once, in [`Record::register`]. The first
//! encode or decode of that type runs `register` and caches the resulting
//! [`Registry`] for the rest of the process. Every later call, from any
//! thread, shares that immutable registry.
//!
//! # Architecture
//!
//! ```text
//! REGISTRIES (static)
//! +-- RwLock<HashMap<TypeId, &'static OnceLock<Registry<T>>>>
//!
//! Registry<T>
//! +-- fields: [FieldDescriptor<T>]   (registration order = key order)
//!     +-- key
//!     +-- presence override
//!     +-- Access<T, F> + Codec<Target = F>
//! ```
//!
//! The map lock is only held to find or insert a type's cell. `register`
//! runs inside the cell's `OnceLock`, so it runs exactly once per type even
//! under concurrent first use, and other types can be resolved meanwhile.
//! `register` must not encode or decode its own type.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{OnceLock, PoisonError, RwLock};

use serde_json::Value;

use crate::codec::{Codec, Custom, Nested, Owned, Prim, Primitive, Seq};
use crate::error::{DecodeError, Result};
use crate::node::JsonNode;
use crate::writer::JsonWrite;

/// A struct that can be converted to and from a JSON object.
///
/// # Example
///
/// ```
/// use json_convert::{field, Fields, Record};
///
/// #[derive(Default)]
/// struct Point {
///     x: i32,
///     y: i32,
///     tags: Vec<String>,
/// }
///
/// impl Record for Point {
///     fn register(fields: &mut Fields<Self>) {
///         fields.field("x", field!(Point, x));
///         fields.field("y", field!(Point, y)).required();
///         fields.repeated("tags", field!(Point, tags), json_convert::codec::primitive());
///     }
/// }
/// ```
pub trait Record: Default + 'static {
    /// Register every field, in the order keys should be written.
    fn register(fields: &mut Fields<Self>);
}

/// Field access path: reads and writes one field of a record.
///
/// Usually built with the [`field!`](crate::field) macro.
pub struct Access<T, F> {
    get: fn(&T) -> &F,
    get_mut: fn(&mut T) -> &mut F,
}

impl<T, F> Access<T, F> {
    pub fn new(get: fn(&T) -> &F, get_mut: fn(&mut T) -> &mut F) -> Self {
        Self { get, get_mut }
    }

    pub fn get<'a>(&self, record: &'a T) -> &'a F {
        (self.get)(record)
    }

    pub fn get_mut<'a>(&self, record: &'a mut T) -> &'a mut F {
        (self.get_mut)(record)
    }
}

impl<T, F> Clone for Access<T, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, F> Copy for Access<T, F> {}

/// Build an [`Access`] for a named (or tuple-indexed) field.
///
/// ```
/// # use json_convert::field;
/// struct Pair(u32, String);
///
/// let second = field!(Pair, 1);
/// let mut pair = Pair(1, "a".into());
/// second.get_mut(&mut pair).push('b');
/// assert_eq!(second.get(&pair), "ab");
/// ```
#[macro_export]
macro_rules! field {
    ($record:ty, $field:tt) => {
        $crate::Access::<$record, _>::new(
            |record: &$record| &record.$field,
            |record: &mut $record| &mut record.$field,
        )
    };
}

/// Whether a decode may omit a field's key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presence {
    /// A missing key leaves the field untouched.
    #[default]
    Optional,
    /// A missing key fails with [`DecodeError::MissingRequiredField`].
    Required,
}

trait Slot<T>: Send + Sync {
    fn decode(&self, node: &Value, record: &mut T) -> Result<()>;
    fn encode(&self, record: &T, out: &mut dyn JsonWrite);
}

struct Bound<T, C: Codec> {
    access: Access<T, C::Target>,
    codec: C,
}

impl<T, C: Codec> Slot<T> for Bound<T, C> {
    fn decode(&self, node: &Value, record: &mut T) -> Result<()> {
        self.codec.decode_into(node, self.access.get_mut(record))
    }

    fn encode(&self, record: &T, out: &mut dyn JsonWrite) {
        self.codec.encode(self.access.get(record), out);
    }
}

/// One registered field: a JSON key bound to an access path and a codec.
pub struct FieldDescriptor<T> {
    key: String,
    presence: Option<Presence>,
    slot: Box<dyn Slot<T>>,
}

impl<T> FieldDescriptor<T> {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The per-field override, if any. See [`Registry::presence_of`].
    pub fn presence(&self) -> Option<Presence> {
        self.presence
    }

    pub fn required(&mut self) -> &mut Self {
        self.presence = Some(Presence::Required);
        self
    }

    pub fn optional(&mut self) -> &mut Self {
        self.presence = Some(Presence::Optional);
        self
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("key", &self.key)
            .field("presence", &self.presence)
            .finish_non_exhaustive()
    }
}

/// Registration handle passed to [`Record::register`].
pub struct Fields<T> {
    descriptors: Vec<FieldDescriptor<T>>,
    presence: Presence,
}

impl<T: Record> Fields<T> {
    fn new() -> Self {
        Self {
            descriptors: Vec::new(),
            presence: Presence::Optional,
        }
    }

    /// Make every field without its own override required.
    pub fn require_all(&mut self) -> &mut Self {
        self.presence = Presence::Required;
        self
    }

    /// Register a field with an explicit codec.
    ///
    /// # Panics
    ///
    /// If `key` is already registered for this record.
    pub fn add<C>(
        &mut self,
        key: &str,
        access: Access<T, C::Target>,
        codec: C,
    ) -> &mut FieldDescriptor<T>
    where
        C: Codec,
        C::Target: 'static,
    {
        assert!(
            self.descriptors.iter().all(|d| d.key != key),
            "duplicate field key \"{key}\" registered for {}",
            type_name::<T>()
        );
        let index = self.descriptors.len();
        self.descriptors.push(FieldDescriptor {
            key: key.to_owned(),
            presence: None,
            slot: Box::new(Bound { access, codec }),
        });
        &mut self.descriptors[index]
    }

    pub fn field<P: Primitive>(
        &mut self,
        key: &str,
        access: Access<T, P>,
    ) -> &mut FieldDescriptor<T> {
        self.add(key, access, Prim::<P>::new())
    }

    pub fn nested<R: Record>(
        &mut self,
        key: &str,
        access: Access<T, R>,
    ) -> &mut FieldDescriptor<T> {
        self.add(key, access, Nested::<R>::new())
    }

    /// A `Vec<E>` field whose elements use `element`.
    pub fn repeated<C>(
        &mut self,
        key: &str,
        access: Access<T, Vec<C::Target>>,
        element: C,
    ) -> &mut FieldDescriptor<T>
    where
        C: Codec,
        C::Target: 'static,
    {
        self.add(key, access, Seq::new(element))
    }

    /// A `Vec<Box<E>>` field whose elements use `element`.
    pub fn repeated_owned<C>(
        &mut self,
        key: &str,
        access: Access<T, Vec<Box<C::Target>>>,
        element: C,
    ) -> &mut FieldDescriptor<T>
    where
        C: Codec,
        C::Target: 'static,
    {
        self.add(key, access, Owned::new(element))
    }

    pub fn custom<F, D, E>(
        &mut self,
        key: &str,
        access: Access<T, F>,
        decode: D,
        encode: E,
    ) -> &mut FieldDescriptor<T>
    where
        F: 'static,
        D: Fn(&Value) -> Result<F> + Send + Sync + 'static,
        E: Fn(&F, &mut dyn JsonWrite) + Send + Sync + 'static,
    {
        self.add(key, access, Custom::new(decode, encode))
    }
}

/// The immutable field list of one record type.
pub struct Registry<T> {
    fields: Vec<FieldDescriptor<T>>,
    presence: Presence,
}

impl<T: Record> Registry<T> {
    fn build() -> Self {
        let mut fields = Fields::new();
        T::register(&mut fields);
        tracing::debug!(
            record = type_name::<T>(),
            fields = fields.descriptors.len(),
            "built field registry"
        );
        Self {
            fields: fields.descriptors,
            presence: fields.presence,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in registration order.
    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldDescriptor::key)
    }

    pub fn field(&self, key: &str) -> Option<&FieldDescriptor<T>> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Effective presence: the field's override, else the record default.
    pub fn presence_of(&self, field: &FieldDescriptor<T>) -> Presence {
        field.presence.unwrap_or(self.presence)
    }

    /// Decode the members of `node` into `record`, in registration order.
    ///
    /// Stops at the first failing field; `record` is then partially updated
    /// and should be discarded.
    pub fn decode_into(&self, node: &Value, record: &mut T) -> Result<()> {
        if !node.is_object() {
            return Err(DecodeError::mismatch("object", node));
        }
        for field in &self.fields {
            match node.member(&field.key) {
                Some(member) => field
                    .slot
                    .decode(member, record)
                    .map_err(|e| e.in_field(field.key.as_str()))?,
                None if self.presence_of(field) == Presence::Required => {
                    return Err(DecodeError::MissingRequiredField.in_field(field.key.as_str()));
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Write `record` as one JSON object, keys in registration order.
    pub fn encode(&self, record: &T, out: &mut dyn JsonWrite) {
        out.start_object();
        for field in &self.fields {
            out.key(&field.key);
            field.slot.encode(record, out);
        }
        out.end_object();
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("record", &type_name::<T>())
            .field("fields", &self.fields)
            .field("presence", &self.presence)
            .finish()
    }
}

type Cell = &'static (dyn Any + Send + Sync);

static REGISTRIES: OnceLock<RwLock<HashMap<TypeId, Cell>>> = OnceLock::new();

/// The registry of `T`, built on first use.
pub fn registry<T: Record>() -> &'static Registry<T> {
    cell::<T>().get_or_init(Registry::build)
}

fn cell<T: Record>() -> &'static OnceLock<Registry<T>> {
    let cells = REGISTRIES.get_or_init(Default::default);
    let id = TypeId::of::<T>();
    let found = cells
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&id)
        .copied();
    let cell = match found {
        Some(cell) => cell,
        None => *cells
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(id)
            .or_insert_with(|| -> Cell { Box::leak(Box::new(OnceLock::<Registry<T>>::new())) }),
    };
    cell.downcast_ref()
        .expect("registry cell is stored under its own TypeId")
}
