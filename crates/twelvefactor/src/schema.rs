//! Declarative schemas.
//!
//! A [`Schema`] is an ordered list of named entries. Each entry is either a
//! bare [`Kind`] (shorthand for "this kind, everything else default") or a
//! full [`Entry`]:
//!
//! ```rust
//! use twelvefactor::{Entry, Kind, Mapper, Schema, Value};
//!
//! let schema = Schema::new()
//!     .entry("DEBUG", Entry::of(Kind::Bool).with_default(false))
//!     .entry("SECRET_KEY", Kind::String)
//!     .entry(
//!         "DATABASES",
//!         Entry::new()
//!             .with_key("DATABASE_URL")
//!             .with_default("sqlite:///")
//!             .with_mapper(Mapper::new(|url| Value::from(vec![url]))),
//!     );
//!
//! assert_eq!(schema.len(), 3);
//! ```

use std::borrow::Cow;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::error::BoxError;
use crate::kind::Kind;
use crate::value::Value;

type MapFn = dyn Fn(Value) -> Result<Value, BoxError> + Send + Sync;

// ============================================================================
// Mapper
// ============================================================================

/// Post-processing applied to a resolved value.
///
/// The mapper receives the coerced value (or the default, untouched) and its
/// result replaces it. Equality is identity, as for [`Converter`](crate::Converter).
#[derive(Clone)]
pub struct Mapper(Arc<MapFn>);

impl Mapper {
    /// Wraps an infallible function.
    pub fn new<F>(map: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(move |value| Ok(map(value))))
    }

    /// Wraps a fallible function. Its errors surface as
    /// [`Error::Foreign`](crate::Error::Foreign), unmodified.
    pub fn try_new<F>(map: F) -> Self
    where
        F: Fn(Value) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Self(Arc::new(map))
    }

    /// Applies the mapper.
    ///
    /// # Errors
    ///
    /// Returns the wrapped function's error.
    pub fn apply(&self, value: Value) -> Result<Value, BoxError> {
        (self.0)(value)
    }
}

impl PartialEq for Mapper {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Debug for Mapper {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Mapper(..)")
    }
}

// ============================================================================
// Entry
// ============================================================================

/// Full description of how to resolve one value.
///
/// | Field | Default | Meaning |
/// |-------|---------|---------|
/// | `key` | `None` | lookup key; the schema name when unset |
/// | `default` | `None` | value used when the key is absent; `None` means required |
/// | `kind` | `Kind::String` | target kind |
/// | `subtype` | `Kind::String` | element kind, for container kinds only |
/// | `mapper` | `None` | post-processing |
///
/// `default: None` is the "unset" marker. It is distinct from
/// `Some(Value::None)`, which is a real (null) default.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Entry {
    /// Lookup key; the schema name is used when unset.
    pub key: Option<String>,

    /// Default value, used as-is (never coerced).
    pub default: Option<Value>,

    /// Target kind.
    pub kind: Kind,

    /// Element kind for container kinds.
    pub subtype: Kind,

    /// Post-processing.
    pub mapper: Option<Mapper>,
}

impl Entry {
    /// Creates an entry with every field at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an entry of the given kind.
    #[must_use]
    pub fn of(kind: Kind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Sets the lookup key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the target kind.
    #[must_use]
    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the element kind.
    #[must_use]
    pub fn with_subtype(mut self, subtype: Kind) -> Self {
        self.subtype = subtype;
        self
    }

    /// Sets the mapper.
    #[must_use]
    pub fn with_mapper(mut self, mapper: Mapper) -> Self {
        self.mapper = Some(mapper);
        self
    }

    /// Returns `true` when a key is required (no default).
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A schema entry as written: shorthand or full form.
#[derive(Clone, Debug, PartialEq)]
pub enum SchemaEntry {
    /// A bare kind, meaning `Entry::of(kind)`.
    Shorthand(Kind),

    /// A full entry.
    Full(Entry),
}

impl SchemaEntry {
    /// Expands the shorthand form; full entries are borrowed.
    #[must_use]
    pub fn normalize(&self) -> Cow<'_, Entry> {
        match self {
            SchemaEntry::Shorthand(kind) => Cow::Owned(Entry::of(kind.clone())),
            SchemaEntry::Full(entry) => Cow::Borrowed(entry),
        }
    }
}

impl From<Kind> for SchemaEntry {
    fn from(kind: Kind) -> Self {
        SchemaEntry::Shorthand(kind)
    }
}

impl From<Entry> for SchemaEntry {
    fn from(entry: Entry) -> Self {
        SchemaEntry::Full(entry)
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Ordered mapping from logical names to entries.
///
/// Names are unique: adding a name twice replaces the earlier entry in
/// place, keeping its position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    entries: Vec<(String, SchemaEntry)>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the entry for `name`.
    #[must_use]
    pub fn entry(mut self, name: impl Into<String>, entry: impl Into<SchemaEntry>) -> Self {
        self.insert(name, entry);
        self
    }

    /// Adds (or replaces) the entry for `name`, returning the previous one.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        entry: impl Into<SchemaEntry>,
    ) -> Option<SchemaEntry> {
        let name = name.into();
        let entry = entry.into();

        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, entry)),
            None => {
                self.entries.push((name, entry));
                None
            }
        }
    }

    /// Returns the entry for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SchemaEntry> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, entry)| entry)
    }

    /// Iterates over `(name, entry)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaEntry)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the schema has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, E> FromIterator<(N, E)> for Schema
where
    N: Into<String>,
    E: Into<SchemaEntry>,
{
    fn from_iter<I: IntoIterator<Item = (N, E)>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for (name, entry) in iter {
            schema.insert(name, entry);
        }
        schema
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = (&'a str, &'a SchemaEntry);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
