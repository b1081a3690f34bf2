//! The result of evaluating a schema.

use std::ops::Index;

use crate::source::Source;
use crate::value::Value;

/// One resolved schema entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedEntry {
    /// The schema's logical name.
    pub name: String,

    /// The key that was looked up.
    pub key: String,

    /// The final value (after the mapper, if any).
    pub value: Value,

    /// Where the value came from.
    pub source: Source,
}

/// Ordered mapping from schema names to resolved values.
///
/// Has exactly the names of the evaluated schema, in the same order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolved {
    entries: Vec<ResolvedEntry>,
}

impl Resolved {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, entry: ResolvedEntry) {
        self.entries.push(entry);
    }

    fn entry(&self, name: &str) -> Option<&ResolvedEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Returns the value resolved for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entry(name).map(|e| &e.value)
    }

    /// Returns where the value for `name` came from.
    #[must_use]
    pub fn source(&self, name: &str) -> Option<Source> {
        self.entry(name).map(|e| e.source)
    }

    /// Returns the key that was looked up for `name`.
    #[must_use]
    pub fn key_for(&self, name: &str) -> Option<&str> {
        self.entry(name).map(|e| e.key.as_str())
    }

    /// Removes and returns the value for `name`.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        let pos = self.entries.iter().position(|e| e.name == name)?;
        Some(self.entries.remove(pos).value)
    }

    /// Iterates over `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|e| (e.name.as_str(), &e.value))
    }

    /// Iterates over full entries in schema order.
    pub fn entries(&self) -> impl Iterator<Item = &ResolvedEntry> {
        self.entries.iter()
    }

    /// Iterates over names in schema order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<&str> for Resolved {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if `name` was not part of the schema.
    fn index(&self, name: &str) -> &Value {
        self.get(name)
            .unwrap_or_else(|| panic!("no resolved value named {name:?}"))
    }
}

type IntoPair = fn(ResolvedEntry) -> (String, Value);

impl IntoIterator for Resolved {
    type Item = (String, Value);
    type IntoIter = std::iter::Map<std::vec::IntoIter<ResolvedEntry>, IntoPair>;

    fn into_iter(self) -> Self::IntoIter {
        let into_pair: IntoPair = |e| (e.name, e.value);
        self.entries.into_iter().map(into_pair)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Resolved {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Resolved {
        let mut resolved = Resolved::with_capacity(2);
        resolved.push(ResolvedEntry {
            name: "PORT".into(),
            key: "APP_PORT".into(),
            value: Value::Integer(8080),
            source: Source::Environment,
        });
        resolved.push(ResolvedEntry {
            name: "DEBUG".into(),
            key: "DEBUG".into(),
            value: Value::Bool(false),
            source: Source::Default,
        });
        resolved
    }

    #[test]
    fn test_lookup_by_name() {
        let resolved = sample();

        assert_eq!(resolved.get("PORT"), Some(&Value::Integer(8080)));
        assert_eq!(resolved.key_for("PORT"), Some("APP_PORT"));
        assert_eq!(resolved.source("DEBUG"), Some(Source::Default));
        assert_eq!(resolved["DEBUG"], Value::Bool(false));
        assert!(resolved.get("APP_PORT").is_none());
    }

    #[test]
    fn test_order_is_kept() {
        let resolved = sample();
        assert_eq!(resolved.names().collect::<Vec<_>>(), ["PORT", "DEBUG"]);

        let pairs: Vec<(String, Value)> = resolved.into_iter().collect();
        assert_eq!(pairs[0].0, "PORT");
        assert_eq!(pairs[1].0, "DEBUG");
    }

    #[test]
    fn test_take_removes_entry() {
        let mut resolved = sample();

        assert_eq!(resolved.take("PORT"), Some(Value::Integer(8080)));
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved.take("PORT"), None);
    }

    #[test]
    #[should_panic(expected = "no resolved value")]
    fn test_index_missing_panics() {
        let _ = &sample()["NOPE"];
    }
}
