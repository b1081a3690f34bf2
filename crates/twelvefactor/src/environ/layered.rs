//! Stores consulted in priority order.

use std::fmt::{self, Debug, Formatter};

use super::{EnvResult, Environment, ProcessEnv};

/// Chains several stores: the first one holding a key wins.
///
/// Stores are consulted by ascending [`priority`](Environment::priority);
/// stores of equal priority keep their insertion order. An error from any
/// store ends the lookup.
///
/// ```rust,ignore
/// use twelvefactor::environ::{DotenvEnv, Layered};
///
/// // Process variables override the .env file.
/// let env = Layered::new()
///     .with_process()
///     .with(DotenvEnv::new()?);
/// ```
#[derive(Default)]
pub struct Layered {
    stores: Vec<Box<dyn Environment>>,
}

impl Layered {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self { stores: Vec::new() }
    }

    /// Adds a store, keeping the chain sorted by priority.
    #[must_use]
    pub fn with(mut self, store: impl Environment + 'static) -> Self {
        self.stores.push(Box::new(store));
        // Stable sort: ties keep insertion order.
        self.stores.sort_by_key(|s| s.priority());
        self
    }

    /// Adds the process environment.
    #[must_use]
    pub fn with_process(self) -> Self {
        self.with(ProcessEnv::new())
    }

    /// Number of stores in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Returns `true` when no store has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Names of the stores, in lookup order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stores.iter().map(|s| s.name())
    }
}

impl Environment for Layered {
    fn name(&self) -> &'static str {
        "layered"
    }

    fn get(&self, key: &str) -> EnvResult {
        for store in &self.stores {
            if let Some(value) = store.get(key)? {
                #[cfg(feature = "tracing")]
                tracing::trace!(key, store = store.name(), "key found in layered store");

                return Ok(Some(value));
            }
        }

        Ok(None)
    }

    fn priority(&self) -> u32 {
        self.stores
            .first()
            .map_or(super::priority::CUSTOM, |s| s.priority())
    }
}

impl Debug for Layered {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layered")
            .field("stores", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::collections::{BTreeMap, HashMap};

    struct Prioritised {
        values: HashMap<String, String>,
        priority: u32,
    }

    impl Prioritised {
        fn new(priority: u32, pairs: &[(&str, &str)]) -> Self {
            Self {
                values: pairs
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect(),
                priority,
            }
        }
    }

    impl Environment for Prioritised {
        fn name(&self) -> &'static str {
            "prioritised"
        }

        fn get(&self, key: &str) -> EnvResult {
            Ok(self.values.get(key).cloned())
        }

        fn priority(&self) -> u32 {
            self.priority
        }
    }

    struct Broken;

    impl Environment for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn get(&self, key: &str) -> EnvResult {
            Err(Error::InvalidUtf8 { key: key.to_string() })
        }

        fn priority(&self) -> u32 {
            0
        }
    }

    #[test]
    fn test_lower_priority_number_wins() {
        let env = Layered::new()
            .with(Prioritised::new(50, &[("PORT", "5000")]))
            .with(Prioritised::new(10, &[("PORT", "1000")]));

        assert_eq!(env.get("PORT").unwrap().as_deref(), Some("1000"));
    }

    #[test]
    fn test_falls_through_to_later_stores() {
        let env = Layered::new()
            .with(Prioritised::new(10, &[("A", "first")]))
            .with(Prioritised::new(20, &[("B", "second")]));

        assert_eq!(env.get("B").unwrap().as_deref(), Some("second"));
        assert_eq!(env.get("C").unwrap(), None);
    }

    #[test]
    fn test_equal_priority_keeps_insertion_order() {
        let first: BTreeMap<String, String> = [("K".to_string(), "one".to_string())].into();
        let second: BTreeMap<String, String> = [("K".to_string(), "two".to_string())].into();

        let env = Layered::new().with(first).with(second);
        assert_eq!(env.get("K").unwrap().as_deref(), Some("one"));
    }

    #[test]
    fn test_store_error_ends_lookup() {
        let env = Layered::new()
            .with(Prioritised::new(10, &[("K", "v")]))
            .with(Broken);

        assert!(matches!(env.get("K"), Err(Error::InvalidUtf8 { .. })));
    }

    #[test]
    fn test_names_in_lookup_order() {
        let env = Layered::new()
            .with(HashMap::<String, String>::new())
            .with_process();

        assert_eq!(env.names().collect::<Vec<_>>(), ["environment", "map"]);
        assert_eq!(env.len(), 2);
    }
}
