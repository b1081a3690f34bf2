//! Process environment store.

use super::{EnvResult, Environment, priority};
use crate::Error;

/// Store reading the live process environment.
///
/// Nothing is copied: every lookup calls [`std::env::var`], so changes made
/// to the environment after construction are visible.
///
/// ```rust
/// use twelvefactor::environ::ProcessEnv;
///
/// // Without prefix
/// let env = ProcessEnv::new();
///
/// // With prefix (reads APP_DATABASE_URL for key "DATABASE_URL")
/// let env = ProcessEnv::with_prefix("APP_");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ProcessEnv {
    prefix: Option<String>,
}

impl ProcessEnv {
    /// Creates a store without a prefix.
    #[must_use]
    pub const fn new() -> Self {
        Self { prefix: None }
    }

    /// Creates a store that prepends `prefix` to every key.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// Returns the full key name with prefix applied.
    fn full_key(&self, key: &str) -> String {
        self.prefix
            .as_ref()
            .map_or_else(|| key.to_string(), |p| format!("{p}{key}"))
    }
}

impl Environment for ProcessEnv {
    fn name(&self) -> &'static str {
        "environment"
    }

    fn get(&self, key: &str) -> EnvResult {
        let full_key = self.full_key(key);

        match std::env::var(&full_key) {
            Ok(value) => Ok(Some(value)),

            Err(std::env::VarError::NotPresent) => Ok(None),

            Err(std::env::VarError::NotUnicode(_)) => Err(Error::InvalidUtf8 { key: full_key }),
        }
    }

    fn priority(&self) -> u32 {
        priority::PROCESS
    }
}
