//! Environment stores: where raw values are looked up.
//!
//! The [`Environment`] trait is the only thing the engine needs from the
//! outside world: a read-only map from keys to strings.
//!
//! # Built-in Stores
//!
//! - [`ProcessEnv`] - the live process environment, read at every lookup
//! - `HashMap<String, String>` / `BTreeMap<String, String>` - fixed snapshots
//! - [`DotenvEnv`] - a parsed `.env` file (with `dotenv` feature)
//! - [`Layered`] - several stores consulted in priority order
//!
//! # Custom Stores
//!
//! ```rust
//! use twelvefactor::environ::{Environment, EnvResult};
//!
//! struct Fixed;
//!
//! impl Environment for Fixed {
//!     fn name(&self) -> &str { "fixed" }
//!
//!     fn get(&self, key: &str) -> EnvResult {
//!         Ok((key == "PORT").then(|| "8080".to_string()))
//!     }
//! }
//! ```

#[cfg(feature = "dotenv")]
mod dotenv;
mod layered;
mod process;

#[cfg(feature = "dotenv")]
pub use self::dotenv::DotenvEnv;
pub use layered::Layered;
pub use process::ProcessEnv;

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::Error;

/// Centralized store priority constants.
///
/// Lower values are consulted first by [`Layered`].
///
/// ```text
/// Process (20) > Dotenv (30) > Custom (100)
/// ```
pub mod priority {
    /// The live process environment.
    pub const PROCESS: u32 = 20;

    /// Dotenv files.
    pub const DOTENV: u32 = 30;

    /// Default priority for custom stores and in-memory maps.
    pub const CUSTOM: u32 = 100;
}

/// Result of a store lookup.
///
/// - `Ok(Some(value))` - key found
/// - `Ok(None)` - key not present in this store
/// - `Err(e)` - the store could not answer
pub type EnvResult = Result<Option<String>, Error>;

/// A read-only key/value string store.
///
/// Lookups must not mutate the store; the engine may call `get` for the
/// same key any number of times and from several threads.
pub trait Environment: Send + Sync {
    /// Returns the store's name for diagnostics.
    fn name(&self) -> &str;

    /// Looks up a single key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store holds a value it cannot present as a
    /// string.
    fn get(&self, key: &str) -> EnvResult;

    /// Returns `true` when the key is present.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    fn contains(&self, key: &str) -> Result<bool, Error> {
        self.get(key).map(|value| value.is_some())
    }

    /// Returns the priority of this store (lower = consulted first).
    ///
    /// See the [`priority`] module for the standard constants.
    fn priority(&self) -> u32 {
        priority::CUSTOM
    }
}

impl<S: BuildHasher + Send + Sync> Environment for HashMap<String, String, S> {
    fn name(&self) -> &'static str {
        "map"
    }

    fn get(&self, key: &str) -> EnvResult {
        Ok(HashMap::get(self, key).cloned())
    }
}

impl Environment for BTreeMap<String, String> {
    fn name(&self) -> &'static str {
        "map"
    }

    fn get(&self, key: &str) -> EnvResult {
        Ok(BTreeMap::get(self, key).cloned())
    }
}

impl<E: Environment + ?Sized> Environment for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> EnvResult {
        (**self).get(key)
    }

    fn priority(&self) -> u32 {
        (**self).priority()
    }
}
