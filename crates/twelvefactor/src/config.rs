//! Key resolution and schema evaluation.
//!
//! [`Config`] binds an [`Environment`] store and resolves keys against it.
//! Each key goes through the same steps:
//!
//! 1. present in the store: its string is coerced to the entry's kind
//! 2. absent, with a default: the default is used as-is (never coerced)
//! 3. absent, no default: [`Error::Missing`] naming the key
//!
//! The entry's mapper, if any, is then applied exactly once.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use twelvefactor::{Config, Entry, Kind, Schema, Value};
//!
//! let env = HashMap::from([
//!     ("A".to_string(), "3".to_string()),
//!     ("B_ALT".to_string(), "7".to_string()),
//! ]);
//! let config = Config::with_environ(env);
//!
//! let schema = Schema::new()
//!     .entry("A", Kind::Int)
//!     .entry("B", Entry::new().with_key("B_ALT").with_default(0));
//!
//! let resolved = config.evaluate(&schema).unwrap();
//! assert_eq!(resolved["A"], Value::Integer(3));
//! assert_eq!(resolved["B"], Value::String("7".into()));
//! ```

use std::fmt::{self, Debug, Formatter};
use std::sync::LazyLock;

use crate::coerce;
use crate::environ::{Environment, ProcessEnv};
use crate::error::Error;
use crate::kind::Kind;
use crate::resolved::{Resolved, ResolvedEntry};
use crate::schema::{Entry, Schema};
use crate::source::Source;
use crate::value::Value;

/// The resolution engine.
///
/// Holds a read-only store; every method takes `&self`, so a `Config` can be
/// shared across threads freely.
pub struct Config {
    environ: Box<dyn Environment>,
}

impl Config {
    /// Creates an engine over the process environment.
    ///
    /// Variables are read at each lookup, so changes made after construction
    /// are observed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_environ(ProcessEnv::new())
    }

    /// Creates an engine over the given store.
    #[must_use]
    pub fn with_environ(environ: impl Environment + 'static) -> Self {
        Self {
            environ: Box::new(environ),
        }
    }

    /// Returns the bound store.
    #[must_use]
    pub fn environ(&self) -> &dyn Environment {
        self.environ.as_ref()
    }

    /// Coerces a raw string. Same as [`coerce::parse`].
    ///
    /// # Errors
    ///
    /// See [`coerce::parse`].
    pub fn parse(&self, raw: &str, kind: &Kind, subtype: &Kind) -> Result<Value, Error> {
        coerce::parse(raw, kind, subtype)
    }

    /// Resolves `key` using the entry's default, kind, subtype and mapper.
    ///
    /// `entry.key` is ignored: `key` is the lookup key.
    ///
    /// # Errors
    ///
    /// - [`Error::Missing`] if the key is absent and the entry has no default
    /// - [`Error::Conversion`] if the stored string is rejected by the kind
    /// - [`Error::Foreign`] if a converter or the mapper fails otherwise
    /// - any error raised by the store itself
    pub fn get(&self, key: &str, entry: &Entry) -> Result<Value, Error> {
        self.resolve(key, entry).map(|(value, _)| value)
    }

    fn resolve(&self, key: &str, entry: &Entry) -> Result<(Value, Source), Error> {
        let (value, source) = match self.environ.get(key)? {
            Some(raw) => {
                let value = coerce::parse(&raw, &entry.kind, &entry.subtype)
                    .map_err(|e| e.for_key(key))?;
                (value, Source::Environment)
            }
            None => match &entry.default {
                Some(default) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(key, "key absent, using default");

                    (default.clone(), Source::Default)
                }
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(key, store = self.environ.name(), "required key missing");

                    return Err(Error::missing(key));
                }
            },
        };

        let value = match &entry.mapper {
            Some(mapper) => mapper.apply(value).map_err(Error::foreign)?,
            None => value,
        };

        Ok((value, source))
    }

    /// Resolves every entry of the schema, in order.
    ///
    /// The result is keyed by schema name, not by lookup key. Evaluation
    /// stops at the first failing entry; the schema is never modified.
    ///
    /// # Errors
    ///
    /// The first error returned by [`get`](Self::get).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip_all, fields(entries = schema.len()))
    )]
    pub fn evaluate(&self, schema: &Schema) -> Result<Resolved, Error> {
        let mut resolved = Resolved::with_capacity(schema.len());

        for (name, entry) in schema {
            let entry = entry.normalize();
            let key = entry.key.as_deref().unwrap_or(name);

            let (value, source) = self.resolve(key, &entry)?;

            #[cfg(feature = "tracing")]
            tracing::debug!(name, key, %source, kind = %entry.kind, "resolved");

            resolved.push(ResolvedEntry {
                name: name.to_string(),
                key: key.to_string(),
                value,
                source,
            });
        }

        Ok(resolved)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("environ", &self.environ.name())
            .finish()
    }
}

static CONFIG: LazyLock<Config> = LazyLock::new(Config::new);

/// Returns the process-wide engine, bound to the process environment.
///
/// ```rust
/// use twelvefactor::{Entry, Kind};
///
/// let workers = twelvefactor::config()
///     .get("TWELVEFACTOR_DOC_WORKERS", &Entry::of(Kind::Int).with_default(4))
///     .unwrap();
/// assert_eq!(workers.as_i64(), Some(4));
/// ```
pub fn config() -> &'static Config {
    &CONFIG
}
