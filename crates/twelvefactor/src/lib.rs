//! # twelvefactor
//!
//! Typed configuration from environment variables, the twelve-factor way.
//!
//! `twelvefactor` reads string values from an environment store, coerces them
//! into typed [`Value`]s and evaluates declarative schemas into a name to
//! value mapping. Nothing is generated at compile time: a schema is plain data
//! built at runtime, so it can be assembled, shared and inspected freely.
//!
//! ## Features
//!
//! - **Coercion** - strings become booleans, integers, floats, complex numbers,
//!   comma-separated containers, or anything a caller-supplied converter builds
//! - **Defaults** - used as-is, never coerced; a null default is not "no default"
//! - **Key aliasing** - a schema name can read a differently-named variable
//! - **Mappers** - post-process a resolved value (e.g. a URL into a struct)
//! - **Pluggable stores** - process environment, maps, `.env` files, layers
//! - **Source attribution** - every resolved value knows where it came from
//! - **Rich diagnostics** - errors render through [`miette`]
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use twelvefactor::{Config, Entry, Kind, Schema, Value};
//!
//! let env = HashMap::from([
//!     ("DEBUG".to_string(), "yes".to_string()),
//!     ("ALLOWED_HOSTS".to_string(), "example.com, api.example.com".to_string()),
//! ]);
//!
//! let schema = Schema::new()
//!     .entry("DEBUG", Entry::of(Kind::Bool).with_default(false))
//!     .entry("ALLOWED_HOSTS", Entry::of(Kind::List).with_default(Vec::<Value>::new()))
//!     .entry("PORT", Entry::of(Kind::Int).with_default(8000));
//!
//! let resolved = Config::with_environ(env).evaluate(&schema).unwrap();
//!
//! assert_eq!(resolved["DEBUG"], Value::Bool(true));
//! assert_eq!(resolved["ALLOWED_HOSTS"].as_items().map(<[_]>::len), Some(2));
//! assert_eq!(resolved["PORT"], Value::Integer(8000));
//! ```
//!
//! ## Kinds
//!
//! | Kind | Raw | Result |
//! |------|-----|--------|
//! | `String` | `abc` | `"abc"` (unchanged) |
//! | `Bool` | `t`, `true`, `on`, `ok`, `y`, `yes`, `1` (any case) | `true`; anything else `false` |
//! | `Int` | `42` | `42` |
//! | `Float` | `1.5e3` | `1500.0` |
//! | `Complex` | `1+2j` | `(1+2j)` |
//! | `List` / `Tuple` | `a, b ,c` | ordered elements of the subtype |
//! | `Set` / `FrozenSet` | `a,b,a` | deduplicated elements of the subtype |
//! | `Custom` | anything | whatever the converter returns |
//!
//! Container elements are split on commas and trimmed; there is no escaping
//! for commas inside an element.
//!
//! ## Feature Flags
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `dotenv` | [`environ::DotenvEnv`] store via [`dotenvy`] | **Yes** |
//! | `tracing` | Debug/trace events via [`tracing`] | **Yes** |
//! | `serde` | `Serialize` for [`Value`]/[`Resolved`], [`Kind::json`] | No |
//! | `full` | Enable all features | No |
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`Error`], which integrates with
//! [`miette`] for rich terminal diagnostics:
//!
//! ```rust,ignore
//! fn main() -> twelvefactor::Result<()> {
//!     let resolved = twelvefactor::config().evaluate(&schema)?;
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

// ============================================================================
// Re-exported Dependencies
// ============================================================================

/// Re-export miette for error handling.
/// Users can use `twelvefactor::miette` instead of adding miette as a dependency.
pub use miette;

/// Re-export `num_complex` for building complex values.
pub use num_complex;

/// Re-export dotenvy when the dotenv feature is enabled.
#[cfg(feature = "dotenv")]
pub use dotenvy;

/// Re-export `serde_json` when the serde feature is enabled.
#[cfg(feature = "serde")]
pub use serde_json;

// ============================================================================
// Core Modules
// ============================================================================

mod error;
pub use error::{BoxError, ConvertError, Error};

/// A Result type that displays errors with miette's fancy formatting.
///
/// Use this as your main function return type for pretty error output:
///
/// ```rust,ignore
/// fn main() -> twelvefactor::Result<()> {
///     let resolved = twelvefactor::config().evaluate(&schema)?;
///     Ok(())
/// }
/// ```
pub type Result<T> = miette::Result<T>;

pub mod coerce;
pub mod environ;

mod config;
mod kind;
mod resolved;
mod schema;
mod source;
mod value;

pub use coerce::TRUE_STRINGS;
pub use config::{Config, config};
pub use kind::{Converter, Kind};
pub use resolved::{Resolved, ResolvedEntry};
pub use schema::{Entry, Mapper, Schema, SchemaEntry};
pub use source::Source;
pub use value::{Opaque, Value};
