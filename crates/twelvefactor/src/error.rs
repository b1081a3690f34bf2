//! Error types for value coercion and key resolution.
//!
//! This module contains the [`Error`] enum returned by every fallible
//! operation of the crate, and [`ConvertError`], the error type returned by
//! converters (built-in or caller-supplied).
//!
//! # Error Variants
//!
//! | Variant | When It Occurs |
//! |---------|----------------|
//! | [`Error::Missing`] | Required key absent and no default given |
//! | [`Error::Conversion`] | A converter rejected the raw string |
//! | [`Error::InvalidUtf8`] | Process variable contains non-UTF8 bytes |
//! | [`Error::Foreign`] | A converter or mapper failed for another reason |
//! | [`Error::Dotenv`] | A `.env` file could not be loaded (with `dotenv` feature) |
//!
//! # Fail-fast
//!
//! Schema evaluation stops at the first failing entry. The returned error
//! names the offending key (missing keys) or carries the converter's own
//! message (conversion failures); there is no partial result.
//!
//! ```rust,ignore
//! match config.evaluate(&schema) {
//!     Ok(resolved) => { /* use resolved */ }
//!     Err(Error::Missing { key, .. }) => eprintln!("set {key}"),
//!     Err(e) => eprintln!("{:?}", miette::Report::from(e)),
//! }
//! ```

use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error as ThisError;

/// Boxed error used by converters and mappers for failures that are not
/// value-conversion failures.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors that can occur while coercing or resolving configuration values.
///
/// Integrates with [`miette`] for rich terminal output:
///
/// ```rust,ignore
/// if let Err(e) = twelvefactor::config().evaluate(&schema) {
///     eprintln!("{:?}", miette::Report::from(e));
/// }
/// ```
///
/// # Diagnostic Codes
///
/// | Code | Meaning |
/// |------|---------|
/// | `twelvefactor::missing_var` | Required key not set |
/// | `twelvefactor::conversion` | Converter rejected the value |
/// | `twelvefactor::invalid_utf8` | Variable contains non-UTF8 bytes |
/// | `twelvefactor::foreign` | Converter or mapper failed otherwise |
/// | `twelvefactor::dotenv` | `.env` file could not be loaded |
#[derive(Debug, ThisError, Diagnostic)]
pub enum Error {
    /// A required key was absent from the environment and no default was given.
    #[error("Unknown environment variable: {key}")]
    #[diagnostic(code(twelvefactor::missing_var), severity(Error))]
    Missing {
        /// The lookup key that was not found.
        key: String,

        /// Help message naming the key.
        #[help]
        help: String,
    },

    /// A converter rejected the raw value.
    ///
    /// The message is exactly what the converter reported; the remaining
    /// fields only feed the diagnostic help text.
    #[error("{}", display_args(.args))]
    #[diagnostic(code(twelvefactor::conversion))]
    Conversion {
        /// The arguments reported by the converter, unmodified.
        args: Vec<String>,

        /// The lookup key, once the failure passed through [`Config::get`](crate::Config::get).
        key: Option<String>,

        /// The raw string that failed to convert.
        value: String,

        /// Name of the requested kind.
        expected: String,

        /// Help text built from the fields above.
        #[help]
        help: String,
    },

    /// A process environment variable holds bytes that are not valid UTF-8.
    #[error("environment variable {key} contains invalid UTF-8")]
    #[diagnostic(
        code(twelvefactor::invalid_utf8),
        help("ensure the variable contains valid UTF-8 text")
    )]
    InvalidUtf8 {
        /// The offending key (with any store prefix applied).
        key: String,
    },

    /// A converter or mapper failed with an error that is not a conversion
    /// failure. The original error is kept as [`source`](StdError::source).
    #[error("{source}")]
    #[diagnostic(code(twelvefactor::foreign))]
    Foreign {
        /// The original error.
        #[source]
        source: BoxError,
    },

    /// A `.env` file could not be read or parsed.
    #[error("failed to load {}: {source}", .path.display())]
    #[diagnostic(
        code(twelvefactor::dotenv),
        help("check that the file exists and uses KEY=VALUE lines")
    )]
    Dotenv {
        /// Path of the file.
        path: PathBuf,

        /// The underlying loader error.
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// Creates a Missing error with a standard help message.
    pub fn missing(key: impl Into<String>) -> Self {
        let key = key.into();
        let help = format!("set {key} in the environment or give the entry a default");
        Error::Missing { key, help }
    }

    /// Creates a Conversion error for a value that was rejected before any
    /// key was known.
    pub fn conversion(
        args: Vec<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        let value = value.into();
        let expected = expected.into();
        let help = conversion_help(None, &value, &expected);
        Error::Conversion {
            args,
            key: None,
            value,
            expected,
            help,
        }
    }

    /// Creates a Dotenv error for the file at `path`.
    pub fn dotenv(path: impl AsRef<Path>, source: impl Into<BoxError>) -> Self {
        Error::Dotenv {
            path: path.as_ref().to_path_buf(),
            source: source.into(),
        }
    }

    /// Wraps a non-conversion failure.
    pub fn foreign(source: impl Into<BoxError>) -> Self {
        Error::Foreign {
            source: source.into(),
        }
    }

    /// Attaches the lookup key to a Conversion error. Other variants are
    /// returned unchanged.
    #[must_use]
    pub fn for_key(self, lookup: &str) -> Self {
        match self {
            Error::Conversion {
                args,
                value,
                expected,
                ..
            } => {
                let help = conversion_help(Some(lookup), &value, &expected);
                Error::Conversion {
                    args,
                    key: Some(lookup.to_string()),
                    value,
                    expected,
                    help,
                }
            }
            other => other,
        }
    }

    /// Returns the converter arguments of a Conversion error.
    #[must_use]
    pub fn args(&self) -> Option<&[String]> {
        match self {
            Error::Conversion { args, .. } => Some(args),
            _ => None,
        }
    }

    /// Returns the key this error refers to, when known.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Error::Missing { key, .. } | Error::InvalidUtf8 { key } => Some(key),
            Error::Conversion { key, .. } => key.as_deref(),
            _ => None,
        }
    }
}

fn conversion_help(key: Option<&str>, value: &str, expected: &str) -> String {
    match key {
        Some(key) => format!("{key} must be a valid {expected}, got {value:?}"),
        None => format!("expected a valid {expected}, got {value:?}"),
    }
}

/// Renders converter arguments: nothing, the single argument, or a
/// parenthesised list.
fn display_args(args: &[String]) -> String {
    match args {
        [] => String::new(),
        [single] => single.clone(),
        many => format!("({})", many.join(", ")),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Converter errors
// ─────────────────────────────────────────────────────────────────────────────

/// Error returned by a converter.
///
/// Only [`ConvertError::Invalid`] is treated as a conversion failure and
/// relayed as [`Error::Conversion`] with the same arguments. Anything in
/// [`ConvertError::Other`] is propagated as [`Error::Foreign`] untouched.
#[derive(Debug)]
pub enum ConvertError {
    /// The raw value is not acceptable for this converter.
    Invalid {
        /// Reasons reported by the converter.
        args: Vec<String>,
    },

    /// The converter failed for a reason unrelated to the value's format.
    Other(BoxError),
}

impl ConvertError {
    /// Creates an Invalid error with a single message.
    pub fn invalid(message: impl Display) -> Self {
        ConvertError::Invalid {
            args: vec![message.to_string()],
        }
    }

    /// Creates an Invalid error with several arguments.
    pub fn with_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ConvertError::Invalid {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates an Other error.
    pub fn other(source: impl Into<BoxError>) -> Self {
        ConvertError::Other(source.into())
    }

    /// Turns this converter error into the crate error for `value`.
    pub(crate) fn into_error(self, value: &str, expected: &str) -> Error {
        match self {
            ConvertError::Invalid { args } => Error::conversion(args, value, expected),
            ConvertError::Other(source) => Error::Foreign { source },
        }
    }
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Invalid { args } => f.write_str(&display_args(args)),
            ConvertError::Other(source) => write!(f, "{source}"),
        }
    }
}

impl StdError for ConvertError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConvertError::Invalid { .. } => None,
            ConvertError::Other(source) => Some(source.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_missing() {
        let err = Error::missing("DATABASE_URL");
        assert_eq!(err.to_string(), "Unknown environment variable: DATABASE_URL");
        assert_eq!(err.key(), Some("DATABASE_URL"));
    }

    #[test]
    fn test_conversion_display_single_arg() {
        let err = Error::conversion(vec!["bad port".into()], "abc", "int");
        assert_eq!(err.to_string(), "bad port");
    }

    #[test]
    fn test_conversion_display_arg_counts() {
        let none = Error::conversion(vec![], "x", "int");
        assert_eq!(none.to_string(), "");

        let many = Error::conversion(vec!["a".into(), "b".into()], "x", "int");
        assert_eq!(many.to_string(), "(a, b)");
        assert_eq!(many.args(), Some(&["a".to_string(), "b".to_string()][..]));
    }

    #[test]
    fn test_for_key_keeps_message() {
        let err = Error::conversion(vec!["nope".into()], "abc", "int").for_key("PORT");
        assert_eq!(err.to_string(), "nope");
        assert_eq!(err.key(), Some("PORT"));

        if let Error::Conversion { help, .. } = &err {
            assert!(help.contains("PORT"));
            assert!(help.contains("abc"));
        } else {
            panic!("Expected Conversion variant");
        }
    }

    #[test]
    fn test_for_key_leaves_other_variants() {
        let err = Error::missing("A").for_key("B");
        assert_eq!(err.key(), Some("A"));
    }

    #[test]
    fn test_convert_error_other_becomes_foreign() {
        let err = ConvertError::other(std::io::Error::other("disk on fire")).into_error("v", "custom");

        match &err {
            Error::Foreign { source } => {
                assert!(source.downcast_ref::<std::io::Error>().is_some());
            }
            _ => panic!("Expected Foreign variant"),
        }
        assert_eq!(err.to_string(), "disk on fire");
    }

    #[test]
    fn test_convert_error_invalid_keeps_args() {
        let err = ConvertError::with_args(["first", "second"]).into_error("v", "custom");
        assert_eq!(
            err.args(),
            Some(&["first".to_string(), "second".to_string()][..])
        );
    }
}
