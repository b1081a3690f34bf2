//! Target kinds for coercion.
//!
//! A [`Kind`] names the shape a raw environment string should be turned
//! into. Built-in kinds cover strings, booleans, numbers and the four
//! container shapes; [`Kind::Custom`] plugs in any [`Converter`].

use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

use crate::error::ConvertError;
use crate::value::Value;

type ConvertFn = dyn Fn(&str) -> Result<Value, ConvertError> + Send + Sync;

/// The requested target shape of a coercion.
///
/// `String` is the default. Container kinds (`List`, `Tuple`, `Set`,
/// `FrozenSet`) split the raw value on commas and coerce every element
/// with the entry's subtype.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Kind {
    /// Keep the raw string.
    #[default]
    String,

    /// Truthy-token boolean.
    Bool,

    /// Signed 64-bit integer.
    Int,

    /// 64-bit float.
    Float,

    /// Complex number, written `a+bj`.
    Complex,

    /// Ordered sequence.
    List,

    /// Fixed-size ordered sequence.
    Tuple,

    /// Deduplicated unordered collection.
    Set,

    /// Deduplicated immutable unordered collection.
    FrozenSet,

    /// A caller-supplied converter.
    Custom(Converter),
}

impl Kind {
    /// Wraps a closure as a custom kind.
    ///
    /// ```rust
    /// use twelvefactor::{ConvertError, Kind, Value};
    ///
    /// let upper = Kind::custom("upper", |raw| Ok(Value::from(raw.to_uppercase())));
    /// let even = Kind::custom("even", |raw| {
    ///     let n: i64 = raw.parse().map_err(ConvertError::invalid)?;
    ///     if n % 2 == 0 { Ok(n.into()) } else { Err(ConvertError::invalid("odd number")) }
    /// });
    /// ```
    pub fn custom<F>(name: impl Into<String>, convert: F) -> Self
    where
        F: Fn(&str) -> Result<Value, ConvertError> + Send + Sync + 'static,
    {
        Kind::Custom(Converter::new(name, convert))
    }

    /// A custom kind parsing with `T`'s [`FromStr`] implementation.
    ///
    /// Parse failures become conversion errors carrying `T::Err`'s message.
    ///
    /// ```rust
    /// use twelvefactor::{Kind, Value, coerce};
    ///
    /// let port = coerce::parse("8080", &Kind::parsed::<u16>(), &Kind::String).unwrap();
    /// assert_eq!(port, Value::Integer(8080));
    /// assert!(coerce::parse("70000", &Kind::parsed::<u16>(), &Kind::String).is_err());
    /// ```
    #[must_use]
    pub fn parsed<T>() -> Self
    where
        T: FromStr + Into<Value> + 'static,
        T::Err: Display,
    {
        Kind::custom(std::any::type_name::<T>(), |raw| {
            raw.parse::<T>().map(Into::into).map_err(ConvertError::invalid)
        })
    }

    /// A custom kind parsing JSON documents into [`Value`]s.
    #[cfg(feature = "serde")]
    #[must_use]
    pub fn json() -> Self {
        Kind::custom("json", |raw| {
            serde_json::from_str::<serde_json::Value>(raw)
                .map(Value::from)
                .map_err(ConvertError::invalid)
        })
    }

    /// Returns `true` for the comma-separated container kinds.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Kind::List | Kind::Tuple | Kind::Set | Kind::FrozenSet)
    }

    /// Name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Kind::String => "string",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Complex => "complex",
            Kind::List => "list",
            Kind::Tuple => "tuple",
            Kind::Set => "set",
            Kind::FrozenSet => "frozenset",
            Kind::Custom(converter) => converter.name(),
        }
    }

    /// Builds the container value of this kind from coerced elements.
    ///
    /// Non-container kinds yield a list.
    pub(crate) fn collect(&self, items: Vec<Value>) -> Value {
        match self {
            Kind::Tuple => Value::Tuple(items),
            Kind::Set => Value::set(items),
            Kind::FrozenSet => Value::frozen_set(items),
            _ => Value::List(items),
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Converter
// ============================================================================

/// A named function from a raw string to a [`Value`].
///
/// Cloning shares the function. Two converters are equal only when they
/// are clones of one another.
#[derive(Clone)]
pub struct Converter {
    name: Arc<str>,
    convert: Arc<ConvertFn>,
}

impl Converter {
    /// Creates a converter.
    pub fn new<F>(name: impl Into<String>, convert: F) -> Self
    where
        F: Fn(&str) -> Result<Value, ConvertError> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            convert: Arc::new(convert),
        }
    }

    /// The converter's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the converter on `raw`.
    ///
    /// # Errors
    ///
    /// Returns whatever the wrapped function returns.
    pub fn convert(&self, raw: &str) -> Result<Value, ConvertError> {
        (self.convert)(raw)
    }
}

impl PartialEq for Converter {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.convert, &other.convert)
    }
}

impl Debug for Converter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter").field("name", &self.name).finish_non_exhaustive()
    }
}

impl From<Converter> for Kind {
    fn from(converter: Converter) -> Self {
        Kind::Custom(converter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_kind_is_string() {
        assert_eq!(Kind::default(), Kind::String);
    }

    #[test]
    fn test_container_kinds() {
        for kind in [Kind::List, Kind::Tuple, Kind::Set, Kind::FrozenSet] {
            assert!(kind.is_container(), "{kind} should be a container");
        }
        for kind in [Kind::String, Kind::Bool, Kind::Int, Kind::Float, Kind::Complex] {
            assert!(!kind.is_container(), "{kind} should not be a container");
        }
    }

    #[test]
    fn test_converter_identity() {
        let a = Kind::custom("id", |raw| Ok(raw.into()));
        let b = a.clone();
        let c = Kind::custom("id", |raw| Ok(raw.into()));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.name(), "id");
    }

    #[test]
    fn test_parsed_reports_type_name() {
        let kind = Kind::parsed::<u8>();
        assert_eq!(kind.name(), "u8");

        let Kind::Custom(converter) = kind else {
            panic!("Expected custom kind");
        };
        assert_eq!(converter.convert("12").unwrap(), Value::Integer(12));
        assert!(matches!(
            converter.convert("300"),
            Err(ConvertError::Invalid { .. })
        ));
    }
}
