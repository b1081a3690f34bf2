//! Dynamically typed configuration values.
//!
//! A [`Value`] is what the coercer produces from a raw environment string,
//! and what defaults and mappers deal in. The variant tells which kind was
//! requested:
//!
//! ```rust
//! use twelvefactor::{Kind, Value, coerce};
//!
//! let port = coerce::parse("8080", &Kind::Int, &Kind::String).unwrap();
//! assert_eq!(port, Value::Integer(8080));
//! assert_eq!(port.cast::<u16>(), Some(8080));
//! ```

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

use num_complex::Complex64;
use num_traits::ToPrimitive;

// ============================================================================
// Macros for reducing boilerplate
// ============================================================================

/// Generates `From<T>` implementations for Value
macro_rules! impl_from_integer {
    ($($t:ty),+ $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Integer(i64::from(n))
                }
            }
        )+
    };
}

/// Generates `to_*` methods that use ToPrimitive
macro_rules! impl_to_primitive {
    ($($method:ident -> $t:ty),+ $(,)?) => {
        $(
            #[doc = concat!("Converts to `", stringify!($t), "` if possible.")]
            #[must_use]
            pub fn $method(&self) -> Option<$t> {
                match self {
                    Value::Integer(n) => n.$method(),

                    Value::Float(f) => f.$method(),

                    Value::Bool(b) => Some(if *b { 1 as $t } else { 0 as $t }),

                    _ => None,
                }
            }
        )+
    };
}

// ============================================================================
// Value Enum
// ============================================================================

/// A configuration value of any supported shape.
///
/// | Variant | Produced by |
/// |---------|-------------|
/// | `String` | [`Kind::String`](crate::Kind::String) |
/// | `Bool` | [`Kind::Bool`](crate::Kind::Bool) |
/// | `Integer` | [`Kind::Int`](crate::Kind::Int) |
/// | `Float` | [`Kind::Float`](crate::Kind::Float) |
/// | `Complex` | [`Kind::Complex`](crate::Kind::Complex) |
/// | `List` / `Tuple` | ordered containers, split order kept |
/// | `Set` / `FrozenSet` | deduplicated containers, order-insensitive equality |
/// | `Map` | JSON objects, mapper output |
/// | `Custom` | arbitrary values from converters and mappers |
/// | `None` | explicit null defaults |
#[derive(Clone, Debug)]
pub enum Value {
    /// Explicit absence of a value (a null default).
    None,

    /// A string value.
    String(String),

    /// A boolean value.
    Bool(bool),

    /// A signed integer.
    Integer(i64),

    /// A floating-point value.
    Float(f64),

    /// A complex number.
    Complex(Complex64),

    /// An ordered, growable sequence.
    List(Vec<Value>),

    /// An ordered, fixed-size sequence.
    Tuple(Vec<Value>),

    /// An unordered collection without duplicates.
    Set(Vec<Value>),

    /// An immutable unordered collection without duplicates.
    FrozenSet(Vec<Value>),

    /// A map of string keys to values.
    Map(HashMap<String, Value>),

    /// A value of a caller-defined type.
    Custom(Opaque),
}

impl Value {
    /// Creates a [`Value::Custom`] holding `value`.
    pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
        Value::Custom(Opaque::new(value))
    }

    /// Creates a [`Value::Set`], dropping duplicates (first occurrence wins).
    #[must_use]
    pub fn set(items: Vec<Value>) -> Self {
        Value::Set(dedup(items))
    }

    /// Creates a [`Value::FrozenSet`], dropping duplicates (first occurrence wins).
    #[must_use]
    pub fn frozen_set(items: Vec<Value>) -> Self {
        Value::FrozenSet(dedup(items))
    }

    /// Returns a short name of the variant.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::String(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Complex(_) => "complex",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Set(_) => "set",
            Value::FrozenSet(_) => "frozenset",
            Value::Map(_) => "map",
            Value::Custom(_) => "custom",
        }
    }

    /// Returns `true` for [`Value::None`].
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns the string slice of a `String` value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean of a `Bool` value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer of an `Integer` value.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float of a `Float` value.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the complex number of a `Complex` value.
    #[must_use]
    pub const fn as_complex(&self) -> Option<Complex64> {
        match self {
            Value::Complex(c) => Some(*c),
            _ => None,
        }
    }

    /// Returns the elements of any container variant.
    #[must_use]
    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) | Value::Set(items) | Value::FrozenSet(items) => {
                Some(items)
            }
            _ => None,
        }
    }

    /// Returns the entries of a `Map` value.
    #[must_use]
    pub const fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrows the payload of a `Custom` value as `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Custom(opaque) => opaque.downcast_ref(),
            _ => None,
        }
    }

    impl_to_primitive! {
        to_i8 -> i8,
        to_i16 -> i16,
        to_i32 -> i32,
        to_i64 -> i64,
        to_isize -> isize,
        to_u8 -> u8,
        to_u16 -> u16,
        to_u32 -> u32,
        to_u64 -> u64,
        to_usize -> usize,
        to_f32 -> f32,
        to_f64 -> f64,
    }

    /// Casts a numeric value to any [`NumCast`](num_traits::NumCast) type,
    /// checking range.
    #[must_use]
    pub fn cast<T: num_traits::NumCast>(&self) -> Option<T> {
        match self {
            Value::Integer(n) => <T as num_traits::NumCast>::from(*n),
            Value::Float(f) => <T as num_traits::NumCast>::from(*f),
            Value::Bool(b) => <T as num_traits::NumCast>::from(u8::from(*b)),
            _ => None,
        }
    }

    /// Converts into a string: `String` values are returned as-is, anything
    /// else through [`Display`].
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Value::String(s) => s,
            other => other.to_string(),
        }
    }
}

/// Hashable stand-in for the scalar variants coercion produces most.
#[derive(Hash, PartialEq, Eq)]
enum ScalarKey {
    String(String),
    Integer(i64),
    Bool(bool),
}

impl ScalarKey {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(ScalarKey::String(s.clone())),
            Value::Integer(n) => Some(ScalarKey::Integer(*n)),
            Value::Bool(b) => Some(ScalarKey::Bool(*b)),
            _ => None,
        }
    }
}

/// Drops duplicates, keeping first occurrences in order.
///
/// Strings, integers and booleans are tracked in a hash set. Other variants
/// (floats, complex numbers, nested containers) have no total hash and fall
/// back to a linear scan, so only they cost quadratic time.
fn dedup(items: Vec<Value>) -> Vec<Value> {
    let mut seen = HashSet::new();
    let mut unique: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        let fresh = match ScalarKey::of(&item) {
            Some(key) => seen.insert(key),
            None => !unique.contains(&item),
        };
        if fresh {
            unique.push(item);
        }
    }
    unique
}

/// Renders a float the way [`Kind::Float`](crate::Kind::Float) reads it back.
fn float_text(x: f64) -> String {
    if x.is_nan() {
        "nan".to_string()
    } else {
        x.to_string()
    }
}

/// Order-insensitive comparison of two deduplicated element lists.
fn same_members(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && a.iter().all(|item| b.contains(item))
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Complex(a), Value::Complex(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Set(a), Value::Set(b)) | (Value::FrozenSet(a), Value::FrozenSet(b)) => {
                same_members(a, b)
            }
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Custom(a), Value::Custom(b)) => a == b,
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fn items(f: &mut Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
            f.write_str(open)?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{item}")?;
            }
            f.write_str(close)
        }

        match self {
            Value::None => f.write_str("none"),
            Value::String(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Complex(c) => {
                // `{:+}` prints no sign for NaN.
                let sign = if c.im.is_sign_negative() && !c.im.is_nan() { '-' } else { '+' };
                write!(f, "({}{sign}{}j)", float_text(c.re), float_text(c.im.abs()))
            }
            Value::List(v) => items(f, "[", v, "]"),
            Value::Tuple(v) => items(f, "(", v, ")"),
            Value::Set(v) | Value::FrozenSet(v) => items(f, "{", v, "}"),
            Value::Map(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                f.write_str("{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {}", map[key])?;
                }
                f.write_str("}")
            }
            Value::Custom(opaque) => write!(f, "<{}>", opaque.type_name()),
        }
    }
}

// ============================================================================
// Opaque payloads
// ============================================================================

/// A shared, type-erased payload of a [`Value::Custom`].
///
/// Equality is identity: two `Opaque`s are equal only when they are clones
/// of the same original.
#[derive(Clone)]
pub struct Opaque {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Opaque {
    /// Wraps `value`.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Borrows the payload as `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    /// Name of the wrapped type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Debug for Opaque {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Opaque").field(&self.type_name).finish()
    }
}

// ============================================================================
// From implementations
// ============================================================================

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Complex64> for Value {
    fn from(c: Complex64) -> Self {
        Value::Complex(c)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::None, Into::into)
    }
}

impl<T: Into<Value>> From<HashMap<String, T>> for Value {
    fn from(map: HashMap<String, T>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::None,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => n
                .as_i64()
                .map_or_else(|| Value::Float(n.as_f64().unwrap_or(f64::NAN)), Value::Integer),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => Value::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{Error as _, SerializeMap, SerializeSeq};

        match self {
            Value::None => serializer.serialize_none(),
            Value::String(s) => serializer.serialize_str(s),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Complex(c) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(&c.re)?;
                seq.serialize_element(&c.im)?;
                seq.end()
            }
            Value::List(items) | Value::Tuple(items) | Value::Set(items) | Value::FrozenSet(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
            Value::Custom(opaque) => Err(S::Error::custom(format!(
                "cannot serialize custom value of type {}",
                opaque.type_name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_dedups_keeping_first() {
        let set = Value::set(vec![1.into(), 2.into(), 1.into()]);
        assert_eq!(set.as_items(), Some(&[Value::Integer(1), Value::Integer(2)][..]));
    }

    #[test]
    fn test_set_equality_ignores_order() {
        let a = Value::set(vec!["x".into(), "y".into()]);
        let b = Value::set(vec!["y".into(), "x".into()]);
        assert_eq!(a, b);

        let list_a = Value::List(vec!["x".into(), "y".into()]);
        let list_b = Value::List(vec!["y".into(), "x".into()]);
        assert_ne!(list_a, list_b);
    }

    #[test]
    fn test_containers_of_different_kind_differ() {
        let items = vec![Value::Integer(1)];
        assert_ne!(Value::List(items.clone()), Value::Tuple(items.clone()));
        assert_ne!(Value::set(items.clone()), Value::frozen_set(items));
    }

    #[test]
    fn test_custom_equality_is_identity() {
        let a = Value::custom(String::from("payload"));
        let b = a.clone();
        let c = Value::custom(String::from("payload"));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.downcast_ref::<String>().map(String::as_str), Some("payload"));
        assert!(a.downcast_ref::<u32>().is_none());
    }

    #[test]
    fn test_numeric_conversions() {
        let value = Value::Integer(300);
        assert_eq!(value.to_u16(), Some(300));
        assert_eq!(value.to_u8(), None);
        assert_eq!(value.cast::<i32>(), Some(300));
        assert_eq!(Value::Bool(true).to_i64(), Some(1));
        assert_eq!(Value::from("7").to_i64(), None);
    }

    #[test]
    fn test_option_into_value() {
        assert_eq!(Value::from(None::<i32>), Value::None);
        assert_eq!(Value::from(Some(3)), Value::Integer(3));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(vec![1, 2]).to_string(), "[1, 2]");
        assert_eq!(Value::Tuple(vec![true.into()]).to_string(), "(true)");
        assert_eq!(Value::Complex(Complex64::new(1.0, -2.0)).to_string(), "(1-2j)");
        assert_eq!(Value::from("plain").into_string(), "plain");
    }

    #[test]
    fn test_cast_bool_and_float() {
        assert_eq!(Value::Bool(true).cast::<u8>(), Some(1));
        assert_eq!(Value::Float(2.0).cast::<i16>(), Some(2));
        assert_eq!(Value::Float(1e10).cast::<i16>(), None);
        assert_eq!(Value::from(7u8), Value::Integer(7));
        assert_eq!(Value::from(1.5f32), Value::Float(1.5));
    }

    #[test]
    fn test_complex_display_signs() {
        let c = |re, im| Value::Complex(Complex64::new(re, im)).to_string();

        assert_eq!(c(f64::INFINITY, f64::NAN), "(inf+nanj)");
        assert_eq!(c(-0.0, -0.0), "(-0-0j)");
        assert_eq!(c(1.5, f64::NEG_INFINITY), "(1.5-infj)");
    }

    #[test]
    fn test_set_dedup_large_input() {
        let items: Vec<Value> = (0..60_000).map(|i| Value::Integer(i % 20_000)).collect();
        let set = Value::set(items);

        let unique = set.as_items().unwrap();
        assert_eq!(unique.len(), 20_000);
        assert_eq!(unique[0], Value::Integer(0));
        assert_eq!(unique[19_999], Value::Integer(19_999));
    }

    #[test]
    fn test_set_dedup_mixed_variants() {
        let set = Value::set(vec![
            "1".into(),
            1.into(),
            1.0.into(),
            "1".into(),
            1.0.into(),
            true.into(),
        ]);
        assert_eq!(set.as_items().map(<[_]>::len), Some(4));
    }

    #[test]
    fn test_nan_is_not_equal_to_itself() {
        assert_ne!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    }
}
