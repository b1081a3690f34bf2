//! Coercion of raw environment strings into [`Value`]s.
//!
//! | Kind | Rule |
//! |------|------|
//! | `String` | the raw string, unchanged |
//! | `Bool` | `true` iff the lowercased string is one of [`TRUE_STRINGS`] |
//! | containers | split on `,`, trim, drop empty segments, coerce each with the subtype |
//! | everything else | run the converter; `Invalid` failures become [`Error::Conversion`] |
//!
//! Container elements cannot contain commas: there is no escaping.

use num_complex::Complex64;

use crate::error::{ConvertError, Error};
use crate::kind::Kind;
use crate::value::Value;

/// Tokens read as `true` by [`Kind::Bool`], compared case-insensitively.
pub const TRUE_STRINGS: [&str; 7] = ["t", "true", "on", "ok", "y", "yes", "1"];

/// Coerces `raw` into `kind`.
///
/// `subtype` is only consulted for container kinds, where it is the kind
/// of every element.
///
/// # Errors
///
/// Returns [`Error::Conversion`] when a converter rejects the value (the
/// converter's arguments are kept verbatim) and [`Error::Foreign`] when a
/// custom converter fails for any other reason.
pub fn parse(raw: &str, kind: &Kind, subtype: &Kind) -> Result<Value, Error> {
    #[cfg(feature = "tracing")]
    tracing::trace!(kind = %kind, subtype = %subtype, "coercing raw value");

    match kind {
        Kind::String => Ok(Value::String(raw.to_string())),

        Kind::Bool => Ok(Value::Bool(parse_bool(raw))),

        Kind::List | Kind::Tuple | Kind::Set | Kind::FrozenSet => {
            let items = split_items(raw)
                .map(|item| parse(item, subtype, &Kind::String))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(kind.collect(items))
        }

        Kind::Int => parse_int(raw).map_err(|e| e.into_error(raw, kind.name())),

        Kind::Float => parse_float(raw).map_err(|e| e.into_error(raw, kind.name())),

        Kind::Complex => parse_complex(raw).map_err(|e| e.into_error(raw, kind.name())),

        Kind::Custom(converter) => converter
            .convert(raw)
            .map_err(|e| e.into_error(raw, converter.name())),
    }
}

/// Reads a truthy token. Never fails: anything unrecognised is `false`.
#[must_use]
pub fn parse_bool(raw: &str) -> bool {
    let lowered = raw.to_lowercase();
    TRUE_STRINGS.contains(&lowered.as_str())
}

/// Splits a comma-separated value into trimmed, non-empty segments.
pub fn split_items(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|item| !item.is_empty())
}

fn parse_int(raw: &str) -> Result<Value, ConvertError> {
    raw.trim()
        .parse::<i64>()
        .map(Value::Integer)
        .map_err(|e| ConvertError::invalid(format!("invalid integer literal {raw:?}: {e}")))
}

fn parse_float(raw: &str) -> Result<Value, ConvertError> {
    raw.trim()
        .parse::<f64>()
        .map(Value::Float)
        .map_err(|_| ConvertError::invalid(format!("could not convert string to float: {raw:?}")))
}

/// Parses `a+bj`, `bj` or `a`, optionally wrapped in parentheses.
fn parse_complex(raw: &str) -> Result<Value, ConvertError> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(trimmed);

    let mut c = inner
        .parse::<Complex64>()
        .map_err(|_| ConvertError::invalid("complex() arg is a malformed string"))?;

    // Complex64's parser drops the sign of a zero imaginary part.
    if c.im == 0.0 {
        c.im = if imag_is_negative(inner) { -0.0 } else { 0.0 };
    }
    Ok(Value::Complex(c))
}

/// Returns `true` if the imaginary term of `s` is written with a leading `-`.
fn imag_is_negative(s: &str) -> bool {
    let Some(body) = s.strip_suffix(['j', 'J', 'i']) else {
        return false;
    };
    let bytes = body.as_bytes();

    bytes
        .iter()
        .enumerate()
        .rev()
        .find(|&(i, &b)| (b == b'+' || b == b'-') && (i == 0 || !matches!(bytes[i - 1], b'e' | b'E')))
        .is_some_and(|(_, &b)| b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_is_returned_unchanged() {
        let raw = "  keep  me , as is ";
        assert_eq!(parse(raw, &Kind::String, &Kind::String).unwrap(), Value::from(raw));
    }

    #[test]
    fn test_bool_tokens() {
        for token in ["t", "TRUE", "On", "oK", "Y", "yEs", "1"] {
            assert!(parse_bool(token), "{token} should be true");
        }
        for token in ["", "0", "false", "no", "truthy", " yes", "2"] {
            assert!(!parse_bool(token), "{token:?} should be false");
        }
    }

    #[test]
    fn test_split_items_trims_and_skips_empty() {
        let items: Vec<&str> = split_items("  a ,  b  ,, ,c").collect();
        assert_eq!(items, ["a", "b", "c"]);
        assert_eq!(split_items("").count(), 0);
    }

    #[test]
    fn test_int_and_float() {
        assert_eq!(parse("-42", &Kind::Int, &Kind::String).unwrap(), Value::Integer(-42));
        assert_eq!(parse(" 7 ", &Kind::Int, &Kind::String).unwrap(), Value::Integer(7));
        assert_eq!(parse("1.5e3", &Kind::Float, &Kind::String).unwrap(), Value::Float(1500.0));
        assert_eq!(
            parse("-inf", &Kind::Float, &Kind::String).unwrap(),
            Value::Float(f64::NEG_INFINITY)
        );
    }

    #[test]
    fn test_int_rejects_garbage() {
        let err = parse("12abc", &Kind::Int, &Kind::String).unwrap_err();
        assert!(matches!(err, Error::Conversion { .. }));
        assert!(err.to_string().contains("12abc"));
    }

    #[test]
    fn test_complex_forms() {
        let c = |s| parse(s, &Kind::Complex, &Kind::String).unwrap();
        assert_eq!(c("(1+2j)"), Value::Complex(Complex64::new(1.0, 2.0)));
        assert_eq!(c("3j"), Value::Complex(Complex64::new(0.0, 3.0)));
        assert_eq!(c("-1.5-0.5j"), Value::Complex(Complex64::new(-1.5, -0.5)));
        assert_eq!(c("4"), Value::Complex(Complex64::new(4.0, 0.0)));
        assert!(parse("one+two", &Kind::Complex, &Kind::String).is_err());
    }

    #[test]
    fn test_complex_keeps_negative_zero_imag() {
        let Value::Complex(c) = parse("(-0-0j)", &Kind::Complex, &Kind::String).unwrap() else {
            panic!("expected a complex value");
        };
        assert!(c.re.is_sign_negative());
        assert!(c.im.is_sign_negative());
        assert_eq!(Value::Complex(c).to_string(), "(-0-0j)");

        let Value::Complex(c) = parse("1e-3+0j", &Kind::Complex, &Kind::String).unwrap() else {
            panic!("expected a complex value");
        };
        assert!(c.im.is_sign_positive());
    }

    #[test]
    fn test_complex_display_parses_back() {
        let nan_imag = Value::Complex(Complex64::new(f64::INFINITY, f64::NAN));
        let Value::Complex(c) = parse(&nan_imag.to_string(), &Kind::Complex, &Kind::String).unwrap()
        else {
            panic!("expected a complex value");
        };
        assert_eq!(c.re, f64::INFINITY);
        assert!(c.im.is_nan());
    }

    #[test]
    fn test_imag_sign_detection() {
        assert!(imag_is_negative("-0j"));
        assert!(imag_is_negative("1-0J"));
        assert!(!imag_is_negative("1e-5+0j"));
        assert!(!imag_is_negative("-3"));
        assert!(!imag_is_negative("0j"));
    }

    #[test]
    fn test_containers() {
        let list = parse("3, 1, 3", &Kind::List, &Kind::Int).unwrap();
        assert_eq!(list, Value::List(vec![3.into(), 1.into(), 3.into()]));

        let tuple = parse("a,b", &Kind::Tuple, &Kind::String).unwrap();
        assert_eq!(tuple, Value::Tuple(vec!["a".into(), "b".into()]));

        let set = parse("3, 1, 3", &Kind::Set, &Kind::Int).unwrap();
        assert_eq!(set.as_items().map(<[Value]>::len), Some(2));

        let empty = parse("", &Kind::FrozenSet, &Kind::Int).unwrap();
        assert_eq!(empty, Value::FrozenSet(Vec::new()));
    }

    #[test]
    fn test_container_element_failure_propagates() {
        let err = parse("1, two, 3", &Kind::List, &Kind::Int).unwrap_err();
        assert!(err.to_string().contains("two"));
    }
}
