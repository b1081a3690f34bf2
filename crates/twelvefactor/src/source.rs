//! Source attribution for resolved values.

use std::fmt::{self, Display, Formatter};

/// Where a resolved value came from.
///
/// ```rust,ignore
/// let resolved = config.evaluate(&schema)?;
///
/// for (name, value) in resolved.iter() {
///     match resolved.source(name) {
///         Some(Source::Environment) => println!("{name}: from env"),
///         Some(Source::Default) => println!("{name}: using default"),
///         None => {}
///     }
/// }
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Source {
    /// The key was present in the environment store and its string was
    /// coerced.
    Environment,

    /// The key was absent and the entry's default was used as-is.
    Default,
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "Environment variable"),

            Self::Default => write!(f, "Default value"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_display() {
        assert_eq!(Source::Environment.to_string(), "Environment variable");
        assert_eq!(Source::Default.to_string(), "Default value");
    }
}
