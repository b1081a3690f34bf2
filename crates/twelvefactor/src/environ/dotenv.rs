//! Dotenv file store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{EnvResult, Environment, priority};
use crate::Error;

/// Store holding the entries of a `.env` file.
///
/// The file is parsed once at construction with [`dotenvy`]. The process
/// environment is never modified.
///
/// Values containing spaces must be quoted, so comma lists written with
/// padding look like `HOSTS="a, b"`. Unquoted `HOSTS=a, b` is a parse error.
///
/// ```rust,ignore
/// use twelvefactor::environ::DotenvEnv;
///
/// // Load ./.env, empty if missing
/// let env = DotenvEnv::new()?;
///
/// // Load a specific file, which must exist
/// let env = DotenvEnv::from_path(".env.local")?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct DotenvEnv {
    values: HashMap<String, String>,
    path: Option<PathBuf>,
}

impl DotenvEnv {
    /// Loads `./.env`. A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dotenv`] if the file exists but cannot be parsed.
    pub fn new() -> Result<Self, Error> {
        Self::from_path_optional(".env")
    }

    /// Loads the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dotenv`] if the file is missing or malformed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let values = read(path).map_err(|e| Error::dotenv(path, e))?;

        Ok(Self::loaded(path, values))
    }

    /// Loads the file at `path`, or returns an empty store if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dotenv`] if the file exists but cannot be parsed.
    pub fn from_path_optional(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        match read(path) {
            Ok(values) => Ok(Self::loaded(path, values)),
            Err(e) if e.not_found() => Ok(Self::default()),
            Err(e) => Err(Error::dotenv(path, e)),
        }
    }

    fn loaded(path: &Path, values: HashMap<String, String>) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), entries = values.len(), "loaded dotenv file");

        Self {
            values,
            path: Some(path.to_path_buf()),
        }
    }

    /// Path of the loaded file, if one was found.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of entries in the file.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the file had no entries (or did not exist).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn read(path: &Path) -> Result<HashMap<String, String>, dotenvy::Error> {
    dotenvy::from_path_iter(path)?.collect()
}

impl Environment for DotenvEnv {
    fn name(&self) -> &'static str {
        "dotenv"
    }

    fn get(&self, key: &str) -> EnvResult {
        Ok(self.values.get(key).cloned())
    }

    fn priority(&self) -> u32 {
        priority::DOTENV
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_path_reads_entries() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# comment").unwrap();
        writeln!(file, "PORT=8080").unwrap();
        writeln!(file, "NAME=\"quoted value\"").unwrap();

        let env = DotenvEnv::from_path(file.path()).unwrap();

        assert_eq!(env.len(), 2);
        assert_eq!(env.get("PORT").unwrap().as_deref(), Some("8080"));
        assert_eq!(env.get("NAME").unwrap().as_deref(), Some("quoted value"));
        assert_eq!(env.path(), Some(file.path()));
    }

    #[test]
    fn test_from_path_missing_file_errors() {
        let result = DotenvEnv::from_path("/nonexistent/.env");
        assert!(matches!(result, Err(Error::Dotenv { .. })));
    }

    #[test]
    fn test_from_path_optional_missing_file_is_empty() {
        let env = DotenvEnv::from_path_optional("/nonexistent/.env").unwrap();
        assert!(env.is_empty());
        assert!(env.path().is_none());
    }

    #[test]
    fn test_dotenv_priority() {
        assert_eq!(DotenvEnv::default().priority(), priority::DOTENV);
    }
}
