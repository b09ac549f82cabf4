use std::collections::HashMap;
use std::env::{self, VarError};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::errors::SourceError;

/// A source of environment variable lookups.
///
/// Keys are matched exactly and case-sensitively. Implementations must not
/// cache: every call reflects the current state of the source.
#[cfg_attr(test, mockall::automock)]
pub trait EnvSource {
    /// Returns the value of `key`, or `None` when it is not set.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                warn!(key, "Environment variable is not valid unicode, treating as unset");
                None
            }
        }
    }
}

/// An in-memory set of variables, independent of the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Unsets `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    /// Number of variables in the map.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the map holds no variables.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Reads a dotenv file into a new map without touching the process
    /// environment. Later assignments of the same key win.
    pub fn from_dotenv(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let mut vars = HashMap::new();
        for item in dotenvy::from_path_iter(path)? {
            let (key, value) = item?;
            vars.insert(key, value);
        }
        debug!(path = %path.display(), count = vars.len(), "Loaded variables from dotenv file");
        Ok(Self { vars })
    }
}

impl EnvSource for MapEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Loads `.env` from the current directory or one of its parents into the
/// process environment. Variables that are already set are kept.
///
/// Returns the path that was loaded, or `None` when no file was found.
pub fn load_dotenv() -> Result<Option<PathBuf>, SourceError> {
    loaded(dotenvy::dotenv())
}

/// Loads the dotenv file at `path` into the process environment. Variables
/// that are already set are kept.
///
/// Returns `path` when the file was loaded, or `None` when it does not exist.
pub fn load_dotenv_from(path: impl AsRef<Path>) -> Result<Option<PathBuf>, SourceError> {
    let path = path.as_ref();
    loaded(dotenvy::from_path(path).map(|()| path.to_path_buf()))
}

fn loaded(result: Result<PathBuf, dotenvy::Error>) -> Result<Option<PathBuf>, SourceError> {
    match result {
        Ok(path) => {
            debug!(path = %path.display(), "Loaded .env file");
            Ok(Some(path))
        }
        Err(e) if e.not_found() => {
            debug!(".env file not found, using process environment only");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_process_env_lookup_is_live() {
        let key = "ENVBIND_SOURCE_TEST_LIVE";
        assert_eq!(ProcessEnv.lookup(key), None);

        env::set_var(key, "first");
        assert_eq!(ProcessEnv.lookup(key), Some("first".to_string()));

        env::set_var(key, "second");
        assert_eq!(ProcessEnv.lookup(key), Some("second".to_string()));

        env::remove_var(key);
        assert_eq!(ProcessEnv.lookup(key), None);
    }

    #[test]
    fn test_process_env_is_case_sensitive() {
        env::set_var("ENVBIND_SOURCE_TEST_CASE", "upper");
        assert_eq!(ProcessEnv.lookup("envbind_source_test_case"), None);
        env::remove_var("ENVBIND_SOURCE_TEST_CASE");
    }

    #[test]
    fn test_map_env_builder_and_iter() {
        let mut env = MapEnv::new().with("PORT", "3000").with("BOOL", "true");
        assert_eq!(env.lookup("PORT").as_deref(), Some("3000"));
        assert_eq!(env.lookup("port"), None);

        env.set("PORT", "4000");
        assert_eq!(env.lookup("PORT").as_deref(), Some("4000"));
        assert_eq!(env.remove("BOOL").as_deref(), Some("true"));
        assert_eq!(env.len(), 1);

        let collected: MapEnv = [("A", "1"), ("B", "2")].into_iter().collect();
        assert_eq!(collected.lookup("B").as_deref(), Some("2"));
    }

    #[test]
    fn test_map_env_from_dotenv() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "# comment")?;
        writeln!(file, "FOOSTR=FOO")?;
        writeln!(file, "DBURL=\"postgres://localhost:5432/mbp\"")?;
        writeln!(file, "FOOSTR=BAR")?;

        let env = MapEnv::from_dotenv(file.path())?;
        assert_eq!(env.len(), 2);
        assert_eq!(env.lookup("FOOSTR").as_deref(), Some("BAR"));
        assert_eq!(
            env.lookup("DBURL").as_deref(),
            Some("postgres://localhost:5432/mbp")
        );
        Ok(())
    }

    #[test]
    fn test_map_env_from_missing_dotenv() {
        let dir = tempfile::tempdir().unwrap();
        let err = MapEnv::from_dotenv(dir.path().join("missing.env")).unwrap_err();
        let SourceError::DotEnvError(inner) = err;
        assert!(inner.not_found());
    }

    #[test]
    fn test_load_dotenv_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_dotenv_from(dir.path().join(".env")).unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_load_dotenv_from_keeps_existing_variables() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "ENVBIND_DOTENV_TEST_FRESH=from-file\nENVBIND_DOTENV_TEST_KEPT=from-file\n",
        )?;

        env::set_var("ENVBIND_DOTENV_TEST_KEPT", "preset");
        let loaded = load_dotenv_from(&path);
        let fresh = ProcessEnv.lookup("ENVBIND_DOTENV_TEST_FRESH");
        let kept = ProcessEnv.lookup("ENVBIND_DOTENV_TEST_KEPT");
        env::remove_var("ENVBIND_DOTENV_TEST_FRESH");
        env::remove_var("ENVBIND_DOTENV_TEST_KEPT");

        assert_eq!(loaded?, Some(path));
        assert_eq!(fresh.as_deref(), Some("from-file"));
        assert_eq!(kept.as_deref(), Some("preset"));
        Ok(())
    }

    #[test]
    fn test_load_dotenv_from_malformed_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(".env");
        std::fs::write(&path, "ENVBIND_DOTENV_TEST_BROKEN value-without-equals\n")?;

        let result = load_dotenv_from(&path);
        assert!(matches!(result, Err(SourceError::DotEnvError(ref e)) if !e.not_found()));
        assert_eq!(ProcessEnv.lookup("ENVBIND_DOTENV_TEST_BROKEN"), None);
        Ok(())
    }
}
