//! Session persistence boundary.

use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization Error: {0}")]
    Serialization(String),
}

/// Key/value storage that lives for one browsing session.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    values: HashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(feature = "file-store")]
pub use file::FileSessionStore;

#[cfg(feature = "file-store")]
mod file {
    use super::{SessionStore, StoreError};
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    const SESSION_FILE: &str = "session.json";

    /// Session values kept as a JSON object in `<dir>/session.json`.
    ///
    /// Every read goes to disk so separate processes sharing the directory
    /// observe the same session.
    #[derive(Debug, Clone)]
    pub struct FileSessionStore {
        path: PathBuf,
    }

    impl FileSessionStore {
        pub fn new(dir: impl AsRef<Path>) -> Self {
            Self {
                path: dir.as_ref().join(SESSION_FILE),
            }
        }

        /// `~/.portfolio/session.json`
        pub fn default_location() -> Self {
            let dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".portfolio");
            Self::new(dir)
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_map(&self) -> Result<BTreeMap<String, String>, StoreError> {
            if !self.path.exists() {
                return Ok(BTreeMap::new());
            }
            let data = std::fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|e| StoreError::Serialization(e.to_string()))
        }

        /// Like `read_map`, but a file that does not parse counts as empty so
        /// the next write replaces it. I/O errors still propagate.
        fn read_map_for_update(&self) -> Result<BTreeMap<String, String>, StoreError> {
            match self.read_map() {
                Err(StoreError::Serialization(e)) => {
                    tracing::warn!(error = %e, path = %self.path.display(), "Replacing corrupt session file");
                    Ok(BTreeMap::new())
                }
                other => other,
            }
        }

        fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StoreError> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let data = serde_json::to_string_pretty(map)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            std::fs::write(&self.path, data)?;
            Ok(())
        }
    }

    impl SessionStore for FileSessionStore {
        fn get(&self, key: &str) -> Option<String> {
            match self.read_map() {
                Ok(mut map) => map.remove(key),
                Err(e) => {
                    tracing::warn!(error = %e, path = %self.path.display(), "Ignoring unreadable session file");
                    None
                }
            }
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            let mut map = self.read_map_for_update()?;
            map.insert(key.to_string(), value.to_string());
            self.write_map(&map)
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            let mut map = self.read_map_for_update()?;
            if map.remove(key).is_some() {
                self.write_map(&map)?;
            }
            Ok(())
        }
    }
}
