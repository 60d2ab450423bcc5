use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::config::PreferencesConfig;

pub const DARK_MODE_KEY: &str = "darkMode";
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// String key/value persistence scoped to one user agent.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
    fn remove(&self, key: &str) -> Result<(), PreferenceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("failed to access preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("preference file {path} is not valid JSON: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("preference store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryPreferenceStore {
    fn with_values<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>) -> T,
    ) -> Result<T, PreferenceError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|_| PreferenceError::Unavailable("preference mutex poisoned".to_string()))?;
        Ok(f(&mut guard))
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        self.with_values(|values| values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.with_values(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        self.with_values(|values| {
            values.remove(key);
        })
    }
}

/// JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(PreferenceError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|source| PreferenceError::Format {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, values: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
        let encoded =
            serde_json::to_string_pretty(values).map_err(|source| PreferenceError::Format {
                path: self.path.clone(),
                source,
            })?;
        std::fs::write(&self.path, encoded).map_err(|source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn modify(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), PreferenceError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| PreferenceError::Unavailable("preference file lock poisoned".to_string()))?;
        let mut values = self.read()?;
        change(&mut values);
        self.write(&values)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.modify(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        self.modify(|values| {
            values.remove(key);
        })
    }
}

/// Builds the configured store: file-backed when a path is set, memory otherwise.
pub fn preference_store(config: &PreferencesConfig) -> Arc<dyn PreferenceStore> {
    match &config.path {
        Some(path) => Arc::new(FilePreferenceStore::new(path.clone())),
        None => Arc::new(MemoryPreferenceStore::default()),
    }
}
