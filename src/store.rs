//! Key-value persistence for view state.
//!
//! Mirrors a browser-local store: string keys, whole-value overwrite on every
//! save, no expiry. The view receives the store as a trait object so tests
//! can inject `MemoryStore`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::{Map, Value};

use crate::error::BriefError;

/// Key holding the completed checklist ids (array of strings)
pub const CHECKED_ITEMS_KEY: &str = "checkedItems";
/// Key holding the theme preference ("light" | "dark")
pub const THEME_KEY: &str = "theme";

pub trait PersistedStore: Send + Sync {
    fn load(&self, key: &str) -> Option<Value>;
    fn save(&self, key: &str, value: Value) -> Result<(), BriefError>;
}

/// In-process store. Used by tests and as a fallback when no file is configured.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key with an arbitrary value, bypassing any validation.
    pub fn with_entry(self, key: &str, value: Value) -> Self {
        self.entries.lock().insert(key.to_string(), value);
        self
    }
}

impl PersistedStore for MemoryStore {
    fn load(&self, key: &str) -> Option<Value> {
        self.entries.lock().get(key).cloned()
    }

    fn save(&self, key: &str, value: Value) -> Result<(), BriefError> {
        self.entries.lock().insert(key.to_string(), value);
        Ok(())
    }
}

/// Single JSON object on disk, rewritten in full on every save.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file and malformed JSON both read as empty. Any other read
    /// failure is an error so a save never clobbers a file it could not read.
    fn read_all(&self) -> Result<Map<String, Value>, BriefError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(BriefError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => {
                log::warn!(
                    "Store {} is not a JSON object; treating as empty",
                    self.path.display()
                );
                Ok(Map::new())
            }
        }
    }
}

impl PersistedStore for JsonFileStore {
    fn load(&self, key: &str) -> Option<Value> {
        let _guard = self.lock.lock();
        match self.read_all() {
            Ok(mut all) => all.remove(key),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        }
    }

    fn save(&self, key: &str, value: Value) -> Result<(), BriefError> {
        let _guard = self.lock.lock();
        let mut all = self.read_all()?;
        all.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    BriefError::Storage(format!("Failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(&Value::Object(all))?;
        fs::write(&self.path, content).map_err(|e| {
            BriefError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })?;
        log::debug!("Saved '{}' to {}", key, self.path.display());
        Ok(())
    }
}
