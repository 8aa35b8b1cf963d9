// src/theme.rs

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::AppError;

/// Storage key for the persisted theme flag.
const DARK_MODE_KEY: &str = "isDarkMode";

/// Local persistent key-value storage. Values are string-serialized by the
/// caller (the theme flag is a JSON-encoded boolean).
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}

/// Settings as a flat JSON map on disk. Reads tolerate a missing or
/// corrupt file (treated as empty); writes create parent directories.
pub struct FileSettings {
    path: PathBuf,
}

impl FileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> HashMap<String, String> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }
}

impl SettingsStore for FileSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&map)?)?;
        Ok(())
    }
}

/// In-memory settings for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemorySettings {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .expect("settings lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.values
            .lock()
            .expect("settings lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Owns the dark/light flag: explicit load on start, save on change.
/// Wired through the composition root rather than living as a global.
pub struct ThemeManager {
    storage: Arc<dyn SettingsStore>,
    is_dark_mode: bool,
}

impl ThemeManager {
    /// Starts in light mode until `load` runs.
    pub fn new(storage: Arc<dyn SettingsStore>) -> Self {
        Self {
            storage,
            is_dark_mode: false,
        }
    }

    /// Reads the persisted flag. Absent or unreadable means light mode.
    pub fn load(&mut self) {
        self.is_dark_mode = self
            .storage
            .get(DARK_MODE_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or(false);
    }

    pub fn is_dark_mode(&self) -> bool {
        self.is_dark_mode
    }

    pub fn set_dark_mode(&mut self, value: bool) -> Result<(), AppError> {
        self.is_dark_mode = value;
        self.storage
            .set(DARK_MODE_KEY, &serde_json::to_string(&value)?)
    }

    pub fn set_light_mode(&mut self) -> Result<(), AppError> {
        self.set_dark_mode(false)
    }
}
