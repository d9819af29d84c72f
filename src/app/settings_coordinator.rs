//! Generic settings persistence coordination.
//!
//! Provides a reusable API for persisting settings (the combobox config,
//! remembered selections, and so on) to a key/value store. Values are stored
//! as JSON strings.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Storage key for the persisted [`ComboboxConfig`](crate::config::ComboboxConfig)
pub const COMBOBOX_CONFIG_KEY: &str = "combobox_config";

/// Default settings file, `<config dir>/treecombo/settings.json`.
///
/// `None` on platforms without a config directory.
pub static DEFAULT_SETTINGS_PATH: Lazy<Option<PathBuf>> =
    Lazy::new(|| dirs::config_dir().map(|dir| dir.join("treecombo").join("settings.json")));

/// String key/value store backing the settings coordinator.
pub trait SettingsStorage {
    fn get_string(&self, key: &str) -> Option<String>;

    fn set_string(&mut self, key: &str, value: String);

    /// Persists pending writes.
    fn flush(&mut self) -> Result<()>;
}

/// Volatile storage, for tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemorySettingsStorage {
    data: BTreeMap<String, String>,
}

impl MemorySettingsStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStorage for MemorySettingsStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.data.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.data.insert(key.to_owned(), value);
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Storage backed by a single JSON object file.
#[derive(Debug)]
pub struct FileSettingsStorage {
    path: PathBuf,
    data: BTreeMap<String, String>,
}

impl FileSettingsStorage {
    /// Opens the settings file at `path`. A missing file yields empty storage.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = if path.exists() {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings: {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse settings: {}", path.display()))?
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), entries = data.len(), "settings opened");
        Ok(Self { path, data })
    }

    /// Opens the settings file at [`DEFAULT_SETTINGS_PATH`].
    pub fn open_default() -> Result<Self> {
        let path = DEFAULT_SETTINGS_PATH
            .as_ref()
            .context("No config directory available on this platform")?;
        Self::open(path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStorage for FileSettingsStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.data.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.data.insert(key.to_owned(), value);
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write settings: {}", self.path.display()))
    }
}

/// Coordinates generic settings persistence.
///
/// This coordinator provides type-safe loading and saving of any serializable
/// settings to a [`SettingsStorage`]. Settings are stored as JSON strings.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads a setting from storage with a default fallback.
    ///
    /// # Type Parameters
    /// * `T` - The type to deserialize, must implement Deserialize and Default
    ///
    /// # Arguments
    /// * `storage` - The storage interface
    /// * `key` - The storage key for this setting
    ///
    /// # Returns
    /// The deserialized value if found and valid, otherwise the default value for type T
    pub fn load_setting<T>(storage: Option<&dyn SettingsStorage>, key: &str) -> T
    where
        T: for<'de> Deserialize<'de> + Default,
    {
        Self::try_load_setting(storage, key).unwrap_or_default()
    }

    /// Saves a setting to storage and flushes it.
    ///
    /// # Arguments
    /// * `storage` - The storage interface (mutable)
    /// * `key` - The storage key for this setting
    /// * `value` - The value to serialize and save
    pub fn save_setting<T>(storage: &mut dyn SettingsStorage, key: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let json_str = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize setting: {key}"))?;
        storage.set_string(key, json_str);
        storage.flush()
    }

    /// Loads a setting from storage with a custom default.
    ///
    /// # Returns
    /// The deserialized value if found and valid, otherwise the provided default
    pub fn load_setting_or<T>(storage: Option<&dyn SettingsStorage>, key: &str, default: T) -> T
    where
        T: for<'de> Deserialize<'de>,
    {
        Self::try_load_setting(storage, key).unwrap_or(default)
    }

    /// Attempts to load a setting, returning None if not found or invalid.
    ///
    /// Invalid entries are logged and otherwise ignored.
    pub fn try_load_setting<T>(storage: Option<&dyn SettingsStorage>, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let json_str = storage?.get_string(key)?;
        match serde_json::from_str(&json_str) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "ignoring invalid setting");
                None
            }
        }
    }
}
