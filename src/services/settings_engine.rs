//! Portal settings persistence.
//!
//! `PortalSettings` lives in one pretty-printed JSON file, by default
//! `settings.json` under [`platform::get_config_dir`]. Values change one
//! dot-notation key at a time and every change is written straight back.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::PortalSettings;

pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<PortalSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &PortalSettings;
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// JSON-file backed settings store.
pub struct SettingsEngine {
    config_path: String,
    settings: PortalSettings,
}

fn io_err(action: &str, e: std::io::Error) -> SettingsError {
    SettingsError::IoError(format!("{} {}", action, e))
}

fn serde_err(action: &str, e: serde_json::Error) -> SettingsError {
    SettingsError::SerializationError(format!("{} {}", action, e))
}

impl SettingsEngine {
    /// `path_override` wins over the platform default location.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(path) => path,
            None => platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .into_owned(),
        };

        Self {
            config_path,
            settings: PortalSettings::default(),
        }
    }

    /// JSON pointer for a dot-notation key, e.g. `proxy.backend` -> `/proxy/backend`.
    fn pointer_for(key: &str) -> Result<String, SettingsError> {
        if key.is_empty() || key.split('.').any(str::is_empty) {
            return Err(SettingsError::InvalidKey(format!("'{}'", key)));
        }
        Ok(key.split('.').fold(String::new(), |mut acc, part| {
            acc.push('/');
            acc.push_str(part);
            acc
        }))
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Reads the settings file. No file means defaults; a file that does not
    /// parse is an error and leaves the current settings untouched.
    fn load(&mut self) -> Result<PortalSettings, SettingsError> {
        let file = Path::new(&self.config_path);
        self.settings = if file.exists() {
            let raw = fs::read_to_string(file).map_err(|e| io_err("reading settings:", e))?;
            serde_json::from_str(&raw).map_err(|e| serde_err("parsing settings:", e))?
        } else {
            PortalSettings::default()
        };
        Ok(self.settings.clone())
    }

    fn save(&self) -> Result<(), SettingsError> {
        let file = Path::new(&self.config_path);
        if let Some(dir) = file.parent() {
            fs::create_dir_all(dir).map_err(|e| io_err("creating settings directory:", e))?;
        }
        let body = serde_json::to_string_pretty(&self.settings)
            .map_err(|e| serde_err("encoding settings:", e))?;
        fs::write(file, body).map_err(|e| io_err("writing settings:", e))
    }

    fn get_settings(&self) -> &PortalSettings {
        &self.settings
    }

    /// Updates one setting by dot-notation key and saves.
    ///
    /// The key must name an existing field. The new value is validated by
    /// deserializing the whole tree, so `"proxy.backend"` accepts
    /// `"Ultraviolet"` but rejects `"rammerhead"`.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        let pointer = Self::pointer_for(key)?;

        let mut tree =
            serde_json::to_value(&self.settings).map_err(|e| serde_err("encoding settings:", e))?;

        let slot = tree
            .pointer_mut(&pointer)
            .ok_or_else(|| SettingsError::InvalidKey(format!("'{}' not found in settings", key)))?;
        *slot = value;

        self.settings = serde_json::from_value(tree).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        log::info!("[SETTINGS] {} updated", key);

        self.save()
    }

    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = PortalSettings::default();
        log::info!("[SETTINGS] reset to defaults");
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
