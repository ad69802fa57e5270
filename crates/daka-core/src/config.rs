//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - The trailing window shown by the heatmap
//! - Whether toggling a day asks for confirmation first
//! - Glyphs used by the text renderer
//!
//! Configuration is stored at `~/.config/daka/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::calendar::DEFAULT_TOTAL_DAYS;
use crate::error::ConfigError;
use crate::storage::data_dir;

/// Calendar window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_total_days")]
    pub total_days: i64,
}

/// Interaction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Ask before toggling a day.
    #[serde(default = "default_true")]
    pub confirm_toggle: bool,
}

/// Text renderer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_checked_glyph")]
    pub checked_glyph: String,
    #[serde(default = "default_empty_glyph")]
    pub empty_glyph: String,
    #[serde(default = "default_future_glyph")]
    pub future_glyph: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/daka/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_total_days() -> i64 {
    DEFAULT_TOTAL_DAYS
}
fn default_true() -> bool {
    true
}
fn default_checked_glyph() -> String {
    "■".into()
}
fn default_empty_glyph() -> String {
    "□".into()
}
fn default_future_glyph() -> String {
    "·".into()
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            total_days: default_total_days(),
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            confirm_toggle: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            checked_glyph: default_checked_glyph(),
            empty_glyph: default_empty_glyph(),
            future_glyph: default_future_glyph(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => value
                    .parse::<bool>()
                    .map(serde_json::Value::Bool)
                    .map_err(|e| invalid(e.to_string()))?,
                serde_json::Value::Number(_) => value
                    .parse::<i64>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?,
                serde_json::Value::Object(_) => return Err(unknown()),
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Default location of the config file.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from `path`, writing the defaults there if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed,
    /// or if the default config cannot be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Load from the default location.
    ///
    /// # Errors
    /// See [`Config::load_from`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Persist to the default location.
    ///
    /// # Errors
    /// See [`Config::save_to`].
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, checked against the type of
    /// the current value. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}
