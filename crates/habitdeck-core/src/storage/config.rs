//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Timezone offset used for calendar-day streak semantics
//! - Greeting text shown by front-ends
//!
//! Configuration is stored at `~/.config/habitdeck/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::calendar::Calendar;
use crate::error::ConfigError;

use super::data_dir;

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/habitdeck/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Hours east of UTC; the calendar-day boundary for streak crediting.
    #[serde(default)]
    pub timezone_offset_hours: i32,
    /// Banner text shown above the habit list.
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

fn default_greeting() -> String {
    "Welcome back!".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone_offset_hours: 0,
            greeting: default_greeting(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, std::io::Error> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, falling back to defaults on any failure.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::SaveFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// The calendar implied by the configured timezone offset.
    pub fn calendar(&self) -> Calendar {
        Calendar::with_offset_hours(self.timezone_offset_hours)
    }

    /// Get a config value as string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "timezone_offset_hours" => Some(self.timezone_offset_hours.to_string()),
            "greeting" => Some(self.greeting.clone()),
            _ => None,
        }
    }

    /// Set a config value by key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Apply a key/value pair without persisting.
    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "timezone_offset_hours" => {
                self.timezone_offset_hours =
                    value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("expected an integer, got '{value}'"),
                    })?;
            }
            "greeting" => self.greeting = value.to_string(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.timezone_offset_hours, 0);
        assert_eq!(cfg.greeting, "Welcome back!");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let cfg: Config = toml::from_str("timezone_offset_hours = 5").unwrap();
        assert_eq!(cfg.timezone_offset_hours, 5);
        assert_eq!(cfg.greeting, "Welcome back!");
    }

    #[test]
    fn test_set_rejects_unknown_key_and_bad_value() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("no_such_key", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            cfg.apply("timezone_offset_hours", "abc"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_calendar_uses_offset() {
        let cfg = Config {
            timezone_offset_hours: -2,
            ..Default::default()
        };
        assert_eq!(cfg.calendar(), Calendar::with_offset_hours(-2));
    }
}
