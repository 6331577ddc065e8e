//! # Configuration Management
//!
//! This module handles loading and saving the moon-config.toml settings file.
//! It covers display options (percentage, language) and the time zone the
//! front end aligns "now" to before handing it to the calculator.
//!
//! The calculator itself never reads these settings; callers pass the aligned
//! instant explicitly.

use chrono::{DateTime, FixedOffset, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::civil::{CivilDateTime, CivilTimeError};

/// Default settings file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "moon-config.toml";

/// Errors from reading, writing or applying settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings file could not be read or written
    #[error("config IO: {0}")]
    Io(#[from] io::Error),

    /// Settings file is not valid TOML for [`Config`]
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Settings could not be encoded as TOML
    #[error("cannot encode config: {0}")]
    Encode(#[from] toml::ser::Error),

    /// UTC offset beyond ±24 hours
    #[error("UTC offset of {0} minutes is out of range")]
    InvalidOffset(i32),

    /// Aligned wall-clock time outside the supported year range
    #[error("current time: {0}")]
    Civil(#[from] CivilTimeError),

    /// Language code other than auto, en or ja
    #[error("unknown language {0:?} (expected auto, en or ja)")]
    UnknownLanguage(String),
}

/// Application settings loaded from moon-config.toml
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Config {
    /// Display and wording options
    #[serde(default)]
    pub display: DisplayConfig,
    /// Zone used when the current time is requested
    #[serde(default)]
    pub timezone: TimezoneConfig,
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Append the illumination percentage to the status label
    #[serde(default = "default_show_percentage")]
    pub show_percentage: bool,
    /// Language for phase names and labels
    #[serde(default)]
    pub language: Language,
}

/// Time zone configuration
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct TimezoneConfig {
    /// Fixed offset east of UTC in minutes (540 = Japan).
    /// `None` follows the system's local time zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

/// Output language for names and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Pick from the process locale
    #[default]
    Auto,
    En,
    Ja,
}

fn default_show_percentage() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            show_percentage: default_show_percentage(),
            language: Language::Auto,
        }
    }
}

impl Language {
    /// Resolve `Auto` from the `LC_ALL`, `LC_MESSAGES` or `LANG` environment variables.
    pub fn resolve(self) -> Language {
        let locale = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.is_empty());
        self.resolve_with_locale(locale.as_deref())
    }

    /// Resolve `Auto` from an explicit locale string such as `ja_JP.UTF-8`.
    ///
    /// Japanese locales select [`Language::Ja`]; anything else, including no
    /// locale at all, selects [`Language::En`].
    pub fn resolve_with_locale(self, locale: Option<&str>) -> Language {
        match self {
            Language::Auto => match locale {
                Some(tag) if tag.to_ascii_lowercase().starts_with("ja") => Language::Ja,
                _ => Language::En,
            },
            explicit => explicit,
        }
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Language::Auto),
            "en" => Ok(Language::En),
            "ja" => Ok(Language::Ja),
            other => Err(ConfigError::UnknownLanguage(other.to_string())),
        }
    }
}

impl TimezoneConfig {
    /// Wall-clock time of `utc` in the configured zone.
    pub fn align(&self, utc: DateTime<Utc>) -> Result<CivilDateTime, ConfigError> {
        match self.utc_offset_minutes {
            None => Ok(utc.with_timezone(&Local).try_into()?),
            Some(minutes) => {
                let offset = minutes
                    .checked_mul(60)
                    .and_then(FixedOffset::east_opt)
                    .ok_or(ConfigError::InvalidOffset(minutes))?;
                Ok(utc.with_timezone(&offset).try_into()?)
            }
        }
    }

    /// Current wall-clock time in the configured zone.
    pub fn current_time(&self) -> Result<CivilDateTime, ConfigError> {
        self.align(Utc::now())
    }
}

impl Config {
    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::try_load_from_path(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded configuration");
                config
            }
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file found, using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "using default configuration");
                Self::default()
            }
        }
    }

    /// Load configuration from specified path, reporting any failure
    pub fn try_load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save current configuration to specified path
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        tracing::info!(path = %path.as_ref().display(), "configuration saved");
        Ok(())
    }
}
