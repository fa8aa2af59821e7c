//! Host-level settings for stopwatch tags.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::time::parse_time;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(&'static str),
}

/// Stored as camelCase JSON. Keys missing from the stored data keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Limit in seconds for tags that do not set one.
    ///
    /// Read from either a number of seconds or clock text such as `"25:00"`.
    #[serde(deserialize_with = "seconds_or_clock")]
    pub default_limit: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SecondsOrClock {
    Seconds(u64),
    Clock(String),
}

fn seconds_or_clock<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match SecondsOrClock::deserialize(deserializer)? {
        SecondsOrClock::Seconds(secs) => Ok(secs),
        SecondsOrClock::Clock(text) => parse_time(&text).map_err(de::Error::custom),
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self { default_limit: 60 }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.default_limit == 0 {
            return Err(SettingsError::Invalid("defaultLimit must be positive"));
        }
        Ok(())
    }
}
