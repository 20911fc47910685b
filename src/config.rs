//! Configuration sources.
//!
//! The backup list is a JSON array, one line per series and suffix:
//!
//! ```json
//! [{"path":"g:/ShebB", "Filename":"buh_log8", "Suffix":"-FULL.bak", "Days":1},
//!  {"path":"g:/ShebB", "Filename":"buh_log8", "Suffix":"-differ.dif", "Days":1}]
//! ```
//!
//! Application settings come from an optional `Retention.toml` and
//! `RETENTION_*` environment variables.

use crate::error::Error;
use crate::retention::NonBackupPolicy;
use chrono::{DateTime, Utc};
use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// One retention policy: files of series `series` ending with `suffix`
/// under `path` are kept for `days` days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    #[serde(rename = "path", alias = "Path")]
    pub path: String,
    /// Series name as it appears at the start of each backup filename.
    #[serde(rename = "Filename")]
    pub series: String,
    #[serde(rename = "Suffix", default)]
    pub suffix: String,
    #[serde(rename = "Days", default)]
    pub days: u32,
    /// Modification time of the newest file matching this entry, filled in after a scan.
    #[serde(rename = "Modtime", default, skip_serializing_if = "Option::is_none")]
    pub modtime: Option<DateTime<Utc>>,
    /// Whether the last scan found any file for this entry.
    #[serde(rename = "HasAnyFiles", default)]
    pub has_any_files: bool,
}

impl ConfigEntry {
    pub fn new(path: &str, series: &str, suffix: &str, days: u32) -> Self {
        Self {
            path: path.to_string(),
            series: series.to_string(),
            suffix: suffix.to_string(),
            days,
            modtime: None,
            has_any_files: false,
        }
    }

    /// `(series, suffix)`, the order coverage lookups rely on.
    pub fn key(&self) -> (&str, &str) {
        (&self.series, &self.suffix)
    }
}

/// Sorts entries ascending by `(series, suffix)`.
pub fn sort_entries(entries: &mut [ConfigEntry]) {
    entries.sort_by(|a, b| a.key().cmp(&b.key()));
}

pub fn is_sorted(entries: &[ConfigEntry]) -> bool {
    entries.windows(2).all(|w| w[0].key() <= w[1].key())
}

/// Reads the JSON backup list. Entries are returned in file order, unsorted.
pub fn read_config(path: impl AsRef<Path>) -> Result<Vec<ConfigEntry>, Error> {
    let bytes = fs::read(path.as_ref())?;
    parse_config(&bytes)
}

pub fn parse_config(bytes: &[u8]) -> Result<Vec<ConfigEntry>, Error> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let entries: Vec<ConfigEntry> = serde_json::from_slice(bytes)?;

    if let Some(pos) = entries.iter().position(|e| e.series.is_empty()) {
        return Err(Error::InvalidConfig(format!(
            "entry {} has an empty Filename",
            pos
        )));
    }
    Ok(entries)
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    /// Path of the JSON backup list.
    #[serde(default = "default_config_file")]
    pub config_file: String,
    /// How many newest files of every group to keep.
    #[serde(default = "default_keep_last")]
    pub keep_last: usize,
    #[serde(default)]
    pub non_backup_policy: NonBackupPolicy,
}

fn default_config_file() -> String {
    "dblist.json".to_string()
}

fn default_keep_last() -> usize {
    1
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            config_file: default_config_file(),
            keep_last: default_keep_last(),
            non_backup_policy: NonBackupPolicy::default(),
        }
    }
}

pub fn load_settings() -> Result<AppSettings, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Retention").required(false))
        .add_source(Environment::with_prefix("RETENTION").try_parsing(true))
        .build()?;
    builder.try_deserialize::<AppSettings>()
}
