use crate::error::{DaylogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_PAGE_SIZE: usize = crate::view::DEFAULT_PAGE_SIZE;
/// Ballpark of a browser localStorage slot, the store this replaces.
const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// Configuration for daylog, stored next to the data file as `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DaylogConfig {
    /// Records revealed per "load more" step.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Storage quota in bytes; `None` disables the capacity check.
    #[serde(default = "default_quota")]
    pub quota_bytes: Option<u64>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_quota() -> Option<u64> {
    Some(DEFAULT_QUOTA_BYTES)
}

impl Default for DaylogConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            quota_bytes: Some(DEFAULT_QUOTA_BYTES),
        }
    }
}

impl DaylogConfig {
    /// Load config from the given directory, or return defaults if not found.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DaylogError::Io)?;
        let config: DaylogConfig =
            serde_json::from_str(&content).map_err(DaylogError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(DaylogError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(DaylogError::Serialization)?;
        fs::write(config_path, content).map_err(DaylogError::Io)?;
        Ok(())
    }
}
