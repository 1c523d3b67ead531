//! Application configuration.
//!
//! Configuration is read from `~/.config/branchview/config.json` and can be
//! overridden by `BRANCHVIEW_DATA` / `BRANCHVIEW_LOAD_DELAY_MS` (a `.env`
//! file is honored) and finally by `--data` on the command line. The file is
//! only ever read; every session starts fresh.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use branchview_core::{DataSource, StatusFilter};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Application name used for config/log directory paths
const APP_NAME: &str = "branchview";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Log file name inside the cache directory
const LOG_FILE: &str = "branchview.log";

/// Delay before the dataset becomes available
const DEFAULT_LOAD_DELAY_MS: u64 = 500;

/// Environment variable pointing at a JSON data file
pub const ENV_DATA: &str = "BRANCHVIEW_DATA";

/// Environment variable overriding the artificial load delay
pub const ENV_LOAD_DELAY_MS: &str = "BRANCHVIEW_LOAD_DELAY_MS";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// JSON file to load instead of the bundled dataset
    pub data_path: Option<PathBuf>,
    pub load_delay_ms: Option<u64>,
    /// "active", "terminated" or "all"
    pub default_status: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Where the log file goes, falling back to the working directory
    pub fn log_path() -> PathBuf {
        dirs::cache_dir()
            .map(|dir| dir.join(APP_NAME))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(LOG_FILE)
    }

    /// Apply environment overrides. `lookup` is `std::env::var` in practice.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DATA).filter(|p| !p.trim().is_empty()) {
            self.data_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = lookup(ENV_LOAD_DELAY_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.load_delay_ms = Some(ms),
                Err(_) => warn!(value = %raw, "Ignoring invalid {}", ENV_LOAD_DELAY_MS),
            }
        }
    }

    pub fn data_source(&self) -> DataSource {
        match &self.data_path {
            Some(path) => DataSource::File(path.clone()),
            None => DataSource::Bundled,
        }
    }

    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms.unwrap_or(DEFAULT_LOAD_DELAY_MS))
    }

    pub fn default_status(&self) -> StatusFilter {
        match self.default_status.as_deref() {
            Some(key) => StatusFilter::from_key(key).unwrap_or_else(|| {
                warn!(value = %key, "Unknown default_status, using active");
                StatusFilter::default()
            }),
            None => StatusFilter::default(),
        }
    }
}
