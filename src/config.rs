//! Runtime configuration, loaded from an optional `config.json` next to the
//! binary. Every field has a default, so no config file is required.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::runner::RetryPolicy;

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_max_retries() -> u32 {
    2
}

fn default_base_delay_secs() -> u64 {
    2
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_base_delay_secs")]
    pub base_delay_secs: u64,
}

impl Default for AppConfig {
    fn default() -> AppConfig {
        AppConfig {
            data_dir: default_data_dir(),
            max_retries: default_max_retries(),
            base_delay_secs: default_base_delay_secs(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from `path`. A missing file yields the defaults;
    /// a present but malformed file is an error worth stopping for, since
    /// silently ignoring it would run with settings the operator did not
    /// choose.
    pub fn load(path: &Path) -> Result<AppConfig, crate::error::StorageError> {
        match fs::read_to_string(path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(AppConfig::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_secs(self.base_delay_secs),
        }
    }
}

/// Display metadata for one restaurant, keyed by display name in the links
/// file. Consumed by the downstream renderer; carried here so a run can
/// verify the file still parses.
#[derive(Debug, Clone, Deserialize)]
pub struct RestaurantLink {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub map: Option<String>,
}

/// Loads `restaurant_links.json` from the data directory. Links are
/// presentation-only, so any problem degrades to an empty map.
pub fn load_links(data_dir: &Path) -> HashMap<String, RestaurantLink> {
    let path = data_dir.join("restaurant_links.json");
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "links file unavailable");
            return HashMap::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(links) => links,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "links file malformed, ignoring");
            HashMap::new()
        }
    }
}
