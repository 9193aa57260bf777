//! Runtime configuration
//!
//! Read from `~/.gobarber/config.yaml` when present. Every field is optional;
//! `GOBARBER_API_URL` overrides the API URL.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{API_URL_ENV, DATA_DIR_NAME, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};

const CONFIG_FILE: &str = "config.yaml";
const STORAGE_FILE: &str = "storage.json";

/// On-disk shape of the config file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    api_url: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Base URL of the API, without a trailing slash
    pub api_url: String,
    pub timeout_secs: u64,
    /// Directory holding the config file, the persisted store and logs
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration from the default data directory
    pub fn load() -> Result<Self> {
        let data_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DATA_DIR_NAME);

        let mut config = Self::load_from(&data_dir)?;
        config.apply_api_url_override(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    /// Load configuration from `data_dir/config.yaml`, falling back to defaults
    pub fn load_from(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);

        let file = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_yaml::from_str::<ConfigFile>(&content)
                .with_context(|| format!("parsing {}", path.display()))?
        } else {
            ConfigFile::default()
        };

        Ok(Config {
            api_url: normalize_url(file.api_url.as_deref().unwrap_or(DEFAULT_API_URL)),
            timeout_secs: file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            data_dir: data_dir.to_path_buf(),
        })
    }

    /// Replace the API URL when an override is given and non-blank
    pub fn apply_api_url_override(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            self.api_url = normalize_url(&url);
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Path of the JSON file backing the persisted store
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            data_dir: PathBuf::from(DATA_DIR_NAME),
        }
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
