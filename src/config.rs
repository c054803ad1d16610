use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

const DEFAULT_API_BASE: &str = "http://127.0.0.1:3000";
const CONFIG_FILE_VAR: &str = "WALLET_VERIFY_CONFIG";
const API_BASE_VAR: &str = "WALLET_VERIFY_API_BASE";

/// Application settings. Sources, lowest to highest priority: built-in
/// defaults, the JSON file named by `WALLET_VERIFY_CONFIG`, then the
/// `WALLET_VERIFY_API_BASE` environment override.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl AppConfig {
    /// Load settings. Config problems never abort startup; they log a
    /// warning and fall back to the defaults.
    pub fn load() -> Self {
        let mut config = match env::var(CONFIG_FILE_VAR) {
            Ok(path) => match Self::from_file(Path::new(&path)) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("ignoring config file {path}: {err:#}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };
        if let Ok(url) = env::var(API_BASE_VAR) {
            config.api_base_url = url;
        }
        config
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }
}
