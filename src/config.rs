use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config/client.json";

/// Refresh period for the conversation poller.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3000;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_key: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl AppConfig {
    /// Environment variables win over the file so a `.env` can point a
    /// build at another backend without editing the config.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("HUB_API_URL") {
            if !url.trim().is_empty() {
                self.api_base_url = url;
            }
        }
        if let Ok(key) = std::env::var("HUB_API_KEY") {
            if !key.trim().is_empty() {
                self.api_key = Some(key);
            }
        }
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

pub fn save_config(path: &str, config: &AppConfig) -> std::io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)
}
