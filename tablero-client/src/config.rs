//! Client configuration

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured backend URL.
pub const API_URL_ENV: &str = "TABLERO_API_URL";

const CONFIG_DIR: &str = "tablero-admin";
const CONFIG_FILE: &str = "config.json";

/// Persisted client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend REST API
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:4000/api".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load the configuration.
    ///
    /// Precedence: `TABLERO_API_URL` environment variable, then the JSON
    /// config file in the platform config directory, then the default.
    /// Load never fails; a missing or unreadable file falls back silently.
    pub fn load() -> Self {
        let mut config = Self::load_file().unwrap_or_default();
        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            log::info!("[ClientConfig] Using {} from environment", API_URL_ENV);
            config.api_url = url;
        }
        config
    }

    fn load_file() -> Option<Self> {
        let config_path = dirs::config_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
        if !config_path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(&config_path).ok()?;
        match serde_json::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("[ClientConfig] Ignoring unparseable config file: {}", e);
                None
            }
        }
    }

    /// Persist the configuration to the platform config directory.
    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(config_dir) = dirs::config_dir() {
            let app_dir = config_dir.join(CONFIG_DIR);
            std::fs::create_dir_all(&app_dir)?;
            let config_path = app_dir.join(CONFIG_FILE);
            let content = serde_json::to_string_pretty(self)?;
            std::fs::write(config_path, content)?;
        }
        Ok(())
    }
}
