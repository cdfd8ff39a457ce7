use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ui::theme::ThemePreset;

/// Environment variable that overrides `api.base_url`
pub const API_URL_ENV: &str = "ERTFLIX_API_URL";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub appearance: AppearanceConfig,
}

/// Catalog API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint is resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    "https://api.tvmaze.com/".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

/// Search box behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period before a search request is sent, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn default_debounce_ms() -> u64 {
    500
}

/// Window appearance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppearanceConfig {
    #[serde(default)]
    pub theme: ThemePreset,
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "ertflix", "Ertflix")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        let config_dir = dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, falling back to defaults if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Effective API base URL, honoring `ERTFLIX_API_URL`
    pub fn api_base_url(&self) -> String {
        self.resolve_base_url(std::env::var(API_URL_ENV).ok())
    }

    fn resolve_base_url(&self, env_override: Option<String>) -> String {
        env_override
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.api.base_url.clone())
    }

    /// Read a setting by dotted key, e.g. `search.debounce_ms`
    pub fn get(&self, key: &str) -> Result<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "base_url"] => Ok(self.api.base_url.clone()),
            ["api", "timeout_secs"] => Ok(self.api.timeout_secs.to_string()),
            ["search", "debounce_ms"] => Ok(self.search.debounce_ms.to_string()),
            ["appearance", "theme"] => Ok(self.appearance.theme.key().to_string()),
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
    }

    /// Update a setting by dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "base_url"] => {
                self.api.base_url = value.to_string();
            }
            ["api", "timeout_secs"] => {
                self.api.timeout_secs = value.parse()?;
            }
            ["search", "debounce_ms"] => {
                self.search.debounce_ms = value.parse()?;
            }
            ["appearance", "theme"] => {
                self.appearance.theme = value.parse()?;
            }
            _ => anyhow::bail!("Unknown config key: {}", key),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://api.tvmaze.com/");
        assert_eq!(config.api.timeout(), Duration::from_secs(15));
        assert_eq!(config.search.debounce(), Duration::from_millis(500));
        assert_eq!(config.appearance.theme, ThemePreset::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[search]\ndebounce_ms = 300\n").unwrap();
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.api.base_url, "https://api.tvmaze.com/");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let missing = Config::load_from(&path).unwrap();
        assert_eq!(missing.search.debounce_ms, 500);

        let mut config = Config::default();
        config.api.base_url = "http://localhost:3000/".to_string();
        config.appearance.theme = ThemePreset::Crimson;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api.base_url, "http://localhost:3000/");
        assert_eq!(loaded.appearance.theme, ThemePreset::Crimson);
    }

    #[test]
    fn test_env_override_wins_when_set() {
        let config = Config::default();
        assert_eq!(
            config.resolve_base_url(Some("http://mirror.local/".to_string())),
            "http://mirror.local/"
        );
        assert_eq!(config.resolve_base_url(Some("  ".to_string())), config.api.base_url);
        assert_eq!(config.resolve_base_url(None), config.api.base_url);
    }

    #[test]
    fn test_get_and_set_by_key() {
        let mut config = Config::default();

        config.set("search.debounce_ms", "750").unwrap();
        assert_eq!(config.get("search.debounce_ms").unwrap(), "750");

        config.set("appearance.theme", "ocean").unwrap();
        assert_eq!(config.get("appearance.theme").unwrap(), "ocean");

        assert!(config.set("search.debounce_ms", "soon").is_err());
        assert!(config.set("game.directory", "/tmp").is_err());
        assert!(config.get("nope").is_err());
    }
}
