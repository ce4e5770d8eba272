//! # Kart Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     KART_API_URL=http://shop.local:3333                                │
//! │     KART_API_TIMEOUT_SECS=5                                            │
//! │     KART_STORAGE_PATH=/tmp/kart.json                                   │
//! │     KART_STORAGE_KEY=cart                                              │
//! │                                                                         │
//! │  2. TOML Config File (--config, or the platform default)               │
//! │     ~/.config/storefront/kart.toml (Linux)                             │
//! │     ~/Library/Application Support/com.kart.storefront/kart.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # kart.toml
//! [api]
//! base_url = "http://localhost:3333"
//! timeout_secs = 10
//!
//! [storage]
//! path = "/var/lib/kart/storage.json"  # default: <data dir>/storage.json
//! key = "cart"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use kart_api::{parse_base_url, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use kart_core::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// File name of the storage file inside the data directory.
const STORAGE_FILE_NAME: &str = "storage.json";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "kart", "storefront")
}

// =============================================================================
// Sections
// =============================================================================

/// Stock/catalog backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the REST backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Snapshot storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Storage file. `None` means `<data dir>/storage.json`.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Key the cart snapshot is stored under.
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            path: None,
            key: default_key(),
        }
    }
}

// =============================================================================
// Kart Config
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KartConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl KartConfig {
    /// Loads configuration from file, environment and defaults.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path).map_err(|e| {
                    AppError::config(format!("Cannot read {}: {}", path.display(), e))
                })?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if parse_base_url(&self.api.base_url).is_err() {
            return Err(AppError::config(format!(
                "api.base_url must be an absolute http(s) URL with a host, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(AppError::config("api.timeout_secs must be greater than 0"));
        }

        if self.storage.key.trim().is_empty() {
            return Err(AppError::config("storage.key must not be empty"));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies `KART_*` overrides from any variable lookup.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("KART_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup("KART_API_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring invalid KART_API_TIMEOUT_SECS"),
            }
        }

        if let Some(path) = lookup("KART_STORAGE_PATH") {
            debug!(path = %path, "Overriding storage path from environment");
            self.storage.path = Some(PathBuf::from(path));
        }

        if let Some(key) = lookup("KART_STORAGE_KEY") {
            self.storage.key = key;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("kart.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Resolved storage file path.
    pub fn storage_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.storage.path {
            return Ok(path.clone());
        }

        project_dirs()
            .map(|dirs| dirs.data_dir().join(STORAGE_FILE_NAME))
            .ok_or_else(|| {
                AppError::config("No home directory found; set storage.path or KART_STORAGE_PATH")
            })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = KartConfig::default();

        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.storage.key, "cart");
        assert_eq!(config.storage.path, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: KartConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://shop.example.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://shop.example.com");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.storage, StorageSettings::default());
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kart.toml");
        std::fs::write(
            &path,
            r#"
            [api]
            timeout_secs = 3

            [storage]
            path = "/tmp/kart-test/storage.json"
            key = "cart-test"
            "#,
        )
        .unwrap();

        let config = KartConfig::load(Some(path)).unwrap();

        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.storage.key, "cart-test");
        assert_eq!(
            config.storage_path().unwrap(),
            PathBuf::from("/tmp/kart-test/storage.json")
        );
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kart.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        let err = KartConfig::load(Some(path)).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ConfigError);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config: KartConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://from-file:3333"
            timeout_secs = 4

            [storage]
            key = "file-key"
            "#,
        )
        .unwrap();

        config.apply_overrides(env(&[
            ("KART_API_URL", "http://from-env:3333"),
            ("KART_STORAGE_PATH", "/data/storage.json"),
        ]));

        assert_eq!(config.api.base_url, "http://from-env:3333");
        assert_eq!(config.api.timeout_secs, 4);
        assert_eq!(config.storage.key, "file-key");
        assert_eq!(
            config.storage.path,
            Some(PathBuf::from("/data/storage.json"))
        );
    }

    #[test]
    fn test_invalid_timeout_env_is_ignored() {
        let mut config = KartConfig::default();
        config.apply_overrides(env(&[("KART_API_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.api.timeout_secs, 10);

        config.apply_overrides(env(&[("KART_API_TIMEOUT_SECS", "30")]));
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        for url in ["localhost:3333", "http://exa mple.com", "http://[::1", "ftp://host"] {
            let mut config = KartConfig::default();
            config.api.base_url = url.to_string();
            assert!(config.validate().is_err(), "{url:?} should be rejected");
        }

        let mut config = KartConfig::default();
        config.api.base_url = "https://shop.example.com/api".to_string();
        assert!(config.validate().is_ok());

        let mut config = KartConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = KartConfig::default();
        config.storage.key = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
