pub mod credentials;

pub use credentials::ApiCredentials;

use crate::error::config::ConfigError;
use crate::query::DebouncePolicy;
use crate::{DEFAULT_DEBOUNCE, MARVEL_API_BASE_URL};

use common::ErrorLocation;
use models::PageLimit;

use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use url::Url;

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_VERSION: u32 = 1;
const MAX_DEBOUNCE_MS: u64 = 10_000;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default)]
    pub debounce_policy: DebouncePolicy,
    #[serde(default)]
    pub default_limit: PageLimit,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            debounce_policy: DebouncePolicy::default(),
            default_limit: PageLimit::default(),
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroSearchConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

impl Default for HeroSearchConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api: ApiConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_base_url() -> String {
    MARVEL_API_BASE_URL.to_string()
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE.as_millis() as u64
}

// ============================================
// IMPLEMENTATION
// ============================================

impl HeroSearchConfig {
    /// Load config from {config_dir}/config.json.
    ///
    /// A missing file yields defaults. A file that exists but cannot be read,
    /// parsed or validated is an error: silently searching with a half-applied
    /// config is worse than refusing to start.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::Read {
                location: ErrorLocation::caller(),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: HeroSearchConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {}", e);
            ConfigError::Parse {
                location: ErrorLocation::caller(),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Save config to {config_dir}/config.json (temp file + rename).
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::Write {
            location: ErrorLocation::caller(),
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{}.tmp", CONFIG_FILE_NAME));

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Encode {
            location: ErrorLocation::caller(),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, json).map_err(|e| ConfigError::Write {
            location: ErrorLocation::caller(),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::Write {
            location: ErrorLocation::caller(),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if any value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::Invalid {
                location: ErrorLocation::caller(),
                field: "version",
                reason: format!(
                    "Invalid version: {} (expected 1-{})",
                    self.version, CONFIG_VERSION
                ),
            });
        }

        let base_url = &self.api.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                location: ErrorLocation::caller(),
                field: "api.base_url",
                reason: format!("Invalid base URL format: {}", base_url),
            });
        }

        if let Err(e) = Url::parse(base_url) {
            return Err(ConfigError::Invalid {
                location: ErrorLocation::caller(),
                field: "api.base_url",
                reason: format!("Unparseable base URL {}: {}", base_url, e),
            });
        }

        if self.api.request_timeout_secs == 0
            || self.api.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS
        {
            return Err(ConfigError::Invalid {
                location: ErrorLocation::caller(),
                field: "api.request_timeout_secs",
                reason: format!(
                    "Invalid request timeout: {}s (must be 1-{})",
                    self.api.request_timeout_secs, MAX_REQUEST_TIMEOUT_SECS
                ),
            });
        }

        if self.search.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::Invalid {
                location: ErrorLocation::caller(),
                field: "search.debounce_ms",
                reason: format!(
                    "Invalid debounce window: {}ms (must be at most {})",
                    self.search.debounce_ms, MAX_DEBOUNCE_MS
                ),
            });
        }

        Ok(())
    }
}
