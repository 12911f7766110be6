//! Search API credentials.
//!
//! The public key is the only environment surface of the crate. It is read
//! from `MARVEL_PUBLIC_KEY`, optionally seeded from a `.env` file.

use crate::error::config::ConfigError;

use common::{ErrorLocation, RedactedApiKey};

use log::{debug, info};

pub const PUBLIC_KEY_ENV: &str = "MARVEL_PUBLIC_KEY";

#[derive(Debug, Clone)]
pub struct ApiCredentials {
    public_key: RedactedApiKey,
}

impl ApiCredentials {
    #[track_caller]
    pub fn new(public_key: RedactedApiKey) -> Result<Self, ConfigError> {
        if public_key.is_empty() {
            return Err(ConfigError::MissingCredential {
                location: ErrorLocation::caller(),
                variable: PUBLIC_KEY_ENV,
            });
        }
        Ok(Self { public_key })
    }

    /// Read the key from the process environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) => debug!("No .env file loaded: {}", e),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the key through an arbitrary variable lookup.
    #[track_caller]
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = lookup(PUBLIC_KEY_ENV).unwrap_or_default();
        let credentials = Self::new(RedactedApiKey::new(value.trim()))?;
        info!(
            "Loaded API public key from {} ({} chars)",
            PUBLIC_KEY_ENV,
            credentials.public_key.len()
        );
        Ok(credentials)
    }

    pub fn public_key(&self) -> &RedactedApiKey {
        &self.public_key
    }
}
