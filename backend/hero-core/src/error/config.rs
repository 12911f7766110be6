use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error;

/// Failures loading, saving or validating `config.json`, and reading credentials.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Read Error: {path}: {source} {location}")]
    Read {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config Parse Error: {path}: {reason} {location}")]
    Parse {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Config Write Error: {path}: {source} {location}")]
    Write {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config Encode Error: {reason} {location}")]
    Encode {
        location: ErrorLocation,
        reason: String,
    },

    /// A value parsed fine but is out of range. `field` is the dotted JSON path.
    #[error("Invalid Config Value: {field}: {reason} {location}")]
    Invalid {
        location: ErrorLocation,
        field: &'static str,
        reason: String,
    },

    #[error("Missing Credential Error: {variable} is not set or empty {location}")]
    MissingCredential {
        location: ErrorLocation,
        variable: &'static str,
    },
}
