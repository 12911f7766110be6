//! API credential wrapper with redacted Debug/Display output.
//!
//! The Marvel public key travels inside every `QueryParams` value, which is
//! logged at debug level on each emission. Wrapping it keeps the key out of
//! those lines while still allowing structural comparison of parameter sets.

use crate::{ErrorLocation, RedactError};

use std::fmt;

use serde::ser::Error;
use zeroize::Zeroize;

/// An API key that never exposes its value in logs or debug output.
#[derive(Clone)]
pub struct RedactedApiKey {
    inner: String,
}

impl RedactedApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { inner: key.into() }
    }

    /// The raw key, for building the outbound request only.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Key length (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.trim().is_empty()
    }
}

// Parameter sets are deduplicated structurally, which includes the key.
impl PartialEq for RedactedApiKey {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for RedactedApiKey {}

impl fmt::Debug for RedactedApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedApiKey([REDACTED; {}])", self.inner.len())
    }
}

impl fmt::Display for RedactedApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED API KEY]")
    }
}

impl Drop for RedactedApiKey {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl serde::Serialize for RedactedApiKey {
    #[track_caller]
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            message: String::from("RedactedApiKey cannot be serialized - use as_str() explicitly"),
            location: ErrorLocation::caller(),
        }))
    }
}
