//! Shared utilities for the hero search workspace.
//!
//! Everything here is domain-agnostic plumbing used by both `models` and
//! `hero-core`:
//!
//! - [`ErrorLocation`] for `file:line:column` tracking in error messages
//! - [`RedactedApiKey`] for credentials that must never reach a log line
//! - [`HttpStatusCode`] for classifying failed upstream responses

pub mod error;
pub mod http_status;
pub mod redacted_key;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_key::RedactedApiKey;

#[cfg(test)]
mod tests;
