use common::{ErrorLocation, HttpStatusCode};

use thiserror::Error as ThisError;

/// A failed search request.
///
/// This is the only failure the pipeline delivers to its subscribers. The
/// variant tells transport trouble apart from a rejected or failed request.
#[derive(Debug, ThisError)]
pub enum HeroClientError {
    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Server Error: HTTP {status} - {message} {location}")]
    Server {
        status: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },
}

impl HeroClientError {
    /// Status code of a non-success response; `None` for transport and decode failures.
    pub fn status(&self) -> Option<HttpStatusCode> {
        match self {
            HeroClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<url::ParseError> for HeroClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        HeroClientError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}

impl From<reqwest::Error> for HeroClientError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        // The request URL carries the API key in its query string.
        HeroClientError::Http {
            message: error.without_url().to_string(),
            location: ErrorLocation::caller(),
        }
    }
}

impl From<serde_json::Error> for HeroClientError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        HeroClientError::Json {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}
