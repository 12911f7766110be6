use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    /// Page size outside the fixed set offered by the limit selector.
    #[error("Unsupported Limit Error: {value} (allowed: 10, 25, 100) {location}")]
    UnsupportedLimit { value: u32, location: ErrorLocation },
}
