use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum LoggerError {
    #[error("Log File Error: {message} {location}")]
    LogFile {
        message: String,
        location: ErrorLocation,
    },

    #[error("Logger Initialization Error: {message} {location}")]
    Initialize {
        message: String,
        location: ErrorLocation,
    },
}
