use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum PipelineError {
    /// A pipeline task panicked instead of stopping cleanly.
    #[error("Pipeline Task Error: {task}: {message} {location}")]
    Task {
        task: &'static str,
        message: String,
        location: ErrorLocation,
    },
}
