pub mod config;
pub mod hero_client;
pub mod logger;
pub mod pipeline;

use models::ModelError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    HeroClient(#[from] hero_client::HeroClientError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Pipeline(#[from] pipeline::PipelineError),

    #[error(transparent)]
    Logger(#[from] logger::LoggerError),

    #[error(transparent)]
    Model(#[from] ModelError),
}
