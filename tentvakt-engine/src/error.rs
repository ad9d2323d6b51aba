use thiserror::Error;
use tokio::task::JoinError;

use tentvakt_config::ConfigError;
use tentvakt_simulator::ScenarioError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    #[error("Scenario validation failed: {0}")]
    Validation(String),

    #[error("Signal source error: {0}")]
    Source(String),

    #[error("Background task error: {0}")]
    Join(#[from] JoinError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
