use peoria_core::ConfigError;
use peoria_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid competition configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Settings(String),
    #[error("no player matches \"{0}\"")]
    UnknownPlayer(String),
    #[error("\"{0}\" matches more than one player; use the player id")]
    AmbiguousPlayer(String),
    #[error("{0}")]
    InvalidArgument(String),
}
