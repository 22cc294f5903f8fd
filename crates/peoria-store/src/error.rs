use std::path::PathBuf;

use peoria_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid competition configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("no saved competition with id {0}")]
    NotFound(String),
}
