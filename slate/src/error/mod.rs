use slate_chain_client_interface::ChainClientError;
use slate_storage_client_interface::StorageClientError;
use thiserror::Error;

/// Result type for slate operations
pub type SlateResult<T> = Result<T, SlateError>;

/// Error types for the slate service
#[derive(Error, Debug)]
pub enum SlateError {
    #[error("Storage client error: {0}")]
    StorageClientError(#[from] StorageClientError),

    #[error("Chain client error: {0}")]
    ChainClientError(#[from] ChainClientError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
