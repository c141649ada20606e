use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a durable key-value store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode statistics: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}
