use thiserror::Error;

/// Result type for repository operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Repository-layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("data source unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("row decode failed: {0}")]
    Decode(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
