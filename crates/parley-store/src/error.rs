use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not be reached or refused the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Documents must be JSON objects.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
