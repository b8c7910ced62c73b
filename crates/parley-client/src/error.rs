use parley_shared::DraftError;
use parley_store::StoreError;
use thiserror::Error;

/// Failures of a sign-in or sign-up attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email is required")]
    MissingEmail,

    #[error("Password is required")]
    MissingPassword,

    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Rejected by the authentication provider; carries its message.
    #[error("{0}")]
    Provider(String),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Message not sent: {0}")]
    Draft(#[from] DraftError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
