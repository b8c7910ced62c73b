use thiserror::Error;

/// Reasons a compose-box draft is refused before anything is written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Message body is empty")]
    EmptyBody,
}
