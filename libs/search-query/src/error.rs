//! Error types for query construction and search dispatch

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A constructor was handed an argument that breaks one of its invariants.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// User supplied search parameters were rejected by the validators.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The search backend failed to answer a request.
    #[error("Retrieval error: {0}")]
    Retrieval(String),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
