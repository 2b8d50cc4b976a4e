use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Password hashing failed: {0}")]
    HashingError(String),

    #[error("Password verification failed")]
    VerificationError,

    #[error("Invalid signing key: {0}")]
    InvalidKey(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationError(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Failures reported by a [`crate::UserStore`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with the same key already exists.
    #[error("Record already exists: {0}")]
    Conflict(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;
