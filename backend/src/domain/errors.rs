//! Domain error taxonomy.
//!
//! Validation and not-found failures carry enough structure for the REST
//! layer to pick a status code; everything else (storage, connection) flows
//! through as an opaque internal error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// The request payload or configuration is invalid; rejected at write time.
    #[error("{0}")]
    Validation(String),

    /// The referenced record does not exist for this user.
    #[error("{0}")]
    NotFound(String),

    /// Reading from or writing to the store failed.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        DomainError::NotFound(msg.into())
    }
}
