//! Error types for the cafe API

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CafeError>;

#[derive(Error, Debug)]
pub enum CafeError {
    #[error("Cafe not found: {0}")]
    NotFound(i64),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("No cafes available")]
    EmptyCollection,

    #[error("Authorization failed: API key mismatch")]
    AuthorizationFailure,

    #[error("Database error: {0}")]
    Database(String),
}

impl CafeError {
    /// Whether the caller can fix this by changing the request.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, CafeError::Database(_))
    }
}
