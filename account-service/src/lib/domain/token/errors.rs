use thiserror::Error;

/// Error for TokenScope parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenScopeError {
    #[error("Unknown token scope: {0}")]
    Unknown(String),
}

/// Error for token persistence operations
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Invalid stored scope: {0}")]
    InvalidScope(#[from] TokenScopeError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
