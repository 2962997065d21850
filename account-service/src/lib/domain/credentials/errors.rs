use auth::TokenFormatError;
use thiserror::Error;

use crate::domain::hashing::HashingError;
use crate::domain::token::errors::TokenError;
use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserError;
use crate::user::errors::UserIdError;

/// Malformed caller input. Describes shape only, so it is safe to disclose.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid user ID: {0}")]
    UserId(#[from] UserIdError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid name: {0}")]
    Name(#[from] NameError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),

    #[error("Invalid token: {0}")]
    Token(#[from] TokenFormatError),
}

/// Outcome taxonomy for every authentication and credential operation.
///
/// `Unauthenticated` carries no cause on purpose: unknown email, wrong password,
/// unverified email, and unknown/expired/mis-scoped tokens are indistinguishable.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUserId(e) => ValidationError::from(e).into(),
            UserError::InvalidEmail(e) => ValidationError::from(e).into(),
            UserError::InvalidName(e) => ValidationError::from(e).into(),
            UserError::InvalidPassword(e) => ValidationError::from(e).into(),
            UserError::NotFound(id) => AuthError::NotFound(id),
            UserError::Hashing(e) => AuthError::Internal(e.to_string()),
            UserError::EmailAlreadyExists(_) | UserError::DatabaseError(_) => {
                AuthError::Internal(err.to_string())
            }
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<HashingError> for AuthError {
    fn from(err: HashingError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

/// Error for outbound notification delivery
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("Failed to serialize notification: {0}")]
    SerializationFailed(String),

    #[error("Failed to publish notification to broker: {0}")]
    PublishFailed(String),
}
