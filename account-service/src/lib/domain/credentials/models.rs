use std::fmt;

use auth::TokenPlaintext;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::credentials::errors::ValidationError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::UserId;
use crate::user::errors::PasswordPolicyError;

/// Login attempt with a syntactically valid email.
///
/// The password is only checked for presence; policy applies at registration.
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl LoginCommand {
    /// # Errors
    /// * `Password(Missing)` - Password is empty
    pub fn new(email: EmailAddress, password: String) -> Result<Self, ValidationError> {
        if password.is_empty() {
            return Err(PasswordPolicyError::Missing.into());
        }
        Ok(Self { email, password })
    }
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Submission of a reset token together with the new password.
#[derive(Debug)]
pub struct ResetPasswordCommand {
    pub user_id: UserId,
    pub reset_token: TokenPlaintext,
    pub password: Password,
}

/// Reset token on its way to the account holder.
#[derive(Clone)]
pub struct PasswordResetNotification {
    pub user_id: UserId,
    pub email: EmailAddress,
    pub reset_token: String,
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for PasswordResetNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordResetNotification")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("reset_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
