use async_trait::async_trait;

use crate::domain::credentials::errors::AuthError;
use crate::domain::credentials::errors::NotificationError;
use crate::domain::credentials::models::LoginCommand;
use crate::domain::credentials::models::PasswordResetNotification;
use crate::domain::credentials::models::ResetPasswordCommand;
use crate::domain::token::models::IssuedToken;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;

/// Port for credential flows: login and password reset.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify email and password and issue an authentication token.
    ///
    /// # Returns
    /// Authentication-scoped token, returned to the caller once
    ///
    /// # Errors
    /// * `Unauthenticated` - Unknown email, wrong password, or unverified email
    /// * `Internal` - Store unavailable or hashing failed
    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, AuthError>;

    /// Issue a password-reset token and hand it to the notification channel.
    ///
    /// Succeeds identically whether or not the email belongs to an account.
    ///
    /// # Errors
    /// * `Internal` - Store unavailable
    async fn request_password_reset(&self, email: &EmailAddress) -> Result<(), AuthError>;

    /// Replace a password using a reset token issued to the same user.
    ///
    /// # Returns
    /// ID of the user whose password changed
    ///
    /// # Errors
    /// * `Unauthenticated` - Token does not resolve with reset scope, or resolves to another user
    /// * `NotFound` - User vanished between token resolution and the update
    /// * `Internal` - Store unavailable or hashing failed
    async fn reset_password(&self, command: ResetPasswordCommand) -> Result<UserId, AuthError>;
}

/// Delivery of password-reset tokens to account holders.
#[async_trait]
pub trait PasswordResetNotifier: Send + Sync + 'static {
    /// Deliver a reset token out of band.
    ///
    /// # Errors
    /// * `SerializationFailed` - Notification could not be encoded
    /// * `PublishFailed` - Delivery channel rejected or timed out
    async fn send_password_reset(
        &self,
        notification: &PasswordResetNotification,
    ) -> Result<(), NotificationError>;
}
