use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::credentials::errors::AuthError;
use crate::domain::credentials::models::LoginCommand;
use crate::domain::credentials::models::PasswordResetNotification;
use crate::domain::credentials::models::ResetPasswordCommand;
use crate::domain::credentials::ports::AuthServicePort;
use crate::domain::credentials::ports::PasswordResetNotifier;
use crate::domain::hashing;
use crate::domain::token::models::IssuedToken;
use crate::domain::token::models::TokenScope;
use crate::domain::token::ports::TokenServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Password checked when no account matches the login email.
const DUMMY_PASSWORD: &str = "no-account-matches-this-email";

/// Domain service for login and password reset.
///
/// Stateless between calls: every input arrives as an argument and every
/// result leaves as a return value.
pub struct AuthService<UR, TS, RN>
where
    UR: UserRepository,
    TS: TokenServicePort,
    RN: PasswordResetNotifier,
{
    users: Arc<UR>,
    tokens: Arc<TS>,
    notifier: Arc<RN>,
    password_hasher: auth::PasswordHasher,
    /// Verified against on unknown emails so every login pays one Argon2 run.
    dummy_hash: String,
    require_verified_email: bool,
}

impl<UR, TS, RN> AuthService<UR, TS, RN>
where
    UR: UserRepository,
    TS: TokenServicePort,
    RN: PasswordResetNotifier,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// Hashes a fixed dummy password once, up front.
    ///
    /// # Arguments
    /// * `users` - User persistence implementation
    /// * `tokens` - Token issuing and resolution
    /// * `notifier` - Out-of-band delivery for reset tokens
    ///
    /// # Returns
    /// Configured auth service that does not require verified emails
    pub fn new(users: Arc<UR>, tokens: Arc<TS>, notifier: Arc<RN>) -> Self {
        let password_hasher = auth::PasswordHasher::new();
        let dummy_hash = password_hasher
            .hash(DUMMY_PASSWORD)
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Failed to prepare dummy password digest");
                String::new()
            });

        Self {
            users,
            tokens,
            notifier,
            password_hasher,
            dummy_hash,
            require_verified_email: false,
        }
    }

    /// Refuse logins from accounts whose email is not verified.
    pub fn require_verified_email(mut self, required: bool) -> Self {
        self.require_verified_email = required;
        self
    }

    /// Digest a login attempt is checked against.
    fn login_digest(&self, user: Option<&User>) -> String {
        match user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash.clone(),
        }
    }

    /// Issue a reset token and hand it to the notifier.
    ///
    /// Runs detached from the request, so failures are logged rather than returned.
    async fn deliver_password_reset(tokens: Arc<TS>, notifier: Arc<RN>, user: User) {
        let issued = match tokens.issue(&user.id, TokenScope::PasswordReset).await {
            Ok(issued) => issued,
            Err(e) => {
                tracing::error!(
                    user_id = %user.id,
                    error = %e,
                    "Failed to issue password reset token"
                );
                return;
            }
        };

        let notification = PasswordResetNotification {
            user_id: user.id,
            email: user.email,
            reset_token: issued.token,
            expires_at: issued.expires_at,
        };

        if let Err(e) = notifier.send_password_reset(&notification).await {
            tracing::error!(
                user_id = %notification.user_id,
                error = %e,
                "Failed to deliver password reset notification"
            );
        }
    }
}

#[async_trait]
impl<UR, TS, RN> AuthServicePort for AuthService<UR, TS, RN>
where
    UR: UserRepository,
    TS: TokenServicePort,
    RN: PasswordResetNotifier,
{
    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, AuthError> {
        let user = self.users.find_by_email(&command.email).await?;

        // Same Argon2 cost whether or not the account exists
        let verified = hashing::verify_password(
            self.password_hasher,
            command.password,
            self.login_digest(user.as_ref()),
        )
        .await;

        let Some(user) = user else {
            tracing::debug!("Login rejected: no account for email");
            return Err(AuthError::Unauthenticated);
        };

        if !verified? {
            tracing::debug!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(AuthError::Unauthenticated);
        }

        if self.require_verified_email && !user.email_verified {
            tracing::debug!(user_id = %user.id, "Login rejected: email not verified");
            return Err(AuthError::Unauthenticated);
        }

        let issued = self
            .tokens
            .issue(&user.id, TokenScope::Authentication)
            .await?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(issued)
    }

    async fn request_password_reset(&self, email: &EmailAddress) -> Result<(), AuthError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            tracing::info!("Password reset requested for unknown email");
            return Ok(());
        };

        // Issuance and delivery happen off the request path; the response
        // returns as soon as the account lookup does
        tokio::spawn(Self::deliver_password_reset(
            Arc::clone(&self.tokens),
            Arc::clone(&self.notifier),
            user,
        ));

        Ok(())
    }

    async fn reset_password(&self, command: ResetPasswordCommand) -> Result<UserId, AuthError> {
        let owner = self
            .tokens
            .resolve(command.reset_token.as_str(), TokenScope::PasswordReset)
            .await?;

        if owner.id != command.user_id {
            tracing::warn!(
                user_id = %command.user_id,
                "Password reset rejected: token belongs to another user"
            );
            return Err(AuthError::Unauthenticated);
        }

        let password_hash =
            hashing::hash_password(self.password_hasher, command.password.into_string()).await?;

        self.users
            .update_password_hash(&owner.id, &password_hash)
            .await?;
        tracing::info!(user_id = %owner.id, "Password reset");

        Ok(owner.id)
    }
}
