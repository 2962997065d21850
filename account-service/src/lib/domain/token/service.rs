use std::sync::Arc;

use async_trait::async_trait;
use auth::OpaqueToken;
use auth::TokenPlaintext;

use crate::domain::credentials::errors::AuthError;
use crate::domain::token::models::IssuedToken;
use crate::domain::token::models::TokenRecord;
use crate::domain::token::models::TokenScope;
use crate::domain::token::ports::Clock;
use crate::domain::token::ports::SystemClock;
use crate::domain::token::ports::TokenRepository;
use crate::domain::token::ports::TokenServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Domain service issuing and resolving opaque bearer tokens.
///
/// Only digests reach the repository; plaintexts leave through `issue` once.
pub struct TokenService<TR, UR>
where
    TR: TokenRepository,
    UR: UserRepository,
{
    tokens: Arc<TR>,
    users: Arc<UR>,
    clock: Arc<dyn Clock>,
}

impl<TR, UR> TokenService<TR, UR>
where
    TR: TokenRepository,
    UR: UserRepository,
{
    /// Create a token service reading the wall clock.
    ///
    /// # Arguments
    /// * `tokens` - Token persistence implementation
    /// * `users` - User persistence implementation used to resolve token owners
    pub fn new(tokens: Arc<TR>, users: Arc<UR>) -> Self {
        Self::with_clock(tokens, users, Arc::new(SystemClock))
    }

    /// Create a token service with an explicit time source.
    pub fn with_clock(tokens: Arc<TR>, users: Arc<UR>, clock: Arc<dyn Clock>) -> Self {
        Self {
            tokens,
            users,
            clock,
        }
    }
}

#[async_trait]
impl<TR, UR> TokenServicePort for TokenService<TR, UR>
where
    TR: TokenRepository,
    UR: UserRepository,
{
    async fn issue(&self, user_id: &UserId, scope: TokenScope) -> Result<IssuedToken, AuthError> {
        let (plaintext, digest) = OpaqueToken::generate().into_parts();
        let expires_at = self.clock.now() + scope.ttl();

        let record = TokenRecord {
            digest,
            user_id: *user_id,
            scope,
            expires_at,
        };
        self.tokens.insert(&record).await?;

        tracing::debug!(
            user_id = %user_id,
            scope = %scope,
            expires_at = %expires_at,
            "Token issued"
        );

        Ok(IssuedToken {
            token: plaintext.into_string(),
            user_id: *user_id,
            scope,
            expires_at,
        })
    }

    async fn resolve(&self, token: &str, scope: TokenScope) -> Result<User, AuthError> {
        // Shape check first: malformed input never costs a store round trip
        let plaintext = TokenPlaintext::parse(token).map_err(|_| AuthError::Unauthenticated)?;

        let record = self
            .tokens
            .find_by_digest(&plaintext.digest())
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        if record.is_expired_at(self.clock.now()) || record.scope != scope {
            return Err(AuthError::Unauthenticated);
        }

        self.users
            .find_by_id(&record.user_id)
            .await?
            .ok_or(AuthError::Unauthenticated)
    }
}
