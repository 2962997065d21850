use async_trait::async_trait;
use auth::TokenDigest;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::credentials::errors::AuthError;
use crate::domain::token::errors::TokenError;
use crate::domain::token::models::IssuedToken;
use crate::domain::token::models::TokenRecord;
use crate::domain::token::models::TokenScope;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for issuing and resolving bearer tokens.
#[async_trait]
pub trait TokenServicePort: Send + Sync + 'static {
    /// Mint a token bound to a user and scope and persist its digest.
    ///
    /// # Arguments
    /// * `user_id` - Owner of the token
    /// * `scope` - Purpose; determines the TTL
    ///
    /// # Returns
    /// The plaintext token with its expiry, handed out exactly once
    ///
    /// # Errors
    /// * `Internal` - Token store unavailable
    async fn issue(&self, user_id: &UserId, scope: TokenScope) -> Result<IssuedToken, AuthError>;

    /// Resolve an inbound token to the user that owns it.
    ///
    /// The scope is mandatory: a token of any other scope never resolves.
    ///
    /// # Arguments
    /// * `token` - Plaintext token as presented by the caller
    /// * `scope` - Scope the calling operation requires
    ///
    /// # Returns
    /// Owning user entity
    ///
    /// # Errors
    /// * `Unauthenticated` - Malformed, unknown, expired, wrong scope, or owner gone
    /// * `Internal` - Token or user store unavailable
    async fn resolve(&self, token: &str, scope: TokenScope) -> Result<User, AuthError>;
}

/// Persistence operations for the token half of the credential store.
///
/// Rows are write-once, read-many.
#[async_trait]
pub trait TokenRepository: Send + Sync + 'static {
    /// Insert a token row keyed by its digest.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, record: &TokenRecord) -> Result<(), TokenError>;

    /// Retrieve a token row by digest.
    ///
    /// # Returns
    /// Optional token row (None if no row carries this digest)
    ///
    /// # Errors
    /// * `InvalidScope` - Stored scope is not a known value
    /// * `DatabaseError` - Database operation failed
    async fn find_by_digest(&self, digest: &TokenDigest) -> Result<Option<TokenRecord>, TokenError>;
}

/// Source of the current time for expiry decisions.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
