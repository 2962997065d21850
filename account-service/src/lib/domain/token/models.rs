use std::fmt;
use std::str::FromStr;

use auth::TokenDigest;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::token::errors::TokenScopeError;
use crate::domain::user::models::UserId;

/// Declared purpose of a token.
///
/// A token only ever authorizes operations of its own scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenScope {
    Authentication,
    PasswordReset,
}

impl TokenScope {
    /// Time from issuance to expiry. Fixed policy, never caller supplied.
    pub fn ttl(self) -> Duration {
        match self {
            TokenScope::Authentication => Duration::days(30),
            TokenScope::PasswordReset => Duration::hours(1),
        }
    }

    /// Value persisted in the `scope` column.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenScope::Authentication => "authentication",
            TokenScope::PasswordReset => "password",
        }
    }
}

impl FromStr for TokenScope {
    type Err = TokenScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "authentication" => Ok(TokenScope::Authentication),
            "password" => Ok(TokenScope::PasswordReset),
            other => Err(TokenScopeError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for TokenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted token row. The plaintext is never part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub digest: TokenDigest,
    pub user_id: UserId,
    pub scope: TokenScope,
    pub expires_at: DateTime<Utc>,
}

impl TokenRecord {
    /// A token stops being usable the instant `now` reaches its expiry.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Result of issuing a token, returned to the caller exactly once.
///
/// `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub user_id: UserId,
    pub scope: TokenScope,
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("scope", &self.scope)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_policy() {
        assert_eq!(TokenScope::Authentication.ttl(), Duration::days(30));
        assert_eq!(TokenScope::PasswordReset.ttl(), Duration::hours(1));
    }

    #[test]
    fn test_scope_storage_values() {
        assert_eq!(TokenScope::Authentication.as_str(), "authentication");
        assert_eq!(TokenScope::PasswordReset.as_str(), "password");
        assert_eq!(
            "password".parse::<TokenScope>(),
            Ok(TokenScope::PasswordReset)
        );
        assert_eq!(
            "admin".parse::<TokenScope>(),
            Err(TokenScopeError::Unknown("admin".to_string()))
        );
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let record = TokenRecord {
            digest: TokenDigest::of("token"),
            user_id: UserId::new(),
            scope: TokenScope::Authentication,
            expires_at: now,
        };

        assert!(record.is_expired_at(now));
        assert!(record.is_expired_at(now + Duration::seconds(1)));
        assert!(!record.is_expired_at(now - Duration::seconds(1)));
    }
}
