//! In-memory stand-ins for the outbound ports.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use account_service::credentials::errors::NotificationError;
use account_service::credentials::models::PasswordResetNotification;
use account_service::credentials::ports::PasswordResetNotifier;
use account_service::token::errors::TokenError;
use account_service::token::models::TokenRecord;
use account_service::token::ports::TokenRepository;
use account_service::user::errors::UserError;
use account_service::user::models::EmailAddress;
use account_service::user::models::User;
use account_service::user::models::UserId;
use account_service::user::ports::UserRepository;
use async_trait::async_trait;
use auth::TokenDigest;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        match users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(user)
            }
            None => Err(UserError::NotFound(user.id.to_string())),
        }
    }

    async fn update_password_hash(
        &self,
        id: &UserId,
        password_hash: &str,
    ) -> Result<(), UserError> {
        match self.users.lock().unwrap().get_mut(id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(())
            }
            None => Err(UserError::NotFound(id.to_string())),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.users
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[derive(Default)]
pub struct InMemoryTokenRepository {
    tokens: Mutex<HashMap<String, TokenRecord>>,
}

impl InMemoryTokenRepository {
    pub fn len(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn insert(&self, record: &TokenRecord) -> Result<(), TokenError> {
        self.tokens
            .lock()
            .unwrap()
            .insert(record.digest.as_str().to_string(), record.clone());
        Ok(())
    }

    async fn find_by_digest(&self, digest: &TokenDigest) -> Result<Option<TokenRecord>, TokenError> {
        Ok(self.tokens.lock().unwrap().get(digest.as_str()).cloned())
    }
}

/// Captures reset notifications instead of publishing them.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<PasswordResetNotification>>,
}

impl RecordingNotifier {
    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Most recent reset token delivered to `email`.
    pub fn last_token_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|n| n.email.as_str() == email)
            .map(|n| n.reset_token.clone())
    }

    /// Waits for a reset token to reach `email`; delivery runs detached from the request.
    pub async fn token_for(&self, email: &str) -> Option<String> {
        for _ in 0..100 {
            if let Some(token) = self.last_token_for(email) {
                return Some(token);
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        None
    }
}

#[async_trait]
impl PasswordResetNotifier for RecordingNotifier {
    async fn send_password_reset(
        &self,
        notification: &PasswordResetNotification,
    ) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}
