use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::credentials::models::PasswordResetNotification;

/// Serializable envelope for notifications consumed by the mail-delivery service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum NotificationMessage {
    PasswordResetRequested(PasswordResetRequestedMessage),
}

/// Serializable message carrying a reset token to its account holder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetRequestedMessage {
    pub event_id: String,
    pub user_id: String,
    pub email: String,
    pub reset_token: String,
    pub expires_at: DateTime<Utc>,
    pub requested_at: DateTime<Utc>,
}

impl From<&PasswordResetNotification> for NotificationMessage {
    fn from(notification: &PasswordResetNotification) -> Self {
        NotificationMessage::PasswordResetRequested(PasswordResetRequestedMessage {
            event_id: uuid::Uuid::new_v4().to_string(),
            user_id: notification.user_id.to_string(),
            email: notification.email.as_str().to_string(),
            reset_token: notification.reset_token.clone(),
            expires_at: notification.expires_at,
            requested_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserId;

    #[test]
    fn test_password_reset_message_shape() {
        let user_id = UserId::new();
        let notification = PasswordResetNotification {
            user_id,
            email: EmailAddress::new("a@example.com".to_string()).unwrap(),
            reset_token: "t".repeat(43),
            expires_at: Utc::now(),
        };

        let json = serde_json::to_value(NotificationMessage::from(&notification)).unwrap();

        assert_eq!(json["event_type"], "password_reset_requested");
        assert_eq!(json["user_id"], user_id.to_string());
        assert_eq!(json["email"], "a@example.com");
        assert_eq!(json["reset_token"], "t".repeat(43));
        assert!(json["event_id"].is_string());
    }
}
