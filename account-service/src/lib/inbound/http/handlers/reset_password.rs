use auth::TokenPlaintext;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::credentials::errors::ValidationError;
use crate::credentials::models::ResetPasswordCommand;
use crate::domain::user::models::Password;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<ApiSuccess<ResetPasswordResponseData>, ApiError> {
    let user_id = state
        .auth_service
        .reset_password(body.try_into_command()?)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResetPasswordResponseData {
            id: user_id.to_string(),
        },
    ))
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    password: String,
    reset_token: String,
    user_id: String,
}

impl ResetPasswordRequest {
    fn try_into_command(self) -> Result<ResetPasswordCommand, ValidationError> {
        Ok(ResetPasswordCommand {
            user_id: UserId::from_string(&self.user_id)?,
            reset_token: TokenPlaintext::parse(&self.reset_token)?,
            password: Password::new(self.password)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetPasswordResponseData {
    pub id: String,
}
