use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::credentials::errors::ValidationError;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;

/// Accept a reset request. The answer is the same whether or not the email
/// belongs to an account.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(body): Json<RequestPasswordResetRequest>,
) -> Result<ApiSuccess<RequestPasswordResetResponseData>, ApiError> {
    let email = EmailAddress::new(body.email).map_err(ValidationError::from)?;

    state.auth_service.request_password_reset(&email).await?;

    Ok(ApiSuccess::new(
        StatusCode::ACCEPTED,
        RequestPasswordResetResponseData {
            message: "If the account exists, reset instructions have been sent".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestPasswordResetRequest {
    email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestPasswordResetResponseData {
    pub message: String,
}
