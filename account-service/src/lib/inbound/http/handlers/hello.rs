use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentIdentity;

/// Public greeting that reports whether the soft gate identified the caller.
pub async fn hello(
    Extension(identity): Extension<CurrentIdentity>,
) -> Result<ApiSuccess<HelloResponseData>, ApiError> {
    let data = match identity.0 {
        Some(user) => HelloResponseData {
            server_message: format!("Hello, {}!", user.email),
            authenticated: true,
        },
        None => HelloResponseData {
            server_message: "Hello, anonymous!".to_string(),
            authenticated: false,
        },
    };

    Ok(ApiSuccess::new(StatusCode::OK, data))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelloResponseData {
    pub server_message: String,
    pub authenticated: bool,
}
