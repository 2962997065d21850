use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::credentials::errors::AuthError;
use crate::domain::token::models::TokenScope;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// Identity resolved from a valid authentication token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

/// Outcome of the soft gate, present on every request that passed through it.
#[derive(Debug, Clone, Default)]
pub struct CurrentIdentity(pub Option<AuthenticatedUser>);

/// Soft gate: attach whatever identity the bearer token resolves to, or none.
///
/// Never rejects. A store outage leaves the request anonymous instead of
/// failing routes that do not need an identity.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let identity = match bearer_token(req.headers()).map(str::to_owned) {
        Some(token) => resolve_identity(&state, &token).await,
        None => None,
    };

    req.extensions_mut().insert(CurrentIdentity(identity));
    next.run(req).await
}

/// Hard gate for protected routes.
pub async fn require_identity(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let identity = req
        .extensions()
        .get::<CurrentIdentity>()
        .and_then(|current| current.0.clone())
        .ok_or(ApiError::Unauthorized)?;

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

async fn resolve_identity(state: &AppState, token: &str) -> Option<AuthenticatedUser> {
    match state
        .token_service
        .resolve(token, TokenScope::Authentication)
        .await
    {
        Ok(user) => Some(AuthenticatedUser {
            user_id: user.id,
            email: user.email.as_str().to_string(),
        }),
        Err(AuthError::Internal(detail)) => {
            tracing::error!(error = %detail, "Token resolution failed, continuing anonymously");
            None
        }
        Err(e) => {
            tracing::debug!(error = %e, "Bearer token rejected");
            None
        }
    }
}

/// Extract the token from `Authorization: Bearer <token>`.
///
/// Exactly two space-separated segments, the first being the scheme, and a
/// token of the issued length. Anything else is treated as no credentials.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let mut segments = value.split(' ');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(BEARER_SCHEME), Some(token), None) if token.len() == auth::TOKEN_LENGTH => {
            Some(token)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        let token = "a".repeat(43);
        let headers = headers_with(&format!("Bearer {}", token));
        assert_eq!(bearer_token(&headers), Some(token.as_str()));
    }

    #[test]
    fn test_missing_header_yields_none() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_scheme_without_token_yields_none() {
        assert_eq!(bearer_token(&headers_with("Bearer")), None);
        assert_eq!(bearer_token(&headers_with("Bearer ")), None);
    }

    #[test]
    fn test_wrong_scheme_yields_none() {
        let token = "a".repeat(43);
        assert_eq!(bearer_token(&headers_with(&format!("Basic {}", token))), None);
        assert_eq!(bearer_token(&headers_with(&format!("bearer {}", token))), None);
    }

    #[test]
    fn test_extra_segments_yield_none() {
        let token = "a".repeat(43);
        assert_eq!(
            bearer_token(&headers_with(&format!("Bearer {} extra", token))),
            None
        );
        assert_eq!(
            bearer_token(&headers_with(&format!("Bearer  {}", token))),
            None
        );
    }

    #[test]
    fn test_wrong_length_yields_none() {
        assert_eq!(bearer_token(&headers_with(&format!("Bearer {}", "a".repeat(42)))), None);
        assert_eq!(bearer_token(&headers_with(&format!("Bearer {}", "a".repeat(44)))), None);
    }
}
