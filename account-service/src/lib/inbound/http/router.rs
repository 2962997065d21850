use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_user::create_user;
use super::handlers::current_user::current_user;
use super::handlers::delete_user::delete_user;
use super::handlers::get_user::get_user;
use super::handlers::hello::hello;
use super::handlers::login::login;
use super::handlers::request_password_reset::request_password_reset;
use super::handlers::reset_password::reset_password;
use super::handlers::update_user::update_user;
use super::middleware::authenticate;
use super::middleware::require_identity;
use crate::credentials::ports::AuthServicePort;
use crate::token::ports::TokenServicePort;
use crate::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub auth_service: Arc<dyn AuthServicePort>,
    pub token_service: Arc<dyn TokenServicePort>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    auth_service: Arc<dyn AuthServicePort>,
    token_service: Arc<dyn TokenServicePort>,
) -> Router {
    let state = AppState {
        user_service,
        auth_service,
        token_service,
    };

    let public_routes = Router::new()
        .route("/hello", get(hello))
        .route("/api/users", post(create_user))
        .route("/api/users/login", post(login))
        .route("/api/users/password-reset", post(request_password_reset))
        .route("/api/users/password-reset/confirm", post(reset_password));

    let protected_routes = Router::new()
        .route("/api/users/me", get(current_user))
        .route(
            "/api/users/:user_id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route_layer(middleware::from_fn(require_identity));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
