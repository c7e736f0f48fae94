//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use crate::error::{forbidden, unauthorized, ApiError};
use crate::web::jwt::verify_token;
use crate::web::state::AppState;

/// Middleware that validates the bearer session token and extracts its claims.
///
/// If valid, inserts the decoded `Claims` into request extensions for handlers
/// to use. A missing or malformed Authorization header yields 401; a token
/// that fails signature or expiry checks yields 403.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // 1. Extract the bearer token from the Authorization header
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| unauthorized("Access denied. No token provided."))?;

    // 2. Verify signature and expiry
    let claims = verify_token(token, &state.config.jwt_secret).map_err(|e| {
        debug!("Token verification failed: {}", e);
        forbidden("Invalid or expired token.")
    })?;

    // 3. Insert claims into request extensions
    req.extensions_mut().insert(claims);

    // 4. Continue to the handler
    Ok(next.run(req).await)
}
