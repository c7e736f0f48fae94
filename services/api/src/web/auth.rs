//! services/api/src/web/auth.rs
//!
//! Authentication endpoints: registration, login, and token verification.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{bad_request, unauthorized, ApiError};
use crate::web::jwt::{issue_token, Claims};
use crate::web::state::AppState;
use newsdesk_core::domain::NewUser;
use newsdesk_core::ports::PortError;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub payment_method: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub country: Option<String>,
    pub payment_method: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserView,
}

#[derive(Serialize, ToSchema)]
pub struct VerifyResponse {
    pub message: String,
    pub user: Claims,
}

fn required<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| bad_request(message))
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/auth/register - Create a new user account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Missing required fields"),
        (status = 409, description = "Email already exists"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // 1. Validate required fields
    let missing = "Missing required fields.";
    let first_name = required(&req.first_name, missing)?;
    let last_name = required(&req.last_name, missing)?;
    let email = required(&req.email, missing)?;
    let password = required(&req.password, missing)?;

    let date_of_birth = req
        .date_of_birth
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            NaiveDate::parse_from_str(v, "%Y-%m-%d")
                .map_err(|_| bad_request("dateOfBirth must be formatted YYYY-MM-DD."))
        })
        .transpose()?;

    // 2. Hash the password; the raw secret is never stored or logged
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            error!("Failed to hash password: {:?}", e);
            ApiError::Internal("Failed to hash password".to_string())
        })?
        .to_string();

    // 3. Create the user; a duplicate email surfaces as Conflict (409)
    let new_user = NewUser {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        country: req.nationality.clone(),
        date_of_birth,
        phone: req.phone.clone(),
        email: email.to_string(),
        password_hash,
        payment_method: req.payment_method.clone(),
    };
    state.db.create_user(&new_user).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully!".to_string(),
        }),
    ))
}

/// POST /api/auth/login - Authenticate and receive a bearer session token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = required(&req.email, "Email and password are required.")?;
    let password = required(&req.password, "Email and password are required.")?;

    // 1. Look up the stored credential. An unknown email is reported
    //    identically to a bad password.
    let creds = state.db.get_user_by_email(email).await.map_err(|e| {
        if matches!(e, PortError::NotFound(_)) {
            unauthorized("Invalid email or password.")
        } else {
            ApiError::Port(e)
        }
    })?;

    // 2. Verify the password against the stored argon2 hash
    let parsed_hash = PasswordHash::new(&creds.password_hash).map_err(|e| {
        error!("Failed to parse password hash: {:?}", e);
        ApiError::Internal("Authentication error".to_string())
    })?;
    let valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();
    if !valid {
        return Err(unauthorized("Invalid email or password."));
    }

    // 3. Issue a signed session token (30-day expiry by default)
    let claims = Claims::new(
        creds.id,
        creds.first_name.clone(),
        creds.last_name.clone(),
        state.config.token_ttl_days,
    );
    let token = issue_token(&claims, &state.config.jwt_secret).map_err(|e| {
        error!("Failed to sign token: {:?}", e);
        ApiError::Internal("Failed to issue session token".to_string())
    })?;

    let full_name = format!("{} {}", creds.first_name, creds.last_name);
    Ok(Json(LoginResponse {
        message: "Login successful!".to_string(),
        token,
        user: UserView {
            id: creds.id,
            first_name: creds.first_name,
            last_name: creds.last_name,
            full_name,
            email: creds.email,
            country: creds.country,
            payment_method: creds.payment_method,
        },
    }))
}

/// GET /api/auth/verify - Check a bearer token and echo its claims
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Token is valid", body = VerifyResponse),
        (status = 401, description = "No token provided"),
        (status = 403, description = "Invalid or expired token")
    )
)]
pub async fn verify_handler(
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(VerifyResponse {
        message: "Token is valid".to_string(),
        user: claims,
    }))
}
