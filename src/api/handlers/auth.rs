//! Handlers for registration and login.

use axum::{Json, extract::State};

use crate::api::dto::auth::{CredentialsRequest, TokenResponse};
use crate::api::extract::ValidatedJson;
use crate::error::AppError;
use crate::state::AppState;

/// Creates an account and returns a session token.
///
/// # Endpoint
///
/// `POST /register`
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "password": "secret123" }
/// ```
///
/// # Response
///
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiJ9...", "message": "User registered successfully" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if a field is missing or blank.
/// Returns 409 Conflict if the username is taken.
pub async fn register_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CredentialsRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let session = state
        .auth_service
        .register(&payload.username, &payload.password)
        .await?;

    Ok(Json(TokenResponse {
        token: session.token,
        message: "User registered successfully".to_string(),
    }))
}

/// Verifies credentials and returns a fresh session token.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Errors
///
/// Returns 400 Bad Request if a field is missing or blank.
/// Returns 401 Unauthorized for an unknown user or wrong password; the two
/// cases are indistinguishable to the caller.
pub async fn login_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CredentialsRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let session = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(TokenResponse {
        token: session.token,
        message: "Login successful".to_string(),
    }))
}
