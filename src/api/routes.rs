//! API route tables.
//!
//! Split by authentication requirement; [`crate::routes::app_router`] puts the
//! auth middleware on [`protected_routes`] only.

use crate::api::handlers::{
    health_handler, index_handler, list_links_handler, login_handler, missing_code_handler,
    redirect_handler, register_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes reachable without a token.
///
/// # Endpoints
///
/// - `GET  /`                 - Plain-text endpoint listing
/// - `GET  /health`           - Storage and cache status
/// - `POST /register`         - Create account, returns token
/// - `POST /login`            - Verify credentials, returns token
/// - `GET  /redirect/{code}`  - 302 to the original URL
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/redirect", get(missing_code_handler))
        .route("/redirect/", get(missing_code_handler))
        .route("/redirect/{code}", get(redirect_handler))
}

/// Routes that require `Authorization: Bearer <token>`.
///
/// # Endpoints
///
/// - `POST /shorten`  - Shorten a URL, owned by the caller
/// - `GET  /urls`     - Caller's links, newest first
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/urls", get(list_links_handler))
}
