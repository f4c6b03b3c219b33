//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Authenticates requests using session tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Verify signature and expiry
/// 3. Insert the token [`Claims`](crate::application::services::Claims) into
///    request extensions
/// 4. Continue to next middleware/handler
///
/// Handlers read the caller identity with `Extension<Claims>` and never parse
/// tokens themselves.
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing or not a Bearer credential
/// - Token signature is invalid or the token is malformed
/// - Token has expired
///
/// Adds `WWW-Authenticate: Bearer` header to 401 responses per RFC 6750.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/urls", get(list_links_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            tracing::debug!(path = %parts.uri.path(), "Missing or malformed Authorization header");
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let claims = st.auth_service.authenticate(&token)?;
    parts.extensions.insert(claims);

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}
