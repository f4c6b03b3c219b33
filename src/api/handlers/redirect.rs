//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /redirect/{code}`
///
/// # Request Flow
///
/// 1. Check cache for the code
/// 2. On cache miss, load the link from storage
/// 3. Populate the cache in the background
/// 4. Return 302 Found with `Location` set to the stored URL, verbatim
///
/// Cache errors are logged and fall back to storage.
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown or malformed.
/// Returns 500 Internal Server Error if the stored URL cannot be sent as a
/// `Location` header.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = match state.cache.get_url(&code).await {
        Ok(Some(cached)) => cached,
        Ok(None) => {
            let link = state.link_service.get_link_by_code(&code).await?;

            let cache = state.cache.clone();
            let code = link.short_code.clone();
            let url = link.original_url.clone();
            tokio::spawn(async move {
                if let Err(e) = cache.set_url(&code, &url, None).await {
                    warn!("Failed to cache redirect: {}", e);
                }
            });

            link.original_url
        }
        Err(e) => {
            warn!("Cache error: {}", e);
            state.link_service.get_link_by_code(&code).await?.original_url
        }
    };

    let location = HeaderValue::try_from(original_url).map_err(|_| {
        AppError::internal(
            "Stored URL is not a valid Location header",
            json!({ "code": code }),
        )
    })?;

    debug!(code = %code, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}

/// `GET /redirect` and `GET /redirect/` carry no code.
///
/// # Errors
///
/// Always returns 400 Bad Request.
pub async fn missing_code_handler() -> AppError {
    AppError::bad_request("Short code is required", json!({ "field": "code" }))
}
