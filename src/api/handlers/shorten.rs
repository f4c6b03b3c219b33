//! Handler for link shortening endpoint.

use axum::{Extension, Json, extract::State};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::extract::ValidatedJson;
use crate::application::services::Claims;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL on behalf of the authenticated caller.
///
/// # Endpoint
///
/// `POST /shorten` (Bearer token required)
///
/// # Request Body
///
/// ```json
/// { "url": "http://example.com" }
/// ```
///
/// # Response
///
/// ```json
/// { "short_url": "f0e6a6a9", "id": "f0e6a6a9" }
/// ```
///
/// Submitting a URL that is already stored returns the existing code with
/// 200, whoever created it.
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is empty or too long.
/// Returns 409 Conflict if the derived code belongs to a different URL.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ValidatedJson(payload): ValidatedJson<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    let link = state
        .link_service
        .shorten(&payload.url, Some(&claims.user_id))
        .await?;

    Ok(Json(link.into()))
}
