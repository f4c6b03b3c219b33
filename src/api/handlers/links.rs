//! Handler for listing the caller's links.

use axum::{Extension, Json, extract::State};

use crate::api::dto::link::LinkResponse;
use crate::application::services::Claims;
use crate::error::AppError;
use crate::state::AppState;

/// Lists links created by the authenticated caller, newest first.
///
/// # Endpoint
///
/// `GET /urls` (Bearer token required)
///
/// # Response
///
/// ```json
/// [
///   {
///     "id": "f0e6a6a9",
///     "original_url": "http://example.com",
///     "short_url": "f0e6a6a9",
///     "created_at": "2025-01-01T12:00:00Z",
///     "owner_id": "2bd806c9..."
///   }
/// ]
/// ```
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_by_owner(&claims.user_id).await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}
