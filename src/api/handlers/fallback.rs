//! Error rendering for requests that match no handler.

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;

/// Unknown path.
pub async fn not_found_handler(uri: Uri) -> AppError {
    AppError::not_found("Route not found", json!({ "path": uri.path() }))
}

/// Rewrites the router's bare `405` into the JSON error body.
///
/// Responses produced by handlers already carry a body and pass through; the
/// router's own 405 is empty and has no content type.
pub async fn method_not_allowed_as_json(response: Response) -> Response {
    if response.status() == StatusCode::METHOD_NOT_ALLOWED
        && !response.headers().contains_key(axum::http::header::CONTENT_TYPE)
    {
        let allow = response.headers().get(axum::http::header::ALLOW).cloned();
        let mut rendered = AppError::MethodNotAllowed.into_response();
        if let Some(allow) = allow {
            rendered
                .headers_mut()
                .insert(axum::http::header::ALLOW, allow);
        }
        return rendered;
    }

    response
}
