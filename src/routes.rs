//! Top-level router: route tables plus the interceptor chain.
//!
//! # Route Structure
//!
//! - `GET  /`, `/health`, `/redirect/{code}`, `POST /register`, `/login` - public
//! - `POST /shorten`, `GET /urls` - Bearer token required
//!
//! # Middleware (outermost first)
//!
//! 1. **Tracing** - Request span and response log
//! 2. **Rate gate** - Token bucket shared by every route, fallback included
//! 3. **Authentication** - Protected routes only; injects token claims
//!
//! Unknown paths render `404` and wrong methods `405`, both as JSON errors.

use crate::api;
use crate::api::handlers::{method_not_allowed_as_json, not_found_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .merge(api::routes::public_routes())
        .merge(protected)
        .fallback(not_found_handler)
        .layer(middleware::map_response(method_not_allowed_as_json))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::layer,
        ))
        .layer(tracing::layer())
        .with_state(state)
}
