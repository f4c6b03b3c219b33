//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::api::middleware::rate_limit::RateGate;
use crate::application::services::{AuthService, LinkService, TokenService};
use crate::infrastructure::Storage;
use crate::infrastructure::cache::CacheService;

/// Cloned into every request; all members are reference counted.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub auth_service: Arc<AuthService>,
    pub rate_gate: Arc<RateGate>,
    pub cache: Arc<dyn CacheService>,
    pub storage: Arc<Storage>,
}

impl AppState {
    /// Wires the services on top of an opened storage backend.
    pub fn new(
        storage: Arc<Storage>,
        tokens: Arc<TokenService>,
        rate_gate: Arc<RateGate>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(storage.links.clone())),
            auth_service: Arc::new(AuthService::new(storage.users.clone(), tokens)),
            rate_gate,
            cache,
            storage,
        }
    }
}
