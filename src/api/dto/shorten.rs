//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request to shorten a single URL.
///
/// The URL is stored byte for byte; it is neither parsed nor normalized.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    // Mirrors `link_service::MAX_URL_LENGTH`.
    #[validate(length(max = 8192))]
    pub url: String,
}

/// `short_url` is the bare 8-character code, `id` the row identifier (equal to it).
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub id: String,
}

impl From<Link> for ShortenResponse {
    fn from(link: Link) -> Self {
        Self {
            short_url: link.short_code,
            id: link.id,
        }
    }
}
