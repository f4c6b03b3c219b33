//! DTO for stored links returned by `/urls`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Link;

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: String,
    pub original_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub owner_id: Option<String>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url,
            short_url: link.short_code,
            created_at: link.created_at,
            owner_id: link.owner_id,
        }
    }
}
