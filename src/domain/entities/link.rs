//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL.
///
/// The short code doubles as the primary key, so `id == short_code` for every
/// stored link. Links are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: String,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub owner_id: Option<String>,
}

impl Link {
    /// Creates a new Link instance keyed by its short code.
    pub fn new(
        short_code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        owner_id: Option<String>,
    ) -> Self {
        Self {
            id: short_code.clone(),
            original_url,
            short_code,
            created_at,
            owner_id,
        }
    }

    /// Returns true if the link was created by `user_id`.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id.as_deref() == Some(user_id)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub short_code: String,
    pub original_url: String,
    pub owner_id: Option<String>,
}
