//! User entity.

/// A registered account.
///
/// `id` is derived from `username` (see
/// [`crate::application::services::credential_service::derive_user_id`]),
/// so it is stable across registration attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
}

impl User {
    pub fn new(id: String, username: String, password_hash: String) -> Self {
        Self {
            id,
            username,
            password_hash,
        }
    }
}
