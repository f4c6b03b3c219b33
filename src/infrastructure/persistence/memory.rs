//! In-process repository implementations.
//!
//! Used when no database is configured and by the HTTP integration tests.
//! Each repository guards its table with a single async `RwLock`, so every
//! check-and-insert runs under one write lock and is atomic.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, NewLink, User};
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::error::AppError;

#[derive(Default)]
struct LinkTable {
    /// short code -> (insertion sequence, link)
    by_code: HashMap<String, (u64, Link)>,
    /// original URL -> short code
    by_url: HashMap<String, String>,
    next_seq: u64,
}

/// Link repository backed by in-memory maps.
///
/// Unlike the PostgreSQL schema, `owner_id` is not checked against the user
/// table: a link may be stored for an owner this process has never seen.
#[derive(Default)]
pub struct MemoryLinkRepository {
    table: RwLock<LinkTable>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert_if_absent(&self, new_link: NewLink) -> Result<Option<Link>, AppError> {
        let mut table = self.table.write().await;

        if table.by_code.contains_key(&new_link.short_code)
            || table.by_url.contains_key(&new_link.original_url)
        {
            return Ok(None);
        }

        let link = Link::new(
            new_link.short_code,
            new_link.original_url,
            Utc::now(),
            new_link.owner_id,
        );

        let seq = table.next_seq;
        table.next_seq += 1;
        table
            .by_url
            .insert(link.original_url.clone(), link.short_code.clone());
        table
            .by_code
            .insert(link.short_code.clone(), (seq, link.clone()));

        Ok(Some(link))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let table = self.table.read().await;
        Ok(table.by_code.get(code).map(|(_, link)| link.clone()))
    }

    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Link>, AppError> {
        let table = self.table.read().await;
        Ok(table
            .by_url
            .get(original_url)
            .and_then(|code| table.by_code.get(code))
            .map(|(_, link)| link.clone()))
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Link>, AppError> {
        let table = self.table.read().await;

        let mut owned: Vec<&(u64, Link)> = table
            .by_code
            .values()
            .filter(|(_, link)| link.is_owned_by(owner_id))
            .collect();

        owned.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at.cmp(&a.created_at).then(seq_b.cmp(seq_a))
        });

        Ok(owned.into_iter().map(|(_, link)| link.clone()).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.table.read().await.by_code.len() as i64)
    }
}

#[derive(Default)]
struct UserTable {
    by_id: HashMap<String, User>,
    /// username -> id
    by_username: HashMap<String, String>,
}

/// User repository backed by in-memory maps.
#[derive(Default)]
pub struct MemoryUserRepository {
    table: RwLock<UserTable>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AppError> {
        let mut table = self.table.write().await;

        if table.by_id.contains_key(&user.id) || table.by_username.contains_key(&user.username) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                serde_json::json!({ "constraint": "users_username_key" }),
            ));
        }

        table
            .by_username
            .insert(user.username.clone(), user.id.clone());
        table.by_id.insert(user.id.clone(), user.clone());

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let table = self.table.read().await;
        Ok(table
            .by_username
            .get(username)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.table.read().await.by_id.len() as i64)
    }
}
