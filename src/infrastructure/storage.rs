//! Storage lifecycle: opens the configured backend at startup and closes it on shutdown.

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::infrastructure::persistence::{
    MemoryLinkRepository, MemoryUserRepository, PgLinkRepository, PgUserRepository,
};

enum Backend {
    Postgres(PgPool),
    Memory,
}

/// Opened storage backend and the repositories bound to it.
///
/// Constructed once in [`crate::server::run`] and handed to the services;
/// there is no global store.
pub struct Storage {
    backend: Backend,
    pub links: Arc<dyn LinkRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Storage {
    /// Opens PostgreSQL when `DATABASE_URL` (or its components) is configured,
    /// otherwise an in-process store.
    ///
    /// Pending migrations are applied before the pool is handed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is configured but unreachable or a
    /// migration fails.
    pub async fn connect(config: &Config) -> Result<Self> {
        let Some(database_url) = config.database_url.as_deref() else {
            tracing::warn!("No database configured; links and users live in memory only");
            return Ok(Self::in_memory());
        };

        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .idle_timeout(Duration::from_secs(config.db_idle_timeout))
            .max_lifetime(Duration::from_secs(config.db_max_lifetime))
            .connect(database_url)
            .await
            .context("Failed to connect to database")?;
        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to apply migrations")?;

        Ok(Self::postgres(pool))
    }

    /// Storage backed by a PostgreSQL pool that is already migrated.
    pub fn postgres(pool: PgPool) -> Self {
        let shared = Arc::new(pool.clone());
        Self {
            links: Arc::new(PgLinkRepository::new(shared.clone())),
            users: Arc::new(PgUserRepository::new(shared)),
            backend: Backend::Postgres(pool),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            links: Arc::new(MemoryLinkRepository::new()),
            users: Arc::new(MemoryUserRepository::new()),
            backend: Backend::Memory,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory => "memory",
        }
    }

    /// Round-trips a trivial query to the backend.
    pub async fn ping(&self) -> Result<()> {
        match &self.backend {
            Backend::Postgres(pool) => {
                sqlx::query("SELECT 1")
                    .execute(pool)
                    .await
                    .context("Database ping failed")?;
                Ok(())
            }
            Backend::Memory => Ok(()),
        }
    }

    /// Closes the pool and waits for checked-out connections to be returned.
    pub async fn close(&self) {
        if let Backend::Postgres(pool) = &self.backend {
            pool.close().await;
            tracing::info!("Database pool closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_storage_is_always_reachable() {
        let storage = Storage::in_memory();

        assert_eq!(storage.backend_name(), "memory");
        assert!(storage.ping().await.is_ok());
        assert_eq!(storage.links.count().await.unwrap(), 0);

        storage.close().await;
    }
}
