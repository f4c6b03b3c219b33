//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the domain repository traits, the redirect
//! cache, and the storage lifecycle that wires them together.
//!
//! # Modules
//!
//! - [`cache`] - Redirect cache (Redis and no-op implementations)
//! - [`persistence`] - PostgreSQL and in-memory repositories
//! - [`storage`] - Backend selection, migrations, shutdown

pub mod cache;
pub mod persistence;
pub mod storage;

pub use storage::Storage;
