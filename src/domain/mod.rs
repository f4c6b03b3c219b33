//! Domain layer containing business entities and storage contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependency on the HTTP layer. Repository traits are
//! implemented in [`crate::infrastructure::persistence`] and consumed by the
//! services in [`crate::application::services`].

pub mod entities;
pub mod repositories;
