//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern. The
//! storage backend is chosen at startup and injected into the services as a
//! trait object, so nothing reaches into ambient state.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link storage with atomic dedup insert
//! - [`UserRepository`] - User accounts
//!
//! Mock implementations are generated via `mockall` for unit tests.

pub mod link_repository;
pub mod user_repository;

pub use link_repository::LinkRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
