//! Core domain entities.
//!
//! Entities are plain data structures without I/O.
//!
//! - [`Link`] - A shortened URL mapping
//! - [`User`] - A registered account
//!
//! Creation inputs use a separate struct (`NewLink`) so that storage-assigned
//! fields such as `created_at` never come from callers.

pub mod link;
pub mod user;

pub use link::{Link, NewLink};
pub use user::User;
