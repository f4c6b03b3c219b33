//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod fallback;
pub mod health;
pub mod index;
pub mod links;
pub mod redirect;
pub mod shorten;

pub use auth::{login_handler, register_handler};
pub use fallback::{method_not_allowed_as_json, not_found_handler};
pub use health::health_handler;
pub use index::index_handler;
pub use links::list_links_handler;
pub use redirect::{missing_code_handler, redirect_handler};
pub use shorten::shorten_handler;
