//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers a small API.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Deterministic shortening with dedup, lookup, per-user listing
//! - [`services::auth_service::AuthService`] - Registration, login and bearer token authentication
//! - [`services::token_service::TokenService`] - Signed session token issue/validate
//! - [`services::credential_service`] - Password hashing and user id derivation

pub mod services;
