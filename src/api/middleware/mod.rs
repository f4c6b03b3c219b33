//! HTTP middleware for request processing and protection.
//!
//! Applied by [`crate::routes::app_router`] in a fixed order: tracing, rate
//! gate, then authentication on protected routes only.

pub mod auth;
pub mod rate_limit;
pub mod tracing;
