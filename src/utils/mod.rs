//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Deterministic short code derivation

pub mod code_generator;
