//! Utility functions and helpers
//!
//! Hashing and clock helpers shared by the core types.

pub mod crypto;

pub use crypto::{current_timestamp, sha256_digest, sha256_hex};
