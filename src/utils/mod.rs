//! Utility functions

pub mod crypto;
pub mod validation;

pub use crypto::hash_string;
pub use validation::{validate_elapsed_seconds, validate_fingerprint, validate_points};
