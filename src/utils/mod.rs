//! Utility functions

pub mod cookie;
pub mod crypto;
pub mod validation;

pub use crypto::{generate_session_id, random_string, sha256_hex};
pub use validation::{normalize_email, normalize_referral_code, validate_phone};
