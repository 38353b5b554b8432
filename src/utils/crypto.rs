//! Random identifiers and digests

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::constants::SESSION_ID_LENGTH;

pub const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
pub const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `length` characters drawn uniformly from `charset` using the thread RNG
pub fn random_string(charset: &[u8], length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| charset[rng.random_range(0..charset.len())] as char)
        .collect()
}

/// Fresh opaque session id, carried as the token's `jti`
pub fn generate_session_id() -> String {
    random_string(ALPHANUMERIC, SESSION_ID_LENGTH)
}

/// Hex-encoded SHA-256 of `input`
pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}
