//! Password hashing backed by bcrypt.

use anyhow::Context;
use bcrypt::{DEFAULT_COST, hash, verify};

/// Hashes a password with bcrypt's default cost.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    hash(password, DEFAULT_COST).context("Failed to hash password")
}

/// Hashes a password with an explicit cost. The seeder uses the minimum cost
/// to keep bulk inserts fast.
pub fn hash_password_with_cost(password: &str, cost: u32) -> anyhow::Result<String> {
    hash(password, cost).context("Failed to hash password")
}

/// Checks a password against a stored bcrypt hash.
///
/// Returns `Ok(false)` on mismatch; errors only when the hash itself is malformed.
pub fn verify_password(password: &str, hash: &str) -> anyhow::Result<bool> {
    verify(password, hash).context("Failed to verify password")
}
