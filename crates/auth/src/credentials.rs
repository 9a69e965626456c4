//! Password hashing and verification.
//!
//! One-way, salted, cost-factored hashing. Irreversibility is the security
//! property under test: there is deliberately no way to recover a plaintext.

use thiserror::Error;

/// Work factor for production hashes. Costs tens of milliseconds per hash on
/// commodity hardware.
const HASH_COST: u32 = 12;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Hash a plaintext password with the production work factor.
pub fn hash_password(plaintext: &str) -> Result<String, CredentialError> {
    Ok(bcrypt::hash(plaintext, HASH_COST)?)
}

/// Verify a plaintext password against a stored hash.
///
/// Returns `false` (never an error) for malformed hashes; the hash scheme's
/// own compare function handles timing safety.
pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    bcrypt::verify(plaintext, hash).unwrap_or(false)
}
