//! Credential hashing with Argon2id
//!
//! Every stored password is a PHC string carrying its own salt and
//! parameters. Hashes are never compared by string equality: the salt is
//! random per call, so the same plaintext hashes differently every time.

use argon2::password_hash::SaltString;
use argon2::{
    password_hash, Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier,
    Version,
};
use rand::rngs::OsRng;

/// 19 MiB, 3 passes, single lane.
const MEMORY_COST_KIB: u32 = 19 * 1024;
const TIME_COST: u32 = 3;
const PARALLELISM: u32 = 1;

/// Credential hashing failure
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] password_hash::Error),

    #[error("password hashing task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

fn argon2_config() -> Result<Argon2<'static>, password_hash::Error> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a plaintext password and return the PHC string.
pub fn hash_password(plaintext: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = argon2_config()?;
    let hash = argon2.hash_password(plaintext.as_bytes(), &salt)?.to_string();
    Ok(hash)
}

/// Hash on the blocking pool so request workers keep serving.
pub async fn hash_password_blocking(plaintext: String) -> Result<String, CredentialError> {
    tokio::task::spawn_blocking(move || hash_password(&plaintext)).await?
}

/// Check a plaintext candidate against a stored PHC string.
///
/// A malformed stored hash is a failed verification, not an error.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    match argon2_config() {
        Ok(argon2) => argon2.verify_password(plaintext.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}
