use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::error::{AccountError, Result};

pub(crate) const CORRUPT_HASH: &str = "stored password hash is corrupt";

fn hasher() -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
}

/// Salted Argon2id PHC string for a new account.
///
/// Runs inline on the calling task; one call costs tens of milliseconds of CPU.
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    match hasher().hash_password(plain.as_bytes(), &salt) {
        Ok(phc) => Ok(phc.to_string()),
        Err(e) => {
            error!(error = %e, "could not derive password hash for new account");
            Err(AccountError::Storage("password hashing failed".into()))
        }
    }
}

/// Check `plain` against a stored PHC string in constant time.
///
/// A mismatch is `Ok(false)`. A row whose hash does not parse, or that the
/// verifier refuses for any reason other than a mismatch, is reported as
/// corrupt data.
pub fn verify_password(plain: &str, stored: &str) -> Result<bool> {
    let phc = PasswordHash::new(stored).map_err(|e| {
        error!(error = %e, "stored hash is not a PHC string");
        AccountError::Storage(CORRUPT_HASH.into())
    })?;
    match hasher().verify_password(plain.as_bytes(), &phc) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => {
            error!(error = %e, algorithm = %phc.algorithm, "stored hash rejected by verifier");
            Err(AccountError::Storage(CORRUPT_HASH.into()))
        }
    }
}
