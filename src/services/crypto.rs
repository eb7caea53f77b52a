use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash, PasswordHasher,
    PasswordVerifier, Version,
};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use crate::errors::InternalError;

type HmacSha256 = Hmac<Sha256>;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn peppered_argon2(pepper: &str) -> Result<Argon2<'_>, InternalError> {
    Argon2::new_with_secret(
        pepper.as_bytes(),
        Algorithm::Argon2id,
        Version::V0x13,
        Params::default(),
    )
    .map_err(|e| InternalError::crypto("init_argon2", e.to_string()))
}

/// Hash a password with Argon2id, using the pepper as the secret parameter
///
/// # Returns
/// * `Ok(String)` - PHC-formatted hash
/// * `Err(InternalError)` - Hashing failed
pub fn hash_password(pepper: &str, password: &str) -> Result<String, InternalError> {
    let salt = SaltString::generate(&mut rand_core::OsRng);

    let hash = peppered_argon2(pepper)?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| InternalError::crypto("hash_password", e.to_string()))?;

    Ok(hash.to_string())
}

/// Check a password against a stored PHC hash
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(pepper: &str, password: &str, stored_hash: &str) -> Result<bool, InternalError> {
    let Ok(parsed_hash) = PasswordHash::new(stored_hash) else {
        return Ok(false);
    };

    Ok(peppered_argon2(pepper)?
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Compute HMAC-SHA256 for refresh tokens and return as hexadecimal string
pub fn hmac_sha256_token(key: &str, token: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(token.as_bytes());
    format!("{:x}", mac.finalize().into_bytes())
}

/// Constant-time comparison of a presented secret against the expected one
///
/// Both values are MACed under the expected secret and the tags are checked
/// with `verify_slice`, so timing does not depend on where they differ.
pub fn secrets_match(expected: &str, given: &str) -> bool {
    let Ok(mut reference) = HmacSha256::new_from_slice(expected.as_bytes()) else {
        return false;
    };
    reference.update(expected.as_bytes());
    let tag = reference.finalize().into_bytes();

    let Ok(mut candidate) = HmacSha256::new_from_slice(expected.as_bytes()) else {
        return false;
    };
    candidate.update(given.as_bytes());
    candidate.verify_slice(&tag).is_ok()
}

/// Random lowercase base36 string of the given length
pub fn random_base36(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}

/// Generate a cryptographically secure random password
///
/// Used by `setup-admin` when no password is given on the command line.
///
/// # Returns
/// A 20-character password string of letters, digits and symbols
pub fn generate_secure_password() -> String {
    const PASSWORD_LENGTH: usize = 20;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789\
                             !@#$%^&*()_+-=[]{}|;:,.<>?";

    let mut rng = rand::rng();
    (0..PASSWORD_LENGTH)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
