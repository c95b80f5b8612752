use bcrypt::{hash, verify, BcryptResult};

/// bcrypt cost used for stored account passwords
pub const BCRYPT_COST: u32 = 8;

/// Hash a password using bcrypt
pub fn bcrypt_hash(password: &str) -> BcryptResult<String> {
    hash(password.as_bytes(), BCRYPT_COST)
}

/// Compare a plaintext password against a bcrypt hash.
///
/// A malformed hash counts as a mismatch.
pub fn bcrypt_check(password: &str, hash: &str) -> bool {
    verify(password.as_bytes(), hash).unwrap_or(false)
}
