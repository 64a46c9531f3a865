//! # Credentials
//!
//! Password hashing for staff accounts.
//!
//! Passwords are stored as Argon2id PHC strings with a random per-password
//! salt. Verification goes through `PasswordVerifier`, which compares in
//! constant time.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::error::{CoreError, CoreResult};

/// Hashes a password for storage.
///
/// ## Example
/// ```rust
/// use cafe_core::credentials::{hash_password, verify_password};
///
/// let phc = hash_password("latte-art").unwrap();
/// assert!(phc.starts_with("$argon2"));
/// assert!(verify_password("latte-art", &phc));
/// ```
pub fn hash_password(password: &str) -> CoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CoreError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Stand-in hash verified when no user matches the submitted name.
///
/// Uses the `Argon2::default()` parameters so a lookup miss costs the same
/// single Argon2 run as a wrong password. The all-zero output never matches.
pub const DUMMY_PHC: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Verifies a login attempt against the stored hash of the named user.
///
/// `stored` is `None` when the name is unknown; the password is then run
/// against [`DUMMY_PHC`] and the result is always `false`.
pub fn verify_credentials(password: &str, stored: Option<&str>) -> bool {
    match stored {
        Some(phc) => verify_password(password, phc),
        None => {
            verify_password(password, DUMMY_PHC);
            false
        }
    }
}

/// Verifies a password against a stored PHC string.
///
/// A malformed stored hash never matches.
pub fn verify_password(password: &str, phc: &str) -> bool {
    let parsed_hash = match PasswordHash::new(phc) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
