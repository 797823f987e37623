//! Password policy and argon2 hashing.

use argon2::{
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};
use rand::rngs::OsRng;

use crate::constants::{MIN_PASSWORD_LEN, PASSWORD_SPECIAL_CHARS};
use crate::errors::{Error, Result};

const POLICY_MESSAGE: &str =
    "password must be 8+ chars, with an uppercase letter and a number or special char";

/// Checks a candidate password against the registration policy.
///
/// At least [`MIN_PASSWORD_LEN`] characters, only ASCII letters, digits and
/// [`PASSWORD_SPECIAL_CHARS`], with at least one uppercase letter and at
/// least one digit or special character.
pub fn validate_password_policy(password: &str) -> Result<()> {
    let is_special = |c: char| PASSWORD_SPECIAL_CHARS.contains(c);

    let long_enough = password.chars().count() >= MIN_PASSWORD_LEN;
    let allowed = password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || is_special(c));
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit_or_special = password
        .chars()
        .any(|c| c.is_ascii_digit() || is_special(c));

    if long_enough && allowed && has_upper && has_digit_or_special {
        Ok(())
    } else {
        Err(Error::invalid_input(POLICY_MESSAGE))
    }
}

/// Hashes a password into an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Unexpected(format!("Failed to hash password: {e}")))
}

/// Returns `Ok(true)` when `candidate` matches the stored hash.
pub fn verify_password(candidate: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| Error::Unexpected(format!("Invalid stored password hash: {e}")))?;
    match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(other) => Err(Error::Unexpected(format!(
            "Password verification failed: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_accepts_and_rejects_reference_passwords() {
        assert!(validate_password_policy("abc12345").is_err());
        assert!(validate_password_policy("Abc123!@").is_ok());
    }

    #[test]
    fn policy_edge_cases() {
        // too short
        assert!(validate_password_policy("Abc12!").is_err());
        // no digit or special
        assert!(validate_password_policy("Abcdefgh").is_err());
        // special only satisfies the second rule
        assert!(validate_password_policy("Abcdefg!").is_ok());
        // characters outside the allowed set
        assert!(validate_password_policy("Abc 12345").is_err());
        assert!(validate_password_policy("Abc12345?").is_err());
        // ñ is an allowed special character
        assert!(validate_password_policy("Abcdefgñ").is_ok());
    }

    #[test]
    fn hash_round_trip() {
        let hash = hash_password("Abc123!@").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("Abc123!@", &hash).unwrap());
        assert!(!verify_password("Abc123!#", &hash).unwrap());
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(verify_password("whatever", "not-a-phc-string").is_err());
    }
}
