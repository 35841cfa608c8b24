//! Legacy plaintext password compatibility.
//!
//! The system this service replaced wrote `users.password` verbatim and
//! compared it byte for byte on login. Those rows are still readable, and a
//! deployment that shares the table with the old system can keep writing
//! plaintext (`FLEXILEARN_PASSWORD_STORAGE=plaintext`). All plaintext handling
//! lives in this module; nothing else in the crate touches a raw stored
//! password.
//!
//! A stored value counts as hashed only when it parses as an Argon2 PHC string
//! carrying a hash. Anything else, including passwords that merely start with
//! `$argon2`, is plaintext.

use argon2::password_hash::PasswordHash;

/// Parse a stored value as an Argon2 hash, or `None` if it is plaintext.
#[must_use]
pub fn parse_hash(stored: &str) -> Option<PasswordHash<'_>> {
    PasswordHash::new(stored)
        .ok()
        .filter(|hash| hash.algorithm.as_str().starts_with("argon2") && hash.hash.is_some())
}

/// Whether a stored password value predates hashing.
#[must_use]
pub fn is_plaintext(stored: &str) -> bool {
    parse_hash(stored).is_none()
}

/// Stored form of a password under the legacy policy: the password itself.
#[must_use]
pub fn encode(password: &str) -> String {
    password.to_owned()
}

/// Exact comparison against a plaintext stored value.
#[must_use]
pub fn matches(candidate: &str, stored: &str) -> bool {
    candidate == stored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_plaintext() {
        assert!(is_plaintext("p"));
        assert!(is_plaintext("argon2 is my password"));
        assert!(is_plaintext("$argon2rocks"));
        assert!(is_plaintext("$argon2id"));
        assert!(is_plaintext("$argon2id$garbage"));
        assert!(is_plaintext("$pbkdf2$x"));
        assert!(!is_plaintext(
            "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHRzYWx0$aGFzaGhhc2hoYXNoaGFzaA"
        ));
    }

    #[test]
    fn test_matches_is_exact() {
        assert!(matches("p", "p"));
        assert!(!matches("P", "p"));
        assert!(!matches("p ", "p"));
        assert!(!matches("", "p"));
        assert!(matches("", ""));
    }

    #[test]
    fn test_encode_is_verbatim() {
        assert_eq!(encode(" Secret! "), " Secret! ");
    }
}
