//! Random password generation.
//!
//! Not part of the library protocol, but it lives next to the crypto
//! code because it must draw from a cryptographically secure RNG.
//! `rand::rng()` is a ChaCha-based CSPRNG seeded and periodically
//! reseeded from the operating system.

use rand::Rng;

use crate::errors::{VaultError, Result};

/// Length used when the caller does not ask for a specific one.
pub const DEFAULT_LENGTH: usize = 16;

/// Characters used when the caller does not supply an alphabet.
pub const DEFAULT_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789.,?:;[]~!@#$%^&*()-+/";

/// Generate a password of `length` characters drawn uniformly from `alphabet`.
///
/// `None` for either argument falls back to the defaults above.
pub fn generate_random_password(length: Option<usize>, alphabet: Option<&str>) -> Result<String> {
    let length = length.unwrap_or(DEFAULT_LENGTH);
    let symbols: Vec<char> = alphabet.unwrap_or(DEFAULT_ALPHABET).chars().collect();

    if symbols.is_empty() {
        return Err(VaultError::CommandFailed(
            "password alphabet cannot be empty".into(),
        ));
    }

    let mut rng = rand::rng();
    Ok((0..length)
        .map(|_| symbols[rng.random_range(0..symbols.len())])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_length_is_sixteen() {
        let pw = generate_random_password(None, None).unwrap();
        assert_eq!(pw.chars().count(), 16);
        assert!(pw.chars().all(|c| DEFAULT_ALPHABET.contains(c)));
    }

    #[test]
    fn respects_custom_alphabet_and_length() {
        let pw = generate_random_password(Some(40), Some("xyz")).unwrap();
        assert_eq!(pw.len(), 40);
        assert!(pw.chars().all(|c| "xyz".contains(c)));
    }

    #[test]
    fn zero_length_is_empty() {
        assert_eq!(generate_random_password(Some(0), None).unwrap(), "");
    }

    #[test]
    fn empty_alphabet_is_rejected() {
        assert!(generate_random_password(Some(8), Some("")).is_err());
    }

    #[test]
    fn handles_multibyte_alphabet() {
        let pw = generate_random_password(Some(10), Some("äöü")).unwrap();
        assert_eq!(pw.chars().count(), 10);
    }

    #[test]
    fn consecutive_passwords_differ() {
        let a = generate_random_password(Some(32), None).unwrap();
        let b = generate_random_password(Some(32), None).unwrap();
        assert_ne!(a, b);
    }
}
