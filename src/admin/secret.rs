//! Constant-time matching of the bootstrap secret.
//!
//! Both sides are reduced to SHA-256 digests before comparison, so the loop
//! always runs over 32 bytes and neither the position of the first difference
//! nor the length of the configured secret shows up in timing.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

/// Holds the configured bootstrap secret and compares presented values against it.
#[derive(Clone)]
pub struct SecretMatcher {
    expected: SecretString,
}

impl SecretMatcher {
    #[must_use]
    pub fn new(expected: SecretString) -> Self {
        Self { expected }
    }

    /// Compare a presented secret against the configured one.
    ///
    /// An empty configured secret never matches.
    #[must_use]
    pub fn matches(&self, presented: &str) -> bool {
        let expected = self.expected.expose_secret();
        let equal = matches(presented, expected);
        equal & !expected.is_empty()
    }
}

impl std::fmt::Debug for SecretMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretMatcher")
            .field("expected", &"***")
            .finish()
    }
}

/// Constant-time equality of two strings.
#[must_use]
pub fn matches(presented: &str, expected: &str) -> bool {
    let presented = Sha256::digest(presented.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());

    let mut diff: u8 = 0;
    for (x, y) in presented.iter().zip(expected.iter()) {
        diff |= x ^ y;
    }

    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_equal_strings() {
        assert!(matches("K", "K"));
        assert!(matches("", ""));
        assert!(matches("a much longer bootstrap key", "a much longer bootstrap key"));
    }

    #[test]
    fn rejects_different_strings() {
        assert!(!matches("hello", "world"));
        assert!(!matches("hello", "hell"));
        assert!(!matches("hello", "helloo"));
        assert!(!matches("xello", "hello"));
        assert!(!matches("hellx", "hello"));
    }

    #[test]
    fn matcher_rejects_empty_configured_secret() {
        let matcher = SecretMatcher::new(SecretString::from(""));
        assert!(!matcher.matches(""));
        assert!(!matcher.matches("anything"));
    }

    #[test]
    fn matcher_accepts_configured_secret() {
        let matcher = SecretMatcher::new(SecretString::from("K"));
        assert!(matcher.matches("K"));
        assert!(!matcher.matches("k"));
        assert!(!matcher.matches(""));
    }

    #[test]
    fn debug_redacts_secret() {
        let matcher = SecretMatcher::new(SecretString::from("top-secret"));
        let output = format!("{matcher:?}");
        assert!(!output.contains("top-secret"));
        assert!(output.contains("***"));
    }
}
