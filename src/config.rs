//! Passphrase configuration
//!
//! The codec never stores its passphrase; it is supplied out-of-band through
//! the process environment and handed to each call. Absence is surfaced as a
//! per-call [`CodecError::MissingPassphrase`] so callers fail closed instead
//! of writing secrets in the clear.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::codec::errors::{CodecError, CodecResult};

/// Environment variable holding the master passphrase
pub const PASSPHRASE_ENV: &str = "ENVSEAL_KEY";

/// The process-level master passphrase with secure memory handling
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Passphrase(String);

impl Passphrase {
    /// Wrap a passphrase value, rejecting the empty string.
    pub fn new(value: String) -> CodecResult<Self> {
        if value.is_empty() {
            return Err(CodecError::MissingPassphrase);
        }
        Ok(Self(value))
    }

    /// Borrow the passphrase for a seal/open call.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Passphrase").field(&"[REDACTED]").finish()
    }
}

/// Read the passphrase from [`PASSPHRASE_ENV`].
pub fn passphrase_from_env() -> CodecResult<Passphrase> {
    passphrase_from_var(PASSPHRASE_ENV)
}

/// Read the passphrase from a named environment variable.
///
/// Unset and empty are treated alike: both mean no key source is configured.
pub fn passphrase_from_var(var: &str) -> CodecResult<Passphrase> {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => Passphrase::new(value),
        _ => {
            log::warn!("passphrase variable {} is not set", var);
            Err(CodecError::MissingPassphrase)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passphrase_from_var() {
        std::env::set_var("ENVSEAL_TEST_SET", "hunter2");
        let passphrase = passphrase_from_var("ENVSEAL_TEST_SET").unwrap();
        assert_eq!(passphrase.as_str(), "hunter2");
    }

    #[test]
    fn test_missing_variable_rejected() {
        let err = passphrase_from_var("ENVSEAL_TEST_UNSET").unwrap_err();
        assert!(matches!(err, CodecError::MissingPassphrase));
    }

    #[test]
    fn test_empty_variable_rejected() {
        std::env::set_var("ENVSEAL_TEST_EMPTY", "");
        let err = passphrase_from_var("ENVSEAL_TEST_EMPTY").unwrap_err();
        assert!(matches!(err, CodecError::MissingPassphrase));
    }

    #[test]
    fn test_debug_is_redacted() {
        let passphrase = Passphrase::new("top-secret".to_string()).unwrap();
        let repr = format!("{:?}", passphrase);
        assert!(!repr.contains("top-secret"));
    }
}
