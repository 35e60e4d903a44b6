//! Codec error types

use thiserror::Error;

use super::models::HEADER_LEN;

/// Errors that can occur while sealing or opening envelopes
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("no encryption passphrase is configured")]
    MissingPassphrase,

    #[error("envelope is not valid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("envelope is {len} bytes, shorter than the {HEADER_LEN}-byte header")]
    TruncatedEnvelope { len: usize },

    #[error("envelope failed authentication")]
    AuthenticationFailed,

    #[error("decrypted payload is not valid UTF-8")]
    InvalidPayload(#[from] std::string::FromUtf8Error),

    #[error("encryption primitive failure")]
    CryptoFailure,
}

impl CodecError {
    /// True for errors that mean the input was never a well-formed envelope,
    /// as opposed to a well-formed one that failed to decrypt.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            CodecError::InvalidEncoding(_)
                | CodecError::TruncatedEnvelope { .. }
                | CodecError::InvalidPayload(_)
        )
    }
}

/// Result type alias for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
