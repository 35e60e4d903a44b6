//! Envelope layout and key material types

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::errors::{CodecError, CodecResult};

/// Salt size in bytes for key derivation
pub const SALT_LEN: usize = 32;

/// Nonce size in bytes for AES-256-GCM as used by the envelope layout
pub const NONCE_LEN: usize = 16;

/// Authentication tag size in bytes
pub const TAG_LEN: usize = 16;

/// Derived key size in bytes (AES-256)
pub const KEY_LEN: usize = 32;

/// Fixed-field prefix of every envelope: salt + nonce + tag
pub const HEADER_LEN: usize = SALT_LEN + NONCE_LEN + TAG_LEN;

/// The decoded form of a sealed value.
///
/// The byte layout `salt ‖ nonce ‖ tag ‖ ciphertext` is a storage format:
/// envelopes written by older builds must keep decoding, so the field sizes
/// above never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Per-seal random salt for key derivation
    pub salt: [u8; SALT_LEN],
    /// Per-seal random nonce for the cipher
    pub nonce: [u8; NONCE_LEN],
    /// GCM authentication tag
    pub tag: [u8; TAG_LEN],
    /// Encrypted payload, same length as the plaintext
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Encode to the text-safe form handed to the storage layer.
    pub fn encode(&self) -> String {
        let mut combined = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        combined.extend_from_slice(&self.salt);
        combined.extend_from_slice(&self.nonce);
        combined.extend_from_slice(&self.tag);
        combined.extend_from_slice(&self.ciphertext);
        BASE64.encode(combined)
    }

    /// Decode a stored string back into an envelope.
    ///
    /// Fails with [`CodecError::InvalidEncoding`] on bad base64 and
    /// [`CodecError::TruncatedEnvelope`] when the decoded bytes cannot hold
    /// the fixed fields. A decode success says nothing about authenticity;
    /// that is only established by opening the envelope.
    pub fn decode(encoded: &str) -> CodecResult<Self> {
        let combined = BASE64.decode(encoded)?;

        if combined.len() < HEADER_LEN {
            return Err(CodecError::TruncatedEnvelope {
                len: combined.len(),
            });
        }

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&combined[..SALT_LEN]);

        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&combined[SALT_LEN..SALT_LEN + NONCE_LEN]);

        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&combined[SALT_LEN + NONCE_LEN..HEADER_LEN]);

        Ok(Self {
            salt,
            nonce,
            tag,
            ciphertext: combined[HEADER_LEN..].to_vec(),
        })
    }
}

/// Ephemeral derived key with secure memory handling
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The 256-bit key
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Create a new derived key from raw bytes
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_encode_decode() {
        let envelope = Envelope {
            salt: [1u8; SALT_LEN],
            nonce: [2u8; NONCE_LEN],
            tag: [3u8; TAG_LEN],
            ciphertext: vec![4, 5, 6, 7],
        };

        let encoded = envelope.encode();
        let decoded = Envelope::decode(&encoded).unwrap();
        assert_eq!(envelope, decoded);
    }

    #[test]
    fn test_decode_empty_ciphertext() {
        let envelope = Envelope {
            salt: [0u8; SALT_LEN],
            nonce: [0u8; NONCE_LEN],
            tag: [0u8; TAG_LEN],
            ciphertext: Vec::new(),
        };

        let decoded = Envelope::decode(&envelope.encode()).unwrap();
        assert!(decoded.ciphertext.is_empty());
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        let err = Envelope::decode("not!valid!base64!").unwrap_err();
        assert!(matches!(err, CodecError::InvalidEncoding(_)));
    }

    #[test]
    fn test_decode_rejects_short_input() {
        let short = BASE64.encode([0u8; HEADER_LEN - 1]);
        let err = Envelope::decode(&short).unwrap_err();
        assert!(matches!(
            err,
            CodecError::TruncatedEnvelope {
                len
            } if len == HEADER_LEN - 1
        ));
    }

    #[test]
    fn test_derived_key_debug_is_redacted() {
        let key = DerivedKey::new([0xAB; KEY_LEN]);
        let repr = format!("{:?}", key);
        assert!(repr.contains("REDACTED"));
        assert!(!repr.contains("171")); // 0xAB
    }
}
