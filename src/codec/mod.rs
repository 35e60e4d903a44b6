//! Secret codec for values stored at rest
//!
//! This module provides:
//! - AES-256-GCM authenticated encryption of individual string values
//! - PBKDF2-HMAC-SHA512 passphrase-based key derivation
//! - A self-describing envelope format (salt + nonce + tag + ciphertext)
//! - Key-material generation and one-way fingerprints
//!
//! Every operation is a pure function; nothing is cached between calls and
//! no plaintext, passphrase, or key is ever logged or persisted here.

pub mod crypto;
pub mod errors;
pub mod models;

// Re-export commonly used types
pub use crypto::{
    fingerprint, fingerprint_matches, generate_key_material, open, seal, PBKDF2_ITERATIONS,
};
pub use errors::{CodecError, CodecResult};
pub use models::{DerivedKey, Envelope, HEADER_LEN, KEY_LEN, NONCE_LEN, SALT_LEN, TAG_LEN};
