//! Sealing and opening of secret values
//!
//! Every value is protected under a key derived fresh from the configured
//! passphrase: PBKDF2-HMAC-SHA512 over a random 32-byte salt, then
//! AES-256-GCM under a random 16-byte nonce. Salt, nonce, and tag travel
//! inside the envelope, so opening needs nothing but the envelope string
//! and the passphrase.

use aes_gcm::{
    aead::{
        generic_array::{typenum::U16, GenericArray},
        Aead, KeyInit,
    },
    aes::Aes256,
    AesGcm,
};
use pbkdf2::pbkdf2_hmac;
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256, Sha512};
use subtle::ConstantTimeEq;

use super::errors::{CodecError, CodecResult};
use super::models::{DerivedKey, Envelope, KEY_LEN, NONCE_LEN, SALT_LEN, TAG_LEN};

/// PBKDF2 iteration count. Tunable brute-force defense; raising it slows
/// every seal/open call by the same factor.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// AES-256-GCM parameterized with the 16-byte nonce the envelope carries.
type EnvelopeCipher = AesGcm<Aes256, U16>;

/// Derive a 256-bit key from the passphrase and a per-envelope salt.
fn derive_key(passphrase: &str, salt: &[u8; SALT_LEN]) -> DerivedKey {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha512>(passphrase.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    DerivedKey::new(key)
}

/// Encrypt a plaintext value into an envelope string.
///
/// A fresh salt and nonce are drawn from the OS CSPRNG on every call, so
/// sealing the same value twice yields two unrelated envelopes.
///
/// # Errors
///
/// Returns [`CodecError::MissingPassphrase`] for an empty passphrase and
/// [`CodecError::CryptoFailure`] if the cipher itself fails (not reachable
/// with a well-formed key and nonce).
pub fn seal(plaintext: &str, passphrase: &str) -> CodecResult<String> {
    if passphrase.is_empty() {
        return Err(CodecError::MissingPassphrase);
    }

    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let key = derive_key(passphrase, &salt);
    let cipher = EnvelopeCipher::new(GenericArray::from_slice(key.as_bytes()));

    let sealed = cipher
        .encrypt(GenericArray::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|_| CodecError::CryptoFailure)?;

    // The AEAD appends the tag to the ciphertext; the envelope layout keeps
    // the tag in the header instead.
    let boundary = sealed.len() - TAG_LEN;
    let (ciphertext, tag_bytes) = sealed.split_at(boundary);

    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(tag_bytes);

    let envelope = Envelope {
        salt,
        nonce,
        tag,
        ciphertext: ciphertext.to_vec(),
    };

    Ok(envelope.encode())
}

/// Decrypt an envelope string back to its plaintext value.
///
/// Tag verification happens inside the AEAD before any plaintext is
/// produced. A wrong passphrase, a flipped bit, and a truncated ciphertext
/// all surface as the same [`CodecError::AuthenticationFailed`]; nothing in
/// the failure says which part of the input was wrong.
pub fn open(envelope: &str, passphrase: &str) -> CodecResult<String> {
    if passphrase.is_empty() {
        return Err(CodecError::MissingPassphrase);
    }

    let envelope = Envelope::decode(envelope)?;
    let key = derive_key(passphrase, &envelope.salt);
    let cipher = EnvelopeCipher::new(GenericArray::from_slice(key.as_bytes()));

    // Reassemble ciphertext + tag in the order the AEAD expects.
    let mut sealed = envelope.ciphertext;
    sealed.extend_from_slice(&envelope.tag);

    let plaintext = cipher
        .decrypt(GenericArray::from_slice(&envelope.nonce), sealed.as_ref())
        .map_err(|_| CodecError::AuthenticationFailed)?;

    Ok(String::from_utf8(plaintext)?)
}

/// Generate fresh key material for initial setup: 32 bytes from the OS
/// CSPRNG, hex-encoded. Suitable as the passphrase handed to [`seal`].
pub fn generate_key_material() -> String {
    let mut material = [0u8; 32];
    OsRng.fill_bytes(&mut material);
    hex::encode(material)
}

/// One-way SHA-256 fingerprint of a value, hex-encoded.
///
/// Deterministic, and carries no confidentiality guarantee: use it for
/// deduplication or display masking, never as a substitute for [`seal`].
pub fn fingerprint(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare a value against a stored fingerprint in constant time.
///
/// Hashing first means the comparison length is fixed, so neither the
/// length nor the content of `value` leaks through timing.
pub fn fingerprint_matches(value: &str, expected_hex: &str) -> bool {
    fingerprint(value)
        .as_bytes()
        .ct_eq(expected_hex.as_bytes())
        .into()
}
