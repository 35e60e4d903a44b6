//! envseal — secret-at-rest encryption for workspace environment variables
//!
//! The workspace app stores env-var records in a local database; records
//! flagged sensitive are run through [`seal`] before storage and [`open`]
//! after retrieval. Everything here is a stateless string-to-string
//! transform; the storage layer never sees a key and this crate never sees
//! the database.

pub mod codec;
pub mod config;

pub use codec::{
    fingerprint, fingerprint_matches, generate_key_material, open, seal, CodecError, CodecResult,
    Envelope,
};
pub use config::{passphrase_from_env, Passphrase, PASSPHRASE_ENV};
