//! # Key Derivation Functions
//!
//! Per-message key derivation from a shared secret.
//!
//! ## Counter-Indexed Derivation
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 SHARED SECRET → MESSAGE KEYS                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Shared Secret (32 bytes, from X25519 key agreement)                   │
//! │        │                                                               │
//! │        ▼                                                               │
//! │  HKDF-SHA256(                                                          │
//! │    ikm  = shared_secret,                                               │
//! │    info = "parley-message-key-v1" || counter (u64, big-endian)        │
//! │  )                                                                     │
//! │        │                                                               │
//! │        ▼                                                               │
//! │  32-byte AES-256-GCM message key, unique per counter value             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Different counters yield unrelated keys even under the same shared
//! secret, so a single leaked message key exposes one message, and nonce
//! reuse across messages is structurally impossible. Note that anyone
//! holding the shared secret can re-derive the key for *any* counter;
//! see the [`ratchet`](crate::ratchet) module for what that does and does
//! not guarantee.

use hkdf::Hkdf;
use sha2::Sha256;

use crate::crypto::encryption::MessageKey;
use crate::crypto::keys::SharedSecret;
use crate::error::{Error, Result};

/// Domain separation strings for HKDF
///
/// These ensure that keys derived for different purposes are cryptographically
/// independent, even when derived from the same input material.
pub mod domain {
    /// Domain for per-message encryption key derivation
    pub const MESSAGE_KEY: &[u8] = b"parley-message-key-v1";
}

/// Derive the symmetric key for one message index
///
/// One-way: the message key reveals nothing about the shared secret or
/// about keys at other counter values. Both peers derive the same key
/// from the counter that travels with the ciphertext, without sharing
/// any ratchet state.
pub fn derive_message_key(shared_secret: &SharedSecret, counter: u64) -> Result<MessageKey> {
    let hkdf = Hkdf::<Sha256>::new(None, shared_secret.as_bytes());

    // info = domain || counter, so each counter value is its own domain
    let mut info = Vec::with_capacity(domain::MESSAGE_KEY.len() + 8);
    info.extend_from_slice(domain::MESSAGE_KEY);
    info.extend_from_slice(&counter.to_be_bytes());

    let mut key = [0u8; 32];
    hkdf.expand(&info, &mut key)
        .map_err(|_| Error::KeyDerivationFailed("Failed to derive message key".into()))?;

    Ok(MessageKey::from_bytes(key))
}

// ============================================================================
// TESTS
// ============================================================================
