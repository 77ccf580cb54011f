//! # Forward-Secrecy Ratchet
//!
//! Counter-indexed per-message encryption over a shared secret.
//!
//! ## Message Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PER-MESSAGE KEYS                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  SENDER                                                                │
//! │  ──────                                                                 │
//! │  1. counter ← atomic read-and-increment (before any crypto work)       │
//! │  2. message_key ← HKDF(shared_secret, counter)                         │
//! │  3. nonce ← 12 random bytes                                            │
//! │  4. ciphertext ← AES-256-GCM(message_key, nonce, plaintext)            │
//! │                                                                         │
//! │  Output: { iv, ciphertext, counter }                                   │
//! │           The counter travels with the ciphertext.                     │
//! │                                                                         │
//! │  RECEIVER                                                              │
//! │  ────────                                                               │
//! │  1. message_key ← HKDF(shared_secret, payload.counter)                 │
//! │  2. plaintext ← AES-256-GCM-Decrypt(message_key, iv, ciphertext)       │
//! │                                                                         │
//! │  No shared ratchet state: the receiver derives the same key from       │
//! │  the counter alone.                                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Limitation (intentional — do not "fix")
//!
//! Any party holding the shared secret can derive the key for *any*
//! counter value, so compromising the shared secret retroactively
//! compromises every message ever sent under it. What this scheme gives
//! is key separation per message index: a single leaked *derived* key
//! exposes one message, and no (key, nonce) pair is ever reused. It is
//! **not** a continuously advancing ratchet — no secret state is deleted
//! after use — and is deliberately weaker than a double ratchet. Callers
//! who need post-compromise security need a different protocol, not a
//! patched version of this one.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::crypto::{decrypt, derive_message_key, encrypt, Nonce, SharedSecret, NONCE_SIZE};
use crate::encoding;
use crate::error::{Error, Result};

/// Wire shape of one encrypted message
///
/// JSON form: `{ "iv": base64, "ciphertext": base64, "counter": integer }`.
/// Carries no secret state; transport between peers is the caller's
/// concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPayload {
    /// Random AES-GCM nonce
    #[serde(with = "encoding::b64_array")]
    pub iv: [u8; NONCE_SIZE],
    /// Authenticated-encrypted bytes (includes the 16-byte tag)
    #[serde(with = "encoding::b64_vec")]
    pub ciphertext: Vec<u8>,
    /// Message index the key was derived from
    pub counter: u64,
}

/// Per-message encryption over a caller-supplied shared secret
///
/// Stateless with respect to secrets: the only state is a session-scoped
/// monotonically increasing send counter. One ratchet per session
/// direction; the receiver needs no ratchet at all to decrypt, only the
/// shared secret.
pub struct ForwardSecrecyRatchet {
    send_counter: AtomicU64,
}

impl ForwardSecrecyRatchet {
    /// Create a ratchet with the send counter at zero
    pub fn new() -> Self {
        Self {
            send_counter: AtomicU64::new(0),
        }
    }

    /// Encrypt one message under a fresh per-message key
    ///
    /// The counter is allocated atomically before any key derivation or
    /// encryption work, so two interleaved `encrypt` calls can never
    /// allocate the same counter value — the (shared secret, counter)
    /// pair is never reused for two different plaintexts.
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        shared_secret: &SharedSecret,
    ) -> Result<EncryptedPayload> {
        let counter = self.send_counter.fetch_add(1, Ordering::SeqCst);

        let message_key = derive_message_key(shared_secret, counter)?;
        let (nonce, ciphertext) = encrypt(&message_key, plaintext)?;

        Ok(EncryptedPayload {
            iv: *nonce.as_bytes(),
            ciphertext,
            counter,
        })
    }

    /// Decrypt one message, re-deriving its key from the payload counter
    ///
    /// ## Errors
    ///
    /// Returns [`Error::DecryptionFailed`] on any authentication failure.
    /// Tampering, a wrong shared secret, and a wrong counter are
    /// indistinguishable by design.
    pub fn decrypt(
        &self,
        payload: &EncryptedPayload,
        shared_secret: &SharedSecret,
    ) -> Result<Vec<u8>> {
        let message_key =
            derive_message_key(shared_secret, payload.counter).map_err(|_| Error::DecryptionFailed)?;

        decrypt(
            &message_key,
            &Nonce::from_bytes(payload.iv),
            &payload.ciphertext,
        )
    }

    /// Zero the session send counter
    ///
    /// Called on session teardown; the next session starts at counter 0
    /// with a new shared secret.
    pub fn reset_counter(&self) {
        self.send_counter.store(0, Ordering::SeqCst);
        tracing::debug!("Ratchet send counter reset");
    }
}

impl Default for ForwardSecrecyRatchet {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
