//! # Encryption Module
//!
//! AES-256-GCM authenticated encryption for message confidentiality and
//! integrity.
//!
//! The functions here work on a single already-derived [`MessageKey`]; the
//! [`ratchet`](crate::ratchet) module is responsible for deriving a fresh
//! key per message and pairing it with a fresh nonce.
//!
//! ## Security Properties
//!
//! | Property | Guarantee |
//! |----------|-----------|
//! | Confidentiality | Only holders of the message key can read the plaintext |
//! | Integrity | Any modification of nonce or ciphertext is detected |
//! | Uniform failure | Tampering, wrong key, and wrong nonce are indistinguishable |

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce as AesNonce,
};
use rand::rngs::OsRng;
use rand_core::RngCore;
use zeroize::ZeroizeOnDrop;

use crate::error::{Error, Result};

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the encryption key in bytes (256 bits)
pub const KEY_SIZE: usize = 32;

/// A nonce (number used once) for AES-GCM encryption
///
/// ## Critical Security Requirement
///
/// **NEVER reuse a nonce with the same key!**
///
/// Nonce reuse completely breaks AES-GCM security:
/// - Allows recovering the authentication key
/// - Allows forging messages
/// - May allow recovering plaintext
///
/// The ratchet derives a fresh key per message *and* draws a random nonce
/// per encryption, so both halves of the (key, nonce) pair are unique.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nonce(pub [u8; NONCE_SIZE]);

impl Nonce {
    /// Generate a cryptographically random nonce
    pub fn random() -> Result<Self> {
        let mut bytes = [0u8; NONCE_SIZE];
        OsRng.try_fill_bytes(&mut bytes).map_err(|_| Error::RngFailed)?;
        Ok(Self(bytes))
    }

    /// Create from existing bytes
    pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }
}

/// An AES-256-GCM message key
///
/// Derived for exactly one message index; zeroized when dropped.
#[derive(ZeroizeOnDrop)]
pub struct MessageKey([u8; KEY_SIZE]);

impl MessageKey {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw key bytes
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

/// Encrypt a message using AES-256-GCM
///
/// Generates a fresh random nonce and returns it alongside the ciphertext
/// (which includes the 16-byte authentication tag).
pub fn encrypt(key: &MessageKey, plaintext: &[u8]) -> Result<(Nonce, Vec<u8>)> {
    let nonce = Nonce::random()?;
    let cipher = Aes256Gcm::new_from_slice(&key.0)
        .map_err(|e| Error::EncryptionFailed(format!("Invalid key: {}", e)))?;

    let ciphertext = cipher
        .encrypt(AesNonce::from_slice(&nonce.0), plaintext)
        .map_err(|e| Error::EncryptionFailed(format!("Encryption failed: {}", e)))?;

    Ok((nonce, ciphertext))
}

/// Decrypt a message using AES-256-GCM
///
/// ## Errors
///
/// Returns [`Error::DecryptionFailed`] if the ciphertext was tampered
/// with, the key is wrong, or the nonce is wrong. The error carries no
/// information about which it was.
pub fn decrypt(key: &MessageKey, nonce: &Nonce, ciphertext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(&key.0)
        .map_err(|_| Error::DecryptionFailed)?;

    cipher
        .decrypt(AesNonce::from_slice(&nonce.0), ciphertext)
        .map_err(|_| Error::DecryptionFailed)
}

// ============================================================================
// TESTS
// ============================================================================
