//! # Key Material
//!
//! Generation and handling of the two asymmetric key kinds.
//!
//! ## Key Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          KEY TYPES                                      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SigningKeyPair (Ed25519)                                       │   │
//! │  │  ─────────────────────────                                       │   │
//! │  │                                                                  │   │
//! │  │  Purpose:                                                       │   │
//! │  │  • Certificate issuance (the manager's root key)                │   │
//! │  │  • Per-message authenticity signatures                          │   │
//! │  │  • Detached document signatures                                 │   │
//! │  │                                                                  │   │
//! │  │  Format:                                                        │   │
//! │  │  • Private key: 32 bytes (kept secret, zeroized on drop)       │   │
//! │  │  • Public key: 32 bytes (shared freely)                        │   │
//! │  │                                                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  AgreementKeyPair (X25519)                                      │   │
//! │  │  ──────────────────────────                                      │   │
//! │  │                                                                  │   │
//! │  │  Purpose:                                                       │   │
//! │  │  • Key agreement with a peer (ECDH)                             │   │
//! │  │  • Deriving the shared secret the message cipher consumes       │   │
//! │  │                                                                  │   │
//! │  │  Format:                                                        │   │
//! │  │  • Private key: 32 bytes (never leaves the process)            │   │
//! │  │  • Public key: 32 bytes (sent to the peer)                     │   │
//! │  │                                                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two kinds share a curve family but are distinct Rust types with
//! distinct import paths, so a signing key can never be handed to the
//! agreement side or vice versa. There is intentionally no conversion
//! between them.

use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use rand_core::RngCore;
use sha2::{Digest, Sha256};
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::encoding;
use crate::error::{Error, Result};

/// Size of private and public keys in bytes (256 bits)
pub const KEY_SIZE: usize = 32;

/// Number of leading digest bytes used for a key fingerprint
const FINGERPRINT_LEN: usize = 8;

// ============================================================================
// SIGNING KEYS (Ed25519)
// ============================================================================

/// Ed25519 signing keypair
///
/// Generated once per identity; the private half never leaves the process.
#[derive(ZeroizeOnDrop)]
pub struct SigningKeyPair {
    /// Private signing key (secret)
    #[zeroize(skip)] // ed25519_dalek::SigningKey handles its own zeroization
    secret: SigningKey,
}

impl SigningKeyPair {
    /// Generate a new random signing keypair
    ///
    /// ## Errors
    ///
    /// Returns [`Error::RngFailed`] if the operating system's random
    /// number generator fails.
    pub fn generate() -> Result<Self> {
        let mut seed = [0u8; KEY_SIZE];
        OsRng.try_fill_bytes(&mut seed).map_err(|_| Error::RngFailed)?;
        let secret = SigningKey::from_bytes(&seed);
        seed.zeroize();
        Ok(Self { secret })
    }

    /// Get the public half for verification and sharing
    pub fn public_key(&self) -> SigningPublicKey {
        SigningPublicKey(self.secret.verifying_key())
    }

    /// Get reference to the signing key
    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.secret
    }
}

/// Ed25519 public key for signature verification
///
/// This is the only key type the verification paths accept; importing a
/// serialized signing public key goes through [`SigningPublicKey::from_base64`]
/// and is distinct from the agreement-key import path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SigningPublicKey(pub(crate) VerifyingKey);

impl SigningPublicKey {
    /// Deserialize from base64
    pub fn from_base64(serialized: &str) -> Result<Self> {
        let bytes: [u8; KEY_SIZE] = encoding::b64_decode_array(serialized)?;
        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|e| Error::InvalidKey(format!("Invalid signing public key: {}", e)))?;
        Ok(Self(key))
    }

    /// Serialize as base64
    pub fn to_base64(&self) -> String {
        encoding::b64_encode(self.0.as_bytes())
    }

    /// Get the raw key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        self.0.as_bytes()
    }

    /// Short hex fingerprint for out-of-band comparison
    ///
    /// First 8 bytes of the SHA-256 digest of the key, hex-encoded. Meant
    /// for humans reading two screens, not as a collision-resistant id.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        hex::encode(&digest[..FINGERPRINT_LEN])
    }
}

// ============================================================================
// AGREEMENT KEYS (X25519)
// ============================================================================

/// X25519 keypair for key agreement
///
/// Usable only for shared-secret derivation. The private key is not
/// exportable.
#[derive(ZeroizeOnDrop)]
pub struct AgreementKeyPair {
    /// Private agreement key (secret)
    #[zeroize(skip)] // x25519_dalek handles its own zeroization
    secret: StaticSecret,
    /// Public agreement key (derived from secret)
    #[zeroize(skip)]
    public: X25519PublicKey,
}

impl AgreementKeyPair {
    /// Generate a new random agreement keypair
    ///
    /// ## Errors
    ///
    /// Returns [`Error::RngFailed`] if the operating system's random
    /// number generator fails.
    pub fn generate() -> Result<Self> {
        let mut seed = [0u8; KEY_SIZE];
        OsRng.try_fill_bytes(&mut seed).map_err(|_| Error::RngFailed)?;
        let secret = StaticSecret::from(seed);
        seed.zeroize();
        let public = X25519PublicKey::from(&secret);
        Ok(Self { secret, public })
    }

    /// Get the public half for sending to the peer
    pub fn public_key(&self) -> AgreementPublicKey {
        AgreementPublicKey(self.public.to_bytes())
    }

    /// Perform Diffie-Hellman key agreement
    ///
    /// Returns the shared secret both parties can compute:
    /// - Alice: alice_secret × bob_public
    /// - Bob: bob_secret × alice_public
    ///
    /// Both computations produce the same shared secret. How the public
    /// key reaches the peer is the caller's concern; the message cipher
    /// only consumes the resulting [`SharedSecret`].
    pub fn diffie_hellman(&self, their_public: &AgreementPublicKey) -> SharedSecret {
        let their_public = X25519PublicKey::from(their_public.0);
        SharedSecret::from_bytes(self.secret.diffie_hellman(&their_public).to_bytes())
    }
}

/// X25519 public key for key agreement
///
/// Deliberately a different type from [`SigningPublicKey`]: the two share
/// a curve family but different usage semantics, and the import paths must
/// not be interchangeable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgreementPublicKey(pub(crate) [u8; KEY_SIZE]);

impl AgreementPublicKey {
    /// Deserialize from base64
    pub fn from_base64(serialized: &str) -> Result<Self> {
        let bytes: [u8; KEY_SIZE] = encoding::b64_decode_array(serialized)?;
        Ok(Self(bytes))
    }

    /// Serialize as base64
    pub fn to_base64(&self) -> String {
        encoding::b64_encode(&self.0)
    }

    /// Get the raw key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

// ============================================================================
// SHARED SECRET
// ============================================================================

/// A shared secret produced by key agreement
///
/// Opaque input to the per-message key derivation. Zeroized when dropped.
///
/// ## Security
///
/// Zeroization is best effort: the bytes held here are overwritten on
/// drop, but copies the allocator or OS may have made are out of our
/// control.
#[derive(ZeroizeOnDrop)]
pub struct SharedSecret {
    bytes: [u8; KEY_SIZE],
}

impl SharedSecret {
    /// Create from raw DH output
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Get the raw bytes (for key derivation)
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

// ============================================================================
// TESTS
// ============================================================================
