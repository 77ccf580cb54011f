//! # Cryptography Module
//!
//! Cryptographic primitives used by Parley Core.
//!
//! ## Security Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CRYPTOGRAPHIC ARCHITECTURE                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────┐         ┌─────────────────┐                       │
//! │  │  Signing Keys   │         │ Agreement Keys  │                       │
//! │  │  (Ed25519)      │         │ (X25519)        │                       │
//! │  │                 │         │                 │                       │
//! │  │ • Certificates  │         │ • Key agreement │                       │
//! │  │ • Message auth  │         │ • Shared secret │                       │
//! │  │ • Document sigs │         │                 │                       │
//! │  └─────────────────┘         └────────┬────────┘                       │
//! │                                       │                                 │
//! │                                       ▼                                 │
//! │                          ┌─────────────────────────┐                   │
//! │                          │  HKDF-SHA256 per-message│                   │
//! │                          │  key derivation         │                   │
//! │                          │  (keyed by counter)     │                   │
//! │                          └────────────┬────────────┘                   │
//! │                                       │                                 │
//! │                                       ▼                                 │
//! │                          ┌─────────────────────────┐                   │
//! │                          │  AES-256-GCM AEAD       │                   │
//! │                          │  (random 96-bit nonce)  │                   │
//! │                          └─────────────────────────┘                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm Choices & Rationale
//!
//! | Algorithm | Purpose | Why Chosen |
//! |-----------|---------|------------|
//! | Ed25519 | Signing | Fast, small keys, widely audited |
//! | X25519 | Key Agreement | Fast ECDH, same curve family as Ed25519 |
//! | AES-256-GCM | Encryption | Hardware acceleration, AEAD |
//! | HKDF-SHA256 | Key Derivation | Industry standard, well-analyzed |
//! | SHA-256 | Document digests | Fixed-size content addressing |
//!
//! ## Security Considerations
//!
//! 1. **Key Zeroization**: Secret keys are zeroized when dropped (best effort)
//! 2. **Constant-Time Operations**: Using dalek for constant-time crypto
//! 3. **Secure Random**: Using `rand::rngs::OsRng` for cryptographic randomness
//! 4. **No Key Reuse**: Fresh key and nonce for every encryption operation

mod encryption;
mod kdf;
mod keys;
mod signing;

pub use encryption::{decrypt, encrypt, MessageKey, Nonce, KEY_SIZE, NONCE_SIZE};
pub use kdf::{derive_message_key, domain};
pub use keys::{
    AgreementKeyPair, AgreementPublicKey, SharedSecret, SigningKeyPair, SigningPublicKey,
};
pub use signing::{sign, verify, Signature, SIGNATURE_SIZE};
