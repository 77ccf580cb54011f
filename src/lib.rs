//! # Parley Core
//!
//! The trust-and-secrecy engine of Parley, a browser chat tool for two
//! parties exchanging authenticated, confidential messages and signing
//! standalone documents — without a persistent server-side identity store.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PARLEY CORE MODULES                              │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐      │
//! │  │   Certificate    │  │     Ratchet      │  │      Signer      │      │
//! │  │                  │  │                  │  │                  │      │
//! │  │ - Issue          │  │ - Per-message    │  │ - Message sigs   │      │
//! │  │ - Verify         │  │   keys           │  │ - Document sigs  │      │
//! │  │ - Session root   │  │ - AEAD encrypt   │  │ - .sig artifacts │      │
//! │  └────────┬─────────┘  └────────┬─────────┘  └────────┬─────────┘      │
//! │           │                     │                     │                │
//! │           └─────────────────────┴─────────────────────┘                │
//! │                                 │                                      │
//! │                    ┌────────────┴────────────┐                         │
//! │                    │         Crypto          │                         │
//! │                    │                         │                         │
//! │                    │ - Ed25519 / X25519      │                         │
//! │                    │ - AES-256-GCM           │                         │
//! │                    │ - HKDF-SHA256           │                         │
//! │                    └─────────────────────────┘                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Typical Flow
//!
//! 1. Generate a signing key pair and request a [`Certificate`] from a
//!    [`CertificateManager`] for a chosen display name.
//! 2. Negotiate an agreement key pair and shared secret with the peer
//!    (transport is the caller's concern; see
//!    [`AgreementKeyPair::diffie_hellman`]).
//! 3. Encrypt and decrypt each message body with the
//!    [`ForwardSecrecyRatchet`] using that shared secret.
//! 4. Sign outgoing plaintexts and verify incoming ones with the
//!    [`signer`] functions, checking the sender's certificate first.
//! 5. Independently of any peer session, sign whole files into detached
//!    `.sig` artifacts and verify them offline.
//!
//! ## Security Model
//!
//! - **Authenticity**: Ed25519 signatures over messages and certificate
//!   fields; certificates bind a name to a key for a 24-hour window under
//!   a session-scoped root.
//! - **Confidentiality**: AES-256-GCM under a fresh HKDF-derived key per
//!   message index.
//! - **Scope of secrecy**: per-message key separation, *not* a double
//!   ratchet — see the [`ratchet`] module docs for the exact limitation.
//! - **Fail-closed verification**: every verify-style operation returns a
//!   negative result instead of an error.
//!
//! Everything else in the application — rendering, message grouping, file
//! pickers, audio capture, cross-tab relay — is plumbing around this core
//! and lives elsewhere.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod certificate;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod ratchet;
pub mod signer;
/// Platform-aware time utilities for native and WASM targets.
pub mod time;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use certificate::{Certificate, CertificateManager, CERT_VALIDITY_MS};
pub use crypto::{
    AgreementKeyPair, AgreementPublicKey, SharedSecret, Signature, SigningKeyPair,
    SigningPublicKey,
};
pub use error::{Error, Result};
pub use ratchet::{EncryptedPayload, ForwardSecrecyRatchet};
pub use signer::{
    create_signature_file, parse_signature_file, sign_data, sign_document,
    verify_document_signature, verify_signature, DocumentSignature, SIGNATURE_FILE_EXTENSION,
};

// ============================================================================
// TESTS
// ============================================================================
