//! # Error Handling
//!
//! Error types for Parley Core.
//!
//! ## Error Policy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         ERROR POLICY                                    │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Generation / encryption operations                                    │
//! │  ──────────────────────────────────                                     │
//! │  There is no safe default to fall back to, so these return             │
//! │  Result<T, Error>:                                                     │
//! │                                                                         │
//! │    generate_signing_key_pair()  →  KeyGenerationFailed                 │
//! │    issue_certificate()          →  SigningFailed / RngFailed           │
//! │    encrypt()                    →  EncryptionFailed                    │
//! │    decrypt()                    →  DecryptionFailed                    │
//! │                                                                         │
//! │  Verification operations                                               │
//! │  ───────────────────────                                                │
//! │  Fail closed and never throw. Absence of proof is a negative           │
//! │  result, not an exception, so a caller can never mistake a             │
//! │  thrown error for "valid":                                             │
//! │                                                                         │
//! │    verify_certificate()         →  bool                                │
//! │    verify_signature()           →  bool                                │
//! │    verify_document_signature()  →  bool                                │
//! │    parse_signature_file()       →  Option<DocumentSignature>           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `DecryptionFailed` deliberately covers tampering, a wrong key, and a
//! wrong counter without distinguishing them: a caller-visible distinction
//! would be a padding-oracle-style leak.

use thiserror::Error;

/// Result type alias for Parley Core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Parley Core
///
/// All errors are categorized by module/domain to make error handling
/// clearer and to provide meaningful error messages to users.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Crypto Errors (300-399)
    // ========================================================================

    /// Key pair generation failed
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    /// Key derivation failed
    #[error("Failed to derive keys: {0}")]
    KeyDerivationFailed(String),

    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed
    ///
    /// Covers tampering, a wrong key, and a wrong counter indistinguishably.
    #[error("Decryption failed: authentication tag mismatch")]
    DecryptionFailed,

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Invalid key format or length
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Random number generation failed
    #[error("Random number generation failed")]
    RngFailed,

    // ========================================================================
    // Internal Errors (900-999)
    // ========================================================================

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl Error {
    /// Get the error code for embedding hosts
    ///
    /// Error codes are organized by category:
    /// - 300-399: Crypto
    /// - 900-999: Internal
    pub fn code(&self) -> i32 {
        match self {
            // Crypto (300-399)
            Error::KeyGenerationFailed(_) => 300,
            Error::KeyDerivationFailed(_) => 301,
            Error::EncryptionFailed(_) => 302,
            Error::DecryptionFailed => 303,
            Error::SigningFailed(_) => 304,
            Error::InvalidKey(_) => 305,
            Error::RngFailed => 306,

            // Internal (900-999)
            Error::SerializationError(_) => 900,
        }
    }
}

// ============================================================================
// ERROR CONVERSIONS
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================
