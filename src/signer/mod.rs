//! # Document Signer Module
//!
//! Detached signatures over whole documents.
//!
//! ## Signature Artifact
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    DETACHED SIGNATURE FLOW                              │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  SIGNER                                                                │
//! │  ──────                                                                 │
//! │  1. digest ← SHA-256(file bytes)                                       │
//! │  2. signature ← Ed25519-Sign(private key, digest)    ← over the        │
//! │  3. artifact ← { documentHash, signature,              digest, not     │
//! │                  certificate, timestamp }              the raw file    │
//! │  4. serialize artifact as UTF-8 JSON (.sig file)                       │
//! │                                                                         │
//! │  VERIFIER (possibly offline, no peer session)                          │
//! │  ────────────────────────────────────────────                           │
//! │  1. parse .sig file            → None on any malformed input           │
//! │  2. recompute SHA-256(file)    → must equal documentHash               │
//! │  3. verify signature over the  → must verify under the signer's        │
//! │     recomputed digest            public key                            │
//! │                                                                         │
//! │  BOTH checks are required. A hash match without a valid signature      │
//! │  proves nothing about authenticity; a valid signature over a stale     │
//! │  hash proves nothing about the current file content.                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The certificate travels inside the artifact so an offline verifier can
//! check the signer's identity against a trust anchor it already holds
//! (see [`CertificateManager`](crate::certificate::CertificateManager)).

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::certificate::Certificate;
use crate::crypto::{sign, verify, Signature, SigningKeyPair, SigningPublicKey};
use crate::encoding;
use crate::error::Result;
use crate::time::now_timestamp_millis;

/// Conventional file extension for detached-signature artifacts
pub const SIGNATURE_FILE_EXTENSION: &str = "sig";

/// Size of the SHA-256 content digest in bytes
pub const DIGEST_SIZE: usize = 32;

/// A detached signature over a document
///
/// Transient value object; carries no secret state. JSON wire shape
/// (camelCase): `{ "documentHash": hex, "signature": base64,
/// "certificate": {...}, "timestamp": epoch ms }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSignature {
    /// SHA-256 digest of the full document content
    #[serde(with = "encoding::hex_array")]
    pub document_hash: [u8; DIGEST_SIZE],
    /// Ed25519 signature over the digest
    pub signature: Signature,
    /// The signer's certificate
    pub certificate: Certificate,
    /// Signing time, epoch milliseconds
    pub timestamp: i64,
}

/// Sign raw message bytes
///
/// Used for per-message authenticity: the sender signs the plaintext of
/// each outgoing message before encryption.
pub fn sign_data(message: &[u8], keypair: &SigningKeyPair) -> Signature {
    sign(keypair, message)
}

/// Verify a signature over raw message bytes
///
/// Fail-closed boolean; see [`crypto::verify`](crate::crypto::verify).
pub fn verify_signature(
    message: &[u8],
    signature: &Signature,
    public_key: &SigningPublicKey,
) -> bool {
    verify(public_key, message, signature)
}

/// Sign a whole document, producing a detached-signature record
///
/// Hashes the full file content with SHA-256 and signs the 32-byte
/// digest, not the raw file. Enforcing a size ceiling on `file_bytes` is
/// the caller's responsibility.
pub fn sign_document(
    file_bytes: &[u8],
    keypair: &SigningKeyPair,
    certificate: &Certificate,
) -> DocumentSignature {
    let digest: [u8; DIGEST_SIZE] = Sha256::digest(file_bytes).into();
    let signature = sign(keypair, &digest);

    DocumentSignature {
        document_hash: digest,
        signature,
        certificate: certificate.clone(),
        timestamp: now_timestamp_millis(),
    }
}

/// Serialize a detached signature for export as a `.sig` artifact
pub fn create_signature_file(doc_sig: &DocumentSignature) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(doc_sig)?)
}

/// Parse a `.sig` artifact
///
/// Returns `None` — never an error — when the bytes are not valid JSON,
/// required fields are missing, or field shapes are wrong. Callers depend
/// on this as a non-exceptional "invalid input" signal.
pub fn parse_signature_file(bytes: &[u8]) -> Option<DocumentSignature> {
    serde_json::from_slice(bytes).ok()
}

/// Verify a detached signature against the current document bytes
///
/// Recomputes the digest over `file_bytes`; succeeds only if the
/// recomputed digest equals `document_hash` AND the signature verifies
/// over that digest under `public_key`. Fail-closed boolean.
pub fn verify_document_signature(
    file_bytes: &[u8],
    doc_sig: &DocumentSignature,
    public_key: &SigningPublicKey,
) -> bool {
    let digest: [u8; DIGEST_SIZE] = Sha256::digest(file_bytes).into();
    if digest != doc_sig.document_hash {
        tracing::debug!("Document signature rejected: content digest mismatch");
        return false;
    }
    verify(public_key, &digest, &doc_sig.signature)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::CertificateManager;

    fn signer_setup() -> (CertificateManager, SigningKeyPair, Certificate) {
        let manager = CertificateManager::new();
        let keypair = manager.generate_signing_key_pair().unwrap();
        let cert = manager
            .issue_certificate("alice", &keypair.public_key())
            .unwrap();
        (manager, keypair, cert)
    }

    #[test]
    fn test_sign_data_round_trip() {
        let (_, keypair, _) = signer_setup();
        let message = b"message body";

        let signature = sign_data(message, &keypair);
        assert!(verify_signature(message, &signature, &keypair.public_key()));
        assert!(!verify_signature(b"other body", &signature, &keypair.public_key()));
    }

    #[test]
    fn test_document_signature_scenario() {
        // Sign "hello world" (11 bytes), export, reload, verify; then the
        // 12-byte "hello world!" must fail against the same artifact.
        let (manager, keypair, cert) = signer_setup();
        let document = b"hello world";

        let doc_sig = sign_document(document, &keypair, &cert);
        let artifact = create_signature_file(&doc_sig).unwrap();

        let parsed = parse_signature_file(&artifact).unwrap();
        assert_eq!(parsed, doc_sig);

        // Offline verifier: certificate first, then the document
        assert!(manager.verify_certificate(&parsed.certificate));
        let signer_key = parsed.certificate.subject_public_key().unwrap();
        assert!(verify_document_signature(document, &parsed, &signer_key));

        assert!(!verify_document_signature(b"hello world!", &parsed, &signer_key));
    }

    #[test]
    fn test_signature_is_over_digest_not_file() {
        let (_, keypair, cert) = signer_setup();
        let document = b"hello world";

        let doc_sig = sign_document(document, &keypair, &cert);
        let digest: [u8; DIGEST_SIZE] = Sha256::digest(document.as_slice()).into();

        assert_eq!(doc_sig.document_hash, digest);
        assert!(verify_signature(&digest, &doc_sig.signature, &keypair.public_key()));
        assert!(!verify_signature(document, &doc_sig.signature, &keypair.public_key()));
    }

    #[test]
    fn test_one_byte_modification_fails() {
        let (_, keypair, cert) = signer_setup();
        let document = b"The quick brown fox jumps over the lazy dog".to_vec();

        let doc_sig = sign_document(&document, &keypair, &cert);

        let mut modified = document.clone();
        modified[7] ^= 0x01;
        assert!(!verify_document_signature(&modified, &doc_sig, &keypair.public_key()));
        assert!(verify_document_signature(&document, &doc_sig, &keypair.public_key()));
    }

    #[test]
    fn test_wrong_signer_key_fails() {
        let (_, keypair, cert) = signer_setup();
        let other = SigningKeyPair::generate().unwrap();
        let document = b"hello world";

        let doc_sig = sign_document(document, &keypair, &cert);
        assert!(!verify_document_signature(document, &doc_sig, &other.public_key()));
    }

    #[test]
    fn test_tampered_hash_field_fails() {
        let (_, keypair, cert) = signer_setup();
        let document = b"hello world";

        let mut doc_sig = sign_document(document, &keypair, &cert);
        doc_sig.document_hash[0] ^= 0xff;

        assert!(!verify_document_signature(document, &doc_sig, &keypair.public_key()));
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(parse_signature_file(b"definitely not json").is_none());
        assert!(parse_signature_file(&[0xff, 0xfe, 0x00, 0x01]).is_none());
        assert!(parse_signature_file(b"").is_none());
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        // Valid JSON, wrong shape
        assert!(parse_signature_file(b"{}").is_none());
        assert!(parse_signature_file(br#"{"documentHash": "abcd"}"#).is_none());
        assert!(parse_signature_file(b"[1, 2, 3]").is_none());
    }

    #[test]
    fn test_parse_rejects_malformed_hash() {
        let (_, keypair, cert) = signer_setup();
        let doc_sig = sign_document(b"hello world", &keypair, &cert);

        let mut json = serde_json::to_value(&doc_sig).unwrap();
        json["documentHash"] = serde_json::Value::String("zz".into());

        let bytes = serde_json::to_vec(&json).unwrap();
        assert!(parse_signature_file(&bytes).is_none());
    }

    #[test]
    fn test_signature_file_json_shape() {
        let (_, keypair, cert) = signer_setup();
        let doc_sig = sign_document(b"hello world", &keypair, &cert);

        let artifact = create_signature_file(&doc_sig).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&artifact).unwrap();

        assert!(json["documentHash"].is_string());
        assert!(json["signature"].is_string());
        assert!(json["certificate"]["publicKey"].is_string());
        assert!(json["timestamp"].is_i64());

        // documentHash is lowercase hex of the SHA-256 digest
        let hash = json["documentHash"].as_str().unwrap();
        assert_eq!(hash.len(), DIGEST_SIZE * 2);
        assert_eq!(hash, hex::encode(Sha256::digest(b"hello world".as_slice())));
    }

    #[test]
    fn test_verification_after_manager_reset() {
        // The document signature itself stays valid under the signer's
        // key; what dies with the session is the certificate.
        let (manager, keypair, cert) = signer_setup();
        let document = b"hello world";
        let doc_sig = sign_document(document, &keypair, &cert);

        manager.reset();

        assert!(!manager.verify_certificate(&doc_sig.certificate));
        assert!(verify_document_signature(document, &doc_sig, &keypair.public_key()));
    }
}
