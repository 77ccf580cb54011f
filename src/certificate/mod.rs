//! # Certificate Module
//!
//! Session-scoped identity certificates.
//!
//! ## Trust Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SESSION TRUST ANCHOR                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  CertificateManager                                                    │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │  Root Signing Key (Ed25519)                                 │       │
//! │  │                                                             │       │
//! │  │  • Created lazily on first issuance                        │       │
//! │  │  • Lives until reset()                                     │       │
//! │  │  • Session-scoped: NOT a persistent CA                     │       │
//! │  └──────────────────────┬──────────────────────────────────────┘       │
//! │                         │ signs                                        │
//! │                         ▼                                              │
//! │  Certificate                                                           │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │  { id, subject, publicKey, issuedAt, expiresAt }           │       │
//! │  │  + signature over the canonical serialization              │       │
//! │  │                                                             │       │
//! │  │  Binds a display name to a signing public key for a        │       │
//! │  │  24-hour validity window.                                  │       │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! │                                                                         │
//! │  After reset(): every certificate this manager issued becomes         │
//! │  unverifiable. That is the design — the trust anchor is the           │
//! │  session, not a long-lived authority.                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The manager is an ordinary value, not a process-wide singleton: callers
//! construct one per trust domain and pass it by reference. Tests run
//! several side by side to prove cross-manager isolation.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crypto::{sign, verify, Signature, SigningKeyPair, SigningPublicKey};
use crate::error::Result;
use crate::time::now_timestamp_millis;

/// Default certificate validity window: 24 hours, in milliseconds
pub const CERT_VALIDITY_MS: i64 = 24 * 60 * 60 * 1000;

// ============================================================================
// CERTIFICATE
// ============================================================================

/// A signed statement binding a subject name to a signing public key
///
/// Valid within an `issued_at`/`expires_at` window and only under the
/// issuing manager's root key. JSON wire shape (camelCase):
///
/// ```json
/// {
///   "id": "4be0643f-...",
///   "subject": "alice-1724761800000",
///   "publicKey": "base64...",
///   "issuedAt": 1724761800000,
///   "expiresAt": 1724848200000,
///   "signature": "base64..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    /// Opaque unique token (UUID v4)
    pub id: String,
    /// Display name, disambiguated with the issuance time
    pub subject: String,
    /// Base64-serialized signing public key of the subject
    pub public_key: String,
    /// Issuance time, epoch milliseconds
    pub issued_at: i64,
    /// Expiry time, epoch milliseconds
    pub expires_at: i64,
    /// Root-key signature over the canonical serialization of the
    /// preceding fields
    pub signature: Signature,
}

impl Certificate {
    /// Canonical byte serialization of the signed fields
    ///
    /// Variable-length fields are length-prefixed (u32 big-endian) so no
    /// two distinct field tuples can serialize to the same bytes;
    /// timestamps are fixed-width big-endian. The signature field is not
    /// included.
    pub fn signing_payload(&self) -> Vec<u8> {
        canonical_payload(
            &self.id,
            &self.subject,
            &self.public_key,
            self.issued_at,
            self.expires_at,
        )
    }

    /// Decode the subject's signing public key
    pub fn subject_public_key(&self) -> Result<SigningPublicKey> {
        SigningPublicKey::from_base64(&self.public_key)
    }
}

fn canonical_payload(
    id: &str,
    subject: &str,
    public_key: &str,
    issued_at: i64,
    expires_at: i64,
) -> Vec<u8> {
    let mut payload = Vec::with_capacity(id.len() + subject.len() + public_key.len() + 28);
    for field in [id, subject, public_key] {
        payload.extend_from_slice(&(field.len() as u32).to_be_bytes());
        payload.extend_from_slice(field.as_bytes());
    }
    payload.extend_from_slice(&issued_at.to_be_bytes());
    payload.extend_from_slice(&expires_at.to_be_bytes());
    payload
}

// ============================================================================
// CERTIFICATE MANAGER
// ============================================================================

/// Issues and verifies certificates against a session-scoped root key
///
/// One manager is one trust domain. The root key pair is created lazily on
/// the first issuance and discarded by [`reset`](Self::reset); all reads
/// and the create-if-absent step happen under one lock, so concurrent
/// first issuance has a single winner and never creates two roots.
pub struct CertificateManager {
    root: Mutex<Option<SigningKeyPair>>,
}

impl CertificateManager {
    /// Create a manager with no root key yet
    pub fn new() -> Self {
        Self {
            root: Mutex::new(None),
        }
    }

    /// Generate a fresh signing key pair for a caller identity
    ///
    /// Distinct from the manager's own root key: this is the key a user
    /// binds into a certificate and signs messages with.
    pub fn generate_signing_key_pair(&self) -> Result<SigningKeyPair> {
        SigningKeyPair::generate()
    }

    /// Issue a certificate with the default 24-hour validity window
    pub fn issue_certificate(
        &self,
        subject: &str,
        public_key: &SigningPublicKey,
    ) -> Result<Certificate> {
        self.issue_certificate_with_validity(subject, public_key, CERT_VALIDITY_MS)
    }

    /// Issue a certificate with an explicit validity window
    ///
    /// Lazily creates the root key pair if absent. The stored subject is
    /// the requested name with the issuance time appended — best-effort
    /// disambiguation, not a uniqueness guarantee; concurrent issuance
    /// for the same name is possible and accepted.
    pub fn issue_certificate_with_validity(
        &self,
        subject: &str,
        public_key: &SigningPublicKey,
        validity_ms: i64,
    ) -> Result<Certificate> {
        let issued_at = now_timestamp_millis();
        let expires_at = issued_at + validity_ms;
        let id = Uuid::new_v4().to_string();
        let subject = format!("{}-{}", subject, issued_at);
        let public_key = public_key.to_base64();

        let payload = canonical_payload(&id, &subject, &public_key, issued_at, expires_at);

        let mut root = self.root.lock();
        if root.is_none() {
            tracing::debug!("Creating session root key on first issuance");
            *root = Some(SigningKeyPair::generate()?);
        }
        let Some(root_key) = root.as_ref() else {
            return Err(crate::error::Error::KeyGenerationFailed(
                "Root key unavailable".into(),
            ));
        };
        let signature = sign(root_key, &payload);
        drop(root);

        tracing::debug!("Issued certificate {} for {}", id, subject);

        Ok(Certificate {
            id,
            subject,
            public_key,
            issued_at,
            expires_at,
            signature,
        })
    }

    /// Verify a certificate against this manager's root key
    ///
    /// Fail-closed: returns `false` — never an error — when the manager
    /// has no root key, the embedded public key is malformed, the
    /// validity window is inconsistent or not current, or the signature
    /// does not verify. Returns `true` only if every check passes.
    pub fn verify_certificate(&self, cert: &Certificate) -> bool {
        let root = self.root.lock();
        let Some(root_key) = root.as_ref() else {
            tracing::warn!("Certificate {} rejected: no root key in this session", cert.id);
            return false;
        };
        let root_public = root_key.public_key();
        drop(root);

        if cert.issued_at >= cert.expires_at {
            return false;
        }

        let now = now_timestamp_millis();
        if now >= cert.expires_at || now < cert.issued_at {
            tracing::debug!("Certificate {} rejected: outside validity window", cert.id);
            return false;
        }

        // The embedded key must deserialize as a usable signing key
        if cert.subject_public_key().is_err() {
            return false;
        }

        let valid = verify(&root_public, &cert.signing_payload(), &cert.signature);
        if !valid {
            tracing::warn!("Certificate {} rejected: signature mismatch", cert.id);
        }
        valid
    }

    /// Import a serialized signing public key for verification use
    ///
    /// This path accepts signing keys only; agreement keys go through
    /// [`AgreementPublicKey::from_base64`](crate::crypto::AgreementPublicKey::from_base64).
    /// The two must not be interchanged.
    pub fn import_public_key(&self, serialized: &str) -> Result<SigningPublicKey> {
        SigningPublicKey::from_base64(serialized)
    }

    /// The current trust anchor, if a root key exists
    ///
    /// Exposed so a peer can pin the root out of band.
    pub fn root_public_key(&self) -> Option<SigningPublicKey> {
        self.root.lock().as_ref().map(SigningKeyPair::public_key)
    }

    /// Discard the root key pair
    ///
    /// Every certificate this manager issued becomes unverifiable; the
    /// next issuance creates a fresh root. Results computed before the
    /// reset are not retroactively invalidated — callers must discard
    /// anything delivered for the old session themselves.
    pub fn reset(&self) {
        let mut root = self.root.lock();
        if root.take().is_some() {
            tracing::debug!("Session root key discarded");
        }
    }
}

impl Default for CertificateManager {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn issue_for(manager: &CertificateManager, name: &str) -> (SigningKeyPair, Certificate) {
        let keypair = manager.generate_signing_key_pair().unwrap();
        let cert = manager
            .issue_certificate(name, &keypair.public_key())
            .unwrap();
        (keypair, cert)
    }

    #[test]
    fn test_fresh_certificate_verifies() {
        let manager = CertificateManager::new();
        let (_, cert) = issue_for(&manager, "alice");

        assert!(manager.verify_certificate(&cert));
    }

    #[test]
    fn test_certificate_fields() {
        let manager = CertificateManager::new();
        let keypair = manager.generate_signing_key_pair().unwrap();
        let cert = manager
            .issue_certificate("alice", &keypair.public_key())
            .unwrap();

        assert!(cert.subject.starts_with("alice-"));
        assert!(cert.issued_at < cert.expires_at);
        assert_eq!(cert.expires_at - cert.issued_at, CERT_VALIDITY_MS);
        assert_eq!(
            cert.subject_public_key().unwrap(),
            keypair.public_key()
        );
    }

    #[test]
    fn test_expired_certificate_fails() {
        let manager = CertificateManager::new();
        let keypair = manager.generate_signing_key_pair().unwrap();
        let cert = manager
            .issue_certificate_with_validity("alice", &keypair.public_key(), 1)
            .unwrap();

        std::thread::sleep(std::time::Duration::from_millis(10));
        assert!(!manager.verify_certificate(&cert));
    }

    #[test]
    fn test_not_yet_valid_certificate_fails() {
        let manager = CertificateManager::new();
        let (_, mut cert) = issue_for(&manager, "alice");

        // Shift the window into the future (breaks the signature too, but
        // the time check alone must already reject it)
        cert.issued_at += 60_000;
        cert.expires_at += 60_000;

        assert!(!manager.verify_certificate(&cert));
    }

    #[test]
    fn test_inverted_window_fails() {
        let manager = CertificateManager::new();
        let (_, mut cert) = issue_for(&manager, "alice");

        std::mem::swap(&mut cert.issued_at, &mut cert.expires_at);
        assert!(!manager.verify_certificate(&cert));
    }

    #[test]
    fn test_tampered_subject_fails() {
        let manager = CertificateManager::new();
        let (_, mut cert) = issue_for(&manager, "alice");

        cert.subject = format!("mallory-{}", cert.issued_at);
        assert!(!manager.verify_certificate(&cert));
    }

    #[test]
    fn test_tampered_public_key_fails() {
        let manager = CertificateManager::new();
        let (_, mut cert) = issue_for(&manager, "alice");

        let other = SigningKeyPair::generate().unwrap();
        cert.public_key = other.public_key().to_base64();
        assert!(!manager.verify_certificate(&cert));
    }

    #[test]
    fn test_tampered_timestamp_fails() {
        let manager = CertificateManager::new();
        let (_, mut cert) = issue_for(&manager, "alice");

        cert.issued_at -= 1;
        assert!(!manager.verify_certificate(&cert));
    }

    #[test]
    fn test_malformed_public_key_fails_closed() {
        let manager = CertificateManager::new();
        let (_, mut cert) = issue_for(&manager, "alice");

        cert.public_key = "definitely not base64 !!!".into();
        assert!(!manager.verify_certificate(&cert));
    }

    #[test]
    fn test_cross_manager_isolation() {
        let manager_a = CertificateManager::new();
        let manager_b = CertificateManager::new();

        let (_, cert_a) = issue_for(&manager_a, "alice");
        // Give B a root key of its own
        let (_, cert_b) = issue_for(&manager_b, "bob");

        assert!(manager_a.verify_certificate(&cert_a));
        assert!(!manager_b.verify_certificate(&cert_a));
        assert!(!manager_a.verify_certificate(&cert_b));
    }

    #[test]
    fn test_reset_invalidates_issued_certificates() {
        let manager = CertificateManager::new();
        let (_, cert) = issue_for(&manager, "alice");
        assert!(manager.verify_certificate(&cert));

        manager.reset();
        assert!(!manager.verify_certificate(&cert));

        // Fresh root on next issuance: old cert stays dead, new one works
        let (_, cert2) = issue_for(&manager, "alice");
        assert!(!manager.verify_certificate(&cert));
        assert!(manager.verify_certificate(&cert2));
    }

    #[test]
    fn test_verify_without_root_is_false() {
        let manager = CertificateManager::new();
        let other = CertificateManager::new();
        let (_, cert) = issue_for(&other, "alice");

        // Manager has never issued anything: no root, fail closed
        assert!(!manager.verify_certificate(&cert));
        assert!(manager.root_public_key().is_none());
    }

    #[test]
    fn test_concurrent_first_issuance_single_root() {
        let manager = Arc::new(CertificateManager::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let manager = Arc::clone(&manager);
                std::thread::spawn(move || {
                    let keypair = manager.generate_signing_key_pair().unwrap();
                    manager
                        .issue_certificate(&format!("user-{}", i), &keypair.public_key())
                        .unwrap()
                })
            })
            .collect();

        let certs: Vec<Certificate> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // A single root signed all of them
        for cert in &certs {
            assert!(manager.verify_certificate(cert));
        }
    }

    #[test]
    fn test_certificate_json_wire_shape() {
        let manager = CertificateManager::new();
        let (_, cert) = issue_for(&manager, "alice");

        let json = serde_json::to_string(&cert).unwrap();
        assert!(json.contains("\"publicKey\""));
        assert!(json.contains("\"issuedAt\""));
        assert!(json.contains("\"expiresAt\""));

        let restored: Certificate = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cert);
        assert!(manager.verify_certificate(&restored));
    }

    #[test]
    fn test_import_public_key_round_trip() {
        let manager = CertificateManager::new();
        let keypair = manager.generate_signing_key_pair().unwrap();

        let imported = manager
            .import_public_key(&keypair.public_key().to_base64())
            .unwrap();
        assert_eq!(imported, keypair.public_key());

        assert!(manager.import_public_key("bogus").is_err());
    }
}
