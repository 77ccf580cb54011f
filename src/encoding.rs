//! # Encoding Helpers
//!
//! Base64 and hex encoding shared by the wire types.
//!
//! All externally visible shapes are JSON: key material and ciphertext
//! travel as base64 strings, content digests as lowercase hex. The serde
//! adapter modules here are used via `#[serde(with = "...")]` so the Rust
//! types keep fixed-size byte arrays internally while serializing to the
//! documented string forms.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::{Error, Result};

/// Encode bytes as standard base64
pub fn b64_encode(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decode standard base64 into bytes
pub fn b64_decode(s: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(s)
        .map_err(|e| Error::InvalidKey(format!("Invalid base64: {}", e)))
}

/// Decode base64 into a fixed-size array
pub fn b64_decode_array<const N: usize>(s: &str) -> Result<[u8; N]> {
    let bytes = b64_decode(s)?;
    bytes
        .try_into()
        .map_err(|_| Error::InvalidKey(format!("Expected {} base64-encoded bytes", N)))
}

/// Serde adapter: `Vec<u8>` as a base64 string
pub mod b64_vec {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize bytes as a base64 string
    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::b64_encode(bytes))
    }

    /// Deserialize a base64 string into bytes
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::b64_decode(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter: `[u8; N]` as a base64 string
pub mod b64_array {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize a byte array as a base64 string
    pub fn serialize<S, const N: usize>(
        bytes: &[u8; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::b64_encode(bytes))
    }

    /// Deserialize a base64 string into a fixed-size byte array
    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::b64_decode_array(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter: `[u8; N]` as a lowercase hex string
pub mod hex_array {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize a byte array as a lowercase hex string
    pub fn serialize<S, const N: usize>(
        bytes: &[u8; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    /// Deserialize a hex string into a fixed-size byte array
    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("Invalid length"))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_b64_round_trip() {
        let bytes = b"hello world";
        let encoded = b64_encode(bytes);
        let decoded = b64_decode(&encoded).unwrap();
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn test_b64_decode_rejects_garbage() {
        assert!(b64_decode("not base64 !!!").is_err());
    }

    #[test]
    fn test_b64_decode_array_wrong_length() {
        let encoded = b64_encode(&[1u8, 2, 3]);
        let result: crate::Result<[u8; 32]> = b64_decode_array(&encoded);
        assert!(result.is_err());
    }

    #[test]
    fn test_b64_decode_array_exact_length() {
        let bytes = [7u8; 12];
        let decoded: [u8; 12] = b64_decode_array(&b64_encode(&bytes)).unwrap();
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn test_serde_adapters() {
        use serde::{Deserialize, Serialize};

        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct Wire {
            #[serde(with = "b64_vec")]
            data: Vec<u8>,
            #[serde(with = "b64_array")]
            iv: [u8; 12],
            #[serde(with = "hex_array")]
            hash: [u8; 32],
        }

        let wire = Wire {
            data: vec![1, 2, 3],
            iv: [9u8; 12],
            hash: [0xabu8; 32],
        };

        let json = serde_json::to_string(&wire).unwrap();
        assert!(json.contains(&hex::encode([0xabu8; 32])));

        let restored: Wire = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, wire);
    }
}
