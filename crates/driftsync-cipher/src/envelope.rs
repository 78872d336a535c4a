//! Encrypted document envelope.
//!
//! An encrypted document is the magic header followed by a CBOR-encoded
//! [`EncryptedPayload`].

use serde::{Deserialize, Serialize};

use crate::crypto::{EncryptionNonce, FileKey};
use crate::error::{CipherError, Result};

/// Header that marks a file as encrypted.
pub const MAGIC: [u8; 4] = *b"DSE1";

/// Format identifier for encrypted payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum EncryptionFormat {
    /// ChaCha20-Poly1305 with 256-bit key.
    ChaCha20Poly1305 = 1,
}

/// The ciphertext and what is needed to open it (given the key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPayload {
    pub format: EncryptionFormat,

    /// Unique per encryption.
    pub nonce: EncryptionNonce,

    /// Includes the authentication tag.
    pub ciphertext: Vec<u8>,
}

impl EncryptedPayload {
    /// Encrypt plaintext with a fresh nonce.
    pub fn seal(plaintext: &[u8], key: &FileKey) -> Result<Self> {
        let nonce = EncryptionNonce::generate();
        let ciphertext = key.encrypt(plaintext, &nonce)?;

        Ok(Self {
            format: EncryptionFormat::ChaCha20Poly1305,
            nonce,
            ciphertext,
        })
    }

    pub fn open(&self, key: &FileKey) -> Result<Vec<u8>> {
        match self.format {
            EncryptionFormat::ChaCha20Poly1305 => key.decrypt(&self.ciphertext, &self.nonce),
        }
    }

    /// Header plus CBOR body.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = MAGIC.to_vec();
        ciborium::into_writer(self, &mut buf).map_err(|e| CipherError::Envelope(e.to_string()))?;
        Ok(buf)
    }

    /// Parse header plus CBOR body.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let body = bytes.strip_prefix(MAGIC.as_slice()).ok_or(CipherError::NotEncrypted)?;
        ciborium::from_reader(body).map_err(|e| CipherError::Envelope(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftsync_core::MasterKey;

    #[test]
    fn test_seal_open_roundtrip() {
        let key = FileKey::derive(&MasterKey::generate());
        let envelope = EncryptedPayload::seal(b"hello, encrypted world!", &key).unwrap();

        let recovered = EncryptedPayload::from_bytes(&envelope.to_bytes().unwrap()).unwrap();
        assert_eq!(recovered, envelope);
        assert_eq!(recovered.open(&key).unwrap(), b"hello, encrypted world!");
    }

    #[test]
    fn test_bytes_start_with_magic() {
        let key = FileKey::derive(&MasterKey::generate());
        let bytes = EncryptedPayload::seal(b"x", &key).unwrap().to_bytes().unwrap();
        assert_eq!(&bytes[..4], b"DSE1");
    }

    #[test]
    fn test_missing_magic() {
        let err = EncryptedPayload::from_bytes(b"{\"repo_id\":\"00\"}").unwrap_err();
        assert!(matches!(err, CipherError::NotEncrypted));
    }

    #[test]
    fn test_truncated_body() {
        let err = EncryptedPayload::from_bytes(b"DSE1\xa3").unwrap_err();
        assert!(matches!(err, CipherError::Envelope(_)));
    }

    #[test]
    fn test_wrong_key_fails() {
        let envelope =
            EncryptedPayload::seal(b"secret", &FileKey::derive(&MasterKey::generate())).unwrap();
        let other = FileKey::derive(&MasterKey::generate());
        assert!(matches!(envelope.open(&other), Err(CipherError::Decryption(_))));
    }
}
