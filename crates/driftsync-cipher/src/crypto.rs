//! Symmetric primitives: per-file key derivation and ChaCha20-Poly1305.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use driftsync_core::MasterKey;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::{CipherError, Result};

/// Domain separation string for repo document keys.
const REPO_KEY_CONTEXT: &str = "driftsync-cipher-v1 repo-document";

/// A 256-bit ChaCha20-Poly1305 key derived from a master key.
#[derive(Clone)]
pub struct FileKey([u8; 32]);

impl FileKey {
    /// Derive the key used for the repo document.
    ///
    /// Deterministic in the master key's bytes and salt.
    pub fn derive(master: &MasterKey) -> Self {
        let mut hasher = blake3::Hasher::new_derive_key(REPO_KEY_CONTEXT);
        hasher.update(master.key_bytes());
        hasher.update(master.salt());
        Self(*hasher.finalize().as_bytes())
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Encrypt data with this key.
    pub fn encrypt(&self, plaintext: &[u8], nonce: &EncryptionNonce) -> Result<Vec<u8>> {
        let cipher = ChaCha20Poly1305::new_from_slice(&self.0)
            .map_err(|e| CipherError::Encryption(e.to_string()))?;

        cipher
            .encrypt(Nonce::from_slice(&nonce.0), plaintext)
            .map_err(|e| CipherError::Encryption(e.to_string()))
    }

    /// Decrypt data with this key.
    pub fn decrypt(&self, ciphertext: &[u8], nonce: &EncryptionNonce) -> Result<Vec<u8>> {
        let cipher = ChaCha20Poly1305::new_from_slice(&self.0)
            .map_err(|e| CipherError::Decryption(e.to_string()))?;

        cipher
            .decrypt(Nonce::from_slice(&nonce.0), ciphertext)
            .map_err(|e| CipherError::Decryption(e.to_string()))
    }
}

/// A 96-bit nonce for ChaCha20-Poly1305.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionNonce(pub [u8; 12]);

impl EncryptionNonce {
    /// Generate a new random nonce.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 12];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }
}
