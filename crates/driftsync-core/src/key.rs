//! Master key material.
//!
//! The master key is stored in the local config document and is the only
//! secret needed to read an encrypted repo document. It is consumed as raw
//! key material; deriving it from a password happens elsewhere.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::hex_serde;

/// Length of a freshly generated salt.
pub const SALT_LEN: usize = 32;

/// A salted 256-bit secret key.
///
/// Serialized as `{"salt": "<hex>", "key": "<hex>"}`. The `Debug` output
/// shows only the salt prefix, never the key.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterKey {
    #[serde(with = "hex_serde::bytes")]
    salt: Vec<u8>,
    #[serde(with = "hex_serde::key32")]
    key: [u8; 32],
}

impl MasterKey {
    /// Create from a salt and raw key bytes.
    pub fn new(salt: impl Into<Vec<u8>>, key: [u8; 32]) -> Self {
        Self {
            salt: salt.into(),
            key,
        }
    }

    /// Generate a new random key with a random salt.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let mut salt = vec![0u8; SALT_LEN];
        let mut key = [0u8; 32];
        rng.fill_bytes(&mut salt);
        rng.fill_bytes(&mut key);
        Self { salt, key }
    }

    /// The salt bytes.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// The secret key bytes.
    pub const fn key_bytes(&self) -> &[u8; 32] {
        &self.key
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let salt = hex::encode(&self.salt);
        write!(f, "MasterKey(salt={}..)", &salt[..salt.len().min(8)])
    }
}
