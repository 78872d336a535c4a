//! Probe and decrypt entry points, and the [`RepoCipher`] implementation
//! the config loader uses by default.

use std::io::{self, Read};

use driftsync_core::{BoxError, MasterKey, RepoCipher};

use crate::crypto::FileKey;
use crate::envelope::{EncryptedPayload, MAGIC};
use crate::error::Result;

/// Check whether `reader` starts with the encryption header.
///
/// Reads at most `MAGIC.len()` bytes. Short or empty input is plaintext.
pub fn is_encrypted(reader: &mut dyn Read) -> io::Result<bool> {
    let mut header = Vec::with_capacity(MAGIC.len());
    reader.take(MAGIC.len() as u64).read_to_end(&mut header)?;
    Ok(header == MAGIC)
}

/// Encrypt `plaintext` into a complete encrypted document.
pub fn encrypt(plaintext: &[u8], master: &MasterKey) -> Result<Vec<u8>> {
    EncryptedPayload::seal(plaintext, &FileKey::derive(master))?.to_bytes()
}

/// Read an encrypted document from `reader` and return its plaintext.
pub fn decrypt(reader: &mut dyn Read, master: &MasterKey) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    EncryptedPayload::from_bytes(&bytes)?.open(&FileKey::derive(master))
}

/// The envelope format as a [`RepoCipher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeCipher;

impl RepoCipher for EnvelopeCipher {
    fn is_encrypted(&self, reader: &mut dyn Read) -> io::Result<bool> {
        is_encrypted(reader)
    }

    fn decrypt(&self, reader: &mut dyn Read, key: &MasterKey) -> std::result::Result<Vec<u8>, BoxError> {
        Ok(decrypt(reader, key)?)
    }
}
