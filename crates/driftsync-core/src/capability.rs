//! Capabilities the loader consumes but does not implement.
//!
//! The loader only decides which bytes go where. Turning bytes into
//! documents is a [`DocumentCodec`]'s job; telling encrypted files apart and
//! decrypting them is a [`RepoCipher`]'s job.

use serde::de::DeserializeOwned;
use std::io::{self, Read};

use crate::key::MasterKey;

/// Opaque error from a collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// What a codec is asked to decode.
pub enum DocumentInput<'a> {
    /// An open file or other byte stream, read by the codec.
    Stream(&'a mut dyn Read),
    /// Text already in memory, e.g. a decrypted document.
    Text(&'a str),
}

/// Decodes documents from bytes or text.
pub trait DocumentCodec {
    /// Decode `input` into a `T`.
    fn decode<T: DeserializeOwned>(&self, input: DocumentInput<'_>) -> Result<T, BoxError>;
}

/// Detects and decrypts encrypted repo documents.
pub trait RepoCipher {
    /// Inspect the start of `reader` and report whether it holds an
    /// encrypted document. Must not need more than the header.
    fn is_encrypted(&self, reader: &mut dyn Read) -> io::Result<bool>;

    /// Decrypt the whole of `reader` with `key`, returning the plaintext.
    fn decrypt(&self, reader: &mut dyn Read, key: &MasterKey) -> Result<Vec<u8>, BoxError>;
}
