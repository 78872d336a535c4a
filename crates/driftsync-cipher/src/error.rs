//! Error types for the cipher module.

use thiserror::Error;

/// Errors that can occur while encrypting or decrypting a document.
#[derive(Debug, Error)]
pub enum CipherError {
    /// Input does not start with the encryption header.
    #[error("input is not an encrypted document")]
    NotEncrypted,

    /// Envelope could not be encoded or decoded.
    #[error("malformed envelope: {0}")]
    Envelope(String),

    /// Encryption error.
    #[error("encryption error: {0}")]
    Encryption(String),

    /// Decryption error (wrong key or tampered data).
    #[error("decryption error: {0}")]
    Decryption(String),

    /// I/O error while reading the input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for cipher operations.
pub type Result<T> = std::result::Result<T, CipherError>;
