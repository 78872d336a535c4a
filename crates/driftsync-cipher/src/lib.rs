//! # driftsync Cipher
//!
//! Encryption for the repo document.
//!
//! ## File Format
//!
//! ```text
//! +------+---------------------------------------------+
//! | DSE1 | CBOR { format, nonce, ciphertext }          |
//! +------+---------------------------------------------+
//!  4 B    ChaCha20-Poly1305, tag appended to ciphertext
//! ```
//!
//! The four magic bytes are what [`is_encrypted`] looks at; a plaintext
//! document never starts with them.
//!
//! ## Keys
//!
//! The file key is derived from the [`MasterKey`](driftsync_core::MasterKey)
//! with Blake3 in derive-key mode over the key bytes and salt, so the
//! master key itself never touches the cipher.
//!
//! ## Usage
//!
//! ```rust
//! use driftsync_cipher::{decrypt, encrypt, is_encrypted};
//! use driftsync_core::MasterKey;
//!
//! let key = MasterKey::generate();
//! let sealed = encrypt(br#"{"repo_id":"00"}"#, &key).unwrap();
//!
//! assert!(is_encrypted(&mut sealed.as_slice()).unwrap());
//! assert_eq!(decrypt(&mut sealed.as_slice(), &key).unwrap(), br#"{"repo_id":"00"}"#);
//! ```

pub mod cipher;
pub mod crypto;
pub mod envelope;
pub mod error;

pub use cipher::{decrypt, encrypt, is_encrypted, EnvelopeCipher};
pub use crypto::{EncryptionNonce, FileKey};
pub use envelope::{EncryptedPayload, EncryptionFormat, MAGIC};
pub use error::{CipherError, Result};
