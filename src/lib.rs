//! imgcrypt - encrypt and decrypt image files with AES-CBC envelopes
//!
//! An encrypted file is a 16-byte random IV followed by the AES-CBC
//! ciphertext of the PKCS#7-padded original. The key is always supplied at
//! run time, from an environment variable or a key file.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `crypto`: Envelope codec, padding and AES-CBC engine (no I/O)
//! - `error`: Custom error types
//! - `config`: Paths, settings and key resolution
//! - `storage`: Whole-file reads and atomic writes
//! - `audit`: JSONL session logs
//! - `sniff`: Image format detection and verification
//! - `services`: File-level encrypt/decrypt with naming and logging
//! - `cli`, `display`: Command handlers and terminal output
//!
//! # Example
//!
//! ```rust
//! use imgcrypt::crypto::{decrypt, encrypt, Key};
//!
//! let key = Key::from_slice(b"0123456789abcdef")?;
//! let envelope = encrypt(b"hello world", &key)?;
//! assert_eq!(envelope.len(), 32);
//! assert_eq!(decrypt(&envelope, &key)?, b"hello world");
//! # Ok::<(), imgcrypt::CryptError>(())
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod services;
pub mod sniff;
pub mod storage;

pub use error::{CryptError, CryptResult};
