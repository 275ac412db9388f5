//! AES key material
//!
//! Keys are always supplied from outside the binary (see
//! [`crate::config::key_source`]). The bytes are wiped when the key is dropped
//! and never appear in `Debug` output.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptError, CryptResult};

/// Accepted AES key sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl KeySize {
    /// Map a byte length to a key size, if it is one
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(Self::Aes128),
            24 => Some(Self::Aes192),
            32 => Some(Self::Aes256),
            _ => None,
        }
    }

    /// Key length in bytes
    pub fn byte_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }

    /// Key length in bits
    pub fn bits(self) -> usize {
        self.byte_len() * 8
    }
}

impl fmt::Display for KeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AES-{}", self.bits())
    }
}

/// A validated AES key
///
/// The bytes are only wiped on drop, so a live key always holds exactly
/// `size.byte_len()` bytes.
#[derive(Clone, ZeroizeOnDrop)]
pub struct Key {
    bytes: Vec<u8>,
    #[zeroize(skip)]
    size: KeySize,
}

impl Key {
    /// Build a key from raw bytes
    ///
    /// Fails with [`CryptError::InvalidKeySize`] unless the input is exactly
    /// 16, 24 or 32 bytes. The input is never truncated or padded.
    pub fn from_slice(bytes: &[u8]) -> CryptResult<Self> {
        let size = KeySize::from_len(bytes.len()).ok_or(CryptError::InvalidKeySize {
            actual: bytes.len(),
        })?;
        Ok(Self {
            bytes: bytes.to_vec(),
            size,
        })
    }

    /// Decode a key from standard base64, ignoring surrounding whitespace
    pub fn from_base64(encoded: &str) -> CryptResult<Self> {
        let mut decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|e| CryptError::Key(format!("Invalid base64 key: {}", e)))?;
        let key = Self::from_slice(&decoded);
        decoded.zeroize();
        key
    }

    /// Generate a fresh random key from the OS random source
    pub fn generate(size: KeySize) -> Self {
        let mut bytes = vec![0u8; size.byte_len()];
        OsRng.fill_bytes(&mut bytes);
        Self { bytes, size }
    }

    /// Encode the key as standard base64
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Which AES variant this key selects
    pub fn size(&self) -> KeySize {
        self.size
    }
}

// Don't print the key bytes in Debug output
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key").field("size", &self.size()).finish()
    }
}
