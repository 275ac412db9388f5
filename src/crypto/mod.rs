//! Cryptographic core for imgcrypt
//!
//! Implements the on-disk envelope (IV followed by AES-CBC ciphertext) and
//! the PKCS#7 padding discipline around it. Nothing in this module touches
//! the filesystem or writes logs; callers own I/O and reporting.
//!
//! # Layout
//!
//! ```text
//! offset 0  .. 15   : IV
//! offset 16 .. EOF  : ciphertext (multiple of 16 bytes)
//! ```

pub mod cipher;
pub mod envelope;
pub mod key;
pub mod padding;

/// AES block size in bytes; also the IV length
pub const BLOCK_SIZE: usize = 16;

pub use cipher::{decrypt_block_chain, encrypt_block_chain, Iv};
pub use envelope::{decrypt, encrypt, encrypt_with_rng, envelope_len, join, split};
pub use key::{Key, KeySize};
pub use padding::{pad, padded_len, unpad};
