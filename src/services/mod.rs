//! Service layer for imgcrypt
//!
//! Binds the cryptographic core to files on disk: input validation, output
//! naming, atomic writes and session logging.

pub mod file_crypt;

pub use file_crypt::{decrypted_path, encrypted_path, CryptContext, FileCryptService, FileReport};
