//! Storage layer for imgcrypt
//!
//! Whole-file reads and crash-safe writes for plaintext and envelope files.

pub mod file_io;

pub use file_io::{read_bytes, write_bytes_atomic};
