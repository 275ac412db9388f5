//! Custom error types for imgcrypt
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for imgcrypt operations
#[derive(Error, Debug)]
pub enum CryptError {
    /// Key length is not an AES key size
    #[error("Invalid key size: expected 16, 24 or 32 bytes, got {actual}")]
    InvalidKeySize { actual: usize },

    /// IV length is not the AES block size
    #[error("Invalid IV length: expected 16 bytes, got {actual}")]
    InvalidIvLength { actual: usize },

    /// Input is too small to hold an IV
    #[error("Envelope too short: {len} bytes")]
    EnvelopeTooShort { len: usize },

    /// Ciphertext is empty or not block-aligned
    #[error("Malformed ciphertext length: {len} bytes is not a non-zero multiple of the block size")]
    MalformedCiphertextLength { len: usize },

    /// Padding check failed after decryption
    #[error("Decryption failed: wrong key or corrupted file")]
    InvalidPadding,

    /// Input file does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Key could not be resolved or decoded
    #[error("Key error: {0}")]
    Key(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Input rejected before any cryptography ran
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CryptError {
    /// Stable identifier used as the `error_kind` field in session logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidKeySize { .. } => "invalid_key_size",
            Self::InvalidIvLength { .. } => "invalid_iv_length",
            Self::EnvelopeTooShort { .. } => "envelope_too_short",
            Self::MalformedCiphertextLength { .. } => "malformed_ciphertext_length",
            Self::InvalidPadding => "invalid_padding",
            Self::NotFound(_) => "not_found",
            Self::Io(_) => "io",
            Self::Key(_) => "key",
            Self::Config(_) => "config",
            Self::Json(_) => "json",
            Self::Validation(_) => "validation",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<std::io::Error> for CryptError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CryptError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for imgcrypt operations
pub type CryptResult<T> = Result<T, CryptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CryptError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_invalid_padding_hides_details() {
        let err = CryptError::InvalidPadding;
        assert_eq!(
            err.to_string(),
            "Decryption failed: wrong key or corrupted file"
        );
        assert_eq!(err.kind(), "invalid_padding");
    }

    #[test]
    fn test_not_found_error() {
        let err = CryptError::NotFound(PathBuf::from("photo.jpg"));
        assert_eq!(err.to_string(), "File not found: photo.jpg");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_key_size_error() {
        let err = CryptError::InvalidKeySize { actual: 15 };
        assert_eq!(
            err.to_string(),
            "Invalid key size: expected 16, 24 or 32 bytes, got 15"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CryptError = io_err.into();
        assert!(matches!(err, CryptError::Io(_)));
        assert_eq!(err.kind(), "io");
    }
}
