//! File encryption service
//!
//! `photo.jpg` encrypts to `photo.jpg.enc`. Decryption requires the `.enc`
//! suffix and writes `photo.decrypted.<ext>`, where `<ext>` comes from the
//! image format guessed from the recovered bytes, falling back to the extension
//! that preceded `.enc`, then to `bin`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::audit::{AuditEntry, AuditLogger, Operation};
use crate::crypto::{self, Key};
use crate::error::{CryptError, CryptResult};
use crate::sniff;
use crate::storage::{read_bytes, write_bytes_atomic};

/// Suffix appended to encrypted files
pub const ENCRYPTED_SUFFIX: &str = ".enc";

/// Everything a file operation needs, built once by the caller
#[derive(Debug)]
pub struct CryptContext {
    key: Key,
    logger: Option<AuditLogger>,
    require_image: bool,
}

impl CryptContext {
    /// Context with no session log that only accepts images
    pub fn new(key: Key) -> Self {
        Self {
            key,
            logger: None,
            require_image: true,
        }
    }

    /// Record every operation to `logger`
    pub fn with_logger(mut self, logger: AuditLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Whether encryption should refuse inputs that aren't images
    pub fn require_image(mut self, require: bool) -> Self {
        self.require_image = require;
        self
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn logger(&self) -> Option<&AuditLogger> {
        self.logger.as_ref()
    }
}

/// Outcome of a successful file operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Bytes written to `output`
    pub bytes: u64,
    /// Image format of the plaintext, when recognised
    pub format: Option<ImageFormat>,
}

/// Path of the envelope written for `path`
pub fn encrypted_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_os_string();
    name.push(ENCRYPTED_SUFFIX);
    PathBuf::from(name)
}

/// Path of the plaintext written when decrypting `path`
///
/// Fails with a validation error unless `path` ends in `.enc`.
pub fn decrypted_path(path: &Path, format: Option<ImageFormat>) -> CryptResult<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CryptError::Validation(format!("Invalid file name: {}", path.display())))?;

    let inner = file_name.strip_suffix(ENCRYPTED_SUFFIX).ok_or_else(|| {
        CryptError::Validation(format!("File must end with {}: {}", ENCRYPTED_SUFFIX, path.display()))
    })?;

    let inner = Path::new(inner);
    let stem = inner
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let ext = format
        .map(sniff::extension)
        .or_else(|| inner.extension().and_then(|e| e.to_str()))
        .unwrap_or("bin");

    Ok(path.with_file_name(format!("{}.decrypted.{}", stem, ext)))
}

/// Service for encrypting and decrypting files
pub struct FileCryptService<'a> {
    ctx: &'a CryptContext,
}

impl<'a> FileCryptService<'a> {
    /// Create a new file service
    pub fn new(ctx: &'a CryptContext) -> Self {
        Self { ctx }
    }

    /// Encrypt `path` into `<path>.enc`
    pub fn encrypt_file(&self, path: &Path) -> CryptResult<FileReport> {
        let result = self.encrypt_inner(path);
        self.record(Operation::Encrypt, path, &result)?;
        result
    }

    /// Decrypt `<name>.enc` into `<stem>.decrypted.<ext>`
    pub fn decrypt_file(&self, path: &Path) -> CryptResult<FileReport> {
        let result = self.decrypt_inner(path);
        self.record(Operation::Decrypt, path, &result)?;
        result
    }

    fn encrypt_inner(&self, path: &Path) -> CryptResult<FileReport> {
        let raw = read_bytes(path)?;

        let format = if self.ctx.require_image {
            let format = sniff::verify(&raw).map_err(|e| {
                CryptError::Validation(format!(
                    "Not a valid image file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            Some(format)
        } else {
            sniff::guess(&raw)
        };

        let envelope = crypto::encrypt(&raw, self.ctx.key())?;
        let output = encrypted_path(path);
        write_bytes_atomic(&output, &envelope)?;

        Ok(FileReport {
            input: path.to_path_buf(),
            output,
            bytes: envelope.len() as u64,
            format,
        })
    }

    fn decrypt_inner(&self, path: &Path) -> CryptResult<FileReport> {
        // Validate the name before reading anything
        decrypted_path(path, None)?;

        let envelope = read_bytes(path)?;
        let raw = crypto::decrypt(&envelope, self.ctx.key())?;

        let format = sniff::guess(&raw);
        let output = decrypted_path(path, format)?;
        write_bytes_atomic(&output, &raw)?;

        Ok(FileReport {
            input: path.to_path_buf(),
            output,
            bytes: raw.len() as u64,
            format,
        })
    }

    /// Append a session log entry; a logging failure only surfaces when the
    /// operation itself succeeded
    fn record(
        &self,
        operation: Operation,
        path: &Path,
        result: &CryptResult<FileReport>,
    ) -> CryptResult<()> {
        let Some(logger) = self.ctx.logger() else {
            return Ok(());
        };

        match result {
            Ok(report) => logger.log(&AuditEntry::success(
                operation,
                path,
                &report.output,
                report.bytes,
            )),
            Err(err) => {
                let _ = logger.log(&AuditEntry::failure(operation, path, err));
                Ok(())
            }
        }
    }
}
