//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't leave a truncated output file
//! behind when encryption or decryption fails part way.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{CryptError, CryptResult};

/// Read the full contents of a file
///
/// A missing file is reported as [`CryptError::NotFound`] so callers can
/// tell it apart from permission or read failures.
pub fn read_bytes<P: AsRef<Path>>(path: P) -> CryptResult<Vec<u8>> {
    let path = path.as_ref();

    fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CryptError::NotFound(path.to_path_buf()),
        _ => CryptError::Io(format!("Failed to read {}: {}", path.display(), e)),
    })
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// The destination is either completely written or left untouched.
pub fn write_bytes_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> CryptResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CryptError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = temp_path_for(path);

    let result = write_and_sync(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path)
            .map_err(|e| CryptError::Io(format!("Failed to rename temp file: {}", e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_and_sync(temp_path: &Path, data: &[u8]) -> CryptResult<()> {
    let mut file = File::create(temp_path)
        .map_err(|e| CryptError::Io(format!("Failed to create temp file: {}", e)))?;

    file.write_all(data)
        .map_err(|e| CryptError::Io(format!("Failed to write data: {}", e)))?;

    file.sync_all()
        .map_err(|e| CryptError::Io(format!("Failed to sync data: {}", e)))?;

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_nonexistent_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.jpg");

        let err = read_bytes(&path).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.jpg.enc");

        write_bytes_atomic(&path, b"envelope bytes").unwrap();
        assert_eq!(read_bytes(&path).unwrap(), b"envelope bytes");
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.jpg.enc");

        write_bytes_atomic(&path, &[1, 2, 3]).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("photo.jpg.enc.tmp").exists());
    }

    #[test]
    fn test_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.bin");

        write_bytes_atomic(&path, b"first").unwrap();
        write_bytes_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("out.enc");

        write_bytes_atomic(&path, b"x").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_failed_rename_cleans_up() {
        let temp_dir = TempDir::new().unwrap();
        // A directory at the target path makes the rename fail
        let path = temp_dir.path().join("taken");
        fs::create_dir_all(path.join("child")).unwrap();

        assert!(write_bytes_atomic(&path, b"data").is_err());
        assert!(!temp_dir.path().join("taken.tmp").exists());
    }
}
