//! Path management for imgcrypt
//!
//! Resolves where settings and session logs live.
//!
//! ## Path Resolution Order
//!
//! 1. `IMGCRYPT_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories::ProjectDirs`
//!    (e.g. `~/.config/imgcrypt` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::CryptError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "IMGCRYPT_DATA_DIR";

/// Manages all paths used by imgcrypt
#[derive(Debug, Clone)]
pub struct ImgcryptPaths {
    /// Base directory for settings and logs
    base_dir: PathBuf,
}

impl ImgcryptPaths {
    /// Create a new ImgcryptPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and
    /// `IMGCRYPT_DATA_DIR` is unset.
    pub fn new() -> Result<Self, CryptError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "imgcrypt")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    CryptError::Config("Could not determine a config directory".into())
                })?
        };

        Ok(Self { base_dir })
    }

    /// Create ImgcryptPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the session log directory
    pub fn log_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Ensure the base and log directories exist
    pub fn ensure_directories(&self) -> Result<(), CryptError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CryptError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.log_dir())
            .map_err(|e| CryptError::Io(format!("Failed to create log directory: {}", e)))?;

        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
