//! User settings for imgcrypt
//!
//! Persisted as `config.json` in the base directory. Every field has a
//! default, so a missing or partial file still loads.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::ImgcryptPaths;
use crate::error::CryptError;

/// User settings for imgcrypt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Name of the environment variable holding the base64 key
    #[serde(default = "default_key_env")]
    pub key_env: String,

    /// File holding the base64 key, used when the environment variable is unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_file: Option<PathBuf>,

    /// Refuse to encrypt files that don't look like images
    #[serde(default = "default_true")]
    pub require_image: bool,

    /// Write a JSONL session log for each run
    #[serde(default = "default_true")]
    pub session_log: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_key_env() -> String {
    "IMGCRYPT_KEY".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            key_env: default_key_env(),
            key_file: None,
            require_image: true,
            session_log: true,
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &ImgcryptPaths) -> Result<Self, CryptError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| CryptError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                CryptError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ImgcryptPaths) -> Result<(), CryptError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| CryptError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| CryptError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
