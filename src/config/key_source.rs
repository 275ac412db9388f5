//! Key provider
//!
//! The key is never compiled into the binary. It is resolved once per run,
//! first match wins:
//!
//! 1. an explicit `--key-file` path
//! 2. the environment variable named by `Settings::key_env`
//! 3. `Settings::key_file`
//!
//! Both files and the environment variable hold the key as standard base64.

use std::path::{Path, PathBuf};

use zeroize::Zeroize;

use super::settings::Settings;
use crate::crypto::Key;
use crate::error::{CryptError, CryptResult};

/// Where a resolved key came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOrigin {
    File(PathBuf),
    Env(String),
}

impl std::fmt::Display for KeyOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyOrigin::File(path) => write!(f, "file {}", path.display()),
            KeyOrigin::Env(name) => write!(f, "${}", name),
        }
    }
}

/// Resolve the key from the process environment and settings
pub fn resolve_key(settings: &Settings, key_file: Option<&Path>) -> CryptResult<(Key, KeyOrigin)> {
    resolve_key_with(settings, key_file, |name| std::env::var(name).ok())
}

/// Resolve the key with an injectable environment lookup
pub fn resolve_key_with<F>(
    settings: &Settings,
    key_file: Option<&Path>,
    lookup: F,
) -> CryptResult<(Key, KeyOrigin)>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = key_file {
        return read_key_file(path).map(|key| (key, KeyOrigin::File(path.to_path_buf())));
    }

    if let Some(mut encoded) = lookup(&settings.key_env).filter(|v| !v.trim().is_empty()) {
        let key = Key::from_base64(&encoded);
        encoded.zeroize();
        return key.map(|key| (key, KeyOrigin::Env(settings.key_env.clone())));
    }

    if let Some(path) = settings.key_file.as_deref() {
        return read_key_file(path).map(|key| (key, KeyOrigin::File(path.to_path_buf())));
    }

    Err(CryptError::Key(format!(
        "No key configured: set ${} to a base64 key or pass --key-file",
        settings.key_env
    )))
}

fn read_key_file(path: &Path) -> CryptResult<Key> {
    if !path.exists() {
        return Err(CryptError::Key(format!(
            "Key file not found: {}",
            path.display()
        )));
    }

    let mut contents = std::fs::read_to_string(path).map_err(|e| {
        CryptError::Key(format!("Failed to read key file {}: {}", path.display(), e))
    })?;
    let key = Key::from_base64(&contents);
    contents.zeroize();
    key
}
