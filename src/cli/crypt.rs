//! Encrypt, decrypt and supporting command handlers

use std::path::Path;

use crate::audit::{recent_across_sessions, AuditLogger};
use crate::config::{resolve_key, ImgcryptPaths, Settings};
use crate::crypto::{Key, KeySize};
use crate::display;
use crate::error::{CryptError, CryptResult};
use crate::services::{CryptContext, FileCryptService, FileReport};

/// clap value parser for `--size`
pub fn parse_key_size(value: &str) -> Result<KeySize, String> {
    value
        .parse::<usize>()
        .ok()
        .and_then(KeySize::from_len)
        .ok_or_else(|| format!("key size must be 16, 24 or 32 bytes, got '{}'", value))
}

/// Resolve the key and session logger into a context for file operations
pub fn build_context(
    paths: &ImgcryptPaths,
    settings: &Settings,
    key_file: Option<&Path>,
    any_file: bool,
) -> CryptResult<CryptContext> {
    let (key, _origin) = resolve_key(settings, key_file)?;

    let mut ctx = CryptContext::new(key).require_image(settings.require_image && !any_file);
    if settings.session_log {
        ctx = ctx.with_logger(AuditLogger::for_session(&paths.log_dir())?);
    }
    Ok(ctx)
}

/// Encrypt a file and print the result
pub fn handle_encrypt(ctx: &CryptContext, path: &Path) -> CryptResult<FileReport> {
    let report = FileCryptService::new(ctx).encrypt_file(path)?;
    println!("{}", display::format_encrypted(&report));
    Ok(report)
}

/// Decrypt a file and print the result
pub fn handle_decrypt(ctx: &CryptContext, path: &Path) -> CryptResult<FileReport> {
    let report = FileCryptService::new(ctx).decrypt_file(path)?;
    println!("{}", display::format_decrypted(&report));
    Ok(report)
}

/// Print a fresh base64 key on stdout
pub fn handle_keygen(size: KeySize) -> CryptResult<()> {
    let key = Key::generate(size);
    println!("{}", key.to_base64());
    eprintln!(
        "Generated a {} key. Store it in $IMGCRYPT_KEY or a key file; it cannot be recovered.",
        size
    );
    Ok(())
}

/// Show paths, settings and where the key would come from
pub fn handle_config(
    paths: &ImgcryptPaths,
    settings: &Settings,
    key_file: Option<&Path>,
) -> CryptResult<()> {
    println!("imgcrypt Configuration");
    println!("======================");
    println!("Base directory:  {}", paths.base_dir().display());
    let written = if paths.is_initialized() {
        ""
    } else {
        " (not written yet, run 'imgcrypt init')"
    };
    println!(
        "Settings file:   {}{}",
        paths.settings_file().display(),
        written
    );
    println!("Log directory:   {}", paths.log_dir().display());
    println!();
    println!("Settings:");
    println!("  Key variable:   ${}", settings.key_env);
    match &settings.key_file {
        Some(path) => println!("  Key file:       {}", path.display()),
        None => println!("  Key file:       (none)"),
    }
    println!("  Require image:  {}", settings.require_image);
    println!("  Session log:    {}", settings.session_log);
    println!();

    match resolve_key(settings, key_file) {
        Ok((key, origin)) => println!("Key: {} from {}", key.size(), origin),
        Err(CryptError::Key(msg)) => println!("Key: unavailable ({})", msg),
        Err(e) => println!("Key: invalid ({})", e),
    }

    Ok(())
}

/// Write default settings and create directories
pub fn handle_init(paths: &ImgcryptPaths, settings: &Settings) -> CryptResult<()> {
    println!("Initializing imgcrypt at: {}", paths.base_dir().display());
    settings.save(paths)?;
    println!("Settings written to {}", paths.settings_file().display());
    println!();
    println!(
        "Set ${} to a base64 key (see 'imgcrypt keygen') before encrypting.",
        settings.key_env
    );
    Ok(())
}

/// Print the most recent session log entries
pub fn handle_history(paths: &ImgcryptPaths, limit: usize) -> CryptResult<()> {
    let entries = recent_across_sessions(&paths.log_dir(), limit)?;
    println!("{}", display::format_history(&entries));
    Ok(())
}
