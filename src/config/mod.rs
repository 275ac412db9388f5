//! Configuration module for imgcrypt
//!
//! This module provides configuration management including:
//! - Path resolution for settings and session logs
//! - User settings persistence
//! - Key resolution from the environment or a key file

pub mod key_source;
pub mod paths;
pub mod settings;

pub use key_source::{resolve_key, KeyOrigin};
pub use paths::ImgcryptPaths;
pub use settings::Settings;
