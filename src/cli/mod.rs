//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod crypt;
pub mod interactive;

pub use crypt::{
    build_context, handle_config, handle_decrypt, handle_encrypt, handle_history, handle_init,
    handle_keygen, parse_key_size,
};
pub use interactive::{prompt_request, Action, InteractiveRequest};
