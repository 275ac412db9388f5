//! Session logging for imgcrypt
//!
//! Records every file encryption and decryption, successful or not, as one
//! JSON object per line. Each process run writes its own session file under
//! the log directory.
//!
//! # Architecture
//!
//! - `AuditEntry`: one record with timestamp, operation, paths, outcome and
//!   the error kind on failure.
//! - `AuditLogger`: appends entries to a session file (JSONL) and reads them
//!   back.
//!
//! # Example
//!
//! ```rust,ignore
//! use imgcrypt::audit::{AuditEntry, AuditLogger, Operation};
//!
//! let logger = AuditLogger::for_session(&paths.log_dir())?;
//! logger.log(&AuditEntry::success(Operation::Encrypt, "cat.png", "cat.png.enc", 2048))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation, Outcome};
pub use logger::{recent_across_sessions, AuditLogger};
