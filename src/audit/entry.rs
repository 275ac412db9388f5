//! Session log entry data structures

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CryptError;

/// File operations that are logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Encrypt,
    Decrypt,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Encrypt => write!(f, "ENCRYPT"),
            Operation::Decrypt => write!(f, "DECRYPT"),
        }
    }
}

/// Result of a logged operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

/// A single session log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation finished (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Path of the file that was read
    pub input: String,

    /// Path of the file that was written, on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    pub outcome: Outcome,

    /// `CryptError::kind()` of the failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,

    /// Bytes written, on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
}

impl AuditEntry {
    /// Entry for a completed operation
    pub fn success(
        operation: Operation,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        bytes: u64,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            input: input.as_ref().display().to_string(),
            output: Some(output.as_ref().display().to_string()),
            outcome: Outcome::Success,
            error_kind: None,
            bytes: Some(bytes),
        }
    }

    /// Entry for a failed operation
    pub fn failure(operation: Operation, input: impl AsRef<Path>, error: &CryptError) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            input: input.as_ref().display().to_string(),
            output: None,
            outcome: Outcome::Failure,
            error_kind: Some(error.kind().to_string()),
            bytes: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.input
        );

        match (&self.output, &self.error_kind) {
            (Some(out), _) => output.push_str(&format!(" -> {}", out)),
            (None, Some(kind)) => output.push_str(&format!(" FAILED ({})", kind)),
            (None, None) => {}
        }

        output
    }
}
