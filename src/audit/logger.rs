//! Session logger for append-only JSONL logs
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::{CryptError, CryptResult};

use super::entry::AuditEntry;

const SESSION_EXTENSION: &str = "jsonl";

/// Handles writing entries to a session log file
#[derive(Debug)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Create a logger for a new session file inside `log_dir`
    ///
    /// Files are named `session_YYYYMMDD_HHMMSS_mmm.jsonl`, so sorting by name
    /// sorts by start time.
    pub fn for_session(log_dir: &Path) -> CryptResult<Self> {
        fs::create_dir_all(log_dir)
            .map_err(|e| CryptError::Io(format!("Failed to create log directory: {}", e)))?;

        let now = Utc::now();
        let filename = format!(
            "session_{}_{:03}.{}",
            now.format("%Y%m%d_%H%M%S"),
            now.timestamp_subsec_millis(),
            SESSION_EXTENSION
        );
        Ok(Self::new(log_dir.join(filename)))
    }

    /// Append an entry, flushing immediately
    pub fn log(&self, entry: &AuditEntry) -> CryptResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| CryptError::Io(format!("Failed to open session log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| CryptError::Json(format!("Failed to serialize log entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| CryptError::Io(format!("Failed to write log entry: {}", e)))?;

        file.flush()
            .map_err(|e| CryptError::Io(format!("Failed to flush session log: {}", e)))?;

        Ok(())
    }

    /// Read all entries from this session's file, oldest first
    pub fn read_all(&self) -> CryptResult<Vec<AuditEntry>> {
        read_entries(&self.log_path)
    }

    /// Read the most recent N entries from this session
    pub fn read_recent(&self, count: usize) -> CryptResult<Vec<AuditEntry>> {
        let all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries[start..].to_vec())
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

/// Read the most recent N entries across every session file in `log_dir`
pub fn recent_across_sessions(log_dir: &Path, count: usize) -> CryptResult<Vec<AuditEntry>> {
    if !log_dir.exists() {
        return Ok(Vec::new());
    }

    let mut sessions = Vec::new();
    for entry in fs::read_dir(log_dir)
        .map_err(|e| CryptError::Io(format!("Failed to read log directory: {}", e)))?
    {
        let entry =
            entry.map_err(|e| CryptError::Io(format!("Failed to read log directory: {}", e)))?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == SESSION_EXTENSION) {
            sessions.push(path);
        }
    }
    sessions.sort();

    let mut entries = Vec::new();
    for session in &sessions {
        entries.extend(read_entries(session)?);
    }

    let start = entries.len().saturating_sub(count);
    Ok(entries.split_off(start))
}

fn read_entries(path: &Path) -> CryptResult<Vec<AuditEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| CryptError::Io(format!("Failed to open session log: {}", e)))?;

    let reader = BufReader::new(file);
    let mut entries = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            CryptError::Io(format!(
                "Failed to read {} line {}: {}",
                path.display(),
                line_num + 1,
                e
            ))
        })?;

        if line.trim().is_empty() {
            continue;
        }

        let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
            CryptError::Json(format!(
                "Failed to parse {} line {}: {}",
                path.display(),
                line_num + 1,
                e
            ))
        })?;

        entries.push(entry);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{Operation, Outcome};
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("session.jsonl"));
        (logger, temp_dir)
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        let entry = AuditEntry::success(Operation::Encrypt, "cat.png", "cat.png.enc", 64);

        logger.log(&entry).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Encrypt);
        assert_eq!(entries[0].outcome, Outcome::Success);
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();

        for i in 0..10 {
            let entry = AuditEntry::failure(
                Operation::Decrypt,
                format!("file-{}.enc", i),
                &CryptError::InvalidPadding,
            );
            logger.log(&entry).unwrap();
        }

        let recent = logger.read_recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].input, "file-7.enc");
        assert_eq!(recent[2].input, "file-9.enc");
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();

        assert!(!logger.path().exists());
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_for_session_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("logs");

        let logger = AuditLogger::for_session(&log_dir).unwrap();
        assert!(log_dir.exists());

        let name = logger.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("session_"));
        assert!(name.ends_with(".jsonl"));
    }

    #[test]
    fn test_recent_across_sessions() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path();

        let first = AuditLogger::new(log_dir.join("session_20250101_000000_000.jsonl"));
        let second = AuditLogger::new(log_dir.join("session_20250102_000000_000.jsonl"));
        first
            .log(&AuditEntry::success(Operation::Encrypt, "a.png", "a.png.enc", 1))
            .unwrap();
        first
            .log(&AuditEntry::success(Operation::Encrypt, "b.png", "b.png.enc", 1))
            .unwrap();
        second
            .log(&AuditEntry::success(Operation::Decrypt, "b.png.enc", "b.decrypted.png", 1))
            .unwrap();
        fs::write(log_dir.join("notes.txt"), "ignored").unwrap();

        let recent = recent_across_sessions(log_dir, 2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].input, "b.png");
        assert_eq!(recent[1].operation, Operation::Decrypt);
    }

    #[test]
    fn test_recent_across_sessions_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let entries = recent_across_sessions(&temp_dir.path().join("nope"), 5).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_corrupt_line_reports_json_error() {
        let (logger, _temp) = create_test_logger();
        fs::write(logger.path(), "{not json}\n").unwrap();

        assert!(matches!(logger.read_all(), Err(CryptError::Json(_))));
    }
}
