//! Display formatting for terminal output
//!
//! Status lines and the startup banner, coloured with crossterm. Nothing here
//! prints; callers decide between stdout and stderr.

use chrono::Local;
use crossterm::style::Stylize;

use crate::audit::AuditEntry;
use crate::services::FileReport;
use crate::sniff;

const RULE_WIDTH: usize = 65;

/// Green `[✔]` line
pub fn success(message: &str) -> String {
    format!("[✔] {}", message).green().to_string()
}

/// Red `[✘]` line
pub fn failure(message: &str) -> String {
    format!("[✘] {}", message).red().to_string()
}

/// Cyan `[+]` line
pub fn info(message: &str) -> String {
    format!("[+] {}", message).cyan().to_string()
}

/// Startup banner with tool name, version and today's date
pub fn banner() -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!(
        "{}\n{}\n\tVersion {}\n\tDate: {}\n{}",
        rule.as_str().bold(),
        "\tIMGCRYPT - Secure Your Visual Data".cyan(),
        env!("CARGO_PKG_VERSION"),
        Local::now().format("%Y-%m-%d"),
        rule.as_str().bold()
    )
}

/// One-line summary of an encryption
pub fn format_encrypted(report: &FileReport) -> String {
    let mut line = format!("Encrypted → {}", report.output.display());
    if let Some(format) = report.format {
        line.push_str(&format!(
            " ({} image, {} bytes)",
            sniff::label(format),
            report.bytes
        ));
    } else {
        line.push_str(&format!(" ({} bytes)", report.bytes));
    }
    success(&line)
}

/// One-line summary of a decryption
pub fn format_decrypted(report: &FileReport) -> String {
    success(&format!(
        "Decrypted → {} ({} bytes)",
        report.output.display(),
        report.bytes
    ))
}

/// Format session log entries, oldest first
pub fn format_history(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No operations logged yet.".to_string();
    }

    entries
        .iter()
        .map(|entry| {
            let line = entry.format_human_readable();
            if entry.is_success() {
                line
            } else {
                line.red().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::error::CryptError;
    use image::ImageFormat;
    use std::path::PathBuf;

    #[test]
    fn test_status_lines() {
        assert!(success("done").contains("[✔] done"));
        assert!(failure("nope").contains("[✘] nope"));
        assert!(info("hi").contains("[+] hi"));
    }

    #[test]
    fn test_banner_contents() {
        let banner = banner();
        assert!(banner.contains("IMGCRYPT"));
        assert!(banner.contains(env!("CARGO_PKG_VERSION")));
        assert!(banner.contains(&"=".repeat(RULE_WIDTH)));
    }

    #[test]
    fn test_format_encrypted() {
        let report = FileReport {
            input: PathBuf::from("cat.png"),
            output: PathBuf::from("cat.png.enc"),
            bytes: 48,
            format: Some(ImageFormat::Png),
        };
        let line = format_encrypted(&report);
        assert!(line.contains("Encrypted → cat.png.enc"));
        assert!(line.contains("PNG image, 48 bytes"));
    }

    #[test]
    fn test_format_history() {
        assert_eq!(format_history(&[]), "No operations logged yet.");

        let entries = vec![
            AuditEntry::success(Operation::Encrypt, "a.png", "a.png.enc", 32),
            AuditEntry::failure(Operation::Decrypt, "a.png.enc", &CryptError::InvalidPadding),
        ];
        let output = format_history(&entries);
        assert_eq!(output.lines().count(), 2);
        assert!(output.contains("a.png -> a.png.enc"));
        assert!(output.contains("invalid_padding"));
    }
}
