//! Interactive fallback when no command is given
//!
//! Asks for an action and a path on the given reader, mirroring the
//! positional `encrypt <path>` / `decrypt <path>` commands.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::error::{CryptError, CryptResult};

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Encrypt,
    Decrypt,
}

impl Action {
    /// Accepts anything starting with `e` or `d`, case-insensitive
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim().chars().next()?.to_ascii_lowercase() {
            'e' => Some(Action::Encrypt),
            'd' => Some(Action::Decrypt),
            _ => None,
        }
    }
}

/// A fully answered interactive prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractiveRequest {
    pub action: Action,
    pub path: PathBuf,
}

/// Prompt for an action and a path
///
/// The path must exist; the action must start with `e` or `d`.
pub fn prompt_request<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> CryptResult<InteractiveRequest> {
    let action = ask(input, output, "Do you want to (e)ncrypt or (d)ecrypt?: ")?;
    let path = ask(input, output, "Enter full path to file: ")?;

    let path = PathBuf::from(path.trim());
    if path.as_os_str().is_empty() || !path.exists() {
        return Err(CryptError::NotFound(path));
    }

    let action = Action::parse(&action)
        .ok_or_else(|| CryptError::Validation("Invalid choice. Use 'e' or 'd'.".into()))?;

    Ok(InteractiveRequest { action, path })
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> CryptResult<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_parse_action() {
        assert_eq!(Action::parse("e"), Some(Action::Encrypt));
        assert_eq!(Action::parse("Encrypt"), Some(Action::Encrypt));
        assert_eq!(Action::parse(" d "), Some(Action::Decrypt));
        assert_eq!(Action::parse("x"), None);
        assert_eq!(Action::parse(""), None);
    }

    #[test]
    fn test_prompt_request() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("cat.png");
        std::fs::write(&file, b"x").unwrap();

        let mut input = Cursor::new(format!("e\n{}\n", file.display()));
        let mut output = Vec::new();
        let request = prompt_request(&mut input, &mut output).unwrap();

        assert_eq!(request.action, Action::Encrypt);
        assert_eq!(request.path, file);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("(e)ncrypt or (d)ecrypt"));
        assert!(shown.contains("Enter full path to file"));
    }

    #[test]
    fn test_prompt_missing_file() {
        let mut input = Cursor::new("d\n/definitely/not/here.enc\n");
        let err = prompt_request(&mut input, &mut Vec::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_prompt_invalid_choice() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("cat.png");
        std::fs::write(&file, b"x").unwrap();

        let mut input = Cursor::new(format!("x\n{}\n", file.display()));
        let err = prompt_request(&mut input, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CryptError::Validation(_)));
    }
}
