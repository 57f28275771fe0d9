//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: editor error (bad color, stale path, theme index out of range)
//! - 11: I/O error (reading or writing a theme file)
//! - 12: input error (bad rules JSON, malformed theme document, bad path)
//! - 13: serialization error

use std::fmt;
use theme_lab_core::EditorError;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
pub enum CliError {
    /// An editor-level error (bad color, stale path, theme index).
    Editor(EditorError),
    /// An I/O error (file read or write).
    Io(String),
    /// A user input error (bad rules JSON, malformed document, bad path).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Editor(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Editor(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<EditorError> for CliError {
    fn from(e: EditorError) -> Self {
        match e {
            EditorError::InvalidDocument(msg) => CliError::Input(msg),
            EditorError::InvalidPath(msg) => CliError::Input(format!("invalid path: {msg}")),
            other => CliError::Editor(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
