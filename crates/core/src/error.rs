//! Error types for the theme-lab core.

use thiserror::Error;

/// Errors produced by editor core operations.
///
/// None of these are fatal: every fallible entry point either returns one of
/// these or degrades to "no change" so the caller can keep editing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// A color string could not be parsed as a hex color.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A path no longer resolves in the current document.
    #[error("stale path: {0}")]
    StalePath(String),

    /// An encoded path string could not be decoded.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// A theme index was outside the document's theme list.
    #[error("theme index {index} out of range for document with {len} theme(s)")]
    ThemeIndexOutOfRange { index: usize, len: usize },

    /// A document could not be read from or written to its text form.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}
