//! Error taxonomy shared by the parser, the input loop and the terminal guard.

use std::io;

/// Errors surfaced by the shell core.
///
/// A failed completion is not an error (it rings the bell), and unreadable
/// search-path directories are skipped during discovery, so neither appears here.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// Ill-formed command line: a redirection operator without a target file,
    /// or an unterminated quote when strict quoting is enabled.
    #[error("syntax error: {0}")]
    MalformedInput(String),

    /// Entering or restoring raw terminal mode failed.
    #[error("terminal mode: {0}")]
    TerminalMode(#[source] io::Error),

    /// Reading keystrokes or writing to the terminal failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ShellError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ShellError::MalformedInput(reason.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = ShellError> = std::result::Result<T, E>;
