//! Types produced by the redirection parser and consumed by the dispatcher.

use std::path::PathBuf;

/// Output stream a redirection applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// One recognised redirection operator spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectOperator {
    /// Operator text as typed, e.g. `">>"` or `"2>"`.
    pub spelling: &'static str,
    pub stream: Stream,
    /// `true` for `>>` forms (open with append), `false` for `>` forms (truncate).
    pub append: bool,
}

impl RedirectOperator {
    const fn new(spelling: &'static str, stream: Stream, append: bool) -> Self {
        Self {
            spelling,
            stream,
            append,
        }
    }
}

/// Stdout operators in scan order: append forms first so `>>` is never read as `>`.
pub const STDOUT_OPERATORS: [RedirectOperator; 4] = [
    RedirectOperator::new(">>", Stream::Stdout, true),
    RedirectOperator::new("1>>", Stream::Stdout, true),
    RedirectOperator::new(">", Stream::Stdout, false),
    RedirectOperator::new("1>", Stream::Stdout, false),
];

/// Stderr operators in scan order.
pub const STDERR_OPERATORS: [RedirectOperator; 2] = [
    RedirectOperator::new("2>>", Stream::Stderr, true),
    RedirectOperator::new("2>", Stream::Stderr, false),
];

/// A file an output stream is sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub path: PathBuf,
    pub append: bool,
}

/// A command line split into its bare command text and its output targets.
///
/// At most one target per stream is recognised. `command` never contains the
/// operator or the target filename of a recognised redirection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Redirection {
    /// Command text with every recognised redirection clause removed.
    pub command: String,
    pub stdout: Option<RedirectTarget>,
    pub stderr: Option<RedirectTarget>,
}

impl Redirection {
    /// Target for the given stream, if one was parsed.
    pub fn target(&self, stream: Stream) -> Option<&RedirectTarget> {
        match stream {
            Stream::Stdout => self.stdout.as_ref(),
            Stream::Stderr => self.stderr.as_ref(),
        }
    }

    /// Whether any output stream is redirected.
    pub fn is_redirected(&self) -> bool {
        self.stdout.is_some() || self.stderr.is_some()
    }
}
