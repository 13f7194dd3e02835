use crate::commands::CommandKind;
use crate::error::Result;
use crate::parse::{self, Redirection};

/// A finished input line broken down for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    /// Bare command text and output targets.
    pub redirection: Redirection,
    /// Words of the bare command, quotes and escapes resolved.
    pub argv: Vec<String>,
    /// Classification of argv[0]; `None` when the line has no words.
    pub kind: Option<CommandKind>,
}

impl CommandContext {
    /// Parse a line: strip redirections, tokenize the remainder, classify argv[0].
    ///
    /// # Errors
    ///
    /// [`ShellError::MalformedInput`](crate::ShellError::MalformedInput) for a
    /// redirection without a file name, or for an unterminated quote when
    /// `strict_quotes` is set.
    pub fn from_line(line: &str, strict_quotes: bool) -> Result<Self> {
        let redirection = parse::parse_redirection(line)?;
        let argv = if strict_quotes {
            parse::try_tokenize(&redirection.command)?
        } else {
            parse::tokenize(&redirection.command)
        };
        let kind = argv.first().map(|name| CommandKind::classify(name));

        Ok(Self {
            redirection,
            argv,
            kind,
        })
    }

    /// Arguments after argv[0].
    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or(&[])
    }
}
