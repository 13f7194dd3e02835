use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::PathBuf;
use std::process::Stdio;

use crate::parse::{RedirectTarget, Redirection};

/// Where one output stream goes.
#[derive(Debug)]
pub enum Sink {
    /// The shell's own stream.
    Inherit,
    /// A redirection target opened for writing.
    File(File),
}

impl Sink {
    /// Open `target` (create, then append or truncate) or inherit when there is none.
    pub fn open(target: Option<&RedirectTarget>) -> Result<Self, SinkError> {
        let Some(target) = target else {
            return Ok(Sink::Inherit);
        };
        let mut options = OpenOptions::new();
        options.write(true).create(true).mode(0o644);
        if target.append {
            options.append(true);
        } else {
            options.truncate(true);
        }
        options.open(&target.path).map(Sink::File).map_err(|source| SinkError {
            path: target.path.clone(),
            source,
        })
    }

    /// Handle for a child process.
    pub fn stdio(&self) -> io::Result<Stdio> {
        match self {
            Sink::Inherit => Ok(Stdio::inherit()),
            Sink::File(file) => Ok(Stdio::from(file.try_clone()?)),
        }
    }

    /// Writer for in-process commands; `fallback` is used when inheriting.
    pub fn writer<'a>(&'a self, fallback: impl Write + 'a) -> Box<dyn Write + 'a> {
        match self {
            Sink::Inherit => Box::new(fallback),
            Sink::File(file) => Box::new(file),
        }
    }
}

/// Failure to open a redirection target.
#[derive(Debug, thiserror::Error)]
#[error("{}: {source}", path.display())]
pub struct SinkError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Stdout and stderr sinks for one command.
#[derive(Debug)]
pub struct Sinks {
    pub stdout: Sink,
    pub stderr: Sink,
}

impl Sinks {
    /// Sinks that write to the shell's own streams.
    pub fn inherit() -> Self {
        Self {
            stdout: Sink::Inherit,
            stderr: Sink::Inherit,
        }
    }

    /// Open both targets of `redirection`.
    pub fn open(redirection: &Redirection) -> Result<Self, SinkError> {
        Ok(Self {
            stdout: Sink::open(redirection.stdout.as_ref())?,
            stderr: Sink::open(redirection.stderr.as_ref())?,
        })
    }
}
