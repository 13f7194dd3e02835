//! rawsh: an interactive shell front-end with raw-mode line editing.
//!
//! The terminal is switched to non-canonical, non-echoing mode so every
//! keystroke reaches the [`editor`], which echoes input and completes command
//! names on tab. Finished lines go through the [`parse`] layer (redirections
//! first, then quoting) and are run as a built-in or an external program.
//!
//! # Architecture
//!
//! - **[`parse`]**: Quote/escape-aware tokenizer and redirection-operator parser.
//! - **[`complete`]**: Command-name completion over built-ins and `PATH` executables.
//! - **[`editor`]**: Keystroke loop with the two-tab completion cycle, raw-mode guard.
//! - **[`eval`]**: Line → command context → dispatch, exit outcomes.
//! - **[`commands`]**: Built-in bodies, external launcher, redirection sinks.
//! - **[`config`]**: Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]**: File logger setup.

/// Built-in commands, external launcher, output sinks.
pub mod commands;
/// Completion engine and candidate discovery.
pub mod complete;
/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Keystroke loop and terminal mode handling.
pub mod editor;
pub mod error;
/// Line evaluation: parse, redirect, dispatch.
pub mod eval;
/// File-based logging.
pub mod logging;
/// Command-line parsing: tokenizer, redirection operators, descriptor types.
pub mod parse;

pub use error::ShellError;

use std::io;

use complete::PathCandidates;
use config::Config;
use editor::{InputLoop, RawMode, Tty};
use eval::{Outcome, Shell};

/// Run the interactive loop on the controlling terminal until `exit` or
/// end of input. Returns the process exit status.
///
/// # Errors
///
/// [`ShellError::TerminalMode`] when raw mode cannot be entered, and
/// [`ShellError::Io`] when the terminal stops accepting reads or writes. The
/// terminal is restored in both cases.
pub fn run(config: &Config) -> Result<i32, ShellError> {
    let tty = Tty::open().map_err(ShellError::TerminalMode)?;
    let mut raw = RawMode::enable(tty)?;
    log::info!("rawsh started");

    let status = interact(config)?;

    if let Err(e) = raw.restore() {
        log::error!("{e}");
        eprintln!("rawsh: {e}");
    }
    log::info!("rawsh exiting with status {status}");
    Ok(status)
}

fn interact(config: &Config) -> Result<i32, ShellError> {
    let mut editor = InputLoop::new(
        io::stdin(),
        io::stdout(),
        PathCandidates::from_env(),
        &config.settings,
    );
    let mut shell = Shell::new(&config.settings);
    let (mut out, mut err) = (io::stdout(), io::stderr());

    while let Some(line) = editor.read_line()? {
        match shell.execute(&line, &mut out, &mut err) {
            Outcome::Exit(status) => return Ok(status),
            Outcome::Continue(_) => {}
        }
    }
    // End of input behaves like `exit 0`.
    Ok(0)
}
