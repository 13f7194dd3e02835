pub mod context;
pub mod outcome;

pub use context::CommandContext;
pub use outcome::Outcome;

use std::io::Write;

use crate::commands::{CommandKind, Sinks, builtin, external};
use crate::config::Settings;

/// Status for a line rejected before anything ran.
const SYNTAX_ERROR: i32 = 2;

/// Runs finished input lines: parse, open redirections, dispatch.
#[derive(Debug, Default)]
pub struct Shell {
    strict_quotes: bool,
    last_status: i32,
}

impl Shell {
    pub fn new(settings: &Settings) -> Self {
        Self {
            strict_quotes: settings.strict_quotes,
            last_status: 0,
        }
    }

    /// Status of the most recent command.
    pub fn last_status(&self) -> i32 {
        self.last_status
    }

    /// Run one line.
    ///
    /// Built-ins write to `out`/`err` unless redirected; external commands
    /// inherit the process streams unless redirected. Problems with the line
    /// itself are reported on `err` and never end the loop.
    pub fn execute(&mut self, line: &str, out: &mut dyn Write, err: &mut dyn Write) -> Outcome {
        let line = line.trim_end_matches(' ');
        if line.trim_start().is_empty() {
            return Outcome::Continue(self.last_status);
        }

        let outcome = self.dispatch(line, out, err);
        self.last_status = outcome.status();
        outcome
    }

    fn dispatch(&self, line: &str, out: &mut dyn Write, err: &mut dyn Write) -> Outcome {
        let ctx = match CommandContext::from_line(line, self.strict_quotes) {
            Ok(ctx) => ctx,
            Err(e) => {
                log::warn!("rejected {line:?}: {e}");
                let _ = writeln!(err, "rawsh: {e}");
                return Outcome::Continue(SYNTAX_ERROR);
            }
        };
        let Some(kind) = &ctx.kind else {
            return Outcome::Continue(0);
        };

        let sinks = match Sinks::open(&ctx.redirection) {
            Ok(sinks) => sinks,
            Err(e) => {
                log::warn!("cannot open redirection target: {e}");
                let _ = writeln!(err, "rawsh: {e}");
                return Outcome::Continue(1);
            }
        };

        log::debug!(
            "dispatch {}",
            shlex::try_join(ctx.argv.iter().map(String::as_str)).unwrap_or_default()
        );

        let result = {
            let mut cmd_err = sinks.stderr.writer(&mut *err);
            match kind {
                CommandKind::External(name) => {
                    external::run(name, ctx.args(), &sinks, &mut *cmd_err)
                }
                other => {
                    let mut cmd_out = sinks.stdout.writer(&mut *out);
                    builtin::run(other, ctx.args(), &mut *cmd_out, &mut *cmd_err)
                        .and_then(|outcome| cmd_out.flush().map(|()| outcome))
                }
            }
        };

        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("{}: {e}", kind.name());
                let _ = writeln!(err, "rawsh: {}: {e}", kind.name());
                Outcome::Continue(1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn run(shell: &mut Shell, line: &str) -> (Outcome, String, String) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let outcome = shell.execute(line, &mut out, &mut err);
        (
            outcome,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn blank_line_is_noop() {
        let mut shell = Shell::default();
        let (outcome, out, err) = run(&mut shell, "   ");
        assert_eq!(outcome, Outcome::Continue(0));
        assert!(out.is_empty() && err.is_empty());
    }

    #[test]
    fn echo_to_out() {
        let mut shell = Shell::default();
        let (outcome, out, _) = run(&mut shell, "echo 'hello   world'  ");
        assert_eq!(outcome, Outcome::Continue(0));
        assert_eq!(out, "hello   world\n");
    }

    #[test]
    fn echo_redirected_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("o.txt");
        let mut shell = Shell::default();

        let line = format!("echo one > {}", path.display());
        let (_, out, _) = run(&mut shell, &line);
        assert_eq!(out, "");
        let line = format!("echo two >> {}", path.display());
        run(&mut shell, &line);

        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn builtin_stderr_redirected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("e.txt");
        let mut shell = Shell::default();

        let line = format!("cd /no/such/dir 2> {}", path.display());
        let (outcome, _, err) = run(&mut shell, &line);
        assert_eq!(outcome, Outcome::Continue(1));
        assert_eq!(err, "");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "cd: /no/such/dir: No such file or directory\n"
        );
    }

    #[test]
    fn malformed_line_reported() {
        let mut shell = Shell::default();
        let (outcome, out, err) = run(&mut shell, "echo hi >");
        assert_eq!(outcome, Outcome::Continue(SYNTAX_ERROR));
        assert_eq!(out, "");
        assert_eq!(err, "rawsh: syntax error: missing file name after `>`\n");
        assert_eq!(shell.last_status(), SYNTAX_ERROR);
    }

    #[test]
    fn unknown_command() {
        let mut shell = Shell::default();
        let (outcome, _, err) = run(&mut shell, "no-such-command-xyz --flag");
        assert_eq!(outcome, Outcome::Continue(external::NOT_FOUND));
        assert_eq!(err, "no-such-command-xyz: command not found\n");
    }

    #[test]
    fn exit_outcome() {
        let mut shell = Shell::default();
        assert_eq!(run(&mut shell, "exit 4").0, Outcome::Exit(4));
    }

    #[test]
    fn unopenable_redirect_skips_command() {
        let mut shell = Shell::default();
        let (outcome, out, err) = run(&mut shell, "echo hi > /no/such/dir/file");
        assert_eq!(outcome, Outcome::Continue(1));
        assert_eq!(out, "");
        assert!(err.starts_with("rawsh: /no/such/dir/file: "));
    }
}
