use std::env;
use std::io::{self, Write};
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use super::Sinks;
use crate::complete::find_executable;
use crate::complete::path::is_executable;
use crate::eval::Outcome;

/// Status reported when a command cannot be found.
pub const NOT_FOUND: i32 = 127;
/// Status reported when a command was found but could not be started.
pub const NOT_EXECUTABLE: i32 = 126;

/// Resolve `name` to an executable: names containing `/` are used as given,
/// anything else is searched on the live `PATH`.
pub fn resolve(name: &str) -> Option<PathBuf> {
    if name.contains('/') {
        let path = Path::new(name);
        return is_executable(path).then(|| path.to_path_buf());
    }
    find_executable(name, env::var_os("PATH").as_deref())
}

/// Launch `name` with `args`, wait for it, and report its status.
///
/// The child sees `name` as its argv[0] and writes to `sinks`.
///
/// # Errors
///
/// Returns an error only when writing a diagnostic to `err` fails.
pub fn run(
    name: &str,
    args: &[String],
    sinks: &Sinks,
    err: &mut dyn Write,
) -> io::Result<Outcome> {
    let Some(path) = resolve(name) else {
        writeln!(err, "{name}: command not found")?;
        return Ok(Outcome::Continue(NOT_FOUND));
    };

    let status = Command::new(&path)
        .arg0(name)
        .args(args)
        .stdout(sinks.stdout.stdio()?)
        .stderr(sinks.stderr.stdio()?)
        .status();

    match status {
        Ok(status) => Ok(Outcome::Continue(exit_code(status))),
        Err(e) => {
            log::warn!("failed to launch {}: {e}", path.display());
            writeln!(err, "{name}: {e}")?;
            Ok(Outcome::Continue(NOT_EXECUTABLE))
        }
    }
}

/// Shell-style status: the exit code, or 128 + signal number.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        code
    } else if let Some(signal) = status.signal() {
        128 + signal
    } else {
        -1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Sink, Sinks};
    use crate::parse::RedirectTarget;
    use std::fs;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_command() {
        let mut err = Vec::new();
        let outcome = run("no-such-command-xyz", &[], &Sinks::inherit(), &mut err).unwrap();
        assert_eq!(outcome, Outcome::Continue(NOT_FOUND));
        assert_eq!(err, b"no-such-command-xyz: command not found\n");
    }

    #[test]
    fn runs_with_args_and_redirects_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("out.txt");
        let sinks = Sinks {
            stdout: Sink::open(Some(&RedirectTarget {
                path: out_path.clone(),
                append: false,
            }))
            .unwrap(),
            stderr: Sink::Inherit,
        };

        let args = strings(&["-c", r#"echo "$1:$2""#, "sh", "a b", "c"]);
        let outcome = run("sh", &args, &sinks, &mut io::sink()).unwrap();
        assert_eq!(outcome, Outcome::Continue(0));
        assert_eq!(fs::read_to_string(&out_path).unwrap(), "a b:c\n");
    }

    #[test]
    fn reports_exit_status() {
        let args = strings(&["-c", "exit 7"]);
        let outcome = run("sh", &args, &Sinks::inherit(), &mut io::sink()).unwrap();
        assert_eq!(outcome, Outcome::Continue(7));
    }

    #[test]
    fn reports_signal_status() {
        let args = strings(&["-c", "kill -TERM $$"]);
        let outcome = run("sh", &args, &Sinks::inherit(), &mut io::sink()).unwrap();
        assert_eq!(outcome, Outcome::Continue(128 + 15));
    }

    #[test]
    fn path_with_slash_must_be_executable() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, "").unwrap();
        assert_eq!(resolve(file.to_str().unwrap()), None);
    }
}
