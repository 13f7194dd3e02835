use std::env;
use std::io::{self, Write};
use std::path::Path;

use super::CommandKind;
use crate::complete::find_executable;
use crate::eval::Outcome;

/// Run a built-in with its arguments (argv without argv[0]).
///
/// # Errors
///
/// Returns an error only when writing to `out` or `err` fails.
pub fn run(
    kind: &CommandKind,
    args: &[String],
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<Outcome> {
    match kind {
        CommandKind::Cd => cd(args, err),
        CommandKind::Echo => echo(args, out),
        CommandKind::Exit => exit(args, err),
        CommandKind::Pwd => pwd(out, err),
        CommandKind::Type => type_of(args, out),
        CommandKind::External(name) => {
            writeln!(err, "{name}: not a shell builtin")?;
            Ok(Outcome::Continue(1))
        }
    }
}

fn cd(args: &[String], err: &mut dyn Write) -> io::Result<Outcome> {
    let requested = args.first().map_or("~", String::as_str);
    let target = shellexpand::tilde(requested);

    if !Path::new(target.as_ref()).is_dir() {
        writeln!(err, "cd: {requested}: No such file or directory")?;
        return Ok(Outcome::Continue(1));
    }
    if let Err(e) = env::set_current_dir(target.as_ref()) {
        writeln!(err, "cd: {requested}: {e}")?;
        return Ok(Outcome::Continue(1));
    }
    log::debug!("cd -> {target}");
    Ok(Outcome::Continue(0))
}

fn echo(args: &[String], out: &mut dyn Write) -> io::Result<Outcome> {
    writeln!(out, "{}", args.join(" "))?;
    Ok(Outcome::Continue(0))
}

fn exit(args: &[String], err: &mut dyn Write) -> io::Result<Outcome> {
    let Some(arg) = args.first() else {
        return Ok(Outcome::Exit(0));
    };
    match arg.parse::<i32>() {
        Ok(code) => Ok(Outcome::Exit(code)),
        Err(_) => {
            writeln!(err, "exit: {arg}: numeric argument required")?;
            Ok(Outcome::Exit(2))
        }
    }
}

fn pwd(out: &mut dyn Write, err: &mut dyn Write) -> io::Result<Outcome> {
    match env::current_dir() {
        Ok(dir) => {
            writeln!(out, "{}", dir.display())?;
            Ok(Outcome::Continue(0))
        }
        Err(e) => {
            writeln!(err, "pwd: {e}")?;
            Ok(Outcome::Continue(1))
        }
    }
}

fn type_of(args: &[String], out: &mut dyn Write) -> io::Result<Outcome> {
    let search_path = env::var_os("PATH");
    let mut status = 0;
    for name in args {
        if CommandKind::classify(name).is_builtin() {
            writeln!(out, "{name} is a shell builtin")?;
        } else if let Some(path) = find_executable(name, search_path.as_deref()) {
            writeln!(out, "{name} is {}", path.display())?;
        } else {
            writeln!(out, "{name}: not found")?;
            status = 1;
        }
    }
    Ok(Outcome::Continue(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_captured(name: &str, args: &[&str]) -> (Outcome, String, String) {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let outcome = run(&CommandKind::classify(name), &args, &mut out, &mut err).unwrap();
        (
            outcome,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn echo_joins_args() {
        let (outcome, out, _) = run_captured("echo", &["hello", "big  world"]);
        assert_eq!(outcome, Outcome::Continue(0));
        assert_eq!(out, "hello big  world\n");
    }

    #[test]
    fn echo_no_args() {
        let (_, out, _) = run_captured("echo", &[]);
        assert_eq!(out, "\n");
    }

    #[test]
    fn exit_default_and_code() {
        assert_eq!(run_captured("exit", &[]).0, Outcome::Exit(0));
        assert_eq!(run_captured("exit", &["3"]).0, Outcome::Exit(3));
    }

    #[test]
    fn exit_non_numeric() {
        let (outcome, _, err) = run_captured("exit", &["soon"]);
        assert_eq!(outcome, Outcome::Exit(2));
        assert_eq!(err, "exit: soon: numeric argument required\n");
    }

    #[test]
    fn type_reports_builtins() {
        let (outcome, out, _) = run_captured("type", &["echo", "exit"]);
        assert_eq!(outcome, Outcome::Continue(0));
        assert_eq!(out, "echo is a shell builtin\nexit is a shell builtin\n");
    }

    #[test]
    fn type_reports_missing() {
        let (outcome, out, _) = run_captured("type", &["no-such-command-xyz"]);
        assert_eq!(outcome, Outcome::Continue(1));
        assert_eq!(out, "no-such-command-xyz: not found\n");
    }

    #[test]
    fn cd_missing_directory() {
        let (outcome, _, err) = run_captured("cd", &["/no/such/place"]);
        assert_eq!(outcome, Outcome::Continue(1));
        assert_eq!(err, "cd: /no/such/place: No such file or directory\n");
    }

    #[test]
    fn external_is_not_builtin() {
        let (outcome, _, err) = run_captured("ls", &[]);
        assert_eq!(outcome, Outcome::Continue(1));
        assert_eq!(err, "ls: not a shell builtin\n");
    }
}
