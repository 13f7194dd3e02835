//! Command classification and execution: built-ins run in-process, anything
//! else is resolved on the search path and launched as a child process.

/// Bodies of `cd`, `echo`, `exit`, `pwd` and `type`.
pub mod builtin;
/// Child-process launcher for commands found on the search path.
pub mod external;
/// Output sinks opened from a parsed redirection.
pub mod sink;

pub use sink::{Sink, Sinks};

/// Names handled in-process, in lexicographic order.
pub const BUILTIN_NAMES: [&str; 5] = ["cd", "echo", "exit", "pwd", "type"];

/// What argv[0] refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    Cd,
    Echo,
    Exit,
    Pwd,
    Type,
    /// Not a built-in: to be looked up on the search path.
    External(String),
}

impl CommandKind {
    /// Classify a command name.
    pub fn classify(name: &str) -> Self {
        match name {
            "cd" => CommandKind::Cd,
            "echo" => CommandKind::Echo,
            "exit" => CommandKind::Exit,
            "pwd" => CommandKind::Pwd,
            "type" => CommandKind::Type,
            other => CommandKind::External(other.to_string()),
        }
    }

    /// The name this kind was classified from.
    pub fn name(&self) -> &str {
        match self {
            CommandKind::Cd => "cd",
            CommandKind::Echo => "echo",
            CommandKind::Exit => "exit",
            CommandKind::Pwd => "pwd",
            CommandKind::Type => "type",
            CommandKind::External(name) => name,
        }
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, CommandKind::External(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_builtins() {
        for name in BUILTIN_NAMES {
            let kind = CommandKind::classify(name);
            assert!(kind.is_builtin(), "{name} should be a builtin");
            assert_eq!(kind.name(), name);
        }
    }

    #[test]
    fn classify_external() {
        let kind = CommandKind::classify("ls");
        assert_eq!(kind, CommandKind::External("ls".into()));
        assert!(!kind.is_builtin());
        assert_eq!(kind.name(), "ls");
    }

    #[test]
    fn classify_is_case_sensitive() {
        assert_eq!(
            CommandKind::classify("ECHO"),
            CommandKind::External("ECHO".into())
        );
    }

    #[test]
    fn builtin_names_sorted() {
        let mut sorted = BUILTIN_NAMES;
        sorted.sort_unstable();
        assert_eq!(sorted, BUILTIN_NAMES);
    }
}
