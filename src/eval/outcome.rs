/// What the shell does after running one command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep reading lines; carries the command's exit status.
    Continue(i32),
    /// Leave the input loop and exit the process with this status.
    Exit(i32),
}

impl Outcome {
    pub fn status(self) -> i32 {
        match self {
            Outcome::Continue(code) | Outcome::Exit(code) => code,
        }
    }

    pub fn is_exit(self) -> bool {
        matches!(self, Outcome::Exit(_))
    }
}
