//! Raw-mode switching for the controlling terminal.
//!
//! [`RawMode`] captures the terminal's mode when it is created and puts it
//! back when [`RawMode::restore`] is called or the guard is dropped, whichever
//! comes first. Only canonical input and local echo are turned off; signal
//! keys and output processing keep working.

use std::fs::File;
use std::io;

use rustix::fd::{AsFd, BorrowedFd};
use rustix::termios::{self, LocalModes, OptionalActions, Termios};

use crate::error::{Result, ShellError};

/// A device whose line discipline can be read and replaced.
pub trait TerminalDevice {
    type Mode: Clone;

    fn get_mode(&self) -> io::Result<Self::Mode>;

    fn set_mode(&self, mode: &Self::Mode) -> io::Result<()>;

    /// `original` with byte-at-a-time, non-echoing input.
    fn raw_mode(&self, original: &Self::Mode) -> Self::Mode;
}

/// The controlling terminal: stdin when it is a tty, `/dev/tty` otherwise.
pub enum Tty {
    Stdin(io::Stdin),
    DevTty(File),
}

impl Tty {
    pub fn open() -> io::Result<Self> {
        let stdin = io::stdin();
        if termios::isatty(&stdin) {
            Ok(Tty::Stdin(stdin))
        } else {
            let file = File::options().read(true).write(true).open("/dev/tty")?;
            Ok(Tty::DevTty(file))
        }
    }
}

impl AsFd for Tty {
    fn as_fd(&self) -> BorrowedFd<'_> {
        match self {
            Tty::Stdin(stdin) => stdin.as_fd(),
            Tty::DevTty(file) => file.as_fd(),
        }
    }
}

impl TerminalDevice for Tty {
    type Mode = Termios;

    fn get_mode(&self) -> io::Result<Termios> {
        Ok(termios::tcgetattr(self)?)
    }

    fn set_mode(&self, mode: &Termios) -> io::Result<()> {
        Ok(termios::tcsetattr(self, OptionalActions::Now, mode)?)
    }

    fn raw_mode(&self, original: &Termios) -> Termios {
        let mut raw = original.clone();
        raw.local_modes -= LocalModes::ICANON | LocalModes::ECHO;
        raw
    }
}

/// Scoped raw mode. The original mode is reinstated exactly once.
pub struct RawMode<D: TerminalDevice> {
    device: D,
    original: D::Mode,
    restored: bool,
}

impl<D: TerminalDevice> RawMode<D> {
    /// Capture the current mode of `device` and switch it to raw.
    ///
    /// # Errors
    ///
    /// [`ShellError::TerminalMode`] when the mode cannot be read or changed.
    pub fn enable(device: D) -> Result<Self> {
        let original = device.get_mode().map_err(ShellError::TerminalMode)?;
        device
            .set_mode(&device.raw_mode(&original))
            .map_err(ShellError::TerminalMode)?;
        log::debug!("terminal switched to raw mode");
        Ok(Self {
            device,
            original,
            restored: false,
        })
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Put the captured mode back.
    ///
    /// # Errors
    ///
    /// [`ShellError::TerminalMode`] when the terminal rejects the mode; the
    /// guard will not retry on drop.
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        self.device
            .set_mode(&self.original)
            .map_err(ShellError::TerminalMode)?;
        log::debug!("terminal mode restored");
        Ok(())
    }
}

impl<D: TerminalDevice> Drop for RawMode<D> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("failed to restore terminal: {e}");
        }
    }
}
