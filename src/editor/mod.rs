//! Line editor: reads raw keystrokes, echoes them, and completes command
//! names on tab.
//!
//! A first tab extends the line when completion allows it and rings the bell
//! otherwise. A second tab on the unchanged line lists every match below the
//! prompt and redraws the line.

pub mod key;
pub mod terminal;

pub use key::Key;
pub use terminal::{RawMode, TerminalDevice, Tty};

use std::io::{self, ErrorKind, Read, Write};

use crate::complete::{self, CandidateSource, CompletionResult};
use crate::config::Settings;
use crate::error::Result;

const BELL: &[u8] = b"\x07";
const ERASE: &[u8] = b"\x08 \x08";

/// Where the editor is in the tab-completion cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Editing,
    /// A tab produced no new text; another tab on the same buffer lists matches.
    AwaitingSecondTab,
}

/// Memory of the previous tab press within one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabState {
    pub pressed: bool,
    pub last_input: String,
}

impl TabState {
    fn reset(&mut self) {
        self.pressed = false;
        self.last_input.clear();
    }

    fn is_repeat(&self, buffer: &str) -> bool {
        self.pressed && self.last_input == buffer
    }
}

/// Keystroke loop over a byte source and a terminal sink.
pub struct InputLoop<R, W, S> {
    input: R,
    output: W,
    source: S,
    prompt: String,
    bell: bool,
    buffer: String,
    tab: TabState,
    at_eof: bool,
}

impl<R: Read, W: Write, S: CandidateSource> InputLoop<R, W, S> {
    pub fn new(input: R, output: W, source: S, settings: &Settings) -> Self {
        Self {
            input,
            output,
            source,
            prompt: settings.prompt.clone(),
            bell: settings.bell,
            buffer: String::new(),
            tab: TabState::default(),
            at_eof: false,
        }
    }

    /// Text typed so far on the current line.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn state(&self) -> EditorState {
        if self.tab.pressed {
            EditorState::AwaitingSecondTab
        } else {
            EditorState::Editing
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print the prompt and edit one line until Enter.
    ///
    /// Returns `None` once input is exhausted. Text pending when input ends is
    /// returned as a final line first.
    ///
    /// # Errors
    ///
    /// [`ShellError::Io`](crate::ShellError::Io) when reading keystrokes or
    /// writing to the terminal fails.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        if self.at_eof {
            return Ok(None);
        }
        self.buffer.clear();
        self.tab.reset();
        self.output.write_all(self.prompt.as_bytes())?;
        self.output.flush()?;

        loop {
            let Some(byte) = self.read_byte()? else {
                self.at_eof = true;
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                self.output.write_all(b"\n")?;
                self.output.flush()?;
                return Ok(Some(std::mem::take(&mut self.buffer)));
            };
            if let Some(line) = self.handle_key(Key::decode(byte))? {
                return Ok(Some(line));
            }
            self.output.flush()?;
        }
    }

    /// Apply one keystroke. Returns the finished line on Enter.
    pub fn handle_key(&mut self, key: Key) -> io::Result<Option<String>> {
        match key {
            Key::Char(byte) => {
                self.tab.reset();
                self.buffer.push(char::from(byte));
                self.output.write_all(&[byte])?;
            }
            Key::Backspace => {
                self.tab.reset();
                if self.buffer.pop().is_some() {
                    self.output.write_all(ERASE)?;
                }
            }
            Key::Enter => {
                self.tab.reset();
                self.output.write_all(b"\n")?;
                return Ok(Some(std::mem::take(&mut self.buffer)));
            }
            Key::Tab => self.on_tab()?,
            Key::Other => {}
        }
        Ok(None)
    }

    fn on_tab(&mut self) -> io::Result<()> {
        let candidates = self.source.candidates();

        if self.tab.is_repeat(&self.buffer) {
            let matches = complete::list_all(&self.buffer, &candidates);
            log::debug!("listing {} matches for {:?}", matches.len(), self.buffer);
            write!(self.output, "\n{}\n", matches.join("  "))?;
            return self.redraw();
        }

        let result = complete::complete(&self.buffer, &candidates);
        log::debug!("completion for {:?}: {result:?}", self.buffer);
        match result {
            CompletionResult::Unique(name) if name != self.buffer => {
                self.buffer = name;
                self.buffer.push(' ');
                self.tab.reset();
                self.redraw()
            }
            CompletionResult::CommonPrefix(prefix) if prefix != self.buffer => {
                self.buffer = prefix;
                self.tab.reset();
                self.redraw()
            }
            _ => {
                if self.bell {
                    self.output.write_all(BELL)?;
                }
                self.tab.pressed = true;
                self.tab.last_input.clone_from(&self.buffer);
                Ok(())
            }
        }
    }

    fn redraw(&mut self) -> io::Result<()> {
        write!(self.output, "\r{}{}", self.prompt, self.buffer)
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.input.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
