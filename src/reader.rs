//! Obtaining one line of input, with prompt display and history.

use anyhow::{Context, Result};
use log::warn;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// One attempt to read a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line of text, trailing newline already stripped.
    Line(String),
    /// End of the input stream.
    Eof,
    /// The read failed. Failures are not retried.
    Failed,
}

/// Source of input lines for the main loop.
pub trait LineReader {
    /// Displays `prompt` and reads the next line.
    fn read_line(&mut self, prompt: &str) -> ReadOutcome;
}

impl<T: LineReader + ?Sized> LineReader for &mut T {
    fn read_line(&mut self, prompt: &str) -> ReadOutcome {
        (**self).read_line(prompt)
    }
}

/// Interactive reader backed by `rustyline`, with per-session history.
pub struct InteractiveReader {
    editor: DefaultEditor,
}

impl InteractiveReader {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().context("cannot initialize the line editor")?;
        Ok(Self { editor })
    }
}

impl LineReader for InteractiveReader {
    fn read_line(&mut self, prompt: &str) -> ReadOutcome {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                ReadOutcome::Line(line)
            }
            Err(ReadlineError::Eof) => ReadOutcome::Eof,
            Err(ReadlineError::Interrupted) => ReadOutcome::Failed,
            Err(err) => {
                warn!("read error: {}", err);
                ReadOutcome::Failed
            }
        }
    }
}
