//! The read-dispatch loop tying the components together.

use crate::launcher::{launch, LaunchOutcome};
use crate::parser::parse;
use crate::prompt::PromptState;
use crate::reader::{LineReader, ReadOutcome};
use anyhow::Result;
use log::debug;
use std::io::Write;

/// Line that ends the session without launching anything.
const EXIT_COMMAND: &str = "exit";
/// Printed exactly once on every termination path.
const GOODBYE_MESSAGE: &str = "Bye bye...";

/// The interactive loop: renders a prompt from the last outcome, reads one
/// line, dispatches it and starts over.
///
/// At most one child is outstanding at a time; the loop always blocks on
/// the wait for that child before reading the next line.
pub struct Shell<R, O, E> {
    reader: R,
    out: O,
    err: E,
    state: PromptState,
}

impl<R: LineReader, O: Write, E: Write> Shell<R, O, E> {
    pub fn new(reader: R, out: O, err: E) -> Self {
        Self {
            reader,
            out,
            err,
            state: PromptState::Initial,
        }
    }

    /// Runs until the exit command, end of input or a read failure.
    ///
    /// Only failures of the shell's own streams surface as `Err`; whatever
    /// happens to a child is reported on `err` and folded into the next
    /// prompt instead.
    pub fn repl(&mut self) -> Result<()> {
        loop {
            let prompt = self.state.render();
            let line = match self.reader.read_line(&prompt) {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Eof | ReadOutcome::Failed => break,
            };

            if line == EXIT_COMMAND {
                break;
            }

            match parse(&line) {
                Ok(command) if command.is_empty() => continue,
                Ok(command) => {
                    debug!("dispatching {:?}", command.argv);
                    if let LaunchOutcome::Completed(outcome) = launch(&command, &mut self.err) {
                        self.state = PromptState::from_outcome(&outcome);
                    }
                }
                Err(err) => writeln!(self.err, "{}", err)?,
            }
        }

        writeln!(self.out, "{}", GOODBYE_MESSAGE)?;
        self.out.flush()?;
        Ok(())
    }
}
