//! Interactive session
//!
//! Runs the page as an event loop over a line reader: draw the screen, read
//! one line, handle it to completion, draw again. A plain line is what the
//! user typed into the weight field and is submitted right away.

use crate::storage::{SlotStore, StorageError};
use crate::tracker::{Clock, LinePrompt, Tracker};
use crate::view::{render, render_text, TextStyle, ViewOptions};
use std::io::{BufRead, Write};
use thiserror::Error;

const HINT: &str = "Enter a weight to add it, \"reset\" to clear all records, \"q\" to quit.";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// One user event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Field contents to submit
    Submit(String),
    /// Clear everything (after confirmation)
    Reset,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\n', '\r']);
        match line.trim() {
            "q" | "quit" => Command::Quit,
            "reset" => Command::Reset,
            _ => Command::Submit(line.to_string()),
        }
    }
}

pub struct Session<'a, S, C> {
    tracker: &'a mut Tracker<S, C>,
    view: ViewOptions,
    style: TextStyle,
}

impl<'a, S: SlotStore, C: Clock> Session<'a, S, C> {
    pub fn new(tracker: &'a mut Tracker<S, C>, view: ViewOptions, style: TextStyle) -> Self {
        Self {
            tracker,
            view,
            style,
        }
    }

    /// Draw the current state
    pub fn draw(&self, output: &mut impl Write) -> std::io::Result<()> {
        let screen = render(self.tracker.entries(), self.tracker.input(), &self.view);
        writeln!(output, "{}", render_text(&screen, &self.style))?;
        writeln!(output, "{}", HINT)?;
        output.flush()
    }

    /// Handle events until quit or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<(), SessionError> {
        tracing::debug!("Session started");

        loop {
            self.draw(&mut output)?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            match Command::parse(&line) {
                Command::Quit => break,
                Command::Reset => {
                    let mut prompt = LinePrompt::new(&mut input, &mut output);
                    self.tracker.clear_all(&mut prompt)?;
                }
                Command::Submit(value) => {
                    self.tracker.set_input(value);
                    self.tracker.submit()?;
                }
            }
        }

        tracing::debug!("Session ended with {} entries", self.tracker.entries().len());
        Ok(())
    }
}
