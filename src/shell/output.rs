use std::error::Error;
use std::fmt::Display;
use std::io::{self, Write};

use colored::Colorize;

/// Flattens an error and its sources into one line: `outer: inner: root cause`.
pub fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.ends_with(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}

/// Where command handlers write. Counts reported errors so the dispatcher can
/// tell a partially failed multi-target command from a clean run.
pub struct CommandOutput<'a> {
    writer: &'a mut dyn Write,
    color: bool,
    failures: usize,
}

impl<'a> CommandOutput<'a> {
    pub fn new(writer: &'a mut dyn Write, color: bool) -> Self {
        Self {
            writer,
            color,
            failures: 0,
        }
    }

    pub fn line(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.writer, "{text}")
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.writer)
    }

    /// Renders `err` as a single `<context>: <message>` line.
    pub fn report(&mut self, context: &str, err: &dyn Error) -> io::Result<()> {
        self.failures += 1;
        let message = format!("{context}: {}", error_chain(err));
        if self.color {
            writeln!(self.writer, "{}", message.red())
        } else {
            writeln!(self.writer, "{message}")
        }
    }

    pub fn failures(&self) -> usize {
        self.failures
    }
}
