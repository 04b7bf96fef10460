use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::num::NonZeroUsize;
use std::path::Path;

use snafu::ResultExt;
use tracing::{debug, info, warn};

use super::commands::{Command, CommandName, Flow, builtins};
use super::error::{
    CommandError, InputSnafu, LoadSnafu, ScriptReadSnafu, ShellError, UnknownCommandSnafu,
};
use super::output::CommandOutput;
use super::parser::parse_line;
use super::prompt::Prompt;
use super::state::{DEFAULT_TAIL_LINES, ShellState};
use crate::filesystem::Vfs;

/// Presentation settings the shell is created with.
#[derive(Debug, Clone)]
pub struct ShellSettings {
    pub prompt: Prompt,
    pub tail_lines: NonZeroUsize,
    pub color: bool,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            prompt: Prompt::new("user", "localhost"),
            tail_lines: DEFAULT_TAIL_LINES,
            color: false,
        }
    }
}

/// Result of dispatching one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Blank line, nothing ran.
    Empty,
    Success,
    /// The command, or one of its targets, reported an error.
    Failed,
    Exit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub executed: usize,
    pub failed: usize,
    /// The script ran `exit`.
    pub exited: bool,
}

pub struct Shell {
    commands: HashMap<CommandName, Box<dyn Command>>,
    state: ShellState,
    prompt: Prompt,
    color: bool,
}

impl Shell {
    pub fn new(settings: ShellSettings) -> Self {
        Self::with_vfs(Vfs::new(), settings)
    }

    pub fn with_vfs(vfs: Vfs, settings: ShellSettings) -> Self {
        let commands = builtins()
            .into_iter()
            .map(|command| (command.name(), command))
            .collect();
        Self {
            commands,
            state: ShellState::new(vfs, settings.tail_lines),
            prompt: settings.prompt,
            color: settings.color,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &ShellState {
        &self.state
    }

    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut ShellState {
        &mut self.state
    }

    pub fn prompt(&self) -> String {
        self.prompt.render(self.state.current_path(), self.color)
    }

    /// Lists the available commands.
    pub fn write_banner(&self, out: &mut dyn Write) -> Result<(), ShellError> {
        writeln!(out, "Commands:")?;
        for name in CommandName::ALL {
            if let Some(command) = self.commands.get(&name) {
                writeln!(out, "  {}", command.usage())?;
            }
        }
        Ok(())
    }

    /// Loads a real directory into the tree. The message of the day is shown
    /// after every attempt, even one that stopped part way.
    pub fn load(&mut self, disk_path: &Path, out: &mut dyn Write) -> Result<(), ShellError> {
        let result = self.state.vfs.load_from_disk(disk_path);
        self.state.set_current_path("/");

        if result.is_ok() {
            writeln!(out, "VFS loaded from: {}", disk_path.display())?;
        }
        if let Some(motd) = self.state.vfs.motd() {
            out.write_all(motd)?;
            writeln!(out)?;
        }

        result.context(LoadSnafu { path: disk_path })
    }

    /// Parses and runs one line. Command errors are printed, not returned;
    /// only a broken output stream is an error here.
    pub fn execute_line(&mut self, line: &str, out: &mut dyn Write) -> Result<Outcome, ShellError> {
        let Some(parsed) = parse_line(line) else {
            return Ok(Outcome::Empty);
        };
        debug!("Executing '{}' with {:?}", parsed.command, parsed.args);

        let mut output = CommandOutput::new(out, self.color);
        let result = match parsed.command.parse::<CommandName>() {
            Ok(name) => match self.commands.get(&name) {
                Some(command) => command.run(&mut self.state, &parsed.args, &mut output),
                None => UnknownCommandSnafu {
                    name: parsed.command.as_str(),
                }
                .fail(),
            },
            Err(err) => Err(err),
        };

        let outcome = match result {
            Ok(Flow::Exit) => Outcome::Exit,
            Ok(Flow::Continue) if output.failures() == 0 => Outcome::Success,
            Ok(Flow::Continue) => Outcome::Failed,
            Err(CommandError::Output { source }) => return Err(ShellError::OutputError { source }),
            Err(err) => {
                output.report(&parsed.command, &err)?;
                Outcome::Failed
            }
        };
        Ok(outcome)
    }

    /// Runs a file of commands, one per line. Blank lines and `#` comments are
    /// skipped, failures are counted and do not stop the run.
    pub fn run_script(&mut self, script: &Path, out: &mut dyn Write) -> Result<ScriptReport, ShellError> {
        let file = File::open(script).context(ScriptReadSnafu { path: script })?;
        info!("Running script {}", script.display());

        let mut report = ScriptReport::default();
        for line in BufReader::new(file).lines() {
            let line = line.context(ScriptReadSnafu { path: script })?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            writeln!(out, "{}{line}", self.prompt())?;
            report.executed += 1;
            match self.execute_line(line, out)? {
                Outcome::Failed => report.failed += 1,
                Outcome::Exit => {
                    report.exited = true;
                    break;
                }
                Outcome::Empty | Outcome::Success => {}
            }
        }

        if report.failed > 0 {
            warn!("Script finished with {} failed commands", report.failed);
        }
        Ok(report)
    }

    /// Interactive loop: prompt, read, dispatch. Ends on end of input or `exit`.
    pub fn run_repl(&mut self, mut input: impl BufRead, out: &mut dyn Write) -> Result<(), ShellError> {
        let mut line = String::new();
        loop {
            write!(out, "{}", self.prompt())?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line).context(InputSnafu)? == 0 {
                debug!("End of input");
                writeln!(out)?;
                return Ok(());
            }

            if self.execute_line(&line, out)? == Outcome::Exit {
                return Ok(());
            }
        }
    }
}
