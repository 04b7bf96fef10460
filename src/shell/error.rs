use std::path::PathBuf;

use snafu::Snafu;

use crate::ext::BestEffortPathExt;
use crate::filesystem::VfsError;

/// Failure of a single command. Rendered by the dispatcher as one line.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CommandError {
    #[snafu(display("command not found"))]
    UnknownCommand { name: String },
    #[snafu(display("missing argument: {what}"))]
    MissingArgument { what: &'static str },
    #[snafu(display("invalid number of lines: {value}"))]
    InvalidLineCount { value: String },
    #[snafu(display("{path} is a directory"))]
    IsADirectory { path: String },
    #[snafu(display("{path} is not a directory"))]
    NotADirectory { path: String },
    #[snafu(display("VFS isn't loaded"))]
    NotLoaded,
    #[snafu(display("cannot move {path} to itself"))]
    MoveToItself { path: String },
    #[snafu(display("cannot move {from} into its subdirectory {into}"))]
    MoveIntoSubdirectory { from: String, into: String },
    #[snafu(display("cannot move {from} to {to}: file exists"))]
    DestinationExists { from: String, to: String },
    #[snafu(display("save error"))]
    Save { source: VfsError },
    #[snafu(transparent)]
    Vfs { source: VfsError },
    #[snafu(context(false), display("Failed to write command output"))]
    Output { source: std::io::Error },
}

/// Failure of the shell around the commands: loading, scripts, the terminal.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ShellError {
    #[snafu(display("Failed to load VFS from {}", path.best_effort_path_display()))]
    LoadError { path: PathBuf, source: VfsError },
    #[snafu(display("Failed to read script {}", path.best_effort_path_display()))]
    ScriptReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to read input"))]
    InputError { source: std::io::Error },
    #[snafu(context(false), display("Failed to write output"))]
    OutputError { source: std::io::Error },
}
