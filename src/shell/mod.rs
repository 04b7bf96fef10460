//! The command shell around the virtual filesystem: line parsing, the
//! command table, script execution and the interactive loop.

mod commands;
mod error;
mod output;
mod parser;
mod prompt;
#[allow(clippy::module_inception)]
mod shell;
mod state;

pub use error::ShellError;
pub use output::error_chain;
pub use prompt::Prompt;
pub use shell::{Shell, ShellSettings};
pub use state::DEFAULT_TAIL_LINES;
