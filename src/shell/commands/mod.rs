//! Built-in commands. Each one is a small type implementing [`Command`];
//! the shell looks them up by [`CommandName`].

use std::str::FromStr;

use derive_more::Display;

use super::error::{CommandError, UnknownCommandSnafu};
use super::output::CommandOutput;
use super::state::ShellState;

mod cd;
mod chown;
mod exit;
mod ls;
mod mv;
mod tail;
mod uniq;
mod vfs_save;

/// What the shell should do after a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CommandName {
    #[display("ls")]
    Ls,
    #[display("cd")]
    Cd,
    #[display("exit")]
    Exit,
    #[display("vfs-save")]
    VfsSave,
    #[display("uniq")]
    Uniq,
    #[display("tail")]
    Tail,
    #[display("mv")]
    Mv,
    #[display("chown")]
    Chown,
}

impl CommandName {
    pub const ALL: [CommandName; 8] = [
        CommandName::Ls,
        CommandName::Cd,
        CommandName::Exit,
        CommandName::VfsSave,
        CommandName::Uniq,
        CommandName::Tail,
        CommandName::Mv,
        CommandName::Chown,
    ];
}

impl FromStr for CommandName {
    type Err = CommandError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.to_string() == name)
            .ok_or_else(|| UnknownCommandSnafu { name }.build())
    }
}

pub trait Command {
    fn name(&self) -> CommandName;
    /// One-line synopsis shown in the startup banner.
    fn usage(&self) -> &'static str;
    fn run(
        &self,
        state: &mut ShellState,
        args: &[String],
        out: &mut CommandOutput<'_>,
    ) -> Result<Flow, CommandError>;
}

/// Every built-in command, in banner order.
pub fn builtins() -> Vec<Box<dyn Command>> {
    vec![
        Box::new(ls::Ls),
        Box::new(cd::Cd),
        Box::new(exit::Exit),
        Box::new(vfs_save::VfsSave),
        Box::new(uniq::Uniq),
        Box::new(tail::Tail),
        Box::new(mv::Mv),
        Box::new(chown::Chown),
    ]
}
