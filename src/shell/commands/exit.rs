use super::{Command, CommandName, Flow};
use crate::shell::error::CommandError;
use crate::shell::output::CommandOutput;
use crate::shell::state::ShellState;

pub struct Exit;

impl Command for Exit {
    fn name(&self) -> CommandName {
        CommandName::Exit
    }

    fn usage(&self) -> &'static str {
        "exit"
    }

    fn run(
        &self,
        _state: &mut ShellState,
        _args: &[String],
        _out: &mut CommandOutput<'_>,
    ) -> Result<Flow, CommandError> {
        Ok(Flow::Exit)
    }
}
