use std::collections::HashSet;

use snafu::OptionExt;

use super::{Command, CommandName, Flow};
use crate::shell::error::{CommandError, IsADirectorySnafu, MissingArgumentSnafu};
use crate::shell::output::CommandOutput;
use crate::shell::state::ShellState;

/// Prints each distinct non-empty line once, in order of first appearance.
pub struct Uniq;

impl Command for Uniq {
    fn name(&self) -> CommandName {
        CommandName::Uniq
    }

    fn usage(&self) -> &'static str {
        "uniq <path>"
    }

    fn run(
        &self,
        state: &mut ShellState,
        args: &[String],
        out: &mut CommandOutput<'_>,
    ) -> Result<Flow, CommandError> {
        let arg = args.first().context(MissingArgumentSnafu { what: "file" })?;
        let target = state.resolve(arg);
        let content = state
            .vfs
            .find_node(&target)?
            .content()
            .context(IsADirectorySnafu { path: &target })?;

        let text = String::from_utf8_lossy(content);
        let mut seen = HashSet::new();
        for line in text.split('\n').filter(|line| !line.is_empty()) {
            if seen.insert(line) {
                out.line(line)?;
            }
        }

        Ok(Flow::Continue)
    }
}
