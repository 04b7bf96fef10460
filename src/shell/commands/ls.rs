use snafu::OptionExt;

use super::{Command, CommandName, Flow};
use crate::shell::error::{CommandError, NotADirectorySnafu};
use crate::shell::output::CommandOutput;
use crate::shell::state::ShellState;

/// Lists the children of a directory in stored order.
pub struct Ls;

impl Command for Ls {
    fn name(&self) -> CommandName {
        CommandName::Ls
    }

    fn usage(&self) -> &'static str {
        "ls [path]"
    }

    fn run(
        &self,
        state: &mut ShellState,
        args: &[String],
        out: &mut CommandOutput<'_>,
    ) -> Result<Flow, CommandError> {
        let (shown, target) = match args.first() {
            Some(arg) => (arg.as_str(), state.resolve(arg)),
            None => (state.current_path(), state.current_path().to_string()),
        };

        let children = state
            .vfs
            .find_node(&target)?
            .children()
            .context(NotADirectorySnafu { path: shown })?;
        for child in children {
            out.line(child.name())?;
        }

        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::test_support::{run, state};

    #[test]
    fn lists_working_directory_by_default() {
        let mut state = state();
        let (result, output, _) = run(&Ls, &mut state, &[]);
        assert!(result.is_ok());
        assert_eq!(output, "home\netc\ntest.txt\n");
    }

    #[test]
    fn resolves_relative_paths_against_working_directory() {
        let mut state = state();
        state.set_current_path("/home");

        let (_, output, _) = run(&Ls, &mut state, &["user"]);

        assert_eq!(output, "notes.txt\n");
    }

    #[test]
    fn empty_directory_prints_nothing() {
        let mut state = state();
        let (result, output, _) = run(&Ls, &mut state, &["/etc"]);
        assert!(result.is_ok());
        assert!(output.is_empty());
    }

    #[test]
    fn file_is_not_a_directory() {
        let mut state = state();
        let (result, _, _) = run(&Ls, &mut state, &["test.txt"]);
        assert!(matches!(result, Err(CommandError::NotADirectory { path }) if path == "test.txt"));
    }

    #[test]
    fn missing_path_is_reported() {
        let mut state = state();
        let (result, _, _) = run(&Ls, &mut state, &["/nonexistent"]);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("nonexistent"));
    }
}
