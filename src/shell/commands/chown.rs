use super::{Command, CommandName, Flow};
use crate::shell::error::{CommandError, MissingArgumentSnafu};
use crate::shell::output::CommandOutput;
use crate::shell::state::ShellState;

/// Records a new owner on each named node.
pub struct Chown;

impl Command for Chown {
    fn name(&self) -> CommandName {
        CommandName::Chown
    }

    fn usage(&self) -> &'static str {
        "chown <owner> <path...>"
    }

    fn run(
        &self,
        state: &mut ShellState,
        args: &[String],
        out: &mut CommandOutput<'_>,
    ) -> Result<Flow, CommandError> {
        let [owner, files @ ..] = args else {
            return MissingArgumentSnafu { what: "owner" }.fail();
        };
        if files.is_empty() {
            return MissingArgumentSnafu { what: "file" }.fail();
        }

        for file in files {
            let target = state.resolve(file);
            match state.vfs.find_node_mut(&target) {
                Ok(node) => {
                    node.set_owner(owner.as_str());
                    out.line(format_args!("Changed owner of '{file}' to '{owner}'"))?;
                }
                Err(err) => out.report(&CommandName::Chown.to_string(), &err)?,
            }
        }

        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::test_support::{at, run, state};

    #[test]
    fn changes_owner_and_modified_time() {
        let mut state = state();

        let (result, output, _) = run(&Chown, &mut state, &["newuser", "/test.txt"]);

        assert!(result.is_ok());
        assert_eq!(output, "Changed owner of '/test.txt' to 'newuser'\n");
        let node = state.vfs.find_node("/test.txt").unwrap();
        assert_eq!(node.owner(), Some("newuser"));
        assert!(node.modified_at() > at(1));
    }

    #[test]
    fn leaves_other_nodes_untouched() {
        let mut state = state();
        let before = state.vfs.find_node("/home/user/notes.txt").unwrap().clone();

        run(&Chown, &mut state, &["newuser", "/test.txt"]).0.unwrap();

        assert_eq!(state.vfs.find_node("/home/user/notes.txt").unwrap(), &before);
        assert_eq!(state.vfs.find_node("/home").unwrap().owner(), None);
    }

    #[test]
    fn relative_paths_and_directories() {
        let mut state = state();
        state.set_current_path("/home");

        run(&Chown, &mut state, &["root", "user", "user/notes.txt"]).0.unwrap();

        assert_eq!(state.vfs.find_node("/home/user").unwrap().owner(), Some("root"));
        assert_eq!(
            state.vfs.find_node("/home/user/notes.txt").unwrap().owner(),
            Some("root")
        );
    }

    #[test]
    fn missing_files_are_reported_individually() {
        let mut state = state();

        let (result, output, failures) = run(&Chown, &mut state, &["bob", "/nope", "/test.txt"]);

        assert!(result.is_ok());
        assert_eq!(failures, 1);
        assert!(output.starts_with("chown: file or directory not found: nope\n"));
        assert_eq!(state.vfs.find_node("/test.txt").unwrap().owner(), Some("bob"));
    }

    #[test]
    fn requires_owner_and_file() {
        let mut state = state();
        let (result, _, _) = run(&Chown, &mut state, &["bob"]);
        assert!(matches!(result, Err(CommandError::MissingArgument { what: "file" })));
    }
}
