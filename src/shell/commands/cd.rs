use snafu::ensure;

use super::{Command, CommandName, Flow};
use crate::filesystem::path;
use crate::shell::error::{CommandError, NotADirectorySnafu};
use crate::shell::output::CommandOutput;
use crate::shell::state::ShellState;

/// Changes the working directory. `..` here is the lexical parent of the
/// working directory, unlike `..` inside a path.
pub struct Cd;

impl Command for Cd {
    fn name(&self) -> CommandName {
        CommandName::Cd
    }

    fn usage(&self) -> &'static str {
        "cd [path|..|.|/]"
    }

    fn run(
        &self,
        state: &mut ShellState,
        args: &[String],
        _out: &mut CommandOutput<'_>,
    ) -> Result<Flow, CommandError> {
        let target = match args.first().map(String::as_str) {
            None | Some("/") => path::ROOT.to_string(),
            Some(".") => return Ok(Flow::Continue),
            Some("..") => path::parent_path(state.current_path()),
            Some(arg) => state.resolve(arg),
        };

        let node = state.vfs.find_node(&target)?;
        ensure!(node.is_dir(), NotADirectorySnafu { path: &target });

        state.set_current_path(&target);
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::test_support::{run, state};
    use rstest::rstest;

    #[rstest]
    #[case(&["/home"], "/home")]
    #[case(&["home/user"], "/home/user")]
    #[case(&["/home/./user/"], "/home/user")]
    #[case(&["/"], "/")]
    #[case(&[], "/")]
    fn changes_to_directories(#[case] args: &[&str], #[case] expected: &str) {
        let mut state = state();
        let (result, _, _) = run(&Cd, &mut state, args);
        assert!(result.is_ok());
        assert_eq!(state.current_path(), expected);
    }

    #[test]
    fn relative_paths_start_from_working_directory() {
        let mut state = state();
        run(&Cd, &mut state, &["home"]).0.unwrap();
        run(&Cd, &mut state, &["user"]).0.unwrap();
        assert_eq!(state.current_path(), "/home/user");
    }

    #[test]
    fn dot_dot_goes_to_lexical_parent() {
        let mut state = state();
        state.set_current_path("/home/user");

        run(&Cd, &mut state, &[".."]).0.unwrap();
        assert_eq!(state.current_path(), "/home");
        run(&Cd, &mut state, &[".."]).0.unwrap();
        assert_eq!(state.current_path(), "/");
        run(&Cd, &mut state, &[".."]).0.unwrap();
        assert_eq!(state.current_path(), "/");
    }

    #[test]
    fn dot_stays_put() {
        let mut state = state();
        state.set_current_path("/home");
        run(&Cd, &mut state, &["."]).0.unwrap();
        assert_eq!(state.current_path(), "/home");
    }

    #[rstest]
    #[case("/nonexistent")]
    #[case("test.txt")]
    fn failed_cd_keeps_working_directory(#[case] target: &str) {
        let mut state = state();
        state.set_current_path("/home");
        let before = state.current_path().to_string();

        let (result, _, _) = run(&Cd, &mut state, &[target]);

        assert!(result.is_err());
        assert_eq!(state.current_path(), before);
    }
}
