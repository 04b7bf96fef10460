use std::num::NonZeroUsize;

use snafu::{OptionExt, ensure};

use super::{Command, CommandName, Flow};
use crate::filesystem::Vfs;
use crate::shell::error::{
    CommandError, InvalidLineCountSnafu, IsADirectorySnafu, MissingArgumentSnafu,
};
use crate::shell::output::CommandOutput;
use crate::shell::state::ShellState;

/// Prints the last lines of one or more files.
pub struct Tail;

impl Command for Tail {
    fn name(&self) -> CommandName {
        CommandName::Tail
    }

    fn usage(&self) -> &'static str {
        "tail [-n N] <path...>"
    }

    fn run(
        &self,
        state: &mut ShellState,
        args: &[String],
        out: &mut CommandOutput<'_>,
    ) -> Result<Flow, CommandError> {
        let mut count = state.tail_lines();
        let mut files = Vec::new();
        let mut rest = args;
        while let Some((arg, remaining)) = rest.split_first() {
            match (arg.as_str(), remaining) {
                ("-n", [value, after @ ..]) => {
                    count = value
                        .parse::<NonZeroUsize>()
                        .ok()
                        .context(InvalidLineCountSnafu { value })?;
                    rest = after;
                }
                _ => {
                    files.push(arg.as_str());
                    rest = remaining;
                }
            }
        }
        ensure!(!files.is_empty(), MissingArgumentSnafu { what: "file" });

        let with_headers = files.len() > 1;
        for (index, file) in files.iter().enumerate() {
            let content = match file_content(&state.vfs, &state.resolve(file)) {
                Ok(content) => content,
                Err(err) => {
                    out.report(&CommandName::Tail.to_string(), &err)?;
                    continue;
                }
            };

            if with_headers {
                out.line(format_args!("==> {file} <=="))?;
            }
            for line in last_lines(&content, count.get()) {
                out.line(line)?;
            }
            if with_headers && index + 1 < files.len() {
                out.blank()?;
            }
        }

        Ok(Flow::Continue)
    }
}

fn file_content(vfs: &Vfs, target: &str) -> Result<String, CommandError> {
    let content = vfs
        .find_node(target)?
        .content()
        .context(IsADirectorySnafu { path: target })?;
    Ok(String::from_utf8_lossy(content).into_owned())
}

/// The final `count` lines; a trailing newline ends the last line instead of
/// starting an empty one.
fn last_lines(text: &str, count: usize) -> Vec<&str> {
    let mut lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(count);
    lines.split_off(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::VfsNode;
    use crate::shell::commands::test_support::{at, run, state};
    use rstest::*;

    fn numbered(lines: usize) -> String {
        (1..=lines).map(|n| format!("{n}\n")).collect()
    }

    fn expected(range: std::ops::RangeInclusive<usize>) -> String {
        range.map(|n| format!("{n}\n")).collect()
    }

    #[fixture]
    fn state_with_lines() -> ShellState {
        let mut state = state();
        state
            .vfs
            .insert("/", VfsNode::file("fifteen.txt", numbered(15), at(1)))
            .unwrap();
        state
            .vfs
            .insert("/", VfsNode::file("three.txt", "x\ny\nz", at(1)))
            .unwrap();
        state
    }

    #[rstest]
    fn defaults_to_last_ten_lines(mut state_with_lines: ShellState) {
        let (result, output, _) = run(&Tail, &mut state_with_lines, &["/fifteen.txt"]);
        assert!(result.is_ok());
        assert_eq!(output, expected(6..=15));
    }

    #[rstest]
    fn line_count_flag(mut state_with_lines: ShellState) {
        let (_, output, _) = run(&Tail, &mut state_with_lines, &["-n", "5", "/fifteen.txt"]);
        assert_eq!(output, expected(11..=15));
    }

    #[rstest]
    fn short_files_print_completely(mut state_with_lines: ShellState) {
        let (_, output, _) = run(&Tail, &mut state_with_lines, &["-n", "50", "three.txt"]);
        assert_eq!(output, "x\ny\nz\n");
    }

    #[rstest]
    fn multiple_files_get_headers(mut state_with_lines: ShellState) {
        let (_, output, _) = run(
            &Tail,
            &mut state_with_lines,
            &["-n", "1", "three.txt", "/fifteen.txt"],
        );
        assert_eq!(output, "==> three.txt <==\nz\n\n==> /fifteen.txt <==\n15\n");
    }

    #[rstest]
    fn bad_files_are_reported_and_skipped(mut state_with_lines: ShellState) {
        let (result, output, failures) = run(
            &Tail,
            &mut state_with_lines,
            &["-n", "1", "/missing.txt", "/home", "three.txt"],
        );

        assert!(result.is_ok());
        assert_eq!(failures, 2);
        assert!(output.contains("tail: file or directory not found: missing.txt"));
        assert!(output.contains("tail: /home is a directory"));
        assert!(output.ends_with("==> three.txt <==\nz\n"));
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("ten")]
    fn invalid_line_counts_are_rejected(mut state_with_lines: ShellState, #[case] value: &str) {
        let (result, output, _) = run(&Tail, &mut state_with_lines, &["-n", value, "three.txt"]);
        assert!(matches!(result, Err(CommandError::InvalidLineCount { .. })));
        assert!(output.is_empty());
    }

    #[rstest]
    fn requires_a_file(mut state_with_lines: ShellState) {
        let (result, _, _) = run(&Tail, &mut state_with_lines, &["-n", "3"]);
        assert!(matches!(result, Err(CommandError::MissingArgument { .. })));
    }

    #[rstest]
    fn configured_default_is_used(mut state_with_lines: ShellState) {
        let vfs = std::mem::take(&mut state_with_lines.vfs);
        let mut state = ShellState::new(vfs, NonZeroUsize::new(2).unwrap());
        let (_, output, _) = run(&Tail, &mut state, &["/fifteen.txt"]);
        assert_eq!(output, "14\n15\n");
    }
}
