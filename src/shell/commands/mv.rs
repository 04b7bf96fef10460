use snafu::ensure;

use super::{Command, CommandName, Flow};
use crate::filesystem::{VfsNode, path};
use crate::shell::error::{
    CommandError, DestinationExistsSnafu, MissingArgumentSnafu, MoveIntoSubdirectorySnafu,
    MoveToItselfSnafu, NotADirectorySnafu,
};
use crate::shell::output::CommandOutput;
use crate::shell::state::ShellState;

/// Moves or renames nodes. With several sources the destination must be an
/// existing directory.
pub struct Mv;

impl Command for Mv {
    fn name(&self) -> CommandName {
        CommandName::Mv
    }

    fn usage(&self) -> &'static str {
        "mv <src...> <dst>"
    }

    fn run(
        &self,
        state: &mut ShellState,
        args: &[String],
        out: &mut CommandOutput<'_>,
    ) -> Result<Flow, CommandError> {
        let Some((destination_arg, sources)) = args.split_last() else {
            return MissingArgumentSnafu { what: "source" }.fail();
        };
        ensure!(!sources.is_empty(), MissingArgumentSnafu { what: "destination" });

        let destination = state.resolve(destination_arg);
        let into_directory = state.vfs.find_node(&destination).is_ok_and(VfsNode::is_dir);
        ensure!(
            sources.len() == 1 || into_directory,
            NotADirectorySnafu {
                path: destination_arg,
            }
        );

        for source in sources {
            match move_one(state, source, destination_arg, &destination, into_directory) {
                Ok(()) => out.line(format_args!("Moved {source} to {destination_arg}"))?,
                Err(err) => out.report(&CommandName::Mv.to_string(), &err)?,
            }
        }

        Ok(Flow::Continue)
    }
}

fn move_one(
    state: &mut ShellState,
    source: &str,
    destination_arg: &str,
    destination: &str,
    into_directory: bool,
) -> Result<(), CommandError> {
    let source_path = path::normalize(&state.resolve(source));
    let source_node = state.vfs.find_node(&source_path)?;
    let source_name = source_node.name().to_string();
    let source_is_dir = source_node.is_dir();

    let mut destination_path = if into_directory {
        path::normalize(&path::join(destination, &source_name))
    } else {
        path::normalize(destination)
    };
    ensure!(source_path != destination_path, MoveToItselfSnafu { path: source });

    if let Ok(existing) = state.vfs.find_node(&destination_path) {
        ensure!(
            existing.is_dir() && source_is_dir,
            DestinationExistsSnafu {
                from: source,
                to: destination_arg,
            }
        );
        destination_path = path::join(&destination_path, &source_name);
    }

    ensure!(
        !destination_path.starts_with(&format!("{source_path}{}", path::SEPARATOR)),
        MoveIntoSubdirectorySnafu {
            from: source,
            into: destination_arg,
        }
    );

    state.vfs.move_node(&source_path, &destination_path)?;
    Ok(())
}
