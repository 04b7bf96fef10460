use snafu::{OptionExt, ResultExt, ensure};
use tracing::info;

use super::{Command, CommandName, Flow};
use crate::shell::error::{CommandError, MissingArgumentSnafu, NotLoadedSnafu, SaveSnafu};
use crate::shell::output::CommandOutput;
use crate::shell::state::ShellState;

/// Writes the tree to a real directory. Refused until a tree was loaded.
pub struct VfsSave;

impl Command for VfsSave {
    fn name(&self) -> CommandName {
        CommandName::VfsSave
    }

    fn usage(&self) -> &'static str {
        "vfs-save <path>"
    }

    fn run(
        &self,
        state: &mut ShellState,
        args: &[String],
        out: &mut CommandOutput<'_>,
    ) -> Result<Flow, CommandError> {
        let target = args.first().context(MissingArgumentSnafu {
            what: "path to save",
        })?;
        ensure!(state.vfs.is_loaded(), NotLoadedSnafu);

        info!("Saving VFS to {target}");
        state.vfs.save_to_disk(target).context(SaveSnafu)?;
        out.line(format_args!("VFS saved to {target}"))?;

        Ok(Flow::Continue)
    }
}
