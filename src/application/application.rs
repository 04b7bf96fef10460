use std::io::{self, BufRead, Write};

use snafu::Snafu;
use snafu::prelude::*;
use tracing::debug;
use tracing::error;
use tracing::info;

use crate::application::RuntimeConfig;
use crate::cli::Cli;
use crate::config::ShellConfigError;
use crate::shell::{Shell, ShellError, error_chain};

pub struct Application;

impl Application {
    pub fn run(cli: Cli) -> Result<(), ApplicationError> {
        let runtime_config = RuntimeConfig::from_cli(cli).context(ConfigSnafu)?;
        debug!("Runtime config: {:?}", runtime_config);

        let stdin = io::stdin();
        let stdout = io::stdout();
        Self::run_with(&runtime_config, stdin.lock(), &mut stdout.lock())
    }

    fn run_with(
        runtime_config: &RuntimeConfig,
        input: impl BufRead,
        out: &mut dyn Write,
    ) -> Result<(), ApplicationError> {
        let mut shell = Shell::new(runtime_config.shell_settings());
        shell.write_banner(out).context(SessionSnafu)?;

        if runtime_config.vfs.as_os_str().is_empty() {
            info!("No VFS directory given, starting with an empty tree");
        } else {
            match shell.load(&runtime_config.vfs, out) {
                Ok(()) => {}
                Err(err @ ShellError::LoadError { .. }) => {
                    error!("{}", error_chain(&err));
                    writeln!(out, "Error: {}", error_chain(&err)).context(OutputSnafu)?;
                }
                Err(err) => return Err(err).context(SessionSnafu),
            }
        }

        if let Some(script) = &runtime_config.script {
            let report = shell.run_script(script, out).context(ScriptSnafu)?;
            if report.failed == 0 {
                writeln!(out, "Script successfully ended").context(OutputSnafu)?;
            } else {
                writeln!(out, "Script ended with errors ({} failed)", report.failed)
                    .context(OutputSnafu)?;
            }
            if report.exited {
                info!("Script requested exit");
                return Ok(());
            }
        }

        shell.run_repl(input, out).context(SessionSnafu)?;
        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during configuration stage"))]
    ConfigError { source: ShellConfigError },
    #[snafu(display("Critical failure encountered while running the script"))]
    ScriptError { source: ShellError },
    #[snafu(display("Critical failure encountered during the shell session"))]
    SessionError { source: ShellError },
    #[snafu(display("Failed to write to standard output"))]
    OutputError { source: io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{DEFAULT_TAIL_LINES, Prompt};
    use std::fs;
    use std::io::Cursor;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn runtime(vfs: &Path, script: Option<PathBuf>) -> RuntimeConfig {
        RuntimeConfig {
            vfs: vfs.to_path_buf(),
            script,
            tail_lines: DEFAULT_TAIL_LINES,
            color: false,
            prompt: Prompt::new("u", "h"),
        }
    }

    fn run(runtime_config: &RuntimeConfig, input: &str) -> (Result<(), ApplicationError>, String) {
        let mut out = Vec::new();
        let result = Application::run_with(runtime_config, Cursor::new(input.to_owned()), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn loads_then_reads_commands_until_end_of_input() {
        let disk = TempDir::new().unwrap();
        fs::write(disk.path().join("motd"), "Welcome!").unwrap();
        fs::write(disk.path().join("a.txt"), "x").unwrap();

        let (result, out) = run(&runtime(disk.path(), None), "ls\n");

        result.unwrap();
        assert!(out.starts_with("Commands:\n"));
        assert!(out.contains("VFS loaded from: "));
        assert!(out.contains("Welcome!\n"));
        assert!(out.contains("a.txt\nmotd\n"));
    }

    #[test]
    fn failed_load_is_reported_and_the_session_continues() {
        let disk = TempDir::new().unwrap();
        let missing = disk.path().join("missing");

        let (result, out) = run(&runtime(&missing, None), "exit\n");

        result.unwrap();
        assert!(out.contains("Error: Failed to load VFS from "));
        assert!(out.ends_with("u@h:~/$ "));
    }

    #[test]
    fn script_exit_skips_the_repl() {
        let disk = TempDir::new().unwrap();
        let script = disk.path().join("script.txt");
        fs::write(&script, "# setup\nls /\nexit\nls /\n").unwrap();

        let (result, out) = run(&runtime(disk.path(), Some(script)), "ls\n");

        result.unwrap();
        assert!(out.contains("u@h:~/$ ls /\n"));
        assert!(out.contains("u@h:~/$ exit\n"));
        assert!(out.ends_with("Script successfully ended\n"));
    }

    #[test]
    fn script_failures_are_counted() {
        let disk = TempDir::new().unwrap();
        let script = disk.path().join("script.txt");
        fs::write(&script, "cd /nowhere\nfrobnicate\nls\n").unwrap();

        let (result, out) = run(&runtime(disk.path(), Some(script)), "");

        result.unwrap();
        assert!(out.contains("Script ended with errors (2 failed)\n"));
    }

    #[test]
    fn unreadable_script_is_fatal() {
        let disk = TempDir::new().unwrap();
        let script = disk.path().join("absent.txt");

        let (result, _) = run(&runtime(disk.path(), Some(script)), "");

        assert!(matches!(result, Err(ApplicationError::ScriptError { .. })));
    }
}
