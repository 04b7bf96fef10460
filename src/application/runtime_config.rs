use std::num::NonZeroUsize;
use std::path::PathBuf;

use supports_color::Stream;

use crate::cli::Cli;
use crate::config::{ShellConfig, ShellConfigError};
use crate::shell::{DEFAULT_TAIL_LINES, Prompt, ShellSettings};

/// CLI arguments merged with the optional settings file.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub vfs: PathBuf,
    pub script: Option<PathBuf>,
    pub tail_lines: NonZeroUsize,
    pub color: bool,
    pub prompt: Prompt,
}

impl RuntimeConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, ShellConfigError> {
        let config = ShellConfig::read(cli.config.as_deref())?;
        Ok(Self::merge(cli, config))
    }

    fn merge(cli: Cli, config: ShellConfig) -> Self {
        Self {
            vfs: cli.vfs,
            script: cli.script,
            tail_lines: config.tail_lines.unwrap_or(DEFAULT_TAIL_LINES),
            color: config
                .color
                .unwrap_or_else(|| supports_color::on(Stream::Stdout).is_some()),
            prompt: Prompt::from_config(&config),
        }
    }

    pub fn shell_settings(&self) -> ShellSettings {
        ShellSettings {
            prompt: self.prompt.clone(),
            tail_lines: self.tail_lines,
            color: self.color,
        }
    }
}
