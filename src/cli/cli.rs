use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Interactive shell over an in-memory copy of a directory tree.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Directory to load into the virtual filesystem
    #[clap(long, default_value = ".")]
    pub vfs: PathBuf,

    /// File with commands to run before the interactive prompt
    #[clap(long, short)]
    pub script: Option<PathBuf>,

    /// YAML settings file (defaults to .vfs-shell.yaml when present)
    #[clap(long, short)]
    pub config: Option<PathBuf>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["vfs-shell"]).unwrap();
        assert_eq!(cli.vfs, PathBuf::from("."));
        assert!(cli.script.is_none());
        assert!(cli.config.is_none());
        assert_eq!(cli.log_level, LogLevel::Warn);
    }

    #[test]
    fn all_flags() {
        let cli = Cli::try_parse_from([
            "vfs-shell",
            "--vfs",
            "/srv/tree",
            "-s",
            "start.txt",
            "--config",
            "shell.yaml",
            "-l",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.vfs, PathBuf::from("/srv/tree"));
        assert_eq!(cli.script, Some(PathBuf::from("start.txt")));
        assert_eq!(cli.config, Some(PathBuf::from("shell.yaml")));
        assert_eq!(cli.log_level, LogLevel::Debug);
    }

    #[test]
    fn help_is_available() {
        let err = Cli::try_parse_from(["vfs-shell", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
