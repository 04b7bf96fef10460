use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use std::{
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::ext::BestEffortPathExt;

const CONFIG_FILE_NAME: &str = ".vfs-shell.yaml";

/// Optional settings read from a YAML file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellConfig {
    /// Overrides the user name shown in the prompt.
    pub user: Option<String>,
    /// Overrides the host name shown in the prompt.
    pub hostname: Option<String>,
    /// Default line count for `tail`.
    pub tail_lines: Option<NonZeroUsize>,
    pub color: Option<bool>,
}

impl ShellConfig {
    /// Reads `explicit` when given, otherwise `.vfs-shell.yaml` in the working
    /// directory if it exists. No file at all means default settings.
    pub fn read(explicit: Option<&Path>) -> Result<Self, ShellConfigError> {
        match explicit {
            Some(path) => Self::from_path(path.to_path_buf()),
            None => {
                let default_path = PathBuf::from(CONFIG_FILE_NAME);
                if default_path.is_file() {
                    Self::from_path(default_path)
                } else {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_path(path: PathBuf) -> Result<Self, ShellConfigError> {
        debug!("Reading config file: {}", path.best_effort_path_display());
        let contents = fs::read_to_string(&path).context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        debug!("Successfully read config file: {} bytes", contents.len());
        contents.as_str().try_into()
    }

    fn parse_top_level(top_level: &LinkedHashMap<Yaml, Yaml>) -> Result<Self, ShellConfigError> {
        let mut config = Self::default();

        for (key, value) in top_level {
            let Yaml::Value(Scalar::String(name)) = key else {
                debug!("Skipping non-string config key: {:?}", key);
                continue;
            };
            let key: &str = name;
            match key {
                "user" => config.user = Some(expect_string(key, value)?),
                "hostname" => config.hostname = Some(expect_string(key, value)?),
                "tail_lines" => {
                    let lines = match value {
                        Yaml::Value(Scalar::Integer(n)) => usize::try_from(*n)
                            .ok()
                            .and_then(NonZeroUsize::new),
                        _ => None,
                    };
                    config.tail_lines = Some(lines.context(InvalidValueSnafu {
                        key,
                        expected: "a positive integer",
                    })?);
                }
                "color" => match value {
                    Yaml::Value(Scalar::Boolean(enabled)) => config.color = Some(*enabled),
                    _ => {
                        return InvalidValueSnafu {
                            key,
                            expected: "a boolean",
                        }
                        .fail();
                    }
                },
                other => debug!("Ignoring unknown config key '{other}'"),
            }
        }

        Ok(config)
    }
}

fn expect_string(key: &str, value: &Yaml) -> Result<String, ShellConfigError> {
    match value {
        Yaml::Value(Scalar::String(text)) => Ok(text.to_string()),
        _ => InvalidValueSnafu {
            key,
            expected: "a string",
        }
        .fail(),
    }
}

impl TryFrom<&str> for ShellConfig {
    type Error = ShellConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let Some(document) = documents.first() else {
            return Ok(Self::default());
        };
        if matches!(document, Yaml::Value(Scalar::Null)) {
            return Ok(Self::default());
        }

        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;
        Self::parse_top_level(top_level)
    }
}

#[derive(Debug, Snafu)]
pub enum ShellConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Config key '{}' should be {}", key, expected))]
    InvalidValue { key: String, expected: &'static str },
}
