use std::{env, fs};

use colored::Colorize;

use crate::config::ShellConfig;

const FALLBACK_USER: &str = "user";
const FALLBACK_HOST: &str = "localhost";

/// The `user@host:~/path$ ` invitation printed before every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    user: String,
    hostname: String,
}

impl Prompt {
    pub fn new(user: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            hostname: hostname.into(),
        }
    }

    /// Config overrides first, then the environment.
    pub fn from_config(config: &ShellConfig) -> Self {
        Self {
            user: config.user.clone().unwrap_or_else(detect_user),
            hostname: config.hostname.clone().unwrap_or_else(detect_hostname),
        }
    }

    pub fn render(&self, current_path: &str, color: bool) -> String {
        let identity = format!("{}@{}", self.user, self.hostname);
        let location = format!("~{current_path}");
        if color {
            format!("{}:{}$ ", identity.green().bold(), location.blue().bold())
        } else {
            format!("{identity}:{location}$ ")
        }
    }
}

fn detect_user() -> String {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .ok()
        .filter(|user| !user.is_empty())
        .unwrap_or_else(|| FALLBACK_USER.to_string())
}

fn detect_hostname() -> String {
    env::var("HOSTNAME")
        .ok()
        .or_else(|| fs::read_to_string("/etc/hostname").ok())
        .map(|host| host.trim().to_string())
        .filter(|host| !host.is_empty())
        .unwrap_or_else(|| FALLBACK_HOST.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_plain_prompt() {
        let prompt = Prompt::new("alice", "box");
        assert_eq!(prompt.render("/", false), "alice@box:~/$ ");
        assert_eq!(prompt.render("/docs/a", false), "alice@box:~/docs/a$ ");
    }

    #[test]
    fn config_overrides_environment() {
        let config = ShellConfig {
            user: Some("bob".into()),
            hostname: Some("server".into()),
            ..Default::default()
        };
        assert_eq!(Prompt::from_config(&config), Prompt::new("bob", "server"));
    }

    #[test]
    fn detected_names_are_never_empty() {
        let prompt = Prompt::from_config(&ShellConfig::default());
        assert!(!prompt.user.is_empty());
        assert!(!prompt.hostname.is_empty());
    }
}
