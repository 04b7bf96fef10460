use std::num::NonZeroUsize;

use crate::filesystem::{Vfs, path};

pub const DEFAULT_TAIL_LINES: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// Everything a command may read or change.
#[derive(Debug)]
pub struct ShellState {
    pub vfs: Vfs,
    current_path: String,
    tail_lines: NonZeroUsize,
}

impl ShellState {
    pub fn new(vfs: Vfs, tail_lines: NonZeroUsize) -> Self {
        Self {
            vfs,
            current_path: path::ROOT.to_string(),
            tail_lines,
        }
    }

    /// Working directory, always in normalized absolute form.
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub(crate) fn set_current_path(&mut self, path: &str) {
        self.current_path = path::normalize(path);
    }

    /// Absolute virtual path for a command argument.
    pub fn resolve(&self, arg: &str) -> String {
        path::join(&self.current_path, arg)
    }

    pub fn tail_lines(&self) -> NonZeroUsize {
        self.tail_lines
    }
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new(Vfs::new(), DEFAULT_TAIL_LINES)
    }
}
