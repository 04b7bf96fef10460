use std::io;
use std::path::{Component, Path, PathBuf};

/// Absolute, lexically normalized form of `path`.
///
/// Unlike `canonicalize` this does not touch the filesystem, so it also works
/// for paths that do not exist yet (save targets).
pub fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    std::path::absolute(path).map(|absolute| normalize_path(&absolute))
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !components.is_empty()
                    && !matches!(components.last(), Some(Component::RootDir | Component::Prefix(_)))
                {
                    components.pop();
                }
            }
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

pub trait BestEffortPathExt {
    /// Absolute path for messages, falling back to the path as given.
    fn best_effort_path_display(&self) -> String;
}

impl BestEffortPathExt for Path {
    fn best_effort_path_display(&self) -> String {
        absolute_path(self)
            .unwrap_or_else(|_| self.to_path_buf())
            .display()
            .to_string()
    }
}

impl BestEffortPathExt for PathBuf {
    fn best_effort_path_display(&self) -> String {
        self.as_path().best_effort_path_display()
    }
}
