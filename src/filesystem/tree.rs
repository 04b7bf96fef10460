use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use snafu::{OptionExt, ResultExt, Snafu, ensure};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::ext::{BestEffortPathExt, absolute_path};

use super::node::{NodeKind, VfsNode};
use super::path;

/// Name of the root-level file shown as the message of the day after a load.
pub const MOTD_NAME: &str = "motd";

/// The in-memory tree. Owns the root directory; every other node is owned by
/// exactly one parent directory.
#[derive(Debug, Clone)]
pub struct Vfs {
    root: VfsNode,
    is_loaded: bool,
}

impl Default for Vfs {
    fn default() -> Self {
        Self::new()
    }
}

impl Vfs {
    /// An empty, unloaded tree.
    pub fn new() -> Self {
        Self {
            root: VfsNode::directory(path::ROOT, SystemTime::now()),
            is_loaded: false,
        }
    }

    #[cfg(test)]
    pub fn root(&self) -> &VfsNode {
        &self.root
    }

    /// Whether [`Vfs::load_from_disk`] has been called. Persisting is refused
    /// before that so an empty default tree never overwrites real data.
    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    /// Resolves `path` to a node.
    ///
    /// `.` stays in place, `..` jumps back to the root (not to the lexical
    /// parent), every other segment must name an existing child.
    pub fn find_node(&self, path: &str) -> Result<&VfsNode, VfsError> {
        let mut current = &self.root;
        for segment in path::segments(path) {
            match segment {
                "." => {}
                ".." => current = &self.root,
                name => {
                    current = current
                        .child(name)
                        .context(NotFoundSnafu { segment: name })?;
                }
            }
        }
        Ok(current)
    }

    pub fn find_node_mut(&mut self, path: &str) -> Result<&mut VfsNode, VfsError> {
        let chain = self.locate(path)?;
        self.node_at_mut(&chain)
            .context(NotFoundSnafu { segment: path })
    }

    /// Attaches `node` as the last child of the directory at `parent`.
    #[cfg(test)]
    pub fn insert(&mut self, parent: &str, node: VfsNode) -> Result<(), VfsError> {
        let children = self
            .find_node_mut(parent)?
            .children_mut()
            .context(NotADirectorySnafu { path: parent })?;
        ensure!(
            !children.iter().any(|child| child.name() == node.name()),
            AlreadyExistsSnafu {
                path: path::join(parent, node.name()),
            }
        );
        children.push(node);
        Ok(())
    }

    /// Moves (and possibly renames) the node at `source` to `destination`.
    ///
    /// When the destination name is taken by a directory and the source is a
    /// directory too, the source is nested inside it under its own name.
    pub fn move_node(&mut self, source: &str, destination: &str) -> Result<(), VfsError> {
        let source_chain = self.locate(source)?;
        let Some((&source_index, source_parent_chain)) = source_chain.split_last() else {
            return MoveRootSnafu.fail();
        };

        let destination_parent_path = path::parent_path(destination);
        let mut destination_parent_chain = self.locate(&destination_parent_path)?;
        let destination_parent = self
            .node_at(&destination_parent_chain)
            .context(NotFoundSnafu {
                segment: destination_parent_path.as_str(),
            })?;
        ensure!(
            destination_parent.is_dir(),
            NotADirectorySnafu {
                path: destination_parent_path.as_str(),
            }
        );
        ensure!(
            !destination_parent_chain.starts_with(&source_chain),
            IntoOwnSubtreeSnafu {
                from: source,
                to: destination,
            }
        );

        let name = path::name_from_path(destination);
        ensure!(!matches!(name, "" | "." | ".."), InvalidNameSnafu { name });

        if let Some(existing) = destination_parent.child(name) {
            let source_node = self
                .node_at(&source_chain)
                .context(NotFoundSnafu { segment: source })?;
            ensure!(
                existing.is_dir() && source_node.is_dir(),
                AlreadyExistsSnafu { path: destination }
            );
            let nested = format!(
                "{}{}{}",
                destination.trim_end_matches(path::SEPARATOR),
                path::SEPARATOR,
                source_node.name()
            );
            debug!("'{destination}' is an existing directory, nesting as '{nested}'");
            return self.move_node(source, &nested);
        }

        let source_siblings = self
            .node_at_mut(source_parent_chain)
            .and_then(VfsNode::children_mut)
            .context(NotFoundSnafu { segment: source })?;
        let mut node = source_siblings.remove(source_index);

        // Detaching shifts later siblings of the source one slot to the left.
        let depth = source_parent_chain.len();
        if destination_parent_chain.len() > depth
            && destination_parent_chain.starts_with(source_parent_chain)
            && destination_parent_chain[depth] > source_index
        {
            destination_parent_chain[depth] -= 1;
        }

        node.rename(name);
        let destination_children = self
            .node_at_mut(&destination_parent_chain)
            .and_then(VfsNode::children_mut)
            .context(NotFoundSnafu {
                segment: destination_parent_path.as_str(),
            })?;
        destination_children.push(node);

        debug!("Moved '{source}' to '{destination}'");
        Ok(())
    }

    /// Replaces the tree with the contents of a real directory.
    ///
    /// The tree counts as loaded afterwards even when the walk failed part way.
    pub fn load_from_disk(&mut self, disk_path: impl AsRef<Path>) -> Result<(), VfsError> {
        let disk_path = disk_path.as_ref();
        let result = self.walk_disk(disk_path);
        self.is_loaded = true;
        match &result {
            Ok(()) => info!("VFS loaded from: {}", disk_path.display()),
            Err(e) => warn!("VFS load from {} stopped early: {e}", disk_path.display()),
        }
        result
    }

    fn walk_disk(&mut self, disk_path: &Path) -> Result<(), VfsError> {
        let absolute = absolute_path(disk_path).context(AbsolutePathSnafu { path: disk_path })?;
        let root_name = absolute
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path::ROOT.to_string());
        self.root = VfsNode::directory(root_name, SystemTime::now());

        let walker = WalkDir::new(&absolute)
            .follow_links(false)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry.context(WalkSnafu { path: &absolute })?;
            if entry.depth() == 0 {
                continue;
            }

            let file_type = entry.file_type();
            if !file_type.is_dir() && !file_type.is_file() {
                warn!("Skipping {}: not a regular file or directory", entry.path().display());
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&absolute) else {
                warn!("Skipping {}: outside of {}", entry.path().display(), absolute.display());
                continue;
            };
            let segments = relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>();

            let modified_at = entry
                .metadata()
                .context(WalkSnafu { path: entry.path() })?
                .modified()
                .unwrap_or_else(|_| SystemTime::now());
            let name = entry.file_name().to_string_lossy().into_owned();
            let node = if file_type.is_dir() {
                VfsNode::directory(name, modified_at)
            } else {
                let content = fs::read(entry.path()).context(ReadSnafu { path: entry.path() })?;
                VfsNode::file(name, content, modified_at)
            };

            debug!("Adding {}", relative.display());
            self.add_node(&segments, node);
        }
        Ok(())
    }

    /// Inserts `node` at the position named by `segments`, creating missing
    /// intermediate directories.
    fn add_node(&mut self, segments: &[String], node: VfsNode) {
        let Some((_, parents)) = segments.split_last() else {
            return;
        };

        let mut current = &mut self.root;
        for part in parents {
            let Some(children) = current.children_mut() else {
                warn!("Cannot insert {} below a file", segments.join("/"));
                return;
            };
            let index = match children.iter().position(|child| child.name() == part) {
                Some(index) => index,
                None => {
                    children.push(VfsNode::directory(part.as_str(), SystemTime::now()));
                    children.len() - 1
                }
            };
            current = &mut children[index];
        }

        match current.children_mut() {
            Some(children) => children.push(node),
            None => warn!("Cannot insert {} below a file", segments.join("/")),
        }
    }

    /// Mirrors the tree below `disk_path`, creating it first.
    ///
    /// The root directory itself is written as `<disk_path>/<root name>`.
    pub fn save_to_disk(&self, disk_path: impl AsRef<Path>) -> Result<(), VfsError> {
        let disk_path = disk_path.as_ref();
        let absolute = absolute_path(disk_path).context(AbsolutePathSnafu { path: disk_path })?;
        fs::create_dir_all(&absolute).context(CreateDirSnafu { path: &absolute })?;

        let root_name = self.root.name();
        if root_name.is_empty() || root_name == path::ROOT {
            for child in self.root.children().unwrap_or_default() {
                Self::save_node(child, &absolute)?;
            }
        } else {
            Self::save_node(&self.root, &absolute)?;
        }

        info!("VFS saved to {}", absolute.display());
        Ok(())
    }

    fn save_node(node: &VfsNode, base: &Path) -> Result<(), VfsError> {
        let target = base.join(node.name());
        match node.kind() {
            NodeKind::Directory { children } => {
                fs::create_dir_all(&target).context(CreateDirSnafu { path: &target })?;
                for child in children {
                    Self::save_node(child, &target)?;
                }
            }
            NodeKind::File { content } => {
                fs::write(&target, content).context(WriteSnafu { path: &target })?;
            }
        }
        restore_modified_time(&target, node.modified_at());
        Ok(())
    }

    /// Content of the root-level `motd` file, if there is one.
    pub fn motd(&self) -> Option<&[u8]> {
        self.root.child(MOTD_NAME).and_then(VfsNode::content)
    }

    /// Index chain from the root to the node at `path`, same rules as [`Vfs::find_node`].
    fn locate(&self, path: &str) -> Result<Vec<usize>, VfsError> {
        let mut chain = Vec::new();
        let mut current = &self.root;
        for segment in path::segments(path) {
            match segment {
                "." => {}
                ".." => {
                    chain.clear();
                    current = &self.root;
                }
                name => {
                    let (index, child) = current
                        .children()
                        .into_iter()
                        .flatten()
                        .enumerate()
                        .find(|(_, child)| child.name() == name)
                        .context(NotFoundSnafu { segment: name })?;
                    chain.push(index);
                    current = child;
                }
            }
        }
        Ok(chain)
    }

    fn node_at(&self, chain: &[usize]) -> Option<&VfsNode> {
        chain
            .iter()
            .try_fold(&self.root, |node, &index| node.children()?.get(index))
    }

    fn node_at_mut(&mut self, chain: &[usize]) -> Option<&mut VfsNode> {
        chain.iter().try_fold(&mut self.root, |node, &index| {
            node.children_mut()?.get_mut(index)
        })
    }
}

fn restore_modified_time(path: &Path, modified_at: SystemTime) {
    if let Err(e) = File::open(path).and_then(|file| file.set_modified(modified_at)) {
        debug!("Could not restore modification time of {}: {e}", path.display());
    }
}

#[derive(Debug, Snafu)]
pub enum VfsError {
    #[snafu(display("file or directory not found: {segment}"))]
    NotFound { segment: String },
    #[snafu(display("{path} is not a directory"))]
    NotADirectory { path: String },
    #[snafu(display("{path} already exists"))]
    AlreadyExists { path: String },
    #[snafu(display("invalid name '{name}'"))]
    InvalidName { name: String },
    #[snafu(display("the root directory cannot be moved"))]
    MoveRoot,
    #[snafu(display("cannot move {from} into its own subtree {to}"))]
    IntoOwnSubtree { from: String, to: String },
    #[snafu(display("Failed to resolve path {}", path.display()))]
    AbsolutePath {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to walk {}", path.best_effort_path_display()))]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[snafu(display("Failed to read {}", path.best_effort_path_display()))]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to create directory {}", path.best_effort_path_display()))]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to write {}", path.best_effort_path_display()))]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
