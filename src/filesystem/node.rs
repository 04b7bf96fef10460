use std::time::SystemTime;

/// Payload of a node: directories own their children, files own their bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Directory { children: Vec<VfsNode> },
    File { content: Vec<u8> },
}

/// A single entry of the virtual tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VfsNode {
    name: String,
    kind: NodeKind,
    modified_at: SystemTime,
    owner: Option<String>,
}

impl VfsNode {
    pub fn directory(name: impl Into<String>, modified_at: SystemTime) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory {
                children: Vec::new(),
            },
            modified_at,
            owner: None,
        }
    }

    pub fn file(name: impl Into<String>, content: impl Into<Vec<u8>>, modified_at: SystemTime) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File {
                content: content.into(),
            },
            modified_at,
            owner: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    pub fn modified_at(&self) -> SystemTime {
        self.modified_at
    }

    #[cfg(test)]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// File bytes, `None` for directories.
    pub fn content(&self) -> Option<&[u8]> {
        match &self.kind {
            NodeKind::File { content } => Some(content),
            NodeKind::Directory { .. } => None,
        }
    }

    /// Ordered children, `None` for files.
    pub fn children(&self) -> Option<&[VfsNode]> {
        match &self.kind {
            NodeKind::Directory { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<VfsNode>> {
        match &mut self.kind {
            NodeKind::Directory { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    pub fn child(&self, name: &str) -> Option<&VfsNode> {
        self.children()?.iter().find(|child| child.name == name)
    }

    /// Records a new owner and marks the node as modified.
    pub fn set_owner(&mut self, owner: impl Into<String>) {
        self.owner = Some(owner.into());
        self.touch();
    }

    pub fn touch(&mut self) {
        self.modified_at = SystemTime::now();
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn file_has_content_and_no_children() {
        let file = VfsNode::file("a.txt", "hello", SystemTime::UNIX_EPOCH);
        assert!(!file.is_dir());
        assert_eq!(file.content(), Some(&b"hello"[..]));
        assert!(file.children().is_none());
    }

    #[test]
    fn directory_has_children_and_no_content() {
        let dir = VfsNode::directory("d", SystemTime::UNIX_EPOCH);
        assert!(dir.is_dir());
        assert!(dir.content().is_none());
        assert_eq!(dir.children(), Some(&[][..]));
        assert!(dir.child("missing").is_none());
    }

    #[test]
    fn set_owner_touches_modified_time() {
        let epoch = SystemTime::UNIX_EPOCH + Duration::from_secs(10);
        let mut file = VfsNode::file("a.txt", "", epoch);
        assert_eq!(file.owner(), None);

        file.set_owner("alice");

        assert_eq!(file.owner(), Some("alice"));
        assert!(file.modified_at() > epoch);
    }
}
