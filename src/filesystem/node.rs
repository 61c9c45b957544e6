use derive_more::{Display, From};
use hashlink::LinkedHashMap;

use crate::filesystem::Stat;

/// Handle to a node stored in a [`Tree`](super::Tree).
///
/// A handle never owns the node it points to, so a child keeping the handle of
/// its parent cannot form an ownership cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[display("#{_0}")]
pub struct NodeId(u64);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

#[derive(Debug, Clone, Default)]
pub struct Directory {
    children: LinkedHashMap<String, NodeId>,
}

impl Directory {
    pub fn get_child(&self, name: &str) -> Option<NodeId> {
        self.children.get(name).copied()
    }

    /// Points `name` at `id` and returns the handle previously stored under it.
    ///
    /// A replaced entry keeps its position in the listing, a new name is appended.
    pub fn add_child(&mut self, name: &str, id: NodeId) -> Option<NodeId> {
        if let Some(slot) = self.children.get_mut(name) {
            return Some(std::mem::replace(slot, id));
        }
        self.children.insert(name.to_string(), id);
        None
    }

    pub fn remove_child(&mut self, name: &str) -> Option<NodeId> {
        self.children.remove(name)
    }

    /// Children in insertion order. Every call starts a fresh walk.
    pub fn children(&self) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.children.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn child_names(&self) -> Vec<String> {
        self.children.keys().cloned().collect()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct File {
    content: String,
}

impl File {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replaces the whole buffer.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    File(File),
    Directory(Directory),
}

impl NodeKind {
    pub fn empty_file() -> Self {
        NodeKind::File(File::default())
    }

    pub fn empty_directory() -> Self {
        NodeKind::Directory(Directory::default())
    }
}

/// A single filesystem object: its name, the directory holding it and its payload.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn new(name: impl Into<String>, parent: Option<NodeId>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            parent,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The directory holding this node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File(_))
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory(_))
    }

    pub fn as_file(&self) -> Option<&File> {
        match &self.kind {
            NodeKind::File(file) => Some(file),
            NodeKind::Directory(_) => None,
        }
    }

    pub fn as_file_mut(&mut self) -> Option<&mut File> {
        match &mut self.kind {
            NodeKind::File(file) => Some(file),
            NodeKind::Directory(_) => None,
        }
    }

    pub fn as_directory(&self) -> Option<&Directory> {
        match &self.kind {
            NodeKind::Directory(directory) => Some(directory),
            NodeKind::File(_) => None,
        }
    }

    pub fn as_directory_mut(&mut self) -> Option<&mut Directory> {
        match &mut self.kind {
            NodeKind::Directory(directory) => Some(directory),
            NodeKind::File(_) => None,
        }
    }

    pub fn stat(&self) -> Stat {
        Stat::new(self.is_file(), self.is_directory())
    }
}
