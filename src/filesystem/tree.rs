use std::collections::HashMap;

use tracing::trace;

use crate::filesystem::{Directory, Node, NodeId, NodeKind};

const ROOT_NAME: &str = "/";

/// Arena of nodes rooted at a single directory named `/`.
///
/// The arena owns every node. Directories only hold handles to their children
/// and a child only holds the handle of its parent, so dropping an entry from
/// a directory never leaves an owning edge behind. Detached subtrees are
/// reclaimed immediately.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: HashMap<NodeId, Node>,
    next_id: u64,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        let root = Node::new(ROOT_NAME, None, NodeKind::empty_directory());
        Self {
            nodes: HashMap::from([(NodeId::ROOT, root)]),
            next_id: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn directory(&self, id: NodeId) -> Option<&Directory> {
        self.get(id)?.as_directory()
    }

    pub fn is_file(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_file)
    }

    pub fn is_directory(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_directory)
    }

    /// Number of live nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.directory(parent)?.get_child(name)
    }

    /// Walks `segments` down from the root.
    ///
    /// Returns `None` when a name is missing or when a file would have to be
    /// descended into. Never fails otherwise; picking an error is up to the caller.
    pub fn resolve<S: AsRef<str>>(&self, segments: &[S]) -> Option<NodeId> {
        let resolved = segments.iter().try_fold(self.root(), |current, segment| {
            self.child(current, segment.as_ref())
        });
        trace!(
            "Resolved {} segment(s) to {:?}",
            segments.len(),
            resolved
        );
        resolved
    }

    /// Inserts a new node named `name` under `parent`.
    ///
    /// Any entry already stored under that name is replaced in place and
    /// reclaimed together with its subtree. Returns `None` without touching the
    /// tree when `parent` is not a directory.
    pub fn attach(&mut self, parent: NodeId, name: &str, kind: NodeKind) -> Option<NodeId> {
        if !self.is_directory(parent) {
            return None;
        }
        let id = self.allocate();
        self.nodes.insert(id, Node::new(name, Some(parent), kind));

        let displaced = self
            .get_mut(parent)?
            .as_directory_mut()?
            .add_child(name, id);
        if let Some(displaced) = displaced {
            self.reclaim(displaced);
        }
        Some(id)
    }

    /// Removes the entry `name` from `parent` and reclaims its subtree.
    pub fn detach(&mut self, parent: NodeId, name: &str) -> bool {
        let removed = self
            .get_mut(parent)
            .and_then(Node::as_directory_mut)
            .and_then(|directory| directory.remove_child(name));
        match removed {
            Some(id) => {
                self.reclaim(id);
                true
            }
            None => false,
        }
    }

    /// Detaches `node` from its parent and links it as `name` under `new_parent`.
    ///
    /// The node keeps its handle, payload and children. An entry already stored
    /// under `name` is replaced in place and reclaimed. Returns `false` without
    /// touching the tree when `node` is the root, `new_parent` is not a
    /// directory or `new_parent` lies inside `node`.
    pub fn relink(&mut self, node: NodeId, new_parent: NodeId, name: &str) -> bool {
        let Some((old_parent, old_name)) = self
            .get(node)
            .and_then(|current| Some((current.parent?, current.name.clone())))
        else {
            return false;
        };
        if !self.is_directory(new_parent) || self.is_ancestor(node, new_parent) {
            return false;
        }
        if old_parent == new_parent && old_name == name {
            return true;
        }

        if let Some(directory) = self.get_mut(old_parent).and_then(Node::as_directory_mut) {
            directory.remove_child(&old_name);
        }
        if let Some(moved) = self.get_mut(node) {
            moved.name = name.to_string();
            moved.parent = Some(new_parent);
        }
        let displaced = self
            .get_mut(new_parent)
            .and_then(Node::as_directory_mut)
            .and_then(|directory| directory.add_child(name, node));
        if let Some(displaced) = displaced {
            self.reclaim(displaced);
        }
        true
    }

    /// True when `ancestor` is `node` itself or lies on its parent chain.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        std::iter::successors(Some(node), |current| self.get(*current)?.parent())
            .any(|current| current == ancestor)
    }

    /// Absolute path of a live node, rebuilt from parent handles.
    pub fn path_of(&self, node: NodeId) -> Option<String> {
        let mut names = Vec::new();
        let mut current = self.get(node)?;
        while let Some(parent) = current.parent() {
            names.push(current.name());
            current = self.get(parent)?;
        }
        names.reverse();
        Some(format!("/{}", names.join("/")))
    }

    fn allocate(&mut self) -> NodeId {
        let id = NodeId::from(self.next_id);
        self.next_id += 1;
        id
    }

    fn reclaim(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                if let NodeKind::Directory(directory) = node.kind {
                    pending.extend(directory.children().map(|(_, child)| child));
                }
            }
        }
        trace!("Reclaimed subtree {}, {} node(s) left", id, self.nodes.len());
    }
}
