use std::collections::HashSet;

use compact_str::CompactString;

use super::path::{FileSystemPath, PathFormat};
use crate::error::TreeError;
use crate::render::colors::{colour_for, Rgb};

/// Index into the arena `Vec<Node>`. Uses u32 to save memory (supports up to ~4 billion nodes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a node currently is. The empty variant carries nothing, so a
/// tombstone can never hold a label, a size or children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Deleted leaf (or a node built without a label).
    Empty,
    /// Childless node; `size` is authoritative.
    Leaf { label: CompactString, size: u64 },
    /// Node with at least one child slot; `size` is the sum of the children.
    Internal {
        label: CompactString,
        size: u64,
        children: Vec<NodeId>,
    },
}

/// A single node in the weighted tree, stored in a flat arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) kind: NodeKind,
    /// Owning node; never used to control the child's lifetime.
    pub(crate) parent: Option<NodeId>,
    /// Display colour, fixed at construction.
    pub(crate) colour: Rgb,
}

impl Node {
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Empty => None,
            NodeKind::Leaf { label, .. } | NodeKind::Internal { label, .. } => Some(label.as_str()),
        }
    }

    pub fn size(&self) -> u64 {
        match &self.kind {
            NodeKind::Empty => 0,
            NodeKind::Leaf { size, .. } | NodeKind::Internal { size, .. } => *size,
        }
    }

    /// Child slots in insertion order, tombstones included.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Internal { children, .. } => children,
            _ => &[],
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn colour(&self) -> Rgb {
        self.colour
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.kind, NodeKind::Empty)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    pub(crate) fn size_mut(&mut self) -> Option<&mut u64> {
        match &mut self.kind {
            NodeKind::Empty => None,
            NodeKind::Leaf { size, .. } | NodeKind::Internal { size, .. } => Some(size),
        }
    }
}

/// The weighted tree stored as a flat arena of nodes.
///
/// The arena may hold several disconnected trees while a loader is still
/// assembling them bottom-up; callers keep the `NodeId` of the root they care
/// about.
#[derive(Debug)]
pub struct WeightedTree {
    pub(crate) nodes: Vec<Node>,
    path_format: Box<dyn PathFormat>,
}

impl Default for WeightedTree {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightedTree {
    /// Create an empty arena whose breadcrumbs use the platform path separator.
    pub fn new() -> Self {
        Self::with_path_format(Box::new(FileSystemPath))
    }

    pub fn with_path_format(path_format: Box<dyn PathFormat>) -> Self {
        WeightedTree {
            nodes: Vec::new(),
            path_format,
        }
    }

    pub fn path_format(&self) -> &dyn PathFormat {
        self.path_format.as_ref()
    }

    /// Build a node from a label, its children and (for childless nodes) a size.
    ///
    /// With children, `size` is ignored and recomputed from them, and every
    /// non-empty child is attached to the new node. A `None` label builds an
    /// empty node, which must have neither children nor a size.
    pub fn construct(
        &mut self,
        label: Option<&str>,
        children: Vec<NodeId>,
        size: u64,
    ) -> Result<NodeId, TreeError> {
        let id = next_id(self.nodes.len())?;

        let Some(label) = label else {
            if !children.is_empty() || size != 0 {
                return Err(TreeError::InvalidConstruction {
                    children: children.len(),
                    size,
                });
            }
            self.nodes.push(Node {
                kind: NodeKind::Empty,
                parent: None,
                colour: colour_for("", id.0),
            });
            return Ok(id);
        };

        // Everything is validated before any child is attached.
        let mut seen = HashSet::with_capacity(children.len());
        let mut total = 0u64;
        for &child in &children {
            let node = self.try_get(child)?;
            if let Some(parent) = node.parent {
                return Err(TreeError::AlreadyAttached { child, parent });
            }
            if !seen.insert(child) {
                return Err(TreeError::AlreadyAttached { child, parent: id });
            }
            total = total
                .checked_add(node.size())
                .ok_or(TreeError::SizeOverflow { node: id })?;
        }

        let kind = if children.is_empty() {
            NodeKind::Leaf {
                label: CompactString::new(label),
                size,
            }
        } else {
            for &child in &children {
                let node = &mut self.nodes[child.index()];
                if !node.is_empty() {
                    node.parent = Some(id);
                }
            }
            NodeKind::Internal {
                label: CompactString::new(label),
                size: total,
                children,
            }
        };

        self.nodes.push(Node {
            kind,
            parent: None,
            colour: colour_for(label, id.0),
        });
        Ok(id)
    }

    /// Add a childless node with the given size.
    pub fn leaf(&mut self, label: &str, size: u64) -> Result<NodeId, TreeError> {
        self.construct(Some(label), Vec::new(), size)
    }

    /// Add a node owning `children`; its size is their sum.
    pub fn internal(&mut self, label: &str, children: Vec<NodeId>) -> Result<NodeId, TreeError> {
        self.construct(Some(label), children, 0)
    }

    /// Add a detached empty node.
    pub fn empty(&mut self) -> Result<NodeId, TreeError> {
        self.construct(None, Vec::new(), 0)
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Get a node by ID, reporting ids that belong to another arena.
    pub fn try_get(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.nodes.get(id.index()).ok_or(TreeError::UnknownNode(id))
    }

    /// Total number of nodes, tombstones included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self, id: NodeId) -> bool {
        self.get(id).is_empty()
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.get(id).is_leaf()
    }

    pub fn size(&self, id: NodeId) -> u64 {
        self.get(id).size()
    }

    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.get(id).label()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    pub fn colour(&self, id: NodeId) -> Rgb {
        self.get(id).colour
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).children()
    }

    /// Children that contribute visible area: neither empty nor zero-sized.
    pub fn non_empty_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id).iter().copied().filter(move |&child| {
            let node = self.get(child);
            !node.is_empty() && node.size() > 0
        })
    }

    /// Shallow slot equality: same label and same parent.
    ///
    /// Only meaningful for leaves; used to tell whether a remembered leaf still
    /// names the same place after something else changed.
    pub fn same_slot(&self, a: NodeId, b: NodeId) -> bool {
        let (a, b) = (self.get(a), self.get(b));
        a.label() == b.label() && a.parent == b.parent
    }
}

/// Id for the node about to be pushed onto an arena of `len` nodes.
fn next_id(len: usize) -> Result<NodeId, TreeError> {
    u32::try_from(len)
        .map(NodeId)
        .map_err(|_| TreeError::ArenaFull { len })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_takes_size_from_argument() {
        let mut tree = WeightedTree::new();
        let leaf = tree.leaf("a.txt", 42).unwrap();
        assert!(tree.is_leaf(leaf));
        assert_eq!(tree.size(leaf), 42);
        assert_eq!(tree.label(leaf), Some("a.txt"));
        assert_eq!(tree.parent(leaf), None);
    }

    #[test]
    fn internal_ignores_size_argument_and_links_children() {
        let mut tree = WeightedTree::new();
        let a = tree.leaf("a", 1).unwrap();
        let b = tree.leaf("b", 2).unwrap();
        let parent = tree.construct(Some("dir"), vec![a, b], 999).unwrap();

        assert_eq!(tree.size(parent), 3);
        assert_eq!(tree.children(parent), &[a, b]);
        assert_eq!(tree.parent(a), Some(parent));
        assert_eq!(tree.parent(b), Some(parent));
    }

    #[test]
    fn empty_node_rejects_children_or_size() {
        let mut tree = WeightedTree::new();
        let a = tree.leaf("a", 1).unwrap();

        assert_eq!(
            tree.construct(None, vec![a], 0),
            Err(TreeError::InvalidConstruction { children: 1, size: 0 })
        );
        assert_eq!(
            tree.construct(None, Vec::new(), 5),
            Err(TreeError::InvalidConstruction { children: 0, size: 5 })
        );

        let empty = tree.construct(None, Vec::new(), 0).unwrap();
        assert!(tree.is_empty(empty));
        assert_eq!(tree.size(empty), 0);
        assert!(tree.children(empty).is_empty());
        assert_eq!(tree.parent(a), None);
    }

    #[test]
    fn children_cannot_be_reparented() {
        let mut tree = WeightedTree::new();
        let a = tree.leaf("a", 1).unwrap();
        let first = tree.internal("first", vec![a]).unwrap();

        assert_eq!(
            tree.internal("second", vec![a]),
            Err(TreeError::AlreadyAttached { child: a, parent: first })
        );
    }

    #[test]
    fn duplicate_child_is_rejected() {
        let mut tree = WeightedTree::new();
        let a = tree.leaf("a", 1).unwrap();
        let next = NodeId(tree.node_count() as u32);

        assert_eq!(
            tree.internal("dir", vec![a, a]),
            Err(TreeError::AlreadyAttached { child: a, parent: next })
        );
        assert_eq!(tree.parent(a), None);
    }

    #[test]
    fn unknown_child_is_rejected() {
        let mut tree = WeightedTree::new();
        assert_eq!(
            tree.internal("dir", vec![NodeId(7)]),
            Err(TreeError::UnknownNode(NodeId(7)))
        );
    }

    #[test]
    fn tombstone_children_stay_detached() {
        let mut tree = WeightedTree::new();
        let tomb = tree.empty().unwrap();
        let a = tree.leaf("a", 4).unwrap();
        let parent = tree.internal("dir", vec![tomb, a]).unwrap();

        assert_eq!(tree.size(parent), 4);
        assert_eq!(tree.parent(tomb), None);
        assert_eq!(tree.non_empty_children(parent).collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn non_empty_children_skips_zero_sized() {
        let mut tree = WeightedTree::new();
        let a = tree.leaf("a", 3).unwrap();
        let zero = tree.leaf("zero", 0).unwrap();
        let b = tree.leaf("b", 1).unwrap();
        let parent = tree.internal("dir", vec![a, zero, b]).unwrap();

        assert_eq!(tree.non_empty_children(parent).collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn same_slot_compares_label_and_parent() {
        let mut tree = WeightedTree::new();
        let a = tree.leaf("x", 1).unwrap();
        let b = tree.leaf("x", 9).unwrap();
        let c = tree.leaf("y", 1).unwrap();
        let left = tree.internal("left", vec![a, c]).unwrap();
        let other = tree.leaf("x", 1).unwrap();
        let _right = tree.internal("right", vec![b]).unwrap();
        let _root = tree.internal("root", vec![left, other]).unwrap();

        assert!(tree.same_slot(a, a));
        assert!(!tree.same_slot(a, c));
        assert!(!tree.same_slot(a, b));
        assert!(!tree.same_slot(a, other));
    }

    #[test]
    fn colour_is_fixed_at_construction() {
        let mut tree = WeightedTree::new();
        let a = tree.leaf("a", 1).unwrap();
        let before = tree.colour(a);
        let _parent = tree.internal("dir", vec![a]).unwrap();
        assert_eq!(tree.colour(a), before);
    }

    #[test]
    fn oversized_children_are_rejected_and_stay_detached() {
        let mut tree = WeightedTree::new();
        let a = tree.leaf("a", u64::MAX).unwrap();
        let b = tree.leaf("b", 1).unwrap();
        let next = NodeId(tree.node_count() as u32);

        assert_eq!(
            tree.internal("root", vec![a, b]),
            Err(TreeError::SizeOverflow { node: next })
        );
        assert_eq!(tree.parent(a), None);
        assert_eq!(tree.parent(b), None);
        assert_eq!(tree.node_count(), 2);

        let root = tree.internal("root", vec![a]).unwrap();
        assert_eq!(tree.size(root), u64::MAX);
    }

    #[test]
    fn ids_stop_at_the_u32_range() {
        assert_eq!(next_id(7), Ok(NodeId(7)));
        assert_eq!(next_id(u32::MAX as usize), Ok(NodeId(u32::MAX)));
        #[cfg(target_pointer_width = "64")]
        {
            let len = u32::MAX as usize + 1;
            assert_eq!(next_id(len), Err(TreeError::ArenaFull { len }));
        }
    }
}
