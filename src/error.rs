use thiserror::Error;

use crate::tree::arena::NodeId;

/// Errors raised by tree construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// An unlabelled (empty) node was given children or a nonzero size.
    #[error("an empty node cannot have children or a nonzero size (children={children}, size={size})")]
    InvalidConstruction { children: usize, size: u64 },

    /// A leaf-only operation was called on a node that has children.
    #[error("node {0:?} has children and is not a leaf")]
    NotALeaf(NodeId),

    /// A node was passed as a child but already belongs to another parent.
    #[error("node {child:?} already belongs to parent {parent:?}")]
    AlreadyAttached { child: NodeId, parent: NodeId },

    /// The id does not refer to a node in this tree.
    #[error("node {0:?} does not exist in this tree")]
    UnknownNode(NodeId),

    /// Applying the delta would push a size on the ancestor chain below zero
    /// (or past `u64::MAX`).
    #[error("applying {delta} to node {node:?} (size {size}) leaves the valid size range")]
    SizeOutOfRange { node: NodeId, size: u64, delta: i64 },

    /// The children passed to a new node sum past `u64::MAX`.
    #[error("children of node {node:?} sum past u64::MAX")]
    SizeOverflow { node: NodeId },

    /// The arena already holds as many nodes as `NodeId` can address.
    #[error("tree is full ({len} nodes)")]
    ArenaFull { len: usize },

    /// An internal node's size differs from the sum of its children.
    #[error("node {node:?} has size {size} but its children sum to {children_sum}")]
    AggregateMismatch {
        node: NodeId,
        size: u64,
        children_sum: u64,
    },

    /// A child sits in a parent's slots but points at a different parent.
    #[error("node {child:?} is a child of {expected:?} but records parent {found:?}")]
    BrokenParentLink {
        child: NodeId,
        expected: NodeId,
        found: Option<NodeId>,
    },
}
