use super::arena::{NodeId, NodeKind, WeightedTree};
use crate::error::TreeError;

/// Shape summary of a subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub nodes: usize,
    pub leaves: usize,
    pub internal: usize,
    pub tombstones: usize,
    /// Deepest level below the root (root = 0).
    pub depth: usize,
}

impl WeightedTree {
    /// Add `delta` to a node and every ancestor up to its root.
    ///
    /// The whole chain is checked before anything is written, so a rejected
    /// delta leaves the tree untouched. Empty nodes carry no size and are
    /// left alone.
    pub fn propagate(&mut self, id: NodeId, delta: i64) -> Result<(), TreeError> {
        if self.try_get(id)?.is_empty() || delta == 0 {
            return Ok(());
        }

        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id);
            if node.is_empty() {
                break;
            }
            let size = node.size();
            let updated = size.checked_add_signed(delta).ok_or(TreeError::SizeOutOfRange {
                node: node_id,
                size,
                delta,
            })?;
            chain.push((node_id, updated));
            current = node.parent;
        }

        for (node_id, updated) in chain {
            if let Some(size) = self.nodes[node_id.index()].size_mut() {
                *size = updated;
            }
        }
        Ok(())
    }

    /// Turn a leaf into an empty tombstone, removing its size from every ancestor.
    ///
    /// The tombstone keeps its slot in the parent's children, so sibling
    /// positions do not move. Deleting an already-empty node does nothing.
    pub fn delete_leaf(&mut self, id: NodeId) -> Result<(), TreeError> {
        let node = self.try_get(id)?;
        let size = match node.kind() {
            NodeKind::Empty => return Ok(()),
            NodeKind::Internal { .. } => return Err(TreeError::NotALeaf(id)),
            NodeKind::Leaf { size, .. } => *size,
        };

        let delta = i64::try_from(size).map_err(|_| TreeError::SizeOutOfRange {
            node: id,
            size,
            delta: i64::MIN,
        })?;
        self.propagate(id, -delta)?;

        let node = &mut self.nodes[id.index()];
        tracing::debug!(
            "Deleted leaf {:?} '{}' ({} removed from ancestors)",
            id,
            node.label().unwrap_or_default(),
            size
        );
        node.kind = NodeKind::Empty;
        node.parent = None;
        Ok(())
    }

    /// Grow a leaf by 1% of its size, rounded up. Returns whether anything changed.
    pub fn increase_size(&mut self, id: NodeId) -> Result<bool, TreeError> {
        let Some(size) = self.leaf_size(id)? else {
            return Ok(false);
        };
        let step = percent_step(id, size)?;
        if step == 0 {
            return Ok(false);
        }
        self.propagate(id, step)?;
        Ok(true)
    }

    /// Shrink a leaf by 1% of its size, rounded up, as long as it stays at
    /// least 1. Only [`delete_leaf`](Self::delete_leaf) can empty a leaf.
    pub fn decrease_size(&mut self, id: NodeId) -> Result<bool, TreeError> {
        let Some(size) = self.leaf_size(id)? else {
            return Ok(false);
        };
        let step = percent_step(id, size)?;
        if step == 0 || size - step.unsigned_abs() < 1 {
            return Ok(false);
        }
        self.propagate(id, -step)?;
        Ok(true)
    }

    /// Verify that every internal node below `root` holds the sum of its
    /// children and that every live child points back at its parent.
    pub fn check_aggregates(&self, root: NodeId) -> Result<(), TreeError> {
        self.try_get(root)?;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = self.get(id);
            let NodeKind::Internal { size, children, .. } = node.kind() else {
                continue;
            };

            let mut children_sum = 0u64;
            for &child in children {
                let child_node = self.try_get(child)?;
                if !child_node.is_empty() && child_node.parent != Some(id) {
                    return Err(TreeError::BrokenParentLink {
                        child,
                        expected: id,
                        found: child_node.parent,
                    });
                }
                children_sum = children_sum.saturating_add(child_node.size());
                stack.push(child);
            }

            if children_sum != *size {
                return Err(TreeError::AggregateMismatch {
                    node: id,
                    size: *size,
                    children_sum,
                });
            }
        }
        Ok(())
    }

    /// Count nodes by kind and measure the depth of the subtree at `root`.
    pub fn stats(&self, root: NodeId) -> TreeStats {
        let mut stats = TreeStats::default();
        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            stats.nodes += 1;
            stats.depth = stats.depth.max(depth);
            match self.get(id).kind() {
                NodeKind::Empty => stats.tombstones += 1,
                NodeKind::Leaf { .. } => stats.leaves += 1,
                NodeKind::Internal { children, .. } => {
                    stats.internal += 1;
                    stack.extend(children.iter().map(|&c| (c, depth + 1)));
                }
            }
        }
        stats
    }

    /// Size of a leaf, `None` for an empty node, and an error for internal nodes.
    fn leaf_size(&self, id: NodeId) -> Result<Option<u64>, TreeError> {
        match self.try_get(id)?.kind() {
            NodeKind::Empty => Ok(None),
            NodeKind::Internal { .. } => Err(TreeError::NotALeaf(id)),
            NodeKind::Leaf { size, .. } => Ok(Some(*size)),
        }
    }
}

/// `ceil(size * 0.01)` in integer arithmetic.
fn percent_step(id: NodeId, size: u64) -> Result<i64, TreeError> {
    i64::try_from(size.div_ceil(100)).map_err(|_| TreeError::SizeOutOfRange {
        node: id,
        size,
        delta: i64::MAX,
    })
}
