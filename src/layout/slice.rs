use super::{LayoutRect, Rect};
use crate::render::colors::Rgb;
use crate::tree::arena::{NodeId, WeightedTree};

/// Slice-and-dice layout of the subtree at `root` into `area`.
///
/// One rectangle per non-empty, non-zero-sized leaf, in child order. Wide
/// areas are cut into side-by-side columns, everything else into stacked rows.
/// Each visible child gets `floor(size / parent_size * span)` of the split
/// axis except the last one, which takes whatever is left so the strips tile
/// the area exactly.
pub fn compute_layout(tree: &WeightedTree, root: NodeId, area: Rect) -> Vec<LayoutRect> {
    let mut rects = Vec::new();
    // Explicit stack: tree depth is untrusted.
    let mut stack = vec![(root, area)];

    while let Some((id, rect)) = stack.pop() {
        let node = tree.get(id);
        if node.is_empty() || node.size() == 0 {
            continue;
        }
        if node.is_leaf() {
            rects.push(LayoutRect {
                node: id,
                rect,
                colour: node.colour(),
            });
            continue;
        }

        let strips = split(tree, id, rect);
        // Reversed so the first child is popped first.
        stack.extend(strips.into_iter().rev());
    }

    if rects.is_empty() {
        tracing::debug!("Layout of {:?} in {:?} is empty", root, area);
    }
    rects
}

/// The treemap as `(rectangle, colour)` pairs.
pub fn treemap(tree: &WeightedTree, root: NodeId, area: Rect) -> Vec<(Rect, Rgb)> {
    compute_layout(tree, root, area)
        .into_iter()
        .map(|r| (r.rect, r.colour))
        .collect()
}

/// The leaves behind [`treemap`], index-aligned with its output.
pub fn leaf_order(tree: &WeightedTree, root: NodeId, area: Rect) -> Vec<NodeId> {
    compute_layout(tree, root, area)
        .into_iter()
        .map(|r| r.node)
        .collect()
}

/// Cut `rect` into one strip per visible child of `parent`.
fn split(tree: &WeightedTree, parent: NodeId, rect: Rect) -> Vec<(NodeId, Rect)> {
    let total = tree.size(parent);
    let visible: Vec<NodeId> = tree.non_empty_children(parent).collect();
    let columns = rect.w > rect.h;
    let span = if columns { rect.w } else { rect.h };
    let last = visible.len().saturating_sub(1);

    let mut offset = 0u32;
    let mut strips = Vec::with_capacity(visible.len());
    for (i, child) in visible.into_iter().enumerate() {
        let length = if i == last {
            span.saturating_sub(offset)
        } else {
            share(tree.size(child), total, span)
        };

        let strip = if columns {
            Rect::new(rect.x.saturating_add(offset), rect.y, length, rect.h)
        } else {
            Rect::new(rect.x, rect.y.saturating_add(offset), rect.w, length)
        };
        strips.push((child, strip));
        offset = offset.saturating_add(length);
    }
    strips
}

/// `floor(size / total * span)` without floating point.
fn share(size: u64, total: u64, span: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((size as u128 * span as u128) / total as u128) as u32
}
