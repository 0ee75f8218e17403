use super::{compute_layout, LayoutRect, Point, Rect};
use crate::tree::arena::{NodeId, WeightedTree};

/// Hit-test: find which layout rectangle contains the given point.
///
/// Edges are inclusive, so a point on the border between two rectangles
/// resolves to the earlier one in layout order.
pub fn hit_test(layout_rects: &[LayoutRect], point: Point) -> Option<NodeId> {
    layout_rects
        .iter()
        .find(|r| r.rect.contains_inclusive(point))
        .map(|r| r.node)
}

/// Lay the tree out over `(0, 0, width, height)` and return the leaf under `point`.
///
/// `None` only when nothing was laid out (empty or zero-sized tree) or the
/// point is outside the area.
pub fn find_leaf(
    tree: &WeightedTree,
    root: NodeId,
    point: Point,
    width: u32,
    height: u32,
) -> Option<NodeId> {
    let layout = compute_layout(tree, root, Rect::new(0, 0, width, height));
    hit_test(&layout, point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{leaf_order, treemap};
    use proptest::prelude::*;

    fn sample() -> (WeightedTree, NodeId, [NodeId; 4]) {
        let mut tree = WeightedTree::new();
        let a = tree.leaf("a", 10).unwrap();
        let b = tree.leaf("b", 1).unwrap();
        let c = tree.leaf("c", 2).unwrap();
        let d = tree.leaf("d", 3).unwrap();
        let root = tree.internal("root", vec![a, b, c, d]).unwrap();
        (tree, root, [a, b, c, d])
    }

    #[test]
    fn finds_the_leaf_under_the_point() {
        let (tree, root, [a, b, c, d]) = sample();
        // Rows at y = 0..125, 125..137, 137..162, 162..200.
        assert_eq!(find_leaf(&tree, root, Point::new(50, 10), 200, 200), Some(a));
        assert_eq!(find_leaf(&tree, root, Point::new(50, 130), 200, 200), Some(b));
        assert_eq!(find_leaf(&tree, root, Point::new(50, 150), 200, 200), Some(c));
        assert_eq!(find_leaf(&tree, root, Point::new(199, 199), 200, 200), Some(d));
    }

    #[test]
    fn shared_edge_resolves_to_the_earlier_rect() {
        let (tree, root, [a, b, ..]) = sample();
        assert_eq!(find_leaf(&tree, root, Point::new(0, 125), 200, 200), Some(a));
        assert_eq!(find_leaf(&tree, root, Point::new(0, 137), 200, 200), Some(b));
    }

    #[test]
    fn outside_point_and_empty_tree_find_nothing() {
        let (mut tree, root, leaves) = sample();
        assert_eq!(find_leaf(&tree, root, Point::new(201, 10), 200, 200), None);

        for leaf in leaves {
            tree.delete_leaf(leaf).unwrap();
        }
        assert_eq!(find_leaf(&tree, root, Point::new(10, 10), 200, 200), None);
    }

    #[test]
    fn lookup_follows_deletions() {
        let (mut tree, root, [a, b, ..]) = sample();
        tree.delete_leaf(a).unwrap();
        // b is now first and owns the top of the area.
        assert_eq!(find_leaf(&tree, root, Point::new(5, 5), 200, 200), Some(b));
    }

    proptest! {
        #[test]
        fn prop_lookup_agrees_with_layout(
            sizes in prop::collection::vec(1u64..1_000, 1..12),
            w in 1u32..400,
            h in 1u32..400,
            fx in 0.0f64..=1.0,
            fy in 0.0f64..=1.0,
        ) {
            let mut tree = WeightedTree::new();
            let leaves: Vec<NodeId> = sizes
                .iter()
                .enumerate()
                .map(|(i, &s)| tree.leaf(&format!("f{i}"), s).unwrap())
                .collect();
            let half = leaves.len() / 2;
            let mut top = leaves[half..].to_vec();
            if half > 0 {
                top.insert(0, tree.internal("left", leaves[..half].to_vec()).unwrap());
            }
            let root = tree.internal("root", top).unwrap();

            let p = Point::new((fx * w as f64) as u32, (fy * h as f64) as u32);
            let found = find_leaf(&tree, root, p, w, h);
            prop_assert!(found.is_some());

            let area = Rect::new(0, 0, w, h);
            let rects = treemap(&tree, root, area);
            let order = leaf_order(&tree, root, area);
            let index = rects.iter().position(|(r, _)| r.contains_inclusive(p)).unwrap();
            prop_assert_eq!(found, Some(order[index]));
        }
    }
}
