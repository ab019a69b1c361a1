//! Position normalization: parent-relative rectangles to root-absolute ones.

use crate::tree::BoxNode;

/// Derive root-absolute `layout` rectangles for a subtree.
///
/// `node` keeps its own local rectangle as its absolute one (a missing
/// rectangle counts as the origin). Each child's absolute rectangle is its
/// `local_layout` moved by its parent's absolute origin; grid children are
/// descended into. Children without a local rectangle are left untouched.
///
/// Absolute rectangles are always recomputed from the local ones, so
/// normalizing an already-normalized tree changes nothing.
pub fn normalize_positions(node: &mut BoxNode) {
    if let Some(local) = node.local_layout {
        node.layout = Some(local);
    }
    let (x, y) = node.layout.map_or((0.0, 0.0), |rect| (rect.x, rect.y));
    translate_children(node, x, y);
}

fn translate_children(parent: &mut BoxNode, x: f32, y: f32) {
    for child in &mut parent.children {
        let Some(local) = child.local_layout else {
            continue;
        };
        let absolute = local.translate(x, y);
        child.layout = Some(absolute);
        if child.is_grid() {
            translate_children(child, absolute.x, absolute.y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{LayoutRect, Style};

    fn placed(style: Style, rect: LayoutRect) -> BoxNode {
        BoxNode {
            local_layout: Some(rect),
            ..BoxNode::new(style)
        }
    }

    fn nested() -> BoxNode {
        let leaf = placed(Style::default(), LayoutRect::new(5.0, 5.0, 10.0, 10.0));
        let inner = placed(Style::grid("auto", "auto"), LayoutRect::new(100.0, 50.0, 40.0, 40.0))
            .with_child(leaf);
        let plain = placed(Style::default(), LayoutRect::new(0.0, 0.0, 10.0, 10.0)).with_child(
            placed(Style::default(), LayoutRect::new(1.0, 1.0, 1.0, 1.0)),
        );
        placed(Style::grid("auto", "auto"), LayoutRect::new(0.0, 0.0, 200.0, 200.0))
            .with_child(inner)
            .with_child(plain)
    }

    #[test]
    fn test_grid_descendants_are_translated() {
        let mut root = nested();
        normalize_positions(&mut root);
        let inner = &root.children[0];
        assert_eq!(inner.layout, Some(LayoutRect::new(100.0, 50.0, 40.0, 40.0)));
        assert_eq!(
            inner.children[0].layout,
            Some(LayoutRect::new(105.0, 55.0, 10.0, 10.0))
        );
    }

    #[test]
    fn test_non_grid_children_end_the_descent() {
        let mut root = nested();
        normalize_positions(&mut root);
        let plain = &root.children[1];
        assert!(plain.layout.is_some());
        assert_eq!(plain.children[0].layout, None);
    }

    #[test]
    fn test_normalizing_twice_is_a_no_op() {
        let mut root = nested();
        normalize_positions(&mut root);
        let once = root.clone();
        normalize_positions(&mut root);
        assert_eq!(root, once);
    }

    #[test]
    fn test_missing_layouts_are_skipped() {
        let mut root = BoxNode::new(Style::grid("auto", "auto")).with_child(BoxNode::default());
        normalize_positions(&mut root);
        assert_eq!(root.layout, None);
        assert_eq!(root.children[0].layout, None);
    }
}
