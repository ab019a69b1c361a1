//! The layout driver.
//!
//! A grid's `auto` tracks depend on the sizes of its children, while a child
//! grid without a declared size takes its size from the tracks it sits in.
//! The driver breaks that cycle with two passes per container:
//!
//! 1. **Intrinsic pass.** Lay out every grid child first (depth-first, in
//!    order) and feed the measured sizes into this container's track sizing.
//! 2. **Resolved pass.** Rewrite this container's track declarations with
//!    the sizes just computed, give every grid child without an authored size
//!    the size of the tracks it spans, lay those children out again, and run
//!    the container once more.
//!
//! There is no third pass. This is a fixed two-step relaxation, not a search
//! for a fixpoint: deeply nested grids whose sizes would still move after the
//! second pass keep the second pass's answer.
//!
//! Once the root's passes are done, rectangles are normalized to root
//! coordinates.

use strum_macros::Display;
use trellis_common::warning::warn_once;

use crate::error::{GridError, LayoutError, NodePath, NodeRef};
use crate::grid::GridInstance;
use crate::normalize::normalize_positions;
use crate::sizing::TrackSizer;
use crate::tree::{BoxNode, LayoutRect, Size};
use crate::values::{Axis, Dimension};

/// Lay out a box tree in place and return it.
///
/// The given node becomes the root (`is_root` is set). On success every
/// grid container and every child of a grid container carries a
/// root-absolute `layout`, and grid containers carry resolved track
/// declarations.
///
/// A root that is not a grid container is laid out as a leaf with its
/// declared size; its descendants are not visited.
///
/// The authored track declarations and sizes are captured into
/// `original_style` the first time a node is seen and are never refreshed.
/// Every later run starts from that snapshot, so a host that edits
/// `grid_template_*`, `width` or `height` on an already laid-out tree must
/// reset `original_style` to `None` on the edited node first, or the edit is
/// discarded.
///
/// # Errors
///
/// Returns the first [`LayoutError`] met anywhere in the tree. Nothing is
/// rolled back and no `layout` is written, so after an error:
///
/// - every node visited so far has `original_style` captured and `is_root`
///   is set on the root;
/// - grid containers that finished their intrinsic pass before the failure
///   (ancestors of the failing node among them) carry rewritten track
///   declarations, and grid children they resized carry a written `width`
///   or `height`;
/// - grid siblings laid out before the failing node have fresh
///   `local_layout` rectangles in their subtrees;
/// - `layout` everywhere, and `local_layout` on the failing node's
///   ancestors, still hold whatever an earlier successful run left there.
pub fn compute_grid_layout(tree: &mut BoxNode) -> Result<&mut BoxNode, LayoutError> {
    tree.is_root = true;
    tree.capture_original_style();
    tree.restore_authored_tracks();

    let size = if tree.is_grid() {
        Driver::default().layout_grid(tree, &NodePath::root())?
    } else {
        warn_once(
            "Grid",
            "root box is not a grid container; laying it out as a leaf",
        );
        Size {
            width: leaf_length(tree.style.width()),
            height: leaf_length(tree.style.height()),
        }
    };
    tree.local_layout = Some(LayoutRect::new(0.0, 0.0, size.width, size.height));

    normalize_positions(tree);
    Ok(tree)
}

fn leaf_length(dimension: Dimension) -> f32 {
    dimension
        .length()
        .filter(|px| px.is_finite() && *px >= 0.0)
        .unwrap_or(0.0)
}

/// Which of the two passes is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
enum Pass {
    Intrinsic,
    Resolved,
}

/// Per-computation state: a single sizing resolver, reused for every axis
/// of every container.
#[derive(Debug, Default)]
struct Driver {
    sizer: TrackSizer,
}

impl Driver {
    /// Run both passes on a grid container and return its size.
    ///
    /// The container's own size and track declarations must already be what
    /// its parent wants laid out.
    fn layout_grid(&mut self, node: &mut BoxNode, path: &NodePath) -> Result<Size, LayoutError> {
        node.capture_original_style();

        // Intrinsic pass. Children start from their authored style, whatever
        // an earlier run of this container wrote into them.
        let mut intrinsic = Vec::with_capacity(node.children.len());
        for (index, child) in node.children.iter_mut().enumerate() {
            if child.is_grid() {
                child.capture_original_style();
                child.restore_authored_tracks();
                child.restore_authored_size();
                intrinsic.push(Some(self.layout_grid(child, &path.child(index))?));
            } else {
                intrinsic.push(None);
            }
        }
        let first = self.run_pass(node, path, &intrinsic, Pass::Intrinsic)?;

        // Resolved pass.
        let (rows, columns) = first
            .resolved_declarations(&node.style)
            .map_err(|kind| locate(node, path, kind))?;
        if node.style.grid_template_rows.is_some() {
            node.style.grid_template_rows = Some(rows);
        }
        if node.style.grid_template_columns.is_some() {
            node.style.grid_template_columns = Some(columns);
        }
        for (index, child) in node.children.iter_mut().enumerate() {
            if child.is_grid() && fit_to_span(child, &first, index) {
                child.restore_authored_tracks();
                intrinsic[index] = Some(self.layout_grid(child, &path.child(index))?);
            }
        }
        let second = self.run_pass(node, path, &intrinsic, Pass::Resolved)?;

        for (child, rect) in node.children.iter_mut().zip(second.child_rects()) {
            child.local_layout = Some(*rect);
        }
        Ok(second.container().size())
    }

    #[cfg_attr(not(feature = "layout-trace"), allow(unused_variables))]
    fn run_pass(
        &mut self,
        node: &BoxNode,
        path: &NodePath,
        intrinsic: &[Option<Size>],
        pass: Pass,
    ) -> Result<GridInstance, LayoutError> {
        let grid = GridInstance::compute(node, intrinsic, &mut self.sizer)
            .map_err(|kind| locate(node, path, kind))?;

        #[cfg(feature = "layout-trace")]
        eprintln!(
            "[GRID] {path} pass={pass} columns={:?} rows={:?} size={}x{}",
            grid.sized(Axis::Column).sizes(),
            grid.sized(Axis::Row).sizes(),
            grid.container().width,
            grid.container().height,
        );

        Ok(grid)
    }
}

/// Size a grid child's unauthored dimensions to the tracks it spans.
///
/// Returns `true` if either dimension was written.
fn fit_to_span(child: &mut BoxNode, parent: &GridInstance, index: usize) -> bool {
    let mut resized = false;
    if !child.authored_width().is_length()
        && let Some(width) = parent.span_extent(Axis::Column, index)
    {
        child.style.width = Some(Dimension::Length(width));
        resized = true;
    }
    if !child.authored_height().is_length()
        && let Some(height) = parent.span_extent(Axis::Row, index)
    {
        child.style.height = Some(Dimension::Length(height));
        resized = true;
    }
    resized
}

fn locate(node: &BoxNode, path: &NodePath, kind: GridError) -> LayoutError {
    LayoutError {
        node: NodeRef {
            path: path.clone(),
            id: node.id.clone(),
        },
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Style;

    #[test]
    fn test_fit_to_span_respects_authored_sizes() {
        let mut parent = BoxNode::new(Style {
            width: Some(Dimension::Length(300.0)),
            height: Some(Dimension::Length(100.0)),
            ..Style::grid("1fr 2fr", "1fr")
        });
        let mut child = BoxNode::new(Style {
            height: Some(Dimension::Length(30.0)),
            ..Style::item((2, 3), (1, 2))
        });
        child.style.display = Some("grid".to_owned());
        child.capture_original_style();
        parent.children.push(child.clone());

        let grid = GridInstance::compute(&parent, &[None], &mut TrackSizer::new()).unwrap();
        assert!(fit_to_span(&mut child, &grid, 0));
        assert_eq!(child.style.width, Some(Dimension::Length(200.0)));
        assert_eq!(child.style.height, Some(Dimension::Length(30.0)));
    }

    #[test]
    fn test_pass_names() {
        assert_eq!(Pass::Intrinsic.to_string(), "intrinsic");
        assert_eq!(Pass::Resolved.to_string(), "resolved");
    }
}
