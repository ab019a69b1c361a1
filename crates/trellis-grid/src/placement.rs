//! Item placement: symbolic line references to line numbers.
//!
//! Every item must name its four lines explicitly. There is no
//! auto-placement, so a missing or unknown reference is an error rather than
//! a cue to find a free cell.

use trellis_common::warning::warn_once;

use crate::error::GridError;
use crate::tracks::LineNames;
use crate::tree::{BoxNode, Size};
use crate::values::{Axis, Dimension, LineRef};

/// An item's extent on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemSpan {
    /// First line the item touches (1-based).
    pub start: usize,
    /// Line the item ends on; never before `start`.
    pub end: usize,
    /// Size the item asks for along this axis, used to size `auto` tracks.
    pub requested: Dimension,
}

impl ItemSpan {
    /// Number of tracks the item covers.
    #[must_use]
    pub const fn track_count(&self) -> usize {
        self.end - self.start
    }
}

/// A child's resolved position, aligned by index with the child list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedItem {
    /// Span on the row axis.
    pub row: ItemSpan,
    /// Span on the column axis.
    pub column: ItemSpan,
}

impl PlacedItem {
    /// The span on `axis`.
    #[must_use]
    pub const fn span(&self, axis: Axis) -> ItemSpan {
        match axis {
            Axis::Row => self.row,
            Axis::Column => self.column,
        }
    }
}

/// Resolve every child's line references.
///
/// `intrinsic` holds the already-computed size of each child that is itself
/// a grid container (`None` for other children). A child without a declared
/// size on an axis requests its intrinsic size there, or `auto`.
///
/// # Errors
///
/// Returns [`GridError::UnresolvedLineReference`] for the first reference
/// that is missing or has no line on its axis.
pub fn place_items(
    children: &[BoxNode],
    rows: &LineNames,
    columns: &LineNames,
    intrinsic: &[Option<Size>],
) -> Result<Vec<PlacedItem>, GridError> {
    children
        .iter()
        .enumerate()
        .map(|(index, child)| {
            let style = &child.style;
            let measured = intrinsic.get(index).copied().flatten();
            let row = resolve_span(
                Axis::Row,
                index,
                rows,
                (style.grid_row_start.as_ref(), style.grid_row_end.as_ref()),
                requested(style.height(), measured.map(|size| size.height)),
            )?;
            let column = resolve_span(
                Axis::Column,
                index,
                columns,
                (
                    style.grid_column_start.as_ref(),
                    style.grid_column_end.as_ref(),
                ),
                requested(style.width(), measured.map(|size| size.width)),
            )?;
            Ok(PlacedItem { row, column })
        })
        .collect()
}

fn requested(declared: Dimension, measured: Option<f32>) -> Dimension {
    match (declared, measured) {
        (Dimension::Auto, Some(px)) => Dimension::Length(px),
        _ => declared,
    }
}

fn resolve_span(
    axis: Axis,
    child: usize,
    names: &LineNames,
    (start, end): (Option<&LineRef>, Option<&LineRef>),
    requested: Dimension,
) -> Result<ItemSpan, GridError> {
    let mut start = resolve_line(axis, child, names, start)?;
    let mut end = resolve_line(axis, child, names, end)?;
    if end < start {
        warn_once(
            "Grid",
            &format!("child {child} ends on {axis} line {end} before it starts on line {start}; swapping"),
        );
        std::mem::swap(&mut start, &mut end);
    }
    Ok(ItemSpan {
        start,
        end,
        requested,
    })
}

fn resolve_line(
    axis: Axis,
    child: usize,
    names: &LineNames,
    reference: Option<&LineRef>,
) -> Result<usize, GridError> {
    let name = reference.map_or("auto", LineRef::name);
    names
        .line(name)
        .ok_or_else(|| GridError::UnresolvedLineReference {
            axis,
            child,
            reference: name.to_owned(),
        })
}
