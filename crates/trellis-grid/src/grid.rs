//! One grid container, one pass.
//!
//! A [`GridInstance`] runs the whole per-container pipeline (parse, place,
//! size, assign) against a read-only view of the box and records the result.
//! Nothing is written back to the tree here; the driver decides which pass's
//! record to keep.

use crate::coords::{assign_coordinates, container_rect};
use crate::error::GridError;
use crate::placement::{PlacedItem, place_items};
use crate::sizing::{SizedAxis, TrackSizer};
use crate::tracks::{TrackList, rewrite_declaration};
use crate::tree::{BoxNode, LayoutRect, Size, Style};
use crate::values::Axis;

/// The result of laying out one grid container once.
#[derive(Debug, Clone, PartialEq)]
pub struct GridInstance {
    rows: TrackList,
    columns: TrackList,
    items: Vec<PlacedItem>,
    row_sizes: SizedAxis,
    column_sizes: SizedAxis,
    container: LayoutRect,
    children: Vec<LayoutRect>,
}

impl GridInstance {
    /// Lay out `container`'s children.
    ///
    /// `intrinsic[i]` is the measured size of child `i` if it is a grid that
    /// has already been laid out. `sizer` is cleared before each axis.
    ///
    /// # Errors
    ///
    /// Propagates the first [`GridError`] from parsing, placement or sizing.
    pub fn compute(
        container: &BoxNode,
        intrinsic: &[Option<Size>],
        sizer: &mut TrackSizer,
    ) -> Result<Self, GridError> {
        let style = &container.style;
        let rows = TrackList::parse(style.grid_template_rows.as_deref(), Axis::Row)?;
        let columns = TrackList::parse(style.grid_template_columns.as_deref(), Axis::Column)?;
        let items = place_items(&container.children, &rows.names, &columns.names, intrinsic)?;

        let column_sizes = sizer
            .clear()
            .tracks(&columns.tracks)
            .items(items.iter().map(|item| item.column))
            .container(style.width())
            .resolve(Axis::Column)?;
        let row_sizes = sizer
            .clear()
            .tracks(&rows.tracks)
            .items(items.iter().map(|item| item.row))
            .container(style.height())
            .resolve(Axis::Row)?;

        let children =
            assign_coordinates(style, &container.children, &items, &row_sizes, &column_sizes);
        Ok(Self {
            container: container_rect(&row_sizes, &column_sizes),
            rows,
            columns,
            items,
            row_sizes,
            column_sizes,
            children,
        })
    }

    /// The parsed tracks and line names of an axis.
    #[must_use]
    pub const fn tracks(&self, axis: Axis) -> &TrackList {
        match axis {
            Axis::Row => &self.rows,
            Axis::Column => &self.columns,
        }
    }

    /// The resolved sizes of an axis.
    #[must_use]
    pub const fn sized(&self, axis: Axis) -> &SizedAxis {
        match axis {
            Axis::Row => &self.row_sizes,
            Axis::Column => &self.column_sizes,
        }
    }

    /// Placement of each child.
    #[must_use]
    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    /// The container's rectangle at its own origin.
    #[must_use]
    pub const fn container(&self) -> LayoutRect {
        self.container
    }

    /// Each child's rectangle relative to the container.
    #[must_use]
    pub fn child_rects(&self) -> &[LayoutRect] {
        &self.children
    }

    /// Total size of the tracks child `index` spans on `axis`.
    #[must_use]
    pub fn span_extent(&self, axis: Axis, index: usize) -> Option<f32> {
        let span = self.items.get(index)?.span(axis);
        Some(self.sized(axis).span(span.start, span.end))
    }

    /// The container's track declarations with every `auto` and `fr` token
    /// replaced by its resolved size.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::MalformedTrackDeclaration`] if a declaration no
    /// longer parses.
    pub fn resolved_declarations(&self, style: &Style) -> Result<(String, String), GridError> {
        let rows = rewrite_declaration(
            style.grid_template_rows.as_deref().unwrap_or_default(),
            self.row_sizes.sizes(),
            Axis::Row,
        )?;
        let columns = rewrite_declaration(
            style.grid_template_columns.as_deref().unwrap_or_default(),
            self.column_sizes.sizes(),
            Axis::Column,
        )?;
        Ok((rows, columns))
    }
}
