//! Coordinate assignment: from sized tracks to item rectangles.

use crate::placement::{ItemSpan, PlacedItem};
use crate::sizing::SizedAxis;
use crate::tree::{BoxNode, LayoutRect, Style};
use crate::values::{Alignment, Dimension};

/// The container's own rectangle, at its local origin.
#[must_use]
pub fn container_rect(rows: &SizedAxis, columns: &SizedAxis) -> LayoutRect {
    LayoutRect::new(0.0, 0.0, columns.extent(), rows.extent())
}

/// Rectangles for every child, relative to the container's origin.
///
/// `items[i]` must be the placement of `children[i]`.
#[must_use]
pub fn assign_coordinates(
    container: &Style,
    children: &[BoxNode],
    items: &[PlacedItem],
    rows: &SizedAxis,
    columns: &SizedAxis,
) -> Vec<LayoutRect> {
    children
        .iter()
        .zip(items)
        .map(|(child, item)| {
            let justify = Alignment::resolve(child.style.justify_self, container.justify_items);
            let align = Alignment::resolve(child.style.align_self, container.align_items);
            let (x, width) = align_in_span(justify, columns, item.column, child.style.width());
            let (y, height) = align_in_span(align, rows, item.row, child.style.height());
            LayoutRect::new(x, y, width, height)
        })
        .collect()
}

/// Position and size of an item along one axis.
fn align_in_span(
    alignment: Alignment,
    axis: &SizedAxis,
    span: ItemSpan,
    declared: Dimension,
) -> (f32, f32) {
    let start = axis.offset(span.start);
    let end = axis.offset(span.end);
    let extent = end - start;
    let size = declared.length().unwrap_or(extent);
    match alignment {
        Alignment::Start => (start, size),
        Alignment::Center => (start + (extent - size) / 2.0, size),
        Alignment::End => (end - size, size),
        Alignment::Stretch => (start, extent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::place_items;
    use crate::sizing::TrackSizer;
    use crate::tracks::TrackList;
    use crate::values::Axis;

    struct Fixture {
        rows: SizedAxis,
        columns: SizedAxis,
        items: Vec<PlacedItem>,
    }

    fn fixture(columns: &str, rows: &str, children: &[BoxNode]) -> Fixture {
        let row_list = TrackList::parse(Some(rows), Axis::Row).unwrap();
        let column_list = TrackList::parse(Some(columns), Axis::Column).unwrap();
        let items = place_items(children, &row_list.names, &column_list.names, &[]).unwrap();
        let mut sizer = TrackSizer::new();
        let rows = sizer
            .clear()
            .tracks(&row_list.tracks)
            .resolve(Axis::Row)
            .unwrap();
        let columns = sizer
            .clear()
            .tracks(&column_list.tracks)
            .resolve(Axis::Column)
            .unwrap();
        Fixture {
            rows,
            columns,
            items,
        }
    }

    fn sized_child(justify: Option<Alignment>, width: f32) -> BoxNode {
        BoxNode::new(Style {
            justify_self: justify,
            width: Some(Dimension::Length(width)),
            height: Some(Dimension::Length(10.0)),
            ..Style::item(("a", "b"), (1, 2))
        })
    }

    fn x_and_width(container: &Style, child: BoxNode) -> (f32, f32) {
        let children = [child];
        let f = fixture("[start] 15px [a] 60px [b] 5px", "40px", &children);
        let rect = assign_coordinates(container, &children, &f.items, &f.rows, &f.columns)[0];
        (rect.x, rect.width)
    }

    #[test]
    fn test_center_alignment() {
        let (x, width) = x_and_width(&Style::default(), sized_child(Some(Alignment::Center), 20.0));
        assert_eq!(x, 15.0 + 20.0);
        assert_eq!(width, 20.0);
    }

    #[test]
    fn test_start_end_stretch() {
        let container = Style::default();
        assert_eq!(x_and_width(&container, sized_child(None, 20.0)), (15.0, 20.0));
        assert_eq!(
            x_and_width(&container, sized_child(Some(Alignment::End), 20.0)),
            (55.0, 20.0)
        );
        assert_eq!(
            x_and_width(&container, sized_child(Some(Alignment::Stretch), 20.0)),
            (15.0, 60.0)
        );
    }

    #[test]
    fn test_item_override_beats_container_default() {
        let container = Style {
            justify_items: Some(Alignment::End),
            ..Style::default()
        };
        assert_eq!(x_and_width(&container, sized_child(None, 20.0)), (55.0, 20.0));
        assert_eq!(
            x_and_width(&container, sized_child(Some(Alignment::Start), 20.0)),
            (15.0, 20.0)
        );
    }

    #[test]
    fn test_undeclared_size_fills_span() {
        let children = [BoxNode::new(Style::item((1, 3), (2, 3)))];
        let f = fixture("10px 20px", "5px 7px", &children);
        let rects = assign_coordinates(&Style::default(), &children, &f.items, &f.rows, &f.columns);
        assert_eq!(rects[0], LayoutRect::new(0.0, 5.0, 30.0, 7.0));
        assert_eq!(container_rect(&f.rows, &f.columns), LayoutRect::new(0.0, 0.0, 30.0, 12.0));
    }

    #[test]
    fn test_oversized_item_centers_with_negative_slack() {
        let (x, width) = x_and_width(&Style::default(), sized_child(Some(Alignment::Center), 100.0));
        assert_eq!(x, -5.0);
        assert_eq!(width, 100.0);
    }
}
