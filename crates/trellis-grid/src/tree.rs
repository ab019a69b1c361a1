//! The box tree consumed and annotated by the layout.
//!
//! The host builds this tree (usually by deserializing JSON) and hands it to
//! [`compute_grid_layout`](crate::compute_grid_layout), which fills in the
//! output fields in place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::values::{Alignment, Dimension, LineRef};

/// A node in the box tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxNode {
    /// Host label, used only in diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Layout properties of this box.
    #[serde(default)]
    pub style: Style,

    /// Child boxes, in document order.
    #[serde(default)]
    pub children: Vec<BoxNode>,

    /// Output rectangle, root-absolute once layout has finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutRect>,

    /// Output rectangle relative to the parent's origin.
    ///
    /// Written by the parent's final pass; [`layout`](Self::layout) is
    /// derived from it during normalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_layout: Option<LayoutRect>,

    /// The author's sizing properties, captured before the first pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_style: Option<OriginalStyle>,

    /// Marks the top of the tree.
    #[serde(default)]
    pub is_root: bool,
}

impl BoxNode {
    /// Create a box with the given style and no children.
    #[must_use]
    pub fn new(style: Style) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// Builder-style helper to set the host label.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder-style helper to append a child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Whether this box is a grid container.
    #[must_use]
    pub fn is_grid(&self) -> bool {
        self.style.is_grid()
    }

    /// Snapshot the author's sizing properties, unless already captured.
    ///
    /// Later passes overwrite `style`; the snapshot is what tells an
    /// authored `width: 100` apart from one written by the driver.
    pub fn capture_original_style(&mut self) {
        if self.original_style.is_none() {
            self.original_style = Some(OriginalStyle::capture(&self.style));
        }
    }

    /// The width the author gave this box, ignoring sizes written by the
    /// driver.
    #[must_use]
    pub fn authored_width(&self) -> Dimension {
        self.original_style
            .as_ref()
            .map_or_else(|| self.style.width(), |o| o.width.unwrap_or_default())
    }

    /// The height the author gave this box, ignoring sizes written by the
    /// driver.
    #[must_use]
    pub fn authored_height(&self) -> Dimension {
        self.original_style
            .as_ref()
            .map_or_else(|| self.style.height(), |o| o.height.unwrap_or_default())
    }

    /// Put the authored track declarations back in place of resolved ones.
    pub fn restore_authored_tracks(&mut self) {
        if let Some(original) = &self.original_style {
            self.style
                .grid_template_rows
                .clone_from(&original.grid_template_rows);
            self.style
                .grid_template_columns
                .clone_from(&original.grid_template_columns);
        }
    }

    /// Put the authored width and height back in place of resolved ones.
    pub fn restore_authored_size(&mut self) {
        if let Some(original) = &self.original_style {
            self.style.width = original.width;
            self.style.height = original.height;
        }
    }
}

/// Layout properties recognized by the grid engine.
///
/// Keys the engine does not understand are preserved in
/// [`extra`](Self::extra) and written back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    /// `grid` or `inline-grid` marks a container this engine lays out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    /// Row track declaration, e.g. `[top] 40px [body] 1fr [bottom]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_template_rows: Option<String>,

    /// Column track declaration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_template_columns: Option<String>,

    /// Line this item starts on, on the row axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_row_start: Option<LineRef>,

    /// Line this item ends on, on the row axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_row_end: Option<LineRef>,

    /// Line this item starts on, on the column axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_column_start: Option<LineRef>,

    /// Line this item ends on, on the column axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_column_end: Option<LineRef>,

    /// Declared width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,

    /// Declared height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,

    /// Default column-axis alignment for this container's items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justify_items: Option<Alignment>,

    /// Default row-axis alignment for this container's items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align_items: Option<Alignment>,

    /// Column-axis alignment override for this item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justify_self: Option<Alignment>,

    /// Row-axis alignment override for this item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align_self: Option<Alignment>,

    /// Properties the grid engine does not interpret.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Style {
    /// A grid container style with the given column and row declarations.
    #[must_use]
    pub fn grid(columns: &str, rows: &str) -> Self {
        Self {
            display: Some("grid".to_owned()),
            grid_template_columns: Some(columns.to_owned()),
            grid_template_rows: Some(rows.to_owned()),
            ..Self::default()
        }
    }

    /// An item style occupying the given column and row lines.
    #[must_use]
    pub fn item(
        column: (impl Into<LineRef>, impl Into<LineRef>),
        row: (impl Into<LineRef>, impl Into<LineRef>),
    ) -> Self {
        Self {
            grid_column_start: Some(column.0.into()),
            grid_column_end: Some(column.1.into()),
            grid_row_start: Some(row.0.into()),
            grid_row_end: Some(row.1.into()),
            ..Self::default()
        }
    }

    /// Whether `display` names a grid container.
    #[must_use]
    pub fn is_grid(&self) -> bool {
        self.display.as_deref().is_some_and(|display| {
            let display = display.trim();
            display.eq_ignore_ascii_case("grid") || display.eq_ignore_ascii_case("inline-grid")
        })
    }

    /// Declared width, `auto` when unset.
    #[must_use]
    pub fn width(&self) -> Dimension {
        self.width.unwrap_or_default()
    }

    /// Declared height, `auto` when unset.
    #[must_use]
    pub fn height(&self) -> Dimension {
        self.height.unwrap_or_default()
    }
}

/// Snapshot of the author's sizing properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalStyle {
    /// Authored row track declaration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_template_rows: Option<String>,
    /// Authored column track declaration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_template_columns: Option<String>,
    /// Authored width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    /// Authored height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
}

impl OriginalStyle {
    fn capture(style: &Style) -> Self {
        Self {
            grid_template_rows: style.grid_template_rows.clone(),
            grid_template_columns: style.grid_template_columns.clone(),
            width: style.width,
            height: style.height,
        }
    }
}

/// A positioned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutRect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Right edge (`x + width`).
    pub x2: f32,
    /// Bottom edge (`y + height`).
    pub y2: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl LayoutRect {
    /// Build a rectangle from its origin and size.
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            x2: x + width,
            y2: y + height,
            width,
            height,
        }
    }

    /// The same rectangle moved by `(dx, dy)`.
    #[must_use]
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
            ..self
        }
    }

    /// Width and height of the rectangle.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_unrecognized_style_keys_round_trip() {
        let node: BoxNode = serde_json::from_value(json!({
            "style": { "display": "grid", "backgroundColor": "teal", "zIndex": 3 },
            "children": []
        }))
        .unwrap();
        assert!(node.is_grid());
        assert_eq!(node.style.extra.get("backgroundColor"), Some(&json!("teal")));

        let back = serde_json::to_value(&node).unwrap();
        assert_eq!(back["style"]["zIndex"], json!(3));
        assert_eq!(back["style"]["display"], json!("grid"));
    }

    #[test]
    fn test_original_style_captured_once() {
        let mut node = BoxNode::new(Style {
            width: Some(Dimension::Length(120.0)),
            ..Style::grid("1fr", "auto")
        });
        node.capture_original_style();
        node.style.width = Some(Dimension::Length(80.0));
        node.style.grid_template_columns = Some("80px".to_owned());
        node.capture_original_style();
        let original = node.original_style.as_ref().unwrap();
        assert_eq!(original.width, Some(Dimension::Length(120.0)));
        assert_eq!(original.grid_template_columns.as_deref(), Some("1fr"));
        assert_eq!(node.authored_width(), Dimension::Length(120.0));
        assert_eq!(node.authored_height(), Dimension::Auto);
    }

    #[test]
    fn test_restore_authored_style() {
        let mut node = BoxNode::new(Style::grid("1fr 2fr", "auto"));
        node.capture_original_style();
        node.style.width = Some(Dimension::Length(90.0));
        node.style.grid_template_columns = Some("30px 60px".to_owned());

        node.restore_authored_tracks();
        assert_eq!(node.style.grid_template_columns.as_deref(), Some("1fr 2fr"));
        assert_eq!(node.style.width, Some(Dimension::Length(90.0)));

        node.restore_authored_size();
        assert_eq!(node.style.width, None);
    }

    #[test]
    fn test_display_recognition() {
        let mut style = Style::default();
        assert!(!style.is_grid());
        style.display = Some("Inline-Grid".to_owned());
        assert!(style.is_grid());
        style.display = Some("flex".to_owned());
        assert!(!style.is_grid());
    }

    #[test]
    fn test_rect_translate_keeps_size() {
        let rect = LayoutRect::new(5.0, 10.0, 20.0, 30.0).translate(100.0, 200.0);
        assert_eq!(rect, LayoutRect::new(105.0, 210.0, 20.0, 30.0));
    }
}
