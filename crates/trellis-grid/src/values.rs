//! Style value types shared by the grid algorithms.
//!
//! Values arrive from the host as JSON, so every type here accepts the loose
//! spellings a host is likely to produce (numbers or strings, any case) and
//! normalizes them into closed Rust types before layout starts.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One of the two grid axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    /// The block axis, sized by `grid-template-rows`.
    Row,
    /// The inline axis, sized by `grid-template-columns`.
    Column,
}

/// Alignment of an item inside its grid area along one axis.
///
/// Used by `justify-items` / `align-items` on the container and by
/// `justify-self` / `align-self` on the item.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(try_from = "String", into = "String")]
pub enum Alignment {
    /// Flush with the start edge of the area.
    #[default]
    Start,
    /// Centered within the area.
    Center,
    /// Flush with the end edge of the area.
    End,
    /// Fills the whole area, ignoring the item's declared size.
    Stretch,
}

impl Alignment {
    /// Resolve the alignment for one item on one axis.
    ///
    /// The item's own `*-self` value wins, then the container's `*-items`
    /// default, then [`Alignment::Start`].
    #[must_use]
    pub fn resolve(item: Option<Self>, container: Option<Self>) -> Self {
        item.or(container).unwrap_or_default()
    }
}

impl TryFrom<String> for Alignment {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.trim().parse()
    }
}

impl From<Alignment> for String {
    fn from(value: Alignment) -> Self {
        value.as_ref().to_owned()
    }
}

/// A box dimension: either `auto` or a length in pixels.
///
/// Accepts `40`, `"40"`, `"40px"` and `"auto"` when deserialized. The value
/// is not range-checked here; containers validate their extent when their
/// tracks are sized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDimension", into = "RawDimension")]
pub enum Dimension {
    /// Size determined by the layout.
    #[default]
    Auto,
    /// Size fixed by the author, in pixels.
    Length(f32),
}

impl Dimension {
    /// The length, if this dimension is numeric.
    #[must_use]
    pub const fn length(self) -> Option<f32> {
        match self {
            Self::Length(px) => Some(px),
            Self::Auto => None,
        }
    }

    /// Whether the author fixed this dimension.
    #[must_use]
    pub const fn is_length(self) -> bool {
        matches!(self, Self::Length(_))
    }

    /// Parse the textual form (`auto`, `12`, `12px`).
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("auto") {
            return Some(Self::Auto);
        }
        parse_px(text).map(Self::Length)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Length(px) => write!(f, "{px}px"),
        }
    }
}

/// Wire form of [`Dimension`].
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawDimension {
    Number(f32),
    Text(String),
}

impl TryFrom<RawDimension> for Dimension {
    type Error = String;

    fn try_from(raw: RawDimension) -> Result<Self, Self::Error> {
        match raw {
            RawDimension::Number(px) => Ok(Self::Length(px)),
            RawDimension::Text(text) => {
                Self::parse(&text).ok_or_else(|| format!("expected a length or `auto`, got `{text}`"))
            }
        }
    }
}

impl From<Dimension> for RawDimension {
    fn from(value: Dimension) -> Self {
        match value {
            Dimension::Auto => Self::Text("auto".to_owned()),
            Dimension::Length(px) => Self::Number(px),
        }
    }
}

/// Parse a bare number or a `<number>px` length.
pub(crate) fn parse_px(text: &str) -> Option<f32> {
    let lower = text.to_ascii_lowercase();
    let number = lower.strip_suffix("px").unwrap_or(&lower);
    number.parse().ok()
}

/// A symbolic reference to a grid line: a custom name or a line number.
///
/// Numbers are kept as their decimal text so both forms resolve through the
/// same name map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawLineRef", into = "RawLineRef")]
pub struct LineRef(String);

impl LineRef {
    /// Create a reference from its textual form.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The referenced name, trimmed.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.trim()
    }
}

impl fmt::Display for LineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for LineRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<usize> for LineRef {
    fn from(value: usize) -> Self {
        Self(value.to_string())
    }
}

impl From<i32> for LineRef {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

/// Wire form of [`LineRef`].
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawLineRef {
    Number(i64),
    Text(String),
}

impl From<RawLineRef> for LineRef {
    fn from(raw: RawLineRef) -> Self {
        match raw {
            RawLineRef::Number(n) => Self(n.to_string()),
            RawLineRef::Text(text) => Self(text),
        }
    }
}

impl From<LineRef> for RawLineRef {
    fn from(value: LineRef) -> Self {
        value
            .0
            .parse()
            .map_or(Self::Text(value.0), Self::Number)
    }
}
