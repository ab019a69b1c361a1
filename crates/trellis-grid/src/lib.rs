//! Two-pass grid layout for Trellis box trees.
//!
//! # Scope
//!
//! This crate implements:
//! - **Track declarations**
//!   - Fixed (`px`), `auto`, and fractional (`fr`) track sizes
//!   - Bracketed line-name groups, multiple names per line
//!   - Rewriting a declaration with resolved sizes
//!
//! - **Item placement**
//!   - Explicit start and end lines by number or by name
//!   - No auto-placement: every item names its lines
//!
//! - **Track sizing**
//!   - Fixed tracks, content-sized `auto` tracks, proportional `fr` tracks
//!   - A reusable resolver shared by every axis of every container
//!
//! - **Coordinates and alignment**
//!   - `start`, `center`, `end`, `stretch` on both axes, per item or per
//!     container
//!
//! - **Driver**
//!   - Depth-first layout of nested grids in two passes
//!   - Normalization of parent-relative rectangles to root coordinates
//!
//! # Not Implemented
//!
//! - Percentages, `minmax()`, `repeat()`, `span N`, implicit tracks, gaps
//! - Layout of anything that is not a grid container or a grid item
//!
//! # Feature flags
//!
//! - `layout-trace`: print one `[GRID]` line per container pass to stderr.

/// Coordinate assignment and alignment within a track span.
pub mod coords;
/// The two-pass driver and the crate's entry point.
pub mod driver;
/// Error types.
pub mod error;
/// Per-container layout: one pass over one grid.
pub mod grid;
/// Conversion of parent-relative rectangles to root coordinates.
pub mod normalize;
/// Resolution of item line references to line numbers.
pub mod placement;
/// Track sizing.
pub mod sizing;
/// Track declaration parsing and rewriting.
pub mod tracks;
/// The box tree: nodes, styles, and layout rectangles.
pub mod tree;
/// Small style value types.
pub mod values;

// Re-exports for convenience
pub use driver::compute_grid_layout;
pub use error::{GridError, LayoutError, NodePath, NodeRef};
pub use grid::GridInstance;
pub use sizing::{SizedAxis, TrackSizer};
pub use tracks::{LineNames, Track, TrackList, TrackSize};
pub use tree::{BoxNode, LayoutRect, OriginalStyle, Size, Style};
pub use values::{Alignment, Axis, Dimension, LineRef};
