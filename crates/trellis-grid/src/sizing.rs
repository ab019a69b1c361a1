//! Track sizing.
//!
//! Resolves the size of every track on one axis:
//!
//! 1. Fixed tracks → their length.
//! 2. Auto tracks → the largest size requested by an item spanning exactly
//!    that track, zero if there is none. Items spanning several tracks do
//!    not contribute.
//! 3. Fr tracks → a share of `extent - (fixed + auto)` proportional to their
//!    factor, or zero when nothing is left. When the container's extent is
//!    `auto` there is nothing to share, so fr tracks are measured like auto
//!    tracks and the container takes the sum of its tracks.

use crate::error::GridError;
use crate::placement::ItemSpan;
use crate::tracks::{Track, TrackSize};
use crate::values::{Axis, Dimension};

/// Resolved sizes of one axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizedAxis {
    sizes: Vec<f32>,
    offsets: Vec<f32>,
    extent: f32,
}

impl SizedAxis {
    fn new(sizes: Vec<f32>, container: Dimension) -> Self {
        let mut offsets = Vec::with_capacity(sizes.len() + 1);
        let mut position = 0.0_f32;
        offsets.push(position);
        for size in &sizes {
            position += size;
            offsets.push(position);
        }
        let extent = container.length().unwrap_or(position);
        Self {
            sizes,
            offsets,
            extent,
        }
    }

    /// Resolved size of each track, in order.
    #[must_use]
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Offset of a line from the container's start edge.
    ///
    /// `offset(1)` is zero; lines past the last one clamp to the end.
    #[must_use]
    pub fn offset(&self, line: usize) -> f32 {
        let index = line.saturating_sub(1).min(self.offsets.len() - 1);
        self.offsets[index]
    }

    /// Distance between two lines.
    #[must_use]
    pub fn span(&self, start: usize, end: usize) -> f32 {
        self.offset(end) - self.offset(start)
    }

    /// Sum of all track sizes.
    #[must_use]
    pub fn track_total(&self) -> f32 {
        self.offsets.last().copied().unwrap_or_default()
    }

    /// The container's size on this axis: its declared length, else the sum
    /// of its tracks.
    #[must_use]
    pub const fn extent(&self) -> f32 {
        self.extent
    }
}

/// Reusable track sizing resolver.
///
/// Configure with [`tracks`](Self::tracks), [`items`](Self::items) and
/// [`container`](Self::container), then [`resolve`](Self::resolve).
/// [`clear`](Self::clear) drops every input so the same resolver can serve
/// the row axis, then the column axis, then another grid. Resolution reads
/// only the current inputs, so identical inputs give identical sizes.
#[derive(Debug, Clone, Default)]
pub struct TrackSizer {
    tracks: Vec<TrackSize>,
    items: Vec<ItemSpan>,
    container: Dimension,
}

impl TrackSizer {
    /// An empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all inputs, keeping allocated buffers.
    pub fn clear(&mut self) -> &mut Self {
        self.tracks.clear();
        self.items.clear();
        self.container = Dimension::Auto;
        self
    }

    /// Set the tracks to size.
    pub fn tracks(&mut self, tracks: &[Track]) -> &mut Self {
        self.tracks.clear();
        self.tracks.extend(tracks.iter().map(|track| track.size));
        self
    }

    /// Set the items placed on this axis.
    pub fn items(&mut self, items: impl IntoIterator<Item = ItemSpan>) -> &mut Self {
        self.items.clear();
        self.items.extend(items);
        self
    }

    /// Set the container's extent on this axis.
    pub fn container(&mut self, extent: Dimension) -> &mut Self {
        self.container = extent;
        self
    }

    /// Resolve the configured tracks.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidContainerExtent`] if the container extent
    /// is a negative or non-finite length.
    pub fn resolve(&self, axis: Axis) -> Result<SizedAxis, GridError> {
        let available = match self.container {
            Dimension::Length(px) if !px.is_finite() || px < 0.0 => {
                return Err(GridError::InvalidContainerExtent { axis, value: px });
            }
            Dimension::Length(px) => Some(px),
            Dimension::Auto => None,
        };

        // STEP 1: Fixed and auto tracks.
        let mut sizes = vec![0.0_f32; self.tracks.len()];
        let mut used = 0.0_f32;
        let mut max_fr = 0.0_f32;
        for (index, (size, track)) in sizes.iter_mut().zip(&self.tracks).enumerate() {
            match *track {
                TrackSize::Fixed(px) => {
                    *size = px;
                    used += px;
                }
                TrackSize::Auto => {
                    *size = self.content_size(index + 1);
                    used += *size;
                }
                TrackSize::Fr(factor) => max_fr = max_fr.max(factor),
            }
        }

        // Factors are scaled by the largest one so their sum stays finite.
        let total_fr: f32 = self
            .tracks
            .iter()
            .filter_map(|track| match *track {
                TrackSize::Fr(factor) if max_fr > 0.0 => Some(factor / max_fr),
                _ => None,
            })
            .sum();

        // STEP 2: Fr tracks.
        for (index, (size, track)) in sizes.iter_mut().zip(&self.tracks).enumerate() {
            let TrackSize::Fr(factor) = *track else {
                continue;
            };
            *size = match available {
                Some(extent) => {
                    let free = extent - used;
                    if free > 0.0 && total_fr > 0.0 {
                        free * (factor / max_fr / total_fr)
                    } else {
                        0.0
                    }
                }
                None => self.content_size(index + 1),
            };
        }

        Ok(SizedAxis::new(sizes, self.container))
    }

    /// Largest length requested by an item spanning exactly the track that
    /// starts on `line`.
    fn content_size(&self, line: usize) -> f32 {
        self.items
            .iter()
            .filter(|item| item.start == line && item.end == line + 1)
            .filter_map(|item| item.requested.length())
            .filter(|px| px.is_finite())
            .fold(0.0_f32, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracks::TrackList;

    fn tracks(declaration: &str) -> Vec<Track> {
        TrackList::parse(Some(declaration), Axis::Column)
            .unwrap()
            .tracks
    }

    fn item(start: usize, end: usize, px: f32) -> ItemSpan {
        ItemSpan {
            start,
            end,
            requested: Dimension::Length(px),
        }
    }

    #[test]
    fn test_fixed_tracks_with_auto_container() {
        let sized = TrackSizer::new()
            .tracks(&tracks("100px 200px"))
            .resolve(Axis::Column)
            .unwrap();
        assert_eq!(sized.sizes(), [100.0, 200.0]);
        assert_eq!(sized.extent(), 300.0);
        assert_eq!(sized.offset(3), 300.0);
    }

    #[test]
    fn test_fr_tracks_split_extent() {
        let sized = TrackSizer::new()
            .tracks(&tracks("1fr 1fr"))
            .container(Dimension::Length(300.0))
            .resolve(Axis::Column)
            .unwrap();
        assert_eq!(sized.sizes(), [150.0, 150.0]);
    }

    #[test]
    fn test_fr_shares_what_fixed_and_auto_leave() {
        let sized = TrackSizer::new()
            .tracks(&tracks("50px auto 1fr 3fr"))
            .items([item(2, 3, 30.0)])
            .container(Dimension::Length(200.0))
            .resolve(Axis::Column)
            .unwrap();
        assert_eq!(sized.sizes(), [50.0, 30.0, 30.0, 90.0]);
        assert_eq!(sized.extent(), 200.0);
    }

    #[test]
    fn test_huge_fr_factors_stay_finite() {
        let sized = TrackSizer::new()
            .tracks(&tracks("1e37fr 1e37fr"))
            .container(Dimension::Length(300.0))
            .resolve(Axis::Column)
            .unwrap();
        assert_eq!(sized.sizes(), [150.0, 150.0]);

        let max = f32::MAX.to_string();
        let sized = TrackSizer::new()
            .tracks(&tracks(&format!("{max}fr {max}fr 0fr")))
            .container(Dimension::Length(300.0))
            .resolve(Axis::Column)
            .unwrap();
        assert_eq!(sized.sizes(), [150.0, 150.0, 0.0]);
    }

    #[test]
    fn test_zero_fr_factors_get_nothing() {
        let sized = TrackSizer::new()
            .tracks(&tracks("0fr 0fr"))
            .container(Dimension::Length(100.0))
            .resolve(Axis::Column)
            .unwrap();
        assert_eq!(sized.sizes(), [0.0, 0.0]);
    }

    #[test]
    fn test_overfull_container_zeroes_fr() {
        let sized = TrackSizer::new()
            .tracks(&tracks("200px 1fr auto 2fr"))
            .items([item(3, 4, 50.0)])
            .container(Dimension::Length(100.0))
            .resolve(Axis::Column)
            .unwrap();
        assert_eq!(sized.sizes(), [200.0, 0.0, 50.0, 0.0]);
        // Tracks overflow; the declared extent still stands.
        assert_eq!(sized.extent(), 100.0);
        assert_eq!(sized.track_total(), 250.0);
    }

    #[test]
    fn test_auto_track_uses_single_span_items_only() {
        let sized = TrackSizer::new()
            .tracks(&tracks("auto auto"))
            .items([item(1, 2, 40.0), item(1, 2, 25.0), item(1, 3, 500.0)])
            .resolve(Axis::Column)
            .unwrap();
        assert_eq!(sized.sizes(), [40.0, 0.0]);
        assert_eq!(sized.extent(), 40.0);
    }

    #[test]
    fn test_fr_in_auto_container_measures_content() {
        let sized = TrackSizer::new()
            .tracks(&tracks("1fr 2fr"))
            .items([item(2, 3, 12.0)])
            .resolve(Axis::Column)
            .unwrap();
        assert_eq!(sized.sizes(), [0.0, 12.0]);
    }

    #[test]
    fn test_invalid_extents() {
        let mut sizer = TrackSizer::new();
        for bad in [-1.0, f32::NAN, f32::INFINITY] {
            let err = sizer
                .clear()
                .tracks(&tracks("10px"))
                .container(Dimension::Length(bad))
                .resolve(Axis::Row)
                .unwrap_err();
            assert!(matches!(
                err,
                GridError::InvalidContainerExtent {
                    axis: Axis::Row,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_clear_forgets_previous_inputs() {
        let mut sizer = TrackSizer::new();
        let _ = sizer
            .tracks(&tracks("auto 1fr"))
            .items([item(1, 2, 80.0)])
            .container(Dimension::Length(100.0));
        let first = sizer.resolve(Axis::Column).unwrap();

        let other = sizer.clear().tracks(&tracks("auto")).resolve(Axis::Row).unwrap();
        assert_eq!(other.sizes(), [0.0]);

        let again = sizer
            .clear()
            .tracks(&tracks("auto 1fr"))
            .items([item(1, 2, 80.0)])
            .container(Dimension::Length(100.0))
            .resolve(Axis::Column)
            .unwrap();
        assert_eq!(first, again);
        assert_eq!(again.sizes(), [80.0, 20.0]);
    }

    #[test]
    fn test_zero_tracks() {
        let sized = TrackSizer::new().resolve(Axis::Row).unwrap();
        assert!(sized.sizes().is_empty());
        assert_eq!(sized.extent(), 0.0);
        assert_eq!(sized.offset(1), 0.0);
        assert_eq!(sized.span(1, 1), 0.0);
    }
}
