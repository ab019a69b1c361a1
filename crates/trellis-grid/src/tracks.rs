//! Track declaration parsing and named lines.
//!
//! A declaration such as `[a] auto [b] 50px [c]` is a sequence of size
//! tokens separated by optional name groups. The i-th size token (0-based)
//! becomes a track between lines `i + 1` and `i + 2`; the name groups sitting
//! at each boundary name that line.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use trellis_common::warning::warn_once;

use crate::error::GridError;
use crate::values::{Axis, parse_px};

/// Sizing function of a single track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackSize {
    /// Sized by the items it contains.
    Auto,
    /// A fixed length in pixels.
    Fixed(f32),
    /// A share of the space left over by fixed and auto tracks.
    Fr(f32),
}

impl TrackSize {
    /// Classify a size token (`auto`, `12`, `12px`, `2fr`).
    ///
    /// Returns `None` for anything else, including negative and non-finite
    /// numbers.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let lower = token.to_ascii_lowercase();
        if lower == "auto" {
            return Some(Self::Auto);
        }
        if let Some(factor) = lower.strip_suffix("fr") {
            return factor
                .parse::<f32>()
                .ok()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(Self::Fr);
        }
        parse_px(&lower)
            .filter(|px| px.is_finite() && *px >= 0.0)
            .map(Self::Fixed)
    }

    /// Whether the resolved size replaces this token when a declaration is
    /// rewritten between passes.
    #[must_use]
    pub const fn is_flexible(self) -> bool {
        matches!(self, Self::Auto | Self::Fr(_))
    }
}

/// A track between two consecutive lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    /// Line the track starts on (1-based).
    pub start_line: usize,
    /// Line the track ends on; always `start_line + 1`.
    pub end_line: usize,
    /// How the track is sized.
    pub size: TrackSize,
}

/// Bidirectional mapping between line names and line numbers on one axis.
///
/// A name maps to exactly one line; a line may carry several names. Numeric
/// names always resolve to their own line, so positional references keep
/// working whatever custom names the author picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineNames {
    name_to_line: BTreeMap<String, usize>,
    line_to_names: BTreeMap<usize, Vec<String>>,
}

impl LineNames {
    /// Resolve a name (or a line number written as text) to its line.
    #[must_use]
    pub fn line(&self, name: &str) -> Option<usize> {
        self.name_to_line.get(name).copied()
    }

    /// Names assigned to a line, in declaration order.
    #[must_use]
    pub fn names(&self, line: usize) -> &[String] {
        self.line_to_names.get(&line).map_or(&[], Vec::as_slice)
    }

    /// Every name with the line it resolves to.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.name_to_line
            .iter()
            .map(|(name, line)| (name.as_str(), *line))
    }

    /// Assign the name set of one boundary.
    ///
    /// The line's name set is replaced, and each custom name is pointed at
    /// this line even if an earlier boundary claimed it. Assignments happen
    /// in track order, so on a conflict the later line wins.
    fn assign(&mut self, axis: Axis, line: usize, names: Vec<String>) {
        for name in &names {
            if is_numeric(name) {
                continue;
            }
            match self.name_to_line.insert(name.clone(), line) {
                Some(previous) if previous != line => warn_once(
                    "Grid",
                    &format!(
                        "{axis} line name `{name}` declared on lines {previous} and {line}; using {line}"
                    ),
                ),
                _ => {}
            }
        }
        let _ = self.line_to_names.insert(line, names);
    }

    /// Make every line number resolve to itself.
    fn pin_numeric(&mut self, line_count: usize) {
        for line in 1..=line_count {
            let _ = self.name_to_line.insert(line.to_string(), line);
        }
    }
}

/// Names written as integers are reserved for positional addressing.
fn is_numeric(name: &str) -> bool {
    name.parse::<i64>().is_ok()
}

/// A parsed track declaration: the tracks of one axis and its line names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackList {
    /// Tracks in order; track `i` spans lines `i + 1` to `i + 2`.
    pub tracks: Vec<Track>,
    /// Line names for this axis.
    pub names: LineNames,
}

impl TrackList {
    /// Parse a track declaration. `None` is treated as an empty declaration.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::MalformedTrackDeclaration`] if a token is neither
    /// a name group nor a size, or a name group is not closed.
    pub fn parse(declaration: Option<&str>, axis: Axis) -> Result<Self, GridError> {
        let tokens = tokenize(declaration.unwrap_or_default(), axis)?;

        // boundaries[k] collects the names written before the k-th size token;
        // the last entry holds the trailing names.
        let mut boundaries: Vec<Vec<&str>> = vec![Vec::new()];
        let mut sizes = Vec::new();
        for token in tokens {
            match token {
                DeclToken::Names(names) => {
                    if let Some(boundary) = boundaries.last_mut() {
                        boundary.extend(names);
                    }
                }
                DeclToken::Size(text) => {
                    let size = TrackSize::parse(text).ok_or_else(|| malformed(axis, text))?;
                    sizes.push(size);
                    boundaries.push(Vec::new());
                }
            }
        }

        let mut names = LineNames::default();
        let mut tracks = Vec::with_capacity(sizes.len());
        for (i, size) in sizes.into_iter().enumerate() {
            let start_line = i + 1;
            let end_line = i + 2;
            names.assign(axis, start_line, boundary_names(&boundaries[i], start_line));
            names.assign(axis, end_line, boundary_names(&boundaries[i + 1], end_line));
            tracks.push(Track {
                start_line,
                end_line,
                size,
            });
        }
        if tracks.is_empty() {
            names.assign(axis, 1, boundary_names(&boundaries[0], 1));
        }
        names.pin_numeric(tracks.len() + 1);

        Ok(Self { tracks, names })
    }

    /// Number of lines (one more than the number of tracks).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.tracks.len() + 1
    }
}

/// The names for one boundary, defaulting to the line number.
fn boundary_names(explicit: &[&str], line: usize) -> Vec<String> {
    if explicit.is_empty() {
        return vec![line.to_string()];
    }
    let mut names: Vec<String> = Vec::with_capacity(explicit.len());
    for name in explicit {
        if !names.iter().any(|existing| existing == name) {
            names.push((*name).to_owned());
        }
    }
    names
}

fn malformed(axis: Axis, token: &str) -> GridError {
    GridError::MalformedTrackDeclaration {
        axis,
        token: token.to_owned(),
    }
}

/// A lexical piece of a track declaration.
#[derive(Debug, PartialEq)]
enum DeclToken<'a> {
    /// `[name1 name2 ...]`
    Names(Vec<&'a str>),
    /// Anything else; classified by the caller.
    Size(&'a str),
}

fn tokenize(declaration: &str, axis: Axis) -> Result<Vec<DeclToken<'_>>, GridError> {
    let mut tokens = Vec::new();
    let mut rest = declaration.trim_start();
    while !rest.is_empty() {
        if let Some(group) = rest.strip_prefix('[') {
            let close = group.find(']').ok_or_else(|| malformed(axis, rest))?;
            let body = &group[..close];
            if body.contains('[') {
                return Err(malformed(axis, &rest[..=close + 1]));
            }
            tokens.push(DeclToken::Names(body.split_whitespace().collect()));
            rest = &group[close + 1..];
        } else {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '[')
                .unwrap_or(rest.len());
            tokens.push(DeclToken::Size(&rest[..end]));
            rest = &rest[end..];
        }
        rest = rest.trim_start();
    }
    Ok(tokens)
}

/// Rewrite a declaration with concrete sizes.
///
/// Every `auto` and `fr` token is replaced by `<size>px` from `sizes`, in
/// order; fixed tokens and name groups are kept. `sizes` holds one entry per
/// track of the declaration.
///
/// # Errors
///
/// Returns [`GridError::MalformedTrackDeclaration`] under the same
/// conditions as [`TrackList::parse`].
pub fn rewrite_declaration(
    declaration: &str,
    sizes: &[f32],
    axis: Axis,
) -> Result<String, GridError> {
    let mut out = String::with_capacity(declaration.len());
    let mut track = 0;
    for token in tokenize(declaration, axis)? {
        if !out.is_empty() {
            out.push(' ');
        }
        match token {
            DeclToken::Names(names) => {
                let _ = write!(out, "[{}]", names.join(" "));
            }
            DeclToken::Size(text) => {
                let size = TrackSize::parse(text).ok_or_else(|| malformed(axis, text))?;
                match sizes.get(track) {
                    Some(resolved) if size.is_flexible() => {
                        let _ = write!(out, "{resolved}px");
                    }
                    _ => out.push_str(text),
                }
                track += 1;
            }
        }
    }
    Ok(out)
}
