//! Errors raised while laying out a grid.

use std::fmt;

use thiserror::Error;

use crate::values::Axis;

/// A failure inside one grid instance.
///
/// Each kind is detected where the offending value is first used: the track
/// parser, the placement resolver, or the sizing resolver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// A track declaration contains a token that is neither a name group nor
    /// a recognized size.
    #[error("malformed {axis} track declaration: cannot classify `{token}`")]
    MalformedTrackDeclaration {
        /// Axis whose declaration is malformed.
        axis: Axis,
        /// The offending token.
        token: String,
    },

    /// A child refers to a line name the axis does not define.
    #[error("child {child} references unknown {axis} line `{reference}`")]
    UnresolvedLineReference {
        /// Axis of the reference.
        axis: Axis,
        /// Index of the child among its siblings.
        child: usize,
        /// The name that failed to resolve (`auto` when none was given).
        reference: String,
    },

    /// The container's size on an axis is not `auto` and not a finite,
    /// non-negative length.
    #[error("invalid {axis} container extent {value}")]
    InvalidContainerExtent {
        /// Axis of the extent.
        axis: Axis,
        /// The rejected value.
        value: f32,
    },
}

/// Path from the root to a node, as child indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// The path of the root node.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// The path of this node's `index`-th child.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Child indices from the root, outermost first.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("root")?;
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

/// Identity of a node for diagnostics: its path plus the host's label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRef {
    /// Position of the node in the tree.
    pub path: NodePath,
    /// The node's `id`, if the host gave one.
    pub id: Option<String>,
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{} (#{id})", self.path),
            None => write!(f, "{}", self.path),
        }
    }
}

/// A grid failure, located in the tree.
///
/// Returned by [`compute_grid_layout`](crate::compute_grid_layout). No
/// partial layout is produced for the failing node.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("grid layout failed at {node}: {kind}")]
pub struct LayoutError {
    /// The grid container whose pass failed.
    pub node: NodeRef,
    /// What went wrong.
    #[source]
    pub kind: GridError,
}
