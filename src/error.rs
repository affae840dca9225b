//! Error types for path operations.

use thiserror::Error;

/// Errors that can occur during path operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path has no control points, so there is nothing to sample.
    #[error("path is empty: add at least one control point before sampling")]
    EmptyPath,

    /// The segment index does not name an existing curve segment.
    #[error(
        "invalid segment {segment}: path with {points} points (looped: {looped}) has {segment_count} segments"
    )]
    InvalidSegment {
        /// Requested segment index.
        segment: usize,
        /// Number of segments the path actually has.
        segment_count: usize,
        /// Number of control points in the path.
        points: usize,
        /// Whether the path is looped.
        looped: bool,
    },

    /// A control point index is out of range for the current path.
    #[error("point index {index} is out of range: path has {count} points")]
    PointIndexOutOfRange {
        /// Requested point index.
        index: usize,
        /// Number of control points in the path.
        count: usize,
    },

    /// Shape generator parameters do not describe a valid shape.
    #[error("invalid shape parameters: {reason}")]
    InvalidShape {
        /// Description of the invalid parameter.
        reason: String,
    },
}

impl PathError {
    /// Create an invalid segment error.
    #[must_use]
    pub fn invalid_segment(segment: usize, segment_count: usize, points: usize, looped: bool) -> Self {
        Self::InvalidSegment {
            segment,
            segment_count,
            points,
            looped,
        }
    }

    /// Create a point index out of range error.
    #[must_use]
    pub fn point_index_out_of_range(index: usize, count: usize) -> Self {
        Self::PointIndexOutOfRange { index, count }
    }

    /// Create an invalid shape error.
    #[must_use]
    pub fn invalid_shape(reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            reason: reason.into(),
        }
    }

    /// Check if this is an empty path error.
    #[must_use]
    pub fn is_empty_path(&self) -> bool {
        matches!(self, Self::EmptyPath)
    }

    /// Check if this is an invalid segment error.
    #[must_use]
    pub fn is_invalid_segment(&self) -> bool {
        matches!(self, Self::InvalidSegment { .. })
    }

    /// Check if this is a point index error.
    #[must_use]
    pub fn is_point_index_out_of_range(&self) -> bool {
        matches!(self, Self::PointIndexOutOfRange { .. })
    }
}
