//! Catmull-Rom paths through oriented control points.
//!
//! A [`Path`] is an ordered list of control points, each carrying a
//! position and a rotation, threaded by a uniform Catmull-Rom spline:
//!
//! - **Mutation**: add, insert, move, reorient, and remove points;
//!   every edit keeps a per-segment arc-length cache current by
//!   recomputing only the segments the edit can affect.
//! - **Sampling**: poses (position, rotation, travel direction) by
//!   control index, by distance along one segment, or by distance
//!   along the whole path, with rigid extrapolation past the ends of
//!   open paths.
//! - **Resolution tuning**: pick how finely segments are subdivided,
//!   by corner-sharpness heuristic, by a turn-angle bound, or by
//!   length convergence ([`Path::optimize`],
//!   [`Path::optimize_by_angle`], [`Path::optimize_by_length`]).
//! - **Generators**: polygons, spirals, arcs, and waves
//!   ([`Path::polygon`], [`Path::spiral`], [`Path::arc`],
//!   [`Path::wave`]).
//!
//! # Example
//!
//! ```
//! use nalgebra::Point3;
//! use spline_path::{Path, Space};
//!
//! let mut path = Path::new();
//! path.add_position(Point3::new(0.0, 0.0, 0.0), Space::Local);
//! path.add_position(Point3::new(1.0, 1.0, 0.0), Space::Local);
//! path.add_position(Point3::new(2.0, 0.0, 0.0), Space::Local);
//! path.add_position(Point3::new(3.0, 1.0, 0.0), Space::Local);
//! path.set_resolution(16);
//!
//! // Sample the pose halfway along the path.
//! let halfway = path
//!     .sample_at_distance(0.5, true, Space::Local)
//!     .unwrap();
//! assert!(halfway.direction.norm() > 0.0);
//! ```
//!
//! # Coordinate Spaces
//!
//! Control points are stored pivot-local. Every accessor takes a
//! [`Space`] choosing whether its inputs and outputs are local or
//! world coordinates; the path's [`Pivot`] converts at the boundary.
//!
//! # Feature Flags
//!
//! - `serde`: serialization for paths and their building blocks. The
//!   cached lengths round-trip too; call [`Path::recalculate`] after
//!   deserializing data from an untrusted source.

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![warn(missing_docs)]
#![allow(
    clippy::many_single_char_names,
    clippy::similar_names,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::too_many_lines,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::suboptimal_flops,
    clippy::while_float,
    clippy::missing_const_for_fn,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args,
    clippy::return_self_not_must_use
)]

mod error;
mod optimize;
mod path;
mod point;
mod query;
mod shapes;
mod spline;
mod topology;
mod transform;

pub use error::PathError;
pub use path::Path;
pub use point::{PathPoint, PathSample};
pub use spline::catmull_rom;
pub use topology::Topology;
pub use transform::{Pivot, Space};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Result type for path operations.
pub type Result<T> = std::result::Result<T, PathError>;
