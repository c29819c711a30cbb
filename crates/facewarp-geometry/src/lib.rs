#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Incremental Delaunay triangulation.
pub mod delaunay;

/// Error types for the geometry module.
pub mod error;

/// 2d points and landmark point sets.
pub mod point;

/// Integer pixel rectangles.
pub mod rect;

/// Triangulations expressed as point indices.
pub mod triangulation;

pub use crate::error::GeometryError;
pub use crate::point::{Point2d, PointSet};
pub use crate::rect::Rect;
pub use crate::triangulation::Triangulation;
