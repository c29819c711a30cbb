//! Geometric image transformations driven by triangles.
//!
//! This module provides the building blocks of a piecewise-affine warp:
//!
//! - Affine transform estimation from three point correspondences
//! - Affine transform inversion
//! - Warping of a single triangle from a source image into a destination image
//!
//! # Examples
//!
//! Estimating the transform mapping a triangle onto a scaled copy:
//!
//! ```
//! use facewarp_geometry::Point2d;
//! use facewarp_imgproc::warp::get_affine_transform;
//!
//! let src = [Point2d::new(0.0, 0.0), Point2d::new(1.0, 0.0), Point2d::new(0.0, 1.0)];
//! let dst = [Point2d::new(0.0, 0.0), Point2d::new(2.0, 0.0), Point2d::new(0.0, 2.0)];
//!
//! let m = get_affine_transform(&src, &dst).unwrap();
//! assert_eq!(m, [2.0, 0.0, 0.0, 0.0, 2.0, 0.0]);
//! ```

mod affine;
mod triangle;

pub use affine::{get_affine_transform, invert_affine_transform, transform_point};
pub use triangle::{
    warp_triangle, warp_triangle_patch, TrianglePatch, TriangleWarp, TriangleWarpOutcome,
};
