#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Source and target landmark correspondences.
pub mod correspondence;

/// The landmark detector interface.
pub mod detector;

/// Error types for the face module.
pub mod error;

/// Index layout of the 68 point face landmark model.
pub mod landmarks;

/// Piecewise-affine warp of a whole image through a triangulation.
pub mod warper;

pub use crate::correspondence::{select_landmarks, Correspondence};
pub use crate::detector::{LandmarkDetector, PrecomputedLandmarks};
pub use crate::error::FaceError;
pub use crate::warper::{FaceWarper, WarpConfig, WarpOutput, WarpStats};
