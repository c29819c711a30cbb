#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// mask-guided image compositing.
pub mod blend;

/// utilities to rasterize shapes on images.
pub mod draw;

/// utilities for interpolation.
pub mod interpolation;

/// module containing parallization utilities.
pub mod parallel;

/// image geometric transformations module.
pub mod warp;
