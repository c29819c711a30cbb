//! Pixel interpolation methods for image transformations.
//!
//! The kernels sample a source image at sub-pixel positions while staying
//! inside a sampling window: taps that fall outside the window replicate the
//! nearest pixel of the window border, so warping a crop never pulls in black
//! pixels from outside of it.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)
//! - **Bilinear**: Smooth linear interpolation between adjacent pixels

mod bilinear;

pub(crate) mod interpolate;
mod nearest;

pub use interpolate::{interpolate_pixel, InterpolationMode};
