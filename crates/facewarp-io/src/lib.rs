#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Overlay configuration files.
///
/// See [`config::OverlayConfig`] for the JSON layout.
pub mod config;

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access, parsing and encoding/decoding failures.
pub mod error;

/// High-level image reading and writing functions.
///
/// Images are decoded with the `image` crate and converted to normalized `f32` buffers.
/// See [`functional::read_overlay_rgba`] to load an overlay with its alpha mask.
pub mod functional;

/// Plain text landmark and triangulation files.
pub mod points;

pub use crate::error::IoError;
