use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use facewarp_geometry::Rect;
use facewarp_image::Image;

/// Interpolation mode for the warp operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    #[default]
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `window` - The sampling window, non-empty and inside the image.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The interpolated pixel values.
///
/// # Example
///
/// ```
/// use facewarp_geometry::Rect;
/// use facewarp_image::Image;
/// use facewarp_imgproc::interpolation::{interpolate_pixel, InterpolationMode};
///
/// let image = Image::<f32, 1>::new([2, 1].into(), vec![0.0, 1.0]).unwrap();
/// let window = Rect::from_size(2, 1);
///
/// let pixel = interpolate_pixel(&image, 0.25, 0.0, &window, InterpolationMode::Bilinear);
/// assert_eq!(pixel, [0.25]);
/// ```
pub fn interpolate_pixel<const C: usize>(
    image: &Image<f32, C>,
    u: f32,
    v: f32,
    window: &Rect,
    interpolation: InterpolationMode,
) -> [f32; C] {
    match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v, window),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v, window),
    }
}
