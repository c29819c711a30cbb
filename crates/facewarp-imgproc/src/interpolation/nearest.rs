use facewarp_geometry::Rect;
use facewarp_image::Image;

/// Kernel for nearest neighbor interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `window` - The sampling window, non-empty and inside the image.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn nearest_neighbor_interpolation<const C: usize>(
    image: &Image<f32, C>,
    u: f32,
    v: f32,
    window: &Rect,
) -> [f32; C] {
    let iu = (u.round() as i64).clamp(window.x, window.right() - 1) as usize;
    let iv = (v.round() as i64).clamp(window.y, window.bottom() - 1) as usize;

    let mut pixel = [0.0; C];
    if let Some(value) = image.pixel(iu, iv) {
        pixel.copy_from_slice(value);
    }

    pixel
}

#[cfg(test)]
mod tests {
    use super::*;
    use facewarp_image::ImageError;

    #[test]
    fn nearest_rounds_and_clamps() -> Result<(), ImageError> {
        let image = Image::<f32, 2>::new([2, 2].into(), vec![0., 1., 2., 3., 4., 5., 6., 7.])?;
        let window = Rect::from_size(2, 2);
        assert_eq!(nearest_neighbor_interpolation(&image, 0.6, 0.4, &window), [2., 3.]);
        assert_eq!(nearest_neighbor_interpolation(&image, 9.0, 9.0, &window), [6., 7.]);
        assert_eq!(nearest_neighbor_interpolation(&image, -2.0, 0.9, &window), [4., 5.]);
        Ok(())
    }
}
