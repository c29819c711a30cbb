use facewarp_image::{Image, ImageError};

use crate::parallel::par_iter_rows_two;

/// Composite a foreground over a background with a per-pixel mask.
///
/// Each output value is `background * (1 - mask) + foreground * mask`. The mask
/// is expected in `[0, 1]` and is clamped to that range, so a mask of 0 keeps
/// the background and a mask of 1 takes the foreground.
///
/// # Arguments
///
/// * `background` - The image blended into.
/// * `foreground` - The image blended on top.
/// * `mask` - The per-channel blending weights.
/// * `dst` - The output image.
///
/// # Errors
///
/// If the four images do not share the same size.
///
/// # Example
///
/// ```
/// use facewarp_image::{Image, ImageSize};
/// use facewarp_imgproc::blend::alpha_blend;
///
/// let size = ImageSize { width: 2, height: 1 };
/// let background = Image::<f32, 1>::new(size, vec![0.0, 0.0]).unwrap();
/// let foreground = Image::<f32, 1>::new(size, vec![1.0, 1.0]).unwrap();
/// let mask = Image::<f32, 1>::new(size, vec![0.25, 1.0]).unwrap();
/// let mut dst = Image::<f32, 1>::from_size_val(size, 0.0).unwrap();
///
/// alpha_blend(&background, &foreground, &mask, &mut dst).unwrap();
/// assert_eq!(dst.as_slice(), &[0.25, 1.0]);
/// ```
pub fn alpha_blend<const C: usize>(
    background: &Image<f32, C>,
    foreground: &Image<f32, C>,
    mask: &Image<f32, C>,
    dst: &mut Image<f32, C>,
) -> Result<(), ImageError> {
    for other in [foreground.size(), mask.size(), dst.size()] {
        if other != background.size() {
            return Err(ImageError::InvalidImageSize(
                background.width(),
                background.height(),
                other.width,
                other.height,
            ));
        }
    }

    dst.as_slice_mut().copy_from_slice(background.as_slice());

    par_iter_rows_two(foreground, mask, dst, |fg_pixel, mask_pixel, dst_pixel| {
        dst_pixel
            .iter_mut()
            .zip(fg_pixel.iter().zip(mask_pixel.iter()))
            .for_each(|(bg, (&fg, &alpha))| {
                let alpha = alpha.clamp(0.0, 1.0);
                *bg = *bg * (1.0 - alpha) + fg * alpha;
            });
    });

    Ok(())
}
