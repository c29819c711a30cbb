use crate::{Image, ImageError};

/// Convert a normalized floating point image into an 8-bit image.
///
/// Values are scaled by 255, rounded and saturated to `[0, 255]`.
pub fn quantize_u8<const C: usize>(src: &Image<f32, C>) -> Result<Image<u8, C>, ImageError> {
    let data = src
        .as_slice()
        .iter()
        .map(|&v| (v * 255.0).round().clamp(0.0, 255.0) as u8)
        .collect();

    Image::new(src.size(), data)
}

/// Replicate a single channel image into every channel of a new image.
///
/// Used to turn an alpha mask into a mask that can be multiplied against a color image.
///
/// # Example
///
/// ```
/// use facewarp_image::{Image, ImageSize};
/// use facewarp_image::ops::broadcast_channel;
///
/// let mask = Image::<f32, 1>::new(ImageSize { width: 2, height: 1 }, vec![0.0, 1.0]).unwrap();
/// let mask3: Image<f32, 3> = broadcast_channel(&mask).unwrap();
///
/// assert_eq!(mask3.as_slice(), &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
/// ```
pub fn broadcast_channel<T: Copy, const C: usize>(
    src: &Image<T, 1>,
) -> Result<Image<T, C>, ImageError> {
    let data = src
        .as_slice()
        .iter()
        .flat_map(|&v| std::iter::repeat(v).take(C))
        .collect();

    Image::new(src.size(), data)
}

/// Split a four channel image into its color channels and its alpha channel.
///
/// # Returns
///
/// A tuple with the three color channels and the alpha channel.
pub fn split_alpha<T: Copy>(src: &Image<T, 4>) -> Result<(Image<T, 3>, Image<T, 1>), ImageError> {
    let num_pixels = src.size().area();
    let mut color = Vec::with_capacity(num_pixels * 3);
    let mut alpha = Vec::with_capacity(num_pixels);

    for pixel in src.as_slice().chunks_exact(4) {
        color.extend_from_slice(&pixel[..3]);
        alpha.push(pixel[3]);
    }

    Ok((Image::new(src.size(), color)?, Image::new(src.size(), alpha)?))
}
