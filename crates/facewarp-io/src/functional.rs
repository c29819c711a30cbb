use std::path::Path;

use facewarp_image::{
    ops::{broadcast_channel, quantize_u8, split_alpha},
    Image, ImageSize,
};

use crate::error::IoError;

/// A color overlay with its alpha mask.
#[derive(Debug, Clone)]
pub struct OverlayImage {
    /// The color channels, normalized to `[0, 1]`.
    pub color: Image<f32, 3>,
    /// The alpha channel broadcast to three channels, normalized to `[0, 1]`.
    pub alpha: Image<f32, 3>,
}

fn decode_image_any(file_path: &Path) -> Result<image::DynamicImage, IoError> {
    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    log::debug!(
        "decoded {} as {}x{} {:?}",
        file_path.display(),
        img.width(),
        img.height(),
        img.color()
    );

    Ok(img)
}

fn size_of(img: &image::DynamicImage) -> ImageSize {
    ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    }
}

/// Reads an RGB image from the given file path.
///
/// The method tries to read from any image format supported by the image crate.
/// Grayscale images are expanded to three channels and any alpha channel is dropped.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An RGB image with 8-bit channels.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let img = decode_image_any(file_path.as_ref())?;
    let size = size_of(&img);
    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}

/// Reads an RGB image and normalizes it to `[0, 1]`.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
pub fn read_image_rgb_f32(file_path: impl AsRef<Path>) -> Result<Image<f32, 3>, IoError> {
    let image = read_image_any_rgb8(file_path)?;
    Ok(image.cast_and_scale(1.0 / 255.0)?)
}

/// Reads an overlay image together with its alpha mask.
///
/// Images without an alpha channel get a fully opaque mask. Any format with
/// color or luma channels is accepted.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file, usually a PNG with transparency.
///
/// # Returns
///
/// The normalized color channels and the alpha mask broadcast to three channels.
pub fn read_overlay_rgba(file_path: impl AsRef<Path>) -> Result<OverlayImage, IoError> {
    let img = decode_image_any(file_path.as_ref())?;
    let size = size_of(&img);

    let has_alpha = img.color().has_alpha();
    let rgba = Image::<u8, 4>::new(size, img.into_rgba8().into_raw())?;
    let (color, alpha) = split_alpha(&rgba)?;

    if !has_alpha {
        log::warn!("overlay has no alpha channel, using an opaque mask");
    }

    Ok(OverlayImage {
        color: color.cast_and_scale(1.0 / 255.0)?,
        alpha: broadcast_channel(&alpha.cast_and_scale(1.0 / 255.0)?)?,
    })
}

/// Writes a normalized RGB image to the given file path.
///
/// Values are scaled by 255, rounded and saturated to 8 bits. The format is
/// picked from the file extension.
///
/// # Arguments
///
/// * `file_path` - The path to the output file, with a `png`, `jpg` or `jpeg` extension.
/// * `image` - The image with values in `[0, 1]`.
pub fn write_image_rgb_f32(
    file_path: impl AsRef<Path>,
    image: &Image<f32, 3>,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    let is_supported = file_path
        .extension()
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| ext == "png" || ext == "jpg" || ext == "jpeg");
    if !is_supported {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let quantized = quantize_u8(image)?;
    let size = quantized.size();
    let len = quantized.as_slice().len();
    let buffer = image::RgbImage::from_raw(
        size.width as u32,
        size.height as u32,
        quantized.into_vec(),
    )
    .ok_or(IoError::ImageCreationError(
        facewarp_image::ImageError::InvalidChannelShape(len, size.area() * 3),
    ))?;

    buffer.save(file_path)?;

    log::debug!("wrote {} ({})", file_path.display(), size);

    Ok(())
}
