use facewarp_geometry::{point::signed_area2, Point2d, Rect};
use facewarp_image::{Image, ImageError, ImageSize};

use super::affine::{get_affine_transform, invert_affine_transform, transform_point};
use crate::draw::fill_triangle;
use crate::interpolation::{interpolate_pixel, InterpolationMode};

/// Twice the area under which a triangle is treated as flat.
const DEGENERATE_AREA_EPS: f32 = 1e-6;

/// What happened to a triangle handed to the warp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleWarpOutcome {
    /// The triangle was resampled into the destination.
    Warped,
    /// One of the triangles is flat, the affine transform is undefined.
    Degenerate,
    /// One of the triangles does not overlap its image.
    OutOfBounds,
}

/// The resampled content of one destination triangle.
///
/// The patch covers the bounding rectangle of the destination triangle clipped
/// to the destination image. Only pixels inside the triangle mask are pasted.
#[derive(Debug, Clone)]
pub struct TrianglePatch<const C: usize> {
    rect: Rect,
    mask: Image<u8, 1>,
    pixels: Image<f32, C>,
}

impl<const C: usize> TrianglePatch<C> {
    /// The destination region covered by the patch.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The binary triangle mask, 1 inside the triangle and 0 elsewhere.
    pub fn mask(&self) -> &Image<u8, 1> {
        &self.mask
    }

    /// The resampled pixels; values outside the mask are zero.
    pub fn pixels(&self) -> &Image<f32, C> {
        &self.pixels
    }

    /// Number of pixels inside the triangle mask.
    pub fn num_pixels(&self) -> usize {
        self.mask.as_slice().iter().filter(|&&m| m != 0).count()
    }

    /// Copy the masked pixels of the patch into `dst`.
    ///
    /// Pixels outside of the mask are left untouched.
    ///
    /// # Errors
    ///
    /// If the patch does not fit inside `dst`.
    pub fn paste_into(&self, dst: &mut Image<f32, C>) -> Result<(), ImageError> {
        if self.rect.right() as usize > dst.cols() || self.rect.bottom() as usize > dst.rows() {
            return Err(ImageError::InvalidImageSize(
                self.rect.right() as usize,
                self.rect.bottom() as usize,
                dst.cols(),
                dst.rows(),
            ));
        }

        let (x0, y0) = (self.rect.x as usize, self.rect.y as usize);
        let width = self.rect.width as usize;
        let dst_cols = dst.cols();
        let dst_data = dst.as_slice_mut();

        self.mask
            .as_slice()
            .chunks_exact(width)
            .zip(self.pixels.as_slice().chunks_exact(width * C))
            .enumerate()
            .for_each(|(row, (mask_row, pixel_row))| {
                let offset = ((y0 + row) * dst_cols + x0) * C;
                let dst_row = &mut dst_data[offset..offset + width * C];
                mask_row
                    .iter()
                    .zip(pixel_row.chunks_exact(C))
                    .zip(dst_row.chunks_exact_mut(C))
                    .filter(|((&m, _), _)| m != 0)
                    .for_each(|((_, src_pixel), dst_pixel)| dst_pixel.copy_from_slice(src_pixel));
            });

        Ok(())
    }
}

/// The result of resampling one triangle.
#[derive(Debug, Clone)]
pub enum TriangleWarp<const C: usize> {
    /// The triangle was resampled.
    Patch(TrianglePatch<C>),
    /// The triangle is flat and was skipped.
    Degenerate,
    /// The triangle does not overlap its image and was skipped.
    OutOfBounds,
}

impl<const C: usize> TriangleWarp<C> {
    /// The outcome without the pixel data.
    pub fn outcome(&self) -> TriangleWarpOutcome {
        match self {
            TriangleWarp::Patch(_) => TriangleWarpOutcome::Warped,
            TriangleWarp::Degenerate => TriangleWarpOutcome::Degenerate,
            TriangleWarp::OutOfBounds => TriangleWarpOutcome::OutOfBounds,
        }
    }
}

/// Resamples a source triangle into the footprint of a destination triangle.
///
/// The destination is not touched: the result is a patch that can be pasted
/// later with [`TrianglePatch::paste_into`]. This lets many triangles be
/// resampled concurrently against the same source.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `src_tri` - The triangle in source image coordinates.
/// * `dst_size` - The size of the destination image.
/// * `dst_tri` - The triangle in destination image coordinates.
/// * `interpolation` - The interpolation mode to use.
pub fn warp_triangle_patch<const C: usize>(
    src: &Image<f32, C>,
    src_tri: &[Point2d; 3],
    dst_size: ImageSize,
    dst_tri: &[Point2d; 3],
    interpolation: InterpolationMode,
) -> Result<TriangleWarp<C>, ImageError> {
    let src_area = signed_area2(&src_tri[0], &src_tri[1], &src_tri[2]);
    let dst_area = signed_area2(&dst_tri[0], &dst_tri[1], &dst_tri[2]);
    if !(src_area.abs() >= DEGENERATE_AREA_EPS && dst_area.abs() >= DEGENERATE_AREA_EPS) {
        return Ok(TriangleWarp::Degenerate);
    }

    // bounding rectangles of both triangles, none when a vertex is off the pixel grid
    let (Some(src_rect), Some(dst_rect)) = (Rect::bounding(src_tri), Rect::bounding(dst_tri))
    else {
        return Ok(TriangleWarp::OutOfBounds);
    };

    // clip reads and writes to the image bounds
    let Some(src_window) = src_rect.clip(src.cols(), src.rows()) else {
        return Ok(TriangleWarp::OutOfBounds);
    };
    let Some(dst_window) = dst_rect.clip(dst_size.width, dst_size.height) else {
        return Ok(TriangleWarp::OutOfBounds);
    };

    // transform between the triangles expressed relative to their rectangles
    let src_origin = src_rect.origin();
    let dst_origin = dst_rect.origin();
    let src_local = src_tri.map(|p| p - src_origin);
    let dst_local = dst_tri.map(|p| p - dst_origin);

    let Some(m_inv) = get_affine_transform(&src_local, &dst_local)
        .as_ref()
        .and_then(invert_affine_transform)
    else {
        return Ok(TriangleWarp::Degenerate);
    };

    // binary mask of the destination triangle in the clipped rectangle
    let window_size = ImageSize {
        width: dst_window.width as usize,
        height: dst_window.height as usize,
    };
    let window_origin = dst_window.origin();
    let mut mask = Image::<u8, 1>::from_size_val(window_size, 0)?;
    fill_triangle(&mut mask, &dst_tri.map(|p| p - window_origin), [1]);

    // offset from the clipped window to the destination rectangle
    let off_x = (dst_window.x - dst_rect.x) as f32;
    let off_y = (dst_window.y - dst_rect.y) as f32;

    let mut pixels = Image::<f32, C>::from_size_val(window_size, 0.0)?;
    pixels
        .as_slice_mut()
        .chunks_exact_mut(C)
        .zip(mask.as_slice().iter())
        .enumerate()
        .filter(|(_, (_, &m))| m != 0)
        .for_each(|(i, (dst_pixel, _))| {
            let x = (i % window_size.width) as f32 + off_x;
            let y = (i / window_size.width) as f32 + off_y;

            // position in the source rectangle, then in the source image
            let (u, v) = transform_point(x, y, &m_inv);
            let value = interpolate_pixel(
                src,
                u + src_origin.x,
                v + src_origin.y,
                &src_window,
                interpolation,
            );
            dst_pixel.copy_from_slice(&value);
        });

    Ok(TriangleWarp::Patch(TrianglePatch {
        rect: dst_window,
        mask,
        pixels,
    }))
}

/// Warps a triangular region of `src` onto a triangular region of `dst`.
///
/// Pixels of `dst` inside the destination triangle are replaced by the
/// resampled source content; every other pixel is left untouched. Flat
/// triangles and triangles that miss either image are skipped without
/// modifying `dst`.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image, modified in place.
/// * `src_tri` - The triangle in source image coordinates.
/// * `dst_tri` - The triangle in destination image coordinates.
/// * `interpolation` - The interpolation mode to use.
///
/// # Example
///
/// ```
/// use facewarp_geometry::Point2d;
/// use facewarp_image::{Image, ImageSize};
/// use facewarp_imgproc::interpolation::InterpolationMode;
/// use facewarp_imgproc::warp::{warp_triangle, TriangleWarpOutcome};
///
/// let src = Image::<f32, 3>::from_size_val(ImageSize { width: 8, height: 8 }, 0.5).unwrap();
/// let mut dst = Image::<f32, 3>::from_size_val(ImageSize { width: 16, height: 16 }, 0.0).unwrap();
///
/// let src_tri = [Point2d::new(0.0, 0.0), Point2d::new(7.0, 0.0), Point2d::new(0.0, 7.0)];
/// let dst_tri = [Point2d::new(0.0, 0.0), Point2d::new(14.0, 0.0), Point2d::new(0.0, 14.0)];
///
/// let outcome = warp_triangle(&src, &mut dst, &src_tri, &dst_tri, InterpolationMode::Bilinear).unwrap();
///
/// assert_eq!(outcome, TriangleWarpOutcome::Warped);
/// assert!((dst.get_pixel(1, 1, 0).unwrap() - 0.5).abs() < 1e-6);
/// assert_eq!(dst.get_pixel(15, 15, 0).unwrap(), &0.0);
/// ```
pub fn warp_triangle<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    src_tri: &[Point2d; 3],
    dst_tri: &[Point2d; 3],
    interpolation: InterpolationMode,
) -> Result<TriangleWarpOutcome, ImageError> {
    let warped = warp_triangle_patch(src, src_tri, dst.size(), dst_tri, interpolation)?;
    if let TriangleWarp::Patch(patch) = &warped {
        patch.paste_into(dst)?;
    }
    Ok(warped.outcome())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tri(points: [(f32, f32); 3]) -> [Point2d; 3] {
        points.map(Point2d::from)
    }

    fn gradient(size: ImageSize) -> Result<Image<f32, 1>, ImageError> {
        let data = (0..size.area())
            .map(|i| {
                let (x, y) = (i % size.width, i / size.width);
                (x as f32 + 2.0 * y as f32) / (size.width + 2 * size.height) as f32
            })
            .collect();
        Image::new(size, data)
    }

    #[test]
    fn warp_identity_preserves_pixels() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 12,
            height: 10,
        };
        let src = gradient(size)?;
        let mut dst = Image::<f32, 1>::from_size_val(size, 0.0)?;

        let t = tri([(1.0, 1.0), (10.0, 2.0), (3.0, 9.0)]);
        let outcome = warp_triangle(&src, &mut dst, &t, &t, InterpolationMode::Bilinear)?;
        assert_eq!(outcome, TriangleWarpOutcome::Warped);

        for y in 0..size.height {
            for x in 0..size.width {
                let p = Point2d::new(x as f32, y as f32);
                let value = *dst.get_pixel(x, y, 0)?;
                if crate::draw::triangle_contains(&t, &p) {
                    assert_relative_eq!(value, *src.get_pixel(x, y, 0)?, epsilon = 1e-4);
                } else {
                    assert_eq!(value, 0.0);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn warp_degenerate_is_skipped() -> Result<(), ImageError> {
        let src = Image::<f32, 3>::from_size_val([10, 10].into(), 1.0)?;
        let mut dst = Image::<f32, 3>::from_size_val([10, 10].into(), 0.0)?;

        let flat = tri([(0.0, 0.0), (4.0, 4.0), (8.0, 8.0)]);
        let good = tri([(0.0, 0.0), (8.0, 0.0), (0.0, 8.0)]);

        let outcome = warp_triangle(&src, &mut dst, &flat, &good, InterpolationMode::Bilinear)?;
        assert_eq!(outcome, TriangleWarpOutcome::Degenerate);
        let outcome = warp_triangle(&src, &mut dst, &good, &flat, InterpolationMode::Bilinear)?;
        assert_eq!(outcome, TriangleWarpOutcome::Degenerate);

        assert!(dst.as_slice().iter().all(|&v| v == 0.0));
        Ok(())
    }

    #[test]
    fn warp_outside_destination_is_skipped() -> Result<(), ImageError> {
        let src = Image::<f32, 1>::from_size_val([10, 10].into(), 1.0)?;
        let mut dst = Image::<f32, 1>::from_size_val([10, 10].into(), 0.0)?;

        let t = tri([(0.0, 0.0), (8.0, 0.0), (0.0, 8.0)]);
        let far = tri([(20.0, 20.0), (28.0, 20.0), (20.0, 28.0)]);

        let outcome = warp_triangle(&src, &mut dst, &t, &far, InterpolationMode::Bilinear)?;
        assert_eq!(outcome, TriangleWarpOutcome::OutOfBounds);
        let outcome = warp_triangle(&src, &mut dst, &far, &t, InterpolationMode::Bilinear)?;
        assert_eq!(outcome, TriangleWarpOutcome::OutOfBounds);

        assert!(dst.as_slice().iter().all(|&v| v == 0.0));
        Ok(())
    }

    #[test]
    fn warp_unrepresentable_vertex_is_out_of_bounds() -> Result<(), ImageError> {
        let src = Image::<f32, 1>::from_size_val([10, 10].into(), 1.0)?;
        let mut dst = Image::<f32, 1>::from_size_val([10, 10].into(), 0.0)?;

        let t = tri([(0.0, 0.0), (8.0, 0.0), (0.0, 8.0)]);
        let huge = tri([(0.0, 0.0), (1e19, 0.0), (0.0, 10.0)]);

        let outcome = warp_triangle(&src, &mut dst, &t, &huge, InterpolationMode::Bilinear)?;
        assert_eq!(outcome, TriangleWarpOutcome::OutOfBounds);
        let outcome = warp_triangle(&src, &mut dst, &huge, &t, InterpolationMode::Nearest)?;
        assert_eq!(outcome, TriangleWarpOutcome::OutOfBounds);

        assert!(dst.as_slice().iter().all(|&v| v == 0.0));
        Ok(())
    }

    #[test]
    fn warp_partially_outside_is_clipped() -> Result<(), ImageError> {
        let src = Image::<f32, 1>::from_size_val([10, 10].into(), 0.75)?;
        let mut dst = Image::<f32, 1>::from_size_val([6, 6].into(), 0.0)?;

        let t = tri([(0.0, 0.0), (9.0, 0.0), (0.0, 9.0)]);
        let outcome = warp_triangle(&src, &mut dst, &t, &t, InterpolationMode::Bilinear)?;
        assert_eq!(outcome, TriangleWarpOutcome::Warped);

        // every pixel of the 6x6 image satisfies x + y <= 9 except the corner ones
        assert_relative_eq!(*dst.get_pixel(0, 0, 0)?, 0.75, epsilon = 1e-6);
        assert_relative_eq!(*dst.get_pixel(4, 5, 0)?, 0.75, epsilon = 1e-6);
        assert_eq!(*dst.get_pixel(5, 5, 0)?, 0.0);
        Ok(())
    }

    #[test]
    fn warp_keeps_pixels_outside_the_triangle() -> Result<(), ImageError> {
        let src = Image::<f32, 1>::from_size_val([10, 10].into(), 1.0)?;
        let mut dst = Image::<f32, 1>::from_size_val([10, 10].into(), 0.25)?;

        let t = tri([(0.0, 0.0), (9.0, 0.0), (0.0, 9.0)]);
        warp_triangle(&src, &mut dst, &t, &t, InterpolationMode::Nearest)?;

        assert_eq!(*dst.get_pixel(2, 2, 0)?, 1.0);
        assert_eq!(*dst.get_pixel(9, 9, 0)?, 0.25);
        Ok(())
    }

    #[test]
    fn warp_replicates_source_border() -> Result<(), ImageError> {
        // bright triangle on a black image: sampling must never bleed black in
        let size = ImageSize {
            width: 20,
            height: 20,
        };
        let mut src = Image::<f32, 1>::from_size_val(size, 0.0)?;
        let src_tri = tri([(5.0, 5.0), (9.0, 5.0), (5.0, 9.0)]);
        fill_triangle(&mut src, &src_tri, [1.0]);
        for y in 5..10 {
            for x in 5..10 {
                src.set_pixel(x, y, 0, 1.0)?;
            }
        }

        let mut dst = Image::<f32, 1>::from_size_val(size, 0.0)?;
        let dst_tri = tri([(0.0, 0.0), (18.0, 0.0), (0.0, 18.0)]);
        let warped = warp_triangle_patch(
            &src,
            &src_tri,
            dst.size(),
            &dst_tri,
            InterpolationMode::Bilinear,
        )?;

        let TriangleWarp::Patch(patch) = warped else {
            panic!("expected a patch");
        };
        assert_eq!(patch.rect(), Rect::new(0, 0, 19, 19));
        assert_eq!(patch.num_pixels(), 190);

        patch.paste_into(&mut dst)?;
        for y in 0..19 {
            for x in 0..(19 - y) {
                assert_relative_eq!(*dst.get_pixel(x, y, 0)?, 1.0, epsilon = 1e-5);
            }
        }
        Ok(())
    }
}
