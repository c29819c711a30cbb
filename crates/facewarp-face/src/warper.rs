use std::borrow::Cow;

use facewarp_geometry::{PointSet, Triangulation};
use facewarp_image::{Image, ImageSize};
use facewarp_imgproc::{
    interpolation::InterpolationMode,
    parallel::{ExecuteExt, ExecutionStrategy},
    warp::{warp_triangle_patch, TriangleWarp, TriangleWarpOutcome},
};

use crate::{correspondence::Correspondence, error::FaceError};

/// Options of the piecewise-affine warp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarpConfig {
    /// Interpolation used to resample the source.
    pub interpolation: InterpolationMode,
    /// How triangles are distributed over threads. The output does not depend on it.
    pub strategy: ExecutionStrategy,
}

/// Per triangle outcome counts of a warp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarpStats {
    /// Triangles resampled into the destination.
    pub warped: usize,
    /// Triangles skipped because they are flat in the source or the target.
    pub degenerate: usize,
    /// Triangles skipped because they miss the source or the destination image.
    pub out_of_bounds: usize,
    /// Destination pixels written, once per triangle covering them.
    pub pixels: usize,
}

impl WarpStats {
    /// Total number of triangles visited.
    pub fn total(&self) -> usize {
        self.warped + self.degenerate + self.out_of_bounds
    }

    fn record(&mut self, outcome: TriangleWarpOutcome) {
        match outcome {
            TriangleWarpOutcome::Warped => self.warped += 1,
            TriangleWarpOutcome::Degenerate => self.degenerate += 1,
            TriangleWarpOutcome::OutOfBounds => self.out_of_bounds += 1,
        }
    }
}

/// The result of warping an image through a correspondence.
#[derive(Debug, Clone)]
pub struct WarpOutput<const C: usize> {
    /// The warped image, zero outside every warped triangle.
    pub image: Image<f32, C>,
    /// The warped mask, if a mask was given.
    pub mask: Option<Image<f32, C>>,
    /// What happened to each triangle.
    pub stats: WarpStats,
}

/// Warps images triangle by triangle from source landmarks to target landmarks.
///
/// The triangulation is computed on the source points unless one was given with
/// [`FaceWarper::with_triangulation`], and the same index triples are used to
/// form the target triangles.
///
/// # Example
///
/// ```
/// use facewarp_face::{Correspondence, FaceWarper, WarpConfig};
/// use facewarp_geometry::{Point2d, PointSet};
/// use facewarp_image::{Image, ImageSize};
///
/// let source = PointSet::new(vec![
///     Point2d::new(0.0, 0.0),
///     Point2d::new(10.0, 0.0),
///     Point2d::new(0.0, 10.0),
///     Point2d::new(10.0, 10.0),
/// ]);
/// let target = source.iter().map(|p| Point2d::new(p.x * 2.0, p.y * 2.0)).collect();
/// let correspondence = Correspondence::new(source, target).unwrap();
///
/// let src = Image::<f32, 3>::from_size_val(ImageSize { width: 11, height: 11 }, 0.5).unwrap();
/// let dst_size = ImageSize { width: 21, height: 21 };
///
/// let warper = FaceWarper::new(WarpConfig::default());
/// let output = warper.warp(&src, None, &correspondence, dst_size).unwrap();
///
/// assert_eq!(output.stats.warped, 2);
/// assert!(output.image.as_slice().iter().all(|&v| (v - 0.5).abs() < 1e-5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FaceWarper {
    config: WarpConfig,
    triangulation: Option<Triangulation>,
}

impl FaceWarper {
    /// Create a warper computing the triangulation on every call.
    pub fn new(config: WarpConfig) -> Self {
        Self {
            config,
            triangulation: None,
        }
    }

    /// Use a precomputed triangulation instead of triangulating the source points.
    pub fn with_triangulation(mut self, triangulation: Triangulation) -> Self {
        self.triangulation = Some(triangulation);
        self
    }

    /// The warp options.
    pub fn config(&self) -> &WarpConfig {
        &self.config
    }

    /// The triangulation used for a source point set.
    ///
    /// # Errors
    ///
    /// If a precomputed triangulation does not fit the point set, or the point
    /// set cannot be triangulated.
    pub fn triangulation_for<'a>(
        &'a self,
        source: &PointSet,
    ) -> Result<Cow<'a, Triangulation>, FaceError> {
        match &self.triangulation {
            Some(triangulation) => {
                triangulation.validate(source.len())?;
                Ok(Cow::Borrowed(triangulation))
            }
            None => Ok(Cow::Owned(Triangulation::delaunay(source)?)),
        }
    }

    /// Warp an image, and optionally a mask registered to it, into the target geometry.
    ///
    /// # Arguments
    ///
    /// * `src` - The source image.
    /// * `mask` - An optional mask with the size of `src`, warped through the same triangles.
    /// * `correspondence` - The source and target landmarks.
    /// * `dst_size` - The size of the output images.
    ///
    /// # Returns
    ///
    /// The warped image and mask, both zero outside every warped triangle.
    ///
    /// # Errors
    ///
    /// If the mask size differs from the source size or the triangulation does
    /// not fit the landmarks. Flat or out of bounds triangles are not errors,
    /// they are skipped and counted in [`WarpStats`].
    pub fn warp<const C: usize>(
        &self,
        src: &Image<f32, C>,
        mask: Option<&Image<f32, C>>,
        correspondence: &Correspondence,
        dst_size: ImageSize,
    ) -> Result<WarpOutput<C>, FaceError> {
        if let Some(mask) = mask {
            if mask.size() != src.size() {
                return Err(FaceError::MaskSizeMismatch {
                    image: src.size(),
                    mask: mask.size(),
                });
            }
        }

        let (source, target) = (correspondence.source(), correspondence.target());
        let triangulation = self.triangulation_for(source)?;

        log::debug!(
            "warping {} triangles from {} to {}",
            triangulation.len(),
            src.size(),
            dst_size
        );

        let interpolation = self.config.interpolation;

        // resample every triangle into its own patch
        let patches = triangulation.triangles().map_with(self.config.strategy, |t| {
            let src_tri = source.triangle(t)?;
            let dst_tri = target.triangle(t)?;

            let image_patch =
                warp_triangle_patch(src, &src_tri, dst_size, &dst_tri, interpolation)?;
            let mask_patch = match mask {
                Some(mask) => Some(warp_triangle_patch(
                    mask,
                    &src_tri,
                    dst_size,
                    &dst_tri,
                    interpolation,
                )?),
                None => None,
            };

            Ok::<_, FaceError>((image_patch, mask_patch))
        })?;

        let mut image = Image::<f32, C>::from_size_val(dst_size, 0.0)?;
        let mut warped_mask = match mask {
            Some(_) => Some(Image::<f32, C>::from_size_val(dst_size, 0.0)?),
            None => None,
        };
        let mut stats = WarpStats::default();

        // paste in triangulation order, later triangles win on shared edges
        for (t, warped) in triangulation.iter().zip(patches) {
            let (image_patch, mask_patch) = warped?;

            let outcome = image_patch.outcome();
            stats.record(outcome);
            if outcome != TriangleWarpOutcome::Warped {
                log::debug!("triangle {t:?} skipped: {outcome:?}");
            }

            if let TriangleWarp::Patch(patch) = image_patch {
                stats.pixels += patch.num_pixels();
                patch.paste_into(&mut image)?;
            }
            if let (Some(TriangleWarp::Patch(patch)), Some(dst)) = (mask_patch, warped_mask.as_mut())
            {
                patch.paste_into(dst)?;
            }
        }

        log::info!(
            "warped {} of {} triangles into {} pixels ({} degenerate, {} out of bounds)",
            stats.warped,
            stats.total(),
            stats.pixels,
            stats.degenerate,
            stats.out_of_bounds
        );

        Ok(WarpOutput {
            image,
            mask: warped_mask,
            stats,
        })
    }
}
