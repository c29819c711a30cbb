use std::path::Path;

use facewarp_geometry::PointSet;
use facewarp_image::Image;

use crate::error::FaceError;

/// A face landmark detector.
///
/// Implementors hold whatever model state detection needs. The detector is
/// created once by the caller and passed by reference to every call, there is
/// no global detector.
pub trait LandmarkDetector {
    /// Detect the landmarks of every face in the image.
    ///
    /// # Returns
    ///
    /// One point set per face. Every point set uses the same landmark layout.
    fn detect(&self, image: &Image<f32, 3>) -> Result<Vec<PointSet>, FaceError>;

    /// Detect the landmarks of the first face in the image.
    ///
    /// # Errors
    ///
    /// [`FaceError::NoFaceDetected`] if the image contains no face.
    fn detect_first(&self, image: &Image<f32, 3>) -> Result<PointSet, FaceError> {
        self.detect(image)?
            .into_iter()
            .next()
            .ok_or(FaceError::NoFaceDetected)
    }
}

/// A detector returning landmarks computed ahead of time.
///
/// Useful when landmarks come from an external tool and were stored as
/// landmark files.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedLandmarks {
    faces: Vec<PointSet>,
}

impl PrecomputedLandmarks {
    /// Create the detector from point sets, one per face.
    pub fn new(faces: Vec<PointSet>) -> Self {
        Self { faces }
    }

    /// Load the landmarks of a single face from a landmark file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FaceError> {
        let points = facewarp_io::points::read_points(path)?;
        Ok(Self::new(vec![points]))
    }

    /// Number of faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }
}

impl LandmarkDetector for PrecomputedLandmarks {
    fn detect(&self, image: &Image<f32, 3>) -> Result<Vec<PointSet>, FaceError> {
        for (i, face) in self.faces.iter().enumerate() {
            let outside = face
                .iter()
                .filter(|p| {
                    p.x < 0.0
                        || p.y < 0.0
                        || p.x > (image.cols() as f32 - 1.0)
                        || p.y > (image.rows() as f32 - 1.0)
                })
                .count();
            if outside > 0 {
                log::debug!(
                    "face {i} has {outside} landmarks outside of the {} image",
                    image.size()
                );
            }
        }
        Ok(self.faces.clone())
    }
}
