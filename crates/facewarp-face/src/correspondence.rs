use facewarp_geometry::{GeometryError, PointSet};
use facewarp_image::ImageSize;

use crate::error::FaceError;

/// Build the target point set matching an overlay from the full set of landmarks.
///
/// The points at `selected` are gathered in order and clamped into the
/// destination image. An empty `selected` takes every landmark.
///
/// # Arguments
///
/// * `full` - Every landmark detected on the target face.
/// * `selected` - The landmark indices matching the overlay points, in overlay order.
/// * `dst_size` - The size of the target image.
///
/// # Errors
///
/// If any selected index is out of range. Nothing is gathered in that case.
///
/// # Example
///
/// ```
/// use facewarp_face::select_landmarks;
/// use facewarp_geometry::{Point2d, PointSet};
/// use facewarp_image::ImageSize;
///
/// let full = PointSet::new(vec![
///     Point2d::new(1.0, 1.0),
///     Point2d::new(-4.0, 3.0),
///     Point2d::new(5.0, 12.0),
/// ]);
/// let size = ImageSize { width: 10, height: 10 };
///
/// let target = select_landmarks(&full, &[2, 1], size).unwrap();
/// assert_eq!(target.as_slice(), &[Point2d::new(5.0, 9.0), Point2d::new(0.0, 3.0)]);
/// ```
pub fn select_landmarks(
    full: &PointSet,
    selected: &[usize],
    dst_size: ImageSize,
) -> Result<PointSet, FaceError> {
    let mut target = if selected.is_empty() {
        full.clone()
    } else {
        full.gather(selected).map_err(|e| match e {
            GeometryError::IndexOutOfRange { index, len } => {
                FaceError::SelectedIndexOutOfRange { index, len }
            }
            other => FaceError::Geometry(other),
        })?
    };

    target.clamp_to(dst_size.width, dst_size.height);

    Ok(target)
}

/// Two point sets with the same landmark layout.
///
/// Index `i` of the source and index `i` of the target denote the same landmark.
#[derive(Debug, Clone, PartialEq)]
pub struct Correspondence {
    source: PointSet,
    target: PointSet,
}

impl Correspondence {
    /// Pair a source and a target point set.
    ///
    /// # Errors
    ///
    /// If the point sets do not have the same number of points.
    pub fn new(source: PointSet, target: PointSet) -> Result<Self, FaceError> {
        if source.len() != target.len() {
            return Err(FaceError::CardinalityMismatch {
                source_len: source.len(),
                target_len: target.len(),
            });
        }
        Ok(Self { source, target })
    }

    /// Pair overlay points with the selected landmarks of a detected face.
    ///
    /// See [`select_landmarks`].
    pub fn from_selection(
        source: PointSet,
        full_target: &PointSet,
        selected: &[usize],
        dst_size: ImageSize,
    ) -> Result<Self, FaceError> {
        let target = select_landmarks(full_target, selected, dst_size)?;
        Self::new(source, target)
    }

    /// The points in source image coordinates.
    pub fn source(&self) -> &PointSet {
        &self.source
    }

    /// The points in target image coordinates.
    pub fn target(&self) -> &PointSet {
        &self.target
    }

    /// Number of corresponding points.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Whether there are no points.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facewarp_geometry::Point2d;

    fn landmarks() -> PointSet {
        (0..68)
            .map(|i| Point2d::new(i as f32 * 2.0, 100.0 - i as f32))
            .collect()
    }

    #[test]
    fn select_all_when_empty() -> Result<(), FaceError> {
        let full = landmarks();
        let size = ImageSize {
            width: 200,
            height: 200,
        };
        assert_eq!(select_landmarks(&full, &[], size)?, full);
        Ok(())
    }

    #[test]
    fn select_eyes_and_clamp() -> Result<(), FaceError> {
        let full = landmarks();
        let size = ImageSize {
            width: 80,
            height: 120,
        };
        let selected = (36..48).collect::<Vec<_>>();
        let target = select_landmarks(&full, &selected, size)?;

        assert_eq!(target.len(), 12);
        assert_eq!(target[0], Point2d::new(72.0, 64.0));
        // 2 * 40 = 80 lies one past the last column
        assert_eq!(target[4], Point2d::new(79.0, 60.0));
        Ok(())
    }

    #[test]
    fn select_out_of_range() {
        let full = landmarks();
        let size = ImageSize {
            width: 10,
            height: 10,
        };
        let res = select_landmarks(&full, &[0, 68], size);
        assert!(matches!(
            res,
            Err(FaceError::SelectedIndexOutOfRange { index: 68, len: 68 })
        ));
    }

    #[test]
    fn correspondence_requires_same_length() -> Result<(), FaceError> {
        let full = landmarks();
        let size = ImageSize {
            width: 200,
            height: 200,
        };
        let source = full.gather(&[1, 2, 3])?;

        let res = Correspondence::from_selection(source.clone(), &full, &[4, 5], size);
        assert!(matches!(
            res,
            Err(FaceError::CardinalityMismatch {
                source_len: 3,
                target_len: 2
            })
        ));

        let c = Correspondence::from_selection(source, &full, &[4, 5, 6], size)?;
        assert_eq!(c.len(), 3);
        assert_eq!(c.target()[0], full[4]);
        Ok(())
    }
}
