//! Index layout of the common 68 point face landmark model.
//!
//! Ranges follow the model's own ordering, with left and right taken from the
//! subject's point of view.

use std::ops::Range;

/// Number of landmarks in the model.
pub const NUM_LANDMARKS: usize = 68;

/// Jaw line, from the right ear to the left ear.
pub const JAW: Range<usize> = 0..17;
/// Right eyebrow.
pub const RIGHT_BROW: Range<usize> = 17..22;
/// Left eyebrow.
pub const LEFT_BROW: Range<usize> = 22..27;
/// Nose bridge, top to bottom.
pub const NOSE_BRIDGE: Range<usize> = 27..31;
/// Lower nose and nostrils.
pub const NOSE_TIP: Range<usize> = 31..36;
/// Right eye contour.
pub const RIGHT_EYE: Range<usize> = 36..42;
/// Left eye contour.
pub const LEFT_EYE: Range<usize> = 42..48;
/// Outer lip contour.
pub const OUTER_LIPS: Range<usize> = 48..60;
/// Inner lip contour.
pub const INNER_LIPS: Range<usize> = 60..68;

/// A named group of landmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceRegion {
    /// See [`JAW`].
    Jaw,
    /// See [`RIGHT_BROW`].
    RightBrow,
    /// See [`LEFT_BROW`].
    LeftBrow,
    /// See [`NOSE_BRIDGE`].
    NoseBridge,
    /// See [`NOSE_TIP`].
    NoseTip,
    /// See [`RIGHT_EYE`].
    RightEye,
    /// See [`LEFT_EYE`].
    LeftEye,
    /// See [`OUTER_LIPS`].
    OuterLips,
    /// See [`INNER_LIPS`].
    InnerLips,
}

impl FaceRegion {
    /// The landmark indices of the region.
    pub fn range(&self) -> Range<usize> {
        match self {
            FaceRegion::Jaw => JAW,
            FaceRegion::RightBrow => RIGHT_BROW,
            FaceRegion::LeftBrow => LEFT_BROW,
            FaceRegion::NoseBridge => NOSE_BRIDGE,
            FaceRegion::NoseTip => NOSE_TIP,
            FaceRegion::RightEye => RIGHT_EYE,
            FaceRegion::LeftEye => LEFT_EYE,
            FaceRegion::OuterLips => OUTER_LIPS,
            FaceRegion::InnerLips => INNER_LIPS,
        }
    }
}

/// Concatenate the indices of several regions, in the order given.
///
/// # Example
///
/// ```
/// use facewarp_face::landmarks::{region_indices, FaceRegion};
///
/// let eyes = region_indices(&[FaceRegion::RightEye, FaceRegion::LeftEye]);
/// assert_eq!(eyes, (36..48).collect::<Vec<_>>());
/// ```
pub fn region_indices(regions: &[FaceRegion]) -> Vec<usize> {
    regions.iter().flat_map(|region| region.range()).collect()
}

/// The twelve eye contour landmarks, right eye first.
pub fn eye_indices() -> Vec<usize> {
    region_indices(&[FaceRegion::RightEye, FaceRegion::LeftEye])
}
