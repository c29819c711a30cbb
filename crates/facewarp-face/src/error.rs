use facewarp_image::ImageSize;

/// An error type for the face module.
#[derive(thiserror::Error, Debug)]
pub enum FaceError {
    /// Error from the geometry module.
    #[error(transparent)]
    Geometry(#[from] facewarp_geometry::GeometryError),

    /// Error from the image module.
    #[error(transparent)]
    Image(#[from] facewarp_image::ImageError),

    /// Error reading landmarks or images.
    #[error(transparent)]
    Io(#[from] facewarp_io::IoError),

    /// Error running the parallel warp.
    #[error(transparent)]
    Parallel(#[from] facewarp_imgproc::parallel::ParallelError),

    /// Source and target point sets do not have the same number of points.
    #[error("Source has {source_len} points but target has {target_len}")]
    CardinalityMismatch {
        /// Number of source points.
        source_len: usize,
        /// Number of target points.
        target_len: usize,
    },

    /// A selected landmark index is not part of the detected landmarks.
    #[error("Selected landmark {index} is out of range for {len} landmarks")]
    SelectedIndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of detected landmarks.
        len: usize,
    },

    /// The mask does not have the size of the source image.
    #[error("Mask size {mask} does not match the source image size {image}")]
    MaskSizeMismatch {
        /// Size of the source image.
        image: ImageSize,
        /// Size of the mask.
        mask: ImageSize,
    },

    /// The detector found no face in the image.
    #[error("No face detected")]
    NoFaceDetected,
}
