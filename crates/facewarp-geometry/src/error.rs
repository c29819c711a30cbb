/// Errors that can occur when working with landmark geometry.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum GeometryError {
    /// Not enough points to build a triangle.
    #[error("At least 3 points are required for triangulation, got {0}")]
    NotEnoughPoints(usize),

    /// A point has NaN or infinite coordinates.
    #[error("Point {0} has non-finite coordinates")]
    NonFinitePoint(usize),

    /// An index does not reference a point of the point set.
    #[error("Index {index} is out of range for a point set of {len} points")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The number of points in the point set.
        len: usize,
    },

    /// A triangle references the same point more than once.
    #[error("Triangle {0} does not reference three distinct points")]
    RepeatedTriangleIndex(usize),

    /// Two point sets that must correspond have a different number of points.
    #[error("Point set size mismatch: {0} vs {1}")]
    PointSetSizeMismatch(usize, usize),
}
