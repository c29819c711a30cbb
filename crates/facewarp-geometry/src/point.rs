use crate::{error::GeometryError, rect::Rect};

/// A point in image space.
///
/// Coordinates are not required to be integer nor to lie inside an image.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2d {
    /// horizontal coordinate, growing to the right.
    pub x: f32,
    /// vertical coordinate, growing downwards.
    pub y: f32,
}

impl Point2d {
    /// Create a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point2d) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Clamp the point into `[0, width - 1] x [0, height - 1]`.
    pub fn clamp_to(&self, width: usize, height: usize) -> Point2d {
        let max_x = width.saturating_sub(1) as f32;
        let max_y = height.saturating_sub(1) as f32;
        Point2d {
            x: self.x.clamp(0.0, max_x),
            y: self.y.clamp(0.0, max_y),
        }
    }
}

impl From<(f32, f32)> for Point2d {
    fn from((x, y): (f32, f32)) -> Self {
        Point2d { x, y }
    }
}

impl From<[f32; 2]> for Point2d {
    fn from([x, y]: [f32; 2]) -> Self {
        Point2d { x, y }
    }
}

impl std::ops::Sub for Point2d {
    type Output = Point2d;

    fn sub(self, rhs: Point2d) -> Point2d {
        Point2d::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Twice the signed area of the triangle `(a, b, c)`.
///
/// Positive when the vertices turn counter-clockwise in a y-up frame.
pub fn signed_area2(a: &Point2d, b: &Point2d, c: &Point2d) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// An ordered sequence of landmarks.
///
/// The position of a point is its landmark id: index `i` denotes the same
/// anatomical point in every point set built for the same landmark layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet(Vec<Point2d>);

impl PointSet {
    /// Create a point set from a vector of points.
    pub fn new(points: Vec<Point2d>) -> Self {
        Self(points)
    }

    /// Number of points in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no points.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the points in landmark order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point2d> {
        self.0.iter()
    }

    /// The points as a slice.
    pub fn as_slice(&self) -> &[Point2d] {
        &self.0
    }

    /// The integer bounding rectangle of the set, `None` if it is empty or off the pixel grid.
    pub fn bounding_rect(&self) -> Option<Rect> {
        Rect::bounding(&self.0)
    }

    /// Gather the points of a triangle.
    ///
    /// # Errors
    ///
    /// If any of the indices is out of range.
    pub fn triangle(&self, indices: &[usize; 3]) -> Result<[Point2d; 3], GeometryError> {
        let fetch = |index: usize| {
            self.0
                .get(index)
                .copied()
                .ok_or(GeometryError::IndexOutOfRange {
                    index,
                    len: self.len(),
                })
        };
        Ok([fetch(indices[0])?, fetch(indices[1])?, fetch(indices[2])?])
    }

    /// Build a new set with the points at `indices`, in the order given.
    ///
    /// # Errors
    ///
    /// If any of the indices is out of range. No partial set is returned.
    pub fn gather(&self, indices: &[usize]) -> Result<PointSet, GeometryError> {
        indices
            .iter()
            .map(|&index| {
                self.0
                    .get(index)
                    .copied()
                    .ok_or(GeometryError::IndexOutOfRange {
                        index,
                        len: self.len(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(PointSet)
    }

    /// Clamp every point into `[0, width - 1] x [0, height - 1]`.
    pub fn clamp_to(&mut self, width: usize, height: usize) {
        self.0
            .iter_mut()
            .for_each(|p| *p = p.clamp_to(width, height));
    }
}

impl From<Vec<Point2d>> for PointSet {
    fn from(points: Vec<Point2d>) -> Self {
        PointSet(points)
    }
}

impl FromIterator<Point2d> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point2d>>(iter: I) -> Self {
        PointSet(iter.into_iter().collect())
    }
}

impl std::ops::Index<usize> for PointSet {
    type Output = Point2d;

    fn index(&self, index: usize) -> &Point2d {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point2d;
    type IntoIter = std::slice::Iter<'a, Point2d>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
