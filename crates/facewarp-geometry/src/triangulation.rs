use crate::{
    delaunay::delaunay_triangulate,
    error::GeometryError,
    point::{Point2d, PointSet},
};

/// A triangle given by the coordinates of its vertices, `[x0, y0, x1, y1, x2, y2]`.
pub type CoordinateTriangle = [f32; 6];

/// A set of triangles referencing points of a point set by index.
///
/// A triangulation computed on one point set can be reused on any other point
/// set with the same landmark layout: only the coordinates change, the topology
/// is shared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Triangulation {
    triangles: Vec<[usize; 3]>,
}

impl Triangulation {
    /// Create a triangulation from index triples without validation.
    ///
    /// Use [`Triangulation::validate`] before using triples from untrusted sources.
    pub fn new(triangles: Vec<[usize; 3]>) -> Self {
        Self { triangles }
    }

    /// Compute the Delaunay triangulation of a point set.
    ///
    /// # Example
    ///
    /// ```
    /// use facewarp_geometry::{Point2d, PointSet, Triangulation};
    ///
    /// let points = PointSet::new(vec![
    ///     Point2d::new(0.0, 0.0),
    ///     Point2d::new(10.0, 0.0),
    ///     Point2d::new(0.0, 10.0),
    ///     Point2d::new(10.0, 10.0),
    /// ]);
    ///
    /// let triangulation = Triangulation::delaunay(&points).unwrap();
    /// assert_eq!(triangulation.len(), 2);
    /// ```
    pub fn delaunay(points: &PointSet) -> Result<Self, GeometryError> {
        let triangles = delaunay_triangulate(points.as_slice())?;
        if triangles.is_empty() {
            log::warn!(
                "the {} points are collinear, the triangulation is empty",
                points.len()
            );
        }
        Ok(Self { triangles })
    }

    /// Build a triangulation from triangles given as vertex coordinates.
    ///
    /// Each vertex is matched to the nearest point of `points`; ties resolve to
    /// the point that comes first in the set. A triangle is discarded when any
    /// vertex lies outside the bounding rectangle of the set, when a vertex is
    /// farther than `tolerance` from every point, or when two of its vertices
    /// match the same point.
    ///
    /// # Arguments
    ///
    /// * `points` - The point set the triangles were computed on.
    /// * `triangles` - The triangles as vertex coordinates.
    /// * `tolerance` - The maximum distance between a vertex and its matched point.
    pub fn from_coordinate_triangles(
        points: &PointSet,
        triangles: &[CoordinateTriangle],
        tolerance: f32,
    ) -> Self {
        let Some(rect) = points.bounding_rect() else {
            return Self::default();
        };

        let mut indices = Vec::with_capacity(triangles.len());
        for (i, t) in triangles.iter().enumerate() {
            let vertices = [
                Point2d::new(t[0], t[1]),
                Point2d::new(t[2], t[3]),
                Point2d::new(t[4], t[5]),
            ];

            let inside = vertices.iter().all(|v| {
                v.x >= rect.x as f32
                    && v.x < rect.right() as f32
                    && v.y >= rect.y as f32
                    && v.y < rect.bottom() as f32
            });
            if !inside {
                log::debug!("triangle {i} has a vertex outside the bounding rectangle");
                continue;
            }

            let mut triple = [0usize; 3];
            let mut matched = true;
            for (slot, vertex) in triple.iter_mut().zip(vertices.iter()) {
                match find_nearest_index(points.as_slice(), vertex) {
                    Some((index, distance)) if distance <= tolerance => *slot = index,
                    _ => {
                        matched = false;
                        break;
                    }
                }
            }

            if !matched {
                log::debug!("triangle {i} has a vertex without a matching point");
                continue;
            }

            if triple[0] == triple[1] || triple[1] == triple[2] || triple[2] == triple[0] {
                log::debug!("triangle {i} collapses to {triple:?}");
                continue;
            }

            indices.push(triple);
        }

        Self { triangles: indices }
    }

    /// The index triples, in triangulation order.
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Iterate over the index triples.
    pub fn iter(&self) -> std::slice::Iter<'_, [usize; 3]> {
        self.triangles.iter()
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Whether there are no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Check that the triangulation can index a point set of `num_points` points.
    ///
    /// # Errors
    ///
    /// If any index is out of range or a triangle repeats an index.
    pub fn validate(&self, num_points: usize) -> Result<(), GeometryError> {
        for (i, t) in self.triangles.iter().enumerate() {
            if let Some(&index) = t.iter().find(|&&index| index >= num_points) {
                return Err(GeometryError::IndexOutOfRange {
                    index,
                    len: num_points,
                });
            }
            if t[0] == t[1] || t[1] == t[2] || t[2] == t[0] {
                return Err(GeometryError::RepeatedTriangleIndex(i));
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Triangulation {
    type Item = &'a [usize; 3];
    type IntoIter = std::slice::Iter<'a, [usize; 3]>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}

/// Find the point closest to `query`.
///
/// # Returns
///
/// The index of the closest point and its distance, or `None` for an empty
/// slice. When several points are at the same minimum distance the first one
/// wins.
pub fn find_nearest_index(points: &[Point2d], query: &Point2d) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, p) in points.iter().enumerate() {
        let distance = p.distance(query);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((i, distance)),
        }
    }
    best
}
