//! Bowyer-Watson incremental Delaunay triangulation.
//!
//! Points are inserted in the order they appear in the input, and every
//! triangle carries the input indices of its vertices, so no coordinate to
//! index matching is needed afterwards.
//!
//! The in-circle test is strict: a point lying exactly on the circumcircle of
//! an existing triangle does not invalidate it. For cocircular configurations
//! this keeps the diagonal created by the earliest inserted points, which makes
//! the output a deterministic function of the input order.

use crate::{error::GeometryError, point::Point2d};

/// Squared distance under which two input points are considered the same point.
const DUPLICATE_EPS2: f64 = 1e-12;

/// Twice the area under which a triangle is considered flat.
const DEGENERATE_EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy)]
struct DelaunayTriangle {
    v: [usize; 3],
}

impl DelaunayTriangle {
    fn edges(&self) -> [(usize, usize); 3] {
        [
            (self.v[0], self.v[1]),
            (self.v[1], self.v[2]),
            (self.v[2], self.v[0]),
        ]
    }

    fn has_edge(&self, a: usize, b: usize) -> bool {
        self.edges()
            .iter()
            .any(|&(e0, e1)| (e0 == a && e1 == b) || (e0 == b && e1 == a))
    }

    /// Whether `p` lies strictly inside the circumcircle.
    fn circumcircle_contains(&self, p: [f64; 2], vertices: &[[f64; 2]]) -> bool {
        let [ax, ay] = vertices[self.v[0]];
        let [bx, by] = vertices[self.v[1]];
        let [cx, cy] = vertices[self.v[2]];
        let [px, py] = p;

        let (adx, ady) = (ax - px, ay - py);
        let (bdx, bdy) = (bx - px, by - py);
        let (cdx, cdy) = (cx - px, cy - py);

        let det = (adx * adx + ady * ady) * (bdx * cdy - cdx * bdy)
            - (bdx * bdx + bdy * bdy) * (adx * cdy - cdx * ady)
            + (cdx * cdx + cdy * cdy) * (adx * bdy - bdx * ady);

        // the sign of the determinant flips with the winding of the triangle
        if orient2d(vertices[self.v[0]], vertices[self.v[1]], vertices[self.v[2]]) > 0.0 {
            det > 0.0
        } else {
            det < 0.0
        }
    }
}

fn orient2d(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// Compute the Delaunay triangulation of a set of points.
///
/// # Arguments
///
/// * `points` - The points to triangulate.
///
/// # Returns
///
/// The triangles as triples of indices into `points`. Collinear inputs yield no
/// triangles. Duplicated points are only referenced through their first
/// occurrence.
///
/// # Errors
///
/// If fewer than 3 points are given or any point has non-finite coordinates.
///
/// # Example
///
/// ```
/// use facewarp_geometry::{delaunay::delaunay_triangulate, Point2d};
///
/// let points = [
///     Point2d::new(0.0, 0.0),
///     Point2d::new(2.0, 0.0),
///     Point2d::new(2.0, 2.0),
///     Point2d::new(0.0, 2.0),
///     Point2d::new(1.0, 1.0),
/// ];
///
/// let triangles = delaunay_triangulate(&points).unwrap();
/// assert_eq!(triangles.len(), 4);
/// ```
pub fn delaunay_triangulate(points: &[Point2d]) -> Result<Vec<[usize; 3]>, GeometryError> {
    let n = points.len();
    if n < 3 {
        return Err(GeometryError::NotEnoughPoints(n));
    }

    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(GeometryError::NonFinitePoint(index));
    }

    let mut vertices: Vec<[f64; 2]> = points
        .iter()
        .map(|p| [p.x as f64, p.y as f64])
        .collect();

    // bounding box of the input
    let (mut min_x, mut max_x) = (f64::MAX, f64::MIN);
    let (mut min_y, mut max_y) = (f64::MAX, f64::MIN);
    for &[x, y] in &vertices {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    let d_max = (max_x - min_x).max(max_y - min_y).max(1e-6);
    let margin = 100.0 * d_max;
    let center_x = (min_x + max_x) / 2.0;
    let center_y = (min_y + max_y) / 2.0;

    // super-triangle enclosing every point, vertices n, n + 1 and n + 2
    vertices.push([center_x - 2.0 * margin, center_y - margin]);
    vertices.push([center_x + 2.0 * margin, center_y - margin]);
    vertices.push([center_x, center_y + 2.0 * margin]);

    let mut triangles = vec![DelaunayTriangle { v: [n, n + 1, n + 2] }];

    for point_idx in 0..n {
        let p = vertices[point_idx];

        let is_duplicate = vertices[..point_idx].iter().any(|q| {
            let (dx, dy) = (q[0] - p[0], q[1] - p[1]);
            dx * dx + dy * dy < DUPLICATE_EPS2
        });
        if is_duplicate {
            log::debug!("skipping duplicated point {point_idx} at ({}, {})", p[0], p[1]);
            continue;
        }

        let bad_triangles = triangles
            .iter()
            .enumerate()
            .filter(|(_, tri)| tri.circumcircle_contains(p, &vertices))
            .map(|(i, _)| i)
            .collect::<Vec<_>>();

        if bad_triangles.is_empty() {
            log::debug!("point {point_idx} is not inside any circumcircle, skipping");
            continue;
        }

        // boundary of the cavity: edges not shared by two bad triangles
        let mut polygon = Vec::new();
        for &tri_idx in &bad_triangles {
            for (e0, e1) in triangles[tri_idx].edges() {
                let shared = bad_triangles
                    .iter()
                    .any(|&other| other != tri_idx && triangles[other].has_edge(e0, e1));
                if !shared {
                    polygon.push((e0, e1));
                }
            }
        }

        // remove from the back so the remaining indices stay valid
        for &tri_idx in bad_triangles.iter().rev() {
            triangles.swap_remove(tri_idx);
        }

        triangles.extend(
            polygon
                .into_iter()
                .map(|(e0, e1)| DelaunayTriangle { v: [e0, e1, point_idx] }),
        );
    }

    let result = triangles
        .into_iter()
        .filter(|tri| tri.v.iter().all(|&v| v < n))
        .filter(|tri| {
            orient2d(vertices[tri.v[0]], vertices[tri.v[1]], vertices[tri.v[2]]).abs()
                > DEGENERATE_EPS
        })
        .map(|tri| tri.v)
        .collect::<Vec<_>>();

    Ok(result)
}
