use facewarp_geometry::Point2d;

/// Twice the area under which three points are treated as collinear.
const COLLINEAR_EPS: f64 = 1e-6;

/// Inverts a 2x3 affine transformation matrix.
///
/// Arguments:
///
/// * `m` - The 2x3 affine transformation matrix.
///
/// Returns:
///
/// The inverted 2x3 affine transformation matrix, or `None` if the matrix is singular.
pub fn invert_affine_transform(m: &[f32; 6]) -> Option<[f32; 6]> {
    let (a, b, c, d, e, f) = (m[0], m[1], m[2], m[3], m[4], m[5]);

    let determinant = a * e - b * d;
    if determinant == 0.0 {
        return None;
    }
    let inv_determinant = 1.0 / determinant;

    let new_a = e * inv_determinant;
    let new_b = -b * inv_determinant;
    let new_d = -d * inv_determinant;
    let new_e = a * inv_determinant;
    let new_c = -(new_a * c + new_b * f);
    let new_f = -(new_d * c + new_e * f);

    Some([new_a, new_b, new_c, new_d, new_e, new_f])
}

/// Applies an affine transformation to a point.
pub fn transform_point(x: f32, y: f32, m: &[f32; 6]) -> (f32, f32) {
    let u = m[0] * x + m[1] * y + m[2];
    let v = m[3] * x + m[4] * y + m[5];
    (u, v)
}

/// Computes the affine transform mapping three points onto three other points.
///
/// The 2x3 matrix `m` satisfies `dst[i] = m * [src[i].x, src[i].y, 1]` for the
/// three pairs. The system is solved in double precision.
///
/// # Arguments
///
/// * `src` - The source triangle.
/// * `dst` - The destination triangle.
///
/// # Returns
///
/// The row-major 2x3 matrix, or `None` when the source points are collinear and
/// the transform is not unique.
pub fn get_affine_transform(src: &[Point2d; 3], dst: &[Point2d; 3]) -> Option<[f32; 6]> {
    let [s0, s1, s2] = src.map(|p| [p.x as f64, p.y as f64]);
    let [d0, d1, d2] = dst.map(|p| [p.x as f64, p.y as f64]);

    // source edge vectors as the columns of a 2x2 matrix
    let (a, c) = (s1[0] - s0[0], s1[1] - s0[1]);
    let (b, d) = (s2[0] - s0[0], s2[1] - s0[1]);
    let det = a * d - b * c;
    if det.abs() < COLLINEAR_EPS {
        return None;
    }

    // destination edge vectors
    let (p, r) = (d1[0] - d0[0], d1[1] - d0[1]);
    let (q, s) = (d2[0] - d0[0], d2[1] - d0[1]);

    let m00 = (p * d - q * c) / det;
    let m01 = (q * a - p * b) / det;
    let m10 = (r * d - s * c) / det;
    let m11 = (s * a - r * b) / det;
    let m02 = d0[0] - (m00 * s0[0] + m01 * s0[1]);
    let m12 = d0[1] - (m10 * s0[0] + m11 * s0[1]);

    Some([
        m00 as f32, m01 as f32, m02 as f32, m10 as f32, m11 as f32, m12 as f32,
    ])
}
