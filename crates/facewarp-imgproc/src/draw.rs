use facewarp_geometry::{
    point::signed_area2, rect::MAX_PIXEL_COORD, GeometryError, Point2d, PointSet, Triangulation,
};
use facewarp_image::Image;

/// Distance, in pixels, a pixel center may lie outside an edge and still be filled.
const EDGE_TOLERANCE: f32 = 1e-3;

/// Whether the point `p` lies inside the triangle or on its boundary.
///
/// The test does not depend on the winding of the triangle. Flat triangles
/// contain no point.
pub fn triangle_contains(tri: &[Point2d; 3], p: &Point2d) -> bool {
    let area = signed_area2(&tri[0], &tri[1], &tri[2]);
    if area == 0.0 {
        return false;
    }
    let sign = area.signum();

    (0..3).all(|i| {
        let (a, b) = (&tri[i], &tri[(i + 1) % 3]);
        let edge_len = a.distance(b);
        sign * signed_area2(a, b, p) >= -EDGE_TOLERANCE * edge_len
    })
}

/// Fills a triangle on an image inplace.
///
/// Pixel `(x, y)` is filled when its center, at integer coordinates, lies inside
/// the triangle or on its boundary. Parts of the triangle outside of the image
/// are ignored.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `tri` - The triangle vertices in image coordinates.
/// * `color` - The fill color of the triangle.
///
/// # Returns
///
/// The number of filled pixels.
pub fn fill_triangle<T: Copy, const C: usize>(
    img: &mut Image<T, C>,
    tri: &[Point2d; 3],
    color: [T; C],
) -> usize {
    let (cols, rows) = (img.cols() as i64, img.rows() as i64);

    let min_x = tri.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
    let max_x = tri.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
    let min_y = tri.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
    let max_y = tri.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);

    // scan only the pixels whose center can hit the triangle
    let x_start = ((min_x - EDGE_TOLERANCE).ceil() as i64).max(0);
    let x_end = ((max_x + EDGE_TOLERANCE).floor() as i64).min(cols - 1);
    let y_start = ((min_y - EDGE_TOLERANCE).ceil() as i64).max(0);
    let y_end = ((max_y + EDGE_TOLERANCE).floor() as i64).min(rows - 1);

    let mut filled = 0;
    for y in y_start..=y_end {
        for x in x_start..=x_end {
            if triangle_contains(tri, &Point2d::new(x as f32, y as f32)) {
                let offset = ((y * cols + x) as usize) * C;
                img.as_slice_mut()[offset..offset + C].copy_from_slice(&color);
                filled += 1;
            }
        }
    }

    filled
}

/// Sets a pixel's color, ignoring pixels outside of the image.
#[inline]
fn set_pixel<T: Copy, const C: usize>(img: &mut Image<T, C>, x: i64, y: i64, color: [T; C]) {
    if x >= 0 && x < img.cols() as i64 && y >= 0 && y < img.rows() as i64 {
        let offset = (y as usize * img.cols() + x as usize) * C;
        img.as_slice_mut()[offset..offset + C].copy_from_slice(&color);
    }
}

/// The pixel holding a point, saturated to the drawable coordinate range.
fn to_pixel(p: &Point2d) -> (i64, i64) {
    let clamp = |v: f32| (v.round() as i64).clamp(-MAX_PIXEL_COORD, MAX_PIXEL_COORD);
    (clamp(p.x), clamp(p.y))
}

type Segment = ((f64, f64), (f64, f64));

/// Liang-Barsky clipping of the segment `p0`-`p1` to the box `[lo, hi]`.
fn clip_segment(p0: (f64, f64), p1: (f64, f64), lo: (f64, f64), hi: (f64, f64)) -> Option<Segment> {
    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);

    for (p, q) in [
        (-dx, p0.0 - lo.0),
        (dx, hi.0 - p0.0),
        (-dy, p0.1 - lo.1),
        (dy, hi.1 - p0.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            t0 = t0.max(q / p);
        } else {
            t1 = t1.min(q / p);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((
        (p0.0 + t0 * dx, p0.1 + t0 * dy),
        (p0.0 + t1 * dx, p0.1 + t1 * dy),
    ))
}

/// Draws a line on an image inplace using Bresenham's line algorithm.
///
/// The segment is first clipped to the image, so far away end points cost
/// nothing.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `p0` - The start point of the line as a tuple of (x, y).
/// * `p1` - The end point of the line as a tuple of (x, y).
/// * `color` - The color of the line.
/// * `thickness` - The thickness of the line, drawn as a square brush.
pub fn draw_line<T: Copy, const C: usize>(
    img: &mut Image<T, C>,
    p0: (i64, i64),
    p1: (i64, i64),
    color: [T; C],
    thickness: usize,
) {
    let half = (thickness / 2) as i64;
    let lo = (-half as f64, -half as f64);
    let hi = (
        (img.cols() as i64 - 1 + half) as f64,
        (img.rows() as i64 - 1 + half) as f64,
    );

    let Some((a, b)) = clip_segment(
        (p0.0 as f64, p0.1 as f64),
        (p1.0 as f64, p1.1 as f64),
        lo,
        hi,
    ) else {
        return;
    };

    let (mut x0, mut y0) = (a.0.round() as i64, a.1.round() as i64);
    let (x1, y1) = (b.0.round() as i64, b.1.round() as i64);

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        for i in -half..=half {
            for j in -half..=half {
                set_pixel(img, x0 + i, y0 + j, color);
            }
        }

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Draws the outline of a closed polygon on an image inplace.
///
/// The last vertex is joined back to the first one.
pub fn draw_polygon<T: Copy, const C: usize>(
    img: &mut Image<T, C>,
    vertices: &[(i64, i64)],
    color: [T; C],
    thickness: usize,
) {
    for (i, &p0) in vertices.iter().enumerate() {
        let p1 = vertices[(i + 1) % vertices.len()];
        draw_line(img, p0, p1, color, thickness);
    }
}

/// Draws a filled disk on an image inplace.
pub fn draw_filled_circle<T: Copy, const C: usize>(
    img: &mut Image<T, C>,
    center: (i64, i64),
    radius: usize,
    color: [T; C],
) {
    let (cx, cy) = center;
    let r = radius as i64;

    let x_start = (cx - r).max(0);
    let x_end = (cx + r).min(img.cols() as i64 - 1);
    let y_start = (cy - r).max(0);
    let y_end = (cy + r).min(img.rows() as i64 - 1);

    for y in y_start..=y_end {
        for x in x_start..=x_end {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r * r {
                set_pixel(img, x, y, color);
            }
        }
    }
}

/// Draws the edges of every triangle of a triangulation.
///
/// # Errors
///
/// If the triangulation references a point missing from `points`.
pub fn draw_triangulation<T: Copy, const C: usize>(
    img: &mut Image<T, C>,
    points: &PointSet,
    triangulation: &Triangulation,
    color: [T; C],
    thickness: usize,
) -> Result<(), GeometryError> {
    for t in triangulation.iter() {
        let tri = points.triangle(t)?;
        draw_polygon(img, &tri.map(|p| to_pixel(&p)), color, thickness);
    }
    Ok(())
}

/// Draws every point as a filled disk.
pub fn draw_points<T: Copy, const C: usize>(
    img: &mut Image<T, C>,
    points: &PointSet,
    radius: usize,
    color: [T; C],
) {
    for p in points.iter() {
        draw_filled_circle(img, to_pixel(p), radius, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facewarp_image::{ImageError, ImageSize};

    #[test]
    fn contains_boundary_and_interior() {
        let tri = [
            Point2d::new(0.0, 0.0),
            Point2d::new(4.0, 0.0),
            Point2d::new(0.0, 4.0),
        ];
        assert!(triangle_contains(&tri, &Point2d::new(1.0, 1.0)));
        assert!(triangle_contains(&tri, &Point2d::new(2.0, 2.0)));
        assert!(triangle_contains(&tri, &Point2d::new(0.0, 0.0)));
        assert!(!triangle_contains(&tri, &Point2d::new(3.0, 3.0)));

        // winding does not matter
        let flipped = [tri[0], tri[2], tri[1]];
        assert!(triangle_contains(&flipped, &Point2d::new(1.0, 1.0)));
    }

    #[test]
    fn contains_nothing_when_flat() {
        let tri = [
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 1.0),
            Point2d::new(2.0, 2.0),
        ];
        assert!(!triangle_contains(&tri, &Point2d::new(1.0, 1.0)));
    }

    #[rustfmt::skip]
    #[test]
    fn test_fill_triangle() -> Result<(), ImageError> {
        let mut img = Image::<u8, 1>::new(
            ImageSize { width: 5, height: 5 }, vec![0u8; 25],
        )?;
        let tri = [
            Point2d::new(0.0, 0.0),
            Point2d::new(3.0, 0.0),
            Point2d::new(0.0, 3.0),
        ];
        let filled = fill_triangle(&mut img, &tri, [1]);
        assert_eq!(filled, 10);
        assert_eq!(
            img.as_slice(),
            &[
                1, 1, 1, 1, 0,
                1, 1, 1, 0, 0,
                1, 1, 0, 0, 0,
                1, 0, 0, 0, 0,
                0, 0, 0, 0, 0,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_fill_triangle_clipped() -> Result<(), ImageError> {
        let mut img = Image::<u8, 3>::from_size_val([3, 3].into(), 0)?;
        let tri = [
            Point2d::new(-10.0, -10.0),
            Point2d::new(10.0, -10.0),
            Point2d::new(-10.0, 10.0),
        ];
        // only the pixels on or above the anti-diagonal x + y = 0 are filled
        let filled = fill_triangle(&mut img, &tri, [0, 255, 0]);
        assert_eq!(filled, 1);
        assert_eq!(img.get_pixel(0, 0, 1)?, &255);
        assert_eq!(img.get_pixel(1, 0, 1)?, &0);
        Ok(())
    }

    #[rustfmt::skip]
    #[test]
    fn test_draw_line() -> Result<(), ImageError> {
        let mut img = Image::new(
            ImageSize { width: 5, height: 5 }, vec![0u8; 25],
        )?;
        draw_line(&mut img, (0, 0), (4, 4), [255], 1);
        assert_eq!(
            img.as_slice(),
            &[
                255,   0,   0,   0,   0,
                  0, 255,   0,   0,   0,
                  0,   0, 255,   0,   0,
                  0,   0,   0, 255,   0,
                  0,   0,   0,   0, 255,
            ]
        );
        Ok(())
    }

    #[rustfmt::skip]
    #[test]
    fn test_draw_line_clipped() -> Result<(), ImageError> {
        let mut img = Image::new(
            ImageSize { width: 5, height: 3 }, vec![0u8; 15],
        )?;
        // a horizontal line running far past both sides of the image
        draw_line(&mut img, (-1 << 40, 1), (1 << 40, 1), [9], 1);
        assert_eq!(
            img.as_slice(),
            &[
                0, 0, 0, 0, 0,
                9, 9, 9, 9, 9,
                0, 0, 0, 0, 0,
            ]
        );

        // entirely outside
        let mut img = Image::<u8, 1>::from_size_val([5, 3].into(), 0)?;
        draw_line(&mut img, (-10, -4), (20, -2), [9], 1);
        assert!(img.as_slice().iter().all(|&v| v == 0));
        Ok(())
    }

    #[rustfmt::skip]
    #[test]
    fn test_draw_polygon() -> Result<(), ImageError> {
        let mut img = Image::new(
            ImageSize { width: 5, height: 5 }, vec![0u8; 25],
        )?;
        draw_polygon(&mut img, &[(1, 1), (3, 1), (3, 3), (1, 3)], [128], 1);
        assert_eq!(
            img.as_slice(),
            &[
                  0,   0,   0,   0,   0,
                  0, 128, 128, 128,   0,
                  0, 128,   0, 128,   0,
                  0, 128, 128, 128,   0,
                  0,   0,   0,   0,   0,
            ]
        );
        Ok(())
    }

    #[rustfmt::skip]
    #[test]
    fn test_draw_filled_circle() -> Result<(), ImageError> {
        let mut img = Image::new(
            ImageSize { width: 4, height: 4 }, vec![0u8; 16],
        )?;
        draw_filled_circle(&mut img, (0, 1), 1, [7]);
        assert_eq!(
            img.as_slice(),
            &[
                7, 0, 0, 0,
                7, 7, 0, 0,
                7, 0, 0, 0,
                0, 0, 0, 0,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_draw_triangulation_and_points() -> Result<(), Box<dyn std::error::Error>> {
        let points = PointSet::new(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(6.0, 0.0),
            Point2d::new(0.0, 6.0),
            Point2d::new(6.0, 6.0),
        ]);
        let triangulation = Triangulation::new(vec![[0, 1, 2], [2, 1, 3]]);

        let mut img = Image::<f32, 3>::from_size_val([8, 8].into(), 0.0)?;
        draw_triangulation(&mut img, &points, &triangulation, [1.0, 0.0, 0.0], 1)?;

        // outer edges and the shared diagonal are drawn, the inside is not
        assert_eq!(img.pixel(3, 0), Some([1.0, 0.0, 0.0].as_slice()));
        assert_eq!(img.pixel(6, 3), Some([1.0, 0.0, 0.0].as_slice()));
        assert_eq!(img.pixel(3, 3), Some([1.0, 0.0, 0.0].as_slice()));
        assert_eq!(img.pixel(1, 1), Some([0.0, 0.0, 0.0].as_slice()));
        assert_eq!(img.pixel(7, 7), Some([0.0, 0.0, 0.0].as_slice()));

        draw_points(&mut img, &points, 0, [0.0, 1.0, 0.0]);
        assert_eq!(img.pixel(6, 6), Some([0.0, 1.0, 0.0].as_slice()));

        let bad = Triangulation::new(vec![[0, 1, 7]]);
        assert!(draw_triangulation(&mut img, &points, &bad, [1.0; 3], 1).is_err());
        Ok(())
    }
}
