use crate::point::Point2d;

/// Largest pixel coordinate magnitude a rectangle may hold.
///
/// Keeps the edge and area arithmetic of any two rectangles inside `i64`.
pub const MAX_PIXEL_COORD: i64 = 1 << 40;

/// An axis-aligned rectangle on the pixel grid.
///
/// `x` and `y` give the top-left pixel, `width` and `height` are the number of
/// pixels covered, so the right and bottom edges are exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// left-most column.
    pub x: i64,
    /// top-most row.
    pub y: i64,
    /// number of columns.
    pub width: i64,
    /// number of rows.
    pub height: i64,
}

impl Rect {
    /// Create a new rectangle.
    pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle covering a whole image.
    pub const fn from_size(width: usize, height: usize) -> Self {
        Self::new(0, 0, width as i64, height as i64)
    }

    /// The smallest pixel rectangle containing all the points.
    ///
    /// A point with coordinate `v` falls in pixel `floor(v)`, so the rectangle
    /// spans from the floor of the minimum to the floor of the maximum,
    /// inclusive. Returns `None` for an empty slice, or when a coordinate is not
    /// finite or its pixel lies beyond [`MAX_PIXEL_COORD`].
    ///
    /// # Example
    ///
    /// ```
    /// use facewarp_geometry::{Point2d, Rect};
    ///
    /// let rect = Rect::bounding(&[Point2d::new(0.5, 1.0), Point2d::new(3.2, 2.9)]).unwrap();
    /// assert_eq!(rect, Rect::new(0, 1, 4, 2));
    /// ```
    pub fn bounding(points: &[Point2d]) -> Option<Rect> {
        let first = points.first()?;
        if !points.iter().all(Point2d::is_finite) {
            return None;
        }
        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        let to_pixel = |v: f32| {
            let v = (v as f64).floor();
            (v.abs() <= MAX_PIXEL_COORD as f64).then_some(v as i64)
        };
        let (x, y) = (to_pixel(min_x)?, to_pixel(min_y)?);
        let (right, bottom) = (to_pixel(max_x)?, to_pixel(max_y)?);

        Some(Rect {
            x,
            y,
            width: right - x + 1,
            height: bottom - y + 1,
        })
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        self.y.saturating_add(self.height)
    }

    /// Number of pixels covered.
    pub fn area(&self) -> i64 {
        self.width.max(0).saturating_mul(self.height.max(0))
    }

    /// Whether the rectangle covers no pixel.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the pixel `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// The overlap of two rectangles, `None` if they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        let rect = Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y));
        (!rect.is_empty()).then_some(rect)
    }

    /// Clip the rectangle to an image of the given size.
    pub fn clip(&self, width: usize, height: usize) -> Option<Rect> {
        self.intersect(&Rect::from_size(width, height))
    }

    /// The top-left corner as a point.
    pub fn origin(&self) -> Point2d {
        Point2d::new(self.x as f32, self.y as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_integer_points() {
        let points = [
            Point2d::new(0.0, 0.0),
            Point2d::new(10.0, 0.0),
            Point2d::new(0.0, 10.0),
        ];
        assert_eq!(Rect::bounding(&points), Some(Rect::new(0, 0, 11, 11)));
    }

    #[test]
    fn bounding_negative_points() {
        let points = [Point2d::new(-1.5, 2.0), Point2d::new(1.0, -0.25)];
        assert_eq!(Rect::bounding(&points), Some(Rect::new(-2, -1, 4, 4)));
    }

    #[test]
    fn bounding_empty() {
        assert_eq!(Rect::bounding(&[]), None);
    }

    #[test]
    fn bounding_unrepresentable() {
        let far = [Point2d::new(0.0, 0.0), Point2d::new(1e19, 0.0)];
        assert_eq!(Rect::bounding(&far), None);

        let below = [Point2d::new(-1e19, 0.0), Point2d::new(1.0, 1.0)];
        assert_eq!(Rect::bounding(&below), None);

        let nan = [Point2d::new(f32::NAN, 0.0), Point2d::new(1.0, 1.0)];
        assert_eq!(Rect::bounding(&nan), None);

        let inf = [Point2d::new(0.0, 0.0), Point2d::new(1.0, f32::INFINITY)];
        assert_eq!(Rect::bounding(&inf), None);

        // the largest allowed coordinates still fit
        let edge = MAX_PIXEL_COORD as f32;
        let rect = Rect::bounding(&[Point2d::new(-edge, 0.0), Point2d::new(edge, 0.0)]);
        assert_eq!(rect.map(|r| r.width), Some(2 * MAX_PIXEL_COORD + 1));
    }

    #[test]
    fn edges_saturate() {
        let rect = Rect::new(i64::MAX - 1, 0, 10, 10);
        assert_eq!(rect.right(), i64::MAX);
        assert_eq!(Rect::new(0, 0, i64::MAX, 4).area(), i64::MAX);
    }

    #[test]
    fn intersect_and_clip() {
        let rect = Rect::new(-2, 3, 6, 10);
        assert_eq!(rect.clip(5, 8), Some(Rect::new(0, 3, 4, 5)));
        assert_eq!(rect.right(), 4);
        assert_eq!(rect.bottom(), 13);
        assert_eq!(rect.area(), 60);
        assert!(rect.contains(-2, 3));
        assert!(!rect.contains(4, 3));

        let outside = Rect::new(10, 10, 3, 3);
        assert_eq!(outside.clip(5, 5), None);
    }
}
