use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point `distance` away from `self` along `angle_deg` (counterclockwise-positive).
    #[inline]
    pub fn offset_polar(self, angle_deg: f32, distance: f32) -> Self {
        let (s, c) = angle_deg.to_radians().sin_cos();
        Self {
            x: self.x + distance * c,
            y: self.y + distance * s,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Ordered pair of points. Walls and rays are both segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[inline]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    #[inline]
    fn direction(&self) -> [f32; 2] {
        [self.end.x - self.start.x, self.end.y - self.start.y]
    }
}

#[inline]
fn cross(a: [f32; 2], b: [f32; 2]) -> f32 {
    a[0] * b[1] - a[1] * b[0]
}

/// Euclidean distance between the segment's endpoints.
#[inline]
pub fn length(segment: &Segment) -> f32 {
    let [dx, dy] = segment.direction();
    (dx * dx + dy * dy).sqrt()
}

/// Intersection point of two bounded segments.
///
/// Solves `a.start + t*r = b.start + u*s` with Cramer's rule, where `r` and `s`
/// are the direction vectors. One code path for every orientation, axis-aligned
/// segments included.
///
/// Returns `None` when the determinant is exactly zero (parallel or colinear,
/// colinear overlap is not resolved) or when `t` or `u` falls outside `[0, 1]`.
/// Both bounds are inclusive, so touching an endpoint counts.
pub fn intersect(a: &Segment, b: &Segment) -> Option<Point> {
    let r = a.direction();
    let s = b.direction();

    let det = cross(r, s);
    if det == 0.0 {
        return None;
    }

    let qp = [b.start.x - a.start.x, b.start.y - a.start.y];
    let t = cross(qp, s) / det;
    let u = cross(qp, r) / det;

    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }

    Some(Point {
        x: a.start.x + t * r[0],
        y: a.start.y + t * r[1],
    })
}

#[cfg(test)]
pub(crate) fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x1: f32, y1: f32, x2: f32, y2: f32) -> Segment {
        Segment::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[test]
    fn length_is_euclidean() {
        assert_eq!(length(&seg(0.0, 0.0, 3.0, 4.0)), 5.0);
        assert_eq!(length(&seg(2.0, 2.0, 2.0, 2.0)), 0.0);
    }

    #[test]
    fn crossing_diagonals_meet_in_the_middle() {
        let p = intersect(&seg(0.0, 0.0, 10.0, 10.0), &seg(0.0, 10.0, 10.0, 0.0)).unwrap();
        assert!(approx(p.x, 5.0) && approx(p.y, 5.0), "got {p}");
    }

    #[test]
    fn vertical_and_horizontal_use_the_same_path() {
        let p = intersect(&seg(0.0, 5.0, 10.0, 5.0), &seg(3.0, 0.0, 3.0, 10.0)).unwrap();
        assert!(approx(p.x, 3.0) && approx(p.y, 5.0), "got {p}");

        let p = intersect(&seg(3.0, 0.0, 3.0, 10.0), &seg(0.0, 5.0, 10.0, 5.0)).unwrap();
        assert!(approx(p.x, 3.0) && approx(p.y, 5.0), "got {p}");
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        assert_eq!(intersect(&seg(0.0, 0.0, 10.0, 0.0), &seg(0.0, 1.0, 10.0, 1.0)), None);
        assert_eq!(intersect(&seg(0.0, 0.0, 0.0, 10.0), &seg(2.0, 0.0, 2.0, 10.0)), None);
    }

    #[test]
    fn colinear_overlap_is_reported_as_no_intersection() {
        assert_eq!(intersect(&seg(0.0, 0.0, 10.0, 0.0), &seg(5.0, 0.0, 15.0, 0.0)), None);
    }

    #[test]
    fn crossing_lines_outside_segment_bounds_miss() {
        // Infinite lines cross at (5, 5), but the second segment stops at y = 4.
        assert_eq!(intersect(&seg(0.0, 0.0, 10.0, 10.0), &seg(5.0, 0.0, 5.0, 4.0)), None);
        // t would be 2.
        assert_eq!(intersect(&seg(0.0, 0.0, 1.0, 1.0), &seg(0.0, 4.0, 4.0, 0.0)), None);
    }

    #[test]
    fn touching_an_endpoint_counts() {
        let p = intersect(&seg(0.0, 0.0, 10.0, 0.0), &seg(10.0, -5.0, 10.0, 5.0)).unwrap();
        assert_eq!(p, Point::new(10.0, 0.0));
    }

    #[test]
    fn offset_polar_follows_counterclockwise_angles() {
        let p = Point::new(1.0, 1.0).offset_polar(90.0, 2.0);
        assert!(approx(p.x, 1.0) && approx(p.y, 3.0), "got {p}");
        assert_eq!(Point::new(1.0, 1.0).offset_polar(0.0, 2.0), Point::new(3.0, 1.0));
    }
}
