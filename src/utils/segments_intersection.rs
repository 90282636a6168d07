use na::Point2;

use crate::math::Real;

/// Computes the intersection between two 2D segments `[a, b]` and `[c, d]`.
///
/// Returns the parameters `(s, t)` such that the intersection point is `a + (b - a) * s` and
/// `c + (d - c) * t`. Parallel segments (including collinear overlapping ones) have no
/// isolated intersection point and return `None`.
pub fn segments_intersection2d(
    a: &Point2<Real>,
    b: &Point2<Real>,
    c: &Point2<Real>,
    d: &Point2<Real>,
    epsilon: Real,
) -> Option<(Real, Real)> {
    let denom = a.x * (d.y - c.y) + b.x * (c.y - d.y) + d.x * (b.y - a.y) + c.x * (a.y - b.y);

    // If denom is zero, then segments are parallel.
    if denom.abs() < epsilon || ulps_eq!(denom, 0.0) {
        return None;
    }

    let num = a.x * (d.y - c.y) + c.x * (a.y - d.y) + d.x * (c.y - a.y);
    let s = num / denom;

    let num = -(a.x * (c.y - b.y) + b.x * (a.y - c.y) + c.x * (b.y - a.y));
    let t = num / denom;

    if 0.0 > s || s > 1.0 || 0.0 > t || t > 1.0 {
        None
    } else {
        Some((s, t))
    }
}

#[cfg(test)]
mod test {
    use super::segments_intersection2d;
    use na::Point2;

    #[test]
    fn crossing_and_parallel_segments() {
        let a = Point2::new(-1.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(0.5, -1.0);
        let d = Point2::new(0.5, 3.0);

        let (s, t) = segments_intersection2d(&a, &b, &c, &d, 1.0e-6).unwrap();
        assert_relative_eq!(s, 0.75);
        assert_relative_eq!(t, 0.25);

        let e = Point2::new(-1.0, 1.0);
        let f = Point2::new(1.0, 1.0);
        assert!(segments_intersection2d(&a, &b, &e, &f, 1.0e-6).is_none());
    }
}
