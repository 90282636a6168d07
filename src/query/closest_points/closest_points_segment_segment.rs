use crate::math::{Point, Real};
use crate::shape::{Segment, SegmentPointLocation};

/// Closest points between two segments expressed in the same space.
#[inline]
pub fn closest_points_segment_segment(seg1: &Segment, seg2: &Segment) -> (Point<Real>, Point<Real>) {
    let (loc1, loc2) = closest_points_segment_segment_with_locations(seg1, seg2);
    (seg1.point_at(&loc1), seg2.point_at(&loc2))
}

/// Closest points between two segments, as locations on each segment.
#[inline]
pub fn closest_points_segment_segment_with_locations(
    seg1: &Segment,
    seg2: &Segment,
) -> (SegmentPointLocation, SegmentPointLocation) {
    let (s, t) = closest_points_segment_segment_parameters((&seg1.a, &seg1.b), (&seg2.a, &seg2.b));

    let loc1 = if s == 0.0 {
        SegmentPointLocation::OnVertex(0)
    } else if s == 1.0 {
        SegmentPointLocation::OnVertex(1)
    } else {
        SegmentPointLocation::OnEdge([1.0 - s, s])
    };

    let loc2 = if t == 0.0 {
        SegmentPointLocation::OnVertex(0)
    } else if t == 1.0 {
        SegmentPointLocation::OnVertex(1)
    } else {
        SegmentPointLocation::OnEdge([1.0 - t, t])
    };

    (loc1, loc2)
}

/// Segment-segment closest points computation in an arbitrary dimension.
///
/// Returns the parameters `(s, t)`, both clamped to `[0, 1]`, of the closest points
/// `seg1.0 + (seg1.1 - seg1.0) * s` and `seg2.0 + (seg2.1 - seg2.0) * t`.
/// Zero-length segments are handled as points.
#[inline]
pub fn closest_points_segment_segment_parameters<const D: usize>(
    seg1: (&na::Point<Real, D>, &na::Point<Real, D>),
    seg2: (&na::Point<Real, D>, &na::Point<Real, D>),
) -> (Real, Real) {
    // Inspired by Real-time collision detection by Christer Ericson.
    let d1 = seg1.1 - seg1.0;
    let d2 = seg2.1 - seg2.0;
    let r = seg1.0 - seg2.0;

    let a = d1.norm_squared();
    let e = d2.norm_squared();
    let f = d2.dot(&r);

    let mut s;
    let mut t;

    let _eps = crate::math::DEFAULT_EPSILON;
    if a <= _eps && e <= _eps {
        s = 0.0;
        t = 0.0;
    } else if a <= _eps {
        s = 0.0;
        t = na::clamp(f / e, 0.0, 1.0);
    } else {
        let c = d1.dot(&r);
        if e <= _eps {
            t = 0.0;
            s = na::clamp(-c / a, 0.0, 1.0);
        } else {
            let b = d1.dot(&d2);
            let ae = a * e;
            let bb = b * b;
            let denom = ae - bb;

            // Use absolute and ulps error to test collinearity.
            if denom > _eps && !ulps_eq!(ae, bb) {
                s = na::clamp((b * f - c * e) / denom, 0.0, 1.0);
            } else {
                s = 0.0;
            }

            t = (b * s + f) / e;

            if t < 0.0 {
                t = 0.0;
                s = na::clamp(-c / a, 0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = na::clamp((b - c) / a, 0.0, 1.0);
            }
        }
    }

    (s, t)
}

#[cfg(test)]
mod test {
    use super::closest_points_segment_segment;
    use crate::math::Point;
    use crate::shape::Segment;

    #[test]
    fn crossing_segments() {
        let seg1 = Segment::new(Point::new(-1.0, 0.0, 0.0), Point::new(1.0, 0.0, 0.0));
        let seg2 = Segment::new(Point::new(0.5, -1.0, 1.0), Point::new(0.5, 1.0, 1.0));
        let (p1, p2) = closest_points_segment_segment(&seg1, &seg2);
        assert_relative_eq!(p1, Point::new(0.5, 0.0, 0.0));
        assert_relative_eq!(p2, Point::new(0.5, 0.0, 1.0));
    }

    #[test]
    fn degenerate_segments_are_points() {
        let p = Point::new(1.0, 2.0, 3.0);
        let seg1 = Segment::new(p, p);
        let seg2 = Segment::new(Point::new(0.0, 0.0, 0.0), Point::new(0.0, 4.0, 0.0));
        let (p1, p2) = closest_points_segment_segment(&seg1, &seg2);
        assert_eq!(p1, p);
        assert_relative_eq!(p2, Point::new(0.0, 2.0, 0.0));
    }
}
