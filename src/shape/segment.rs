//! Definition of the segment shape.

use crate::math::{Point, Real, Vector};
use crate::shape::SupportMap;

use na::Unit;

/// A segment shape.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Segment {
    /// The segment first point.
    pub a: Point<Real>,
    /// The segment second point.
    pub b: Point<Real>,
}

/// Logical description of the location of a point on a segment.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum SegmentPointLocation {
    /// The point lies on a vertex.
    OnVertex(u32),
    /// The point lies on the segment interior.
    OnEdge([Real; 2]),
}

impl SegmentPointLocation {
    /// The barycentric coordinates corresponding to this point location.
    pub fn barycentric_coordinates(&self) -> [Real; 2] {
        let mut bcoords = [0.0; 2];

        match self {
            SegmentPointLocation::OnVertex(i) => bcoords[*i as usize] = 1.0,
            SegmentPointLocation::OnEdge(uv) => {
                bcoords[0] = uv[0];
                bcoords[1] = uv[1];
            }
        }

        bcoords
    }
}

impl Segment {
    /// Creates a new segment from two points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>) -> Segment {
        Segment { a, b }
    }

    /// The direction of this segment scaled by its length.
    ///
    /// Points from `self.a` toward `self.b`.
    pub fn scaled_direction(&self) -> Vector<Real> {
        self.b - self.a
    }

    /// The length of this segment.
    pub fn length(&self) -> Real {
        self.scaled_direction().norm()
    }

    /// The unit direction of this segment.
    ///
    /// Returns `None` is both points are equal.
    pub fn direction(&self) -> Option<Unit<Vector<Real>>> {
        Unit::try_new(self.scaled_direction(), crate::math::DEFAULT_EPSILON)
    }

    /// Computes the point at the given location.
    pub fn point_at(&self, location: &SegmentPointLocation) -> Point<Real> {
        match *location {
            SegmentPointLocation::OnVertex(0) => self.a,
            SegmentPointLocation::OnVertex(_) => self.b,
            SegmentPointLocation::OnEdge(bcoords) => {
                self.a * bcoords[0] + self.b.coords * bcoords[1]
            }
        }
    }

    /// The point of this segment closest to `pt`, with its location.
    pub fn project_local_point_and_get_location(
        &self,
        pt: &Point<Real>,
    ) -> (Point<Real>, SegmentPointLocation) {
        let ab = self.b - self.a;
        let ap = pt - self.a;
        let ab_ap = ab.dot(&ap);
        let sqnab = ab.norm_squared();

        if ab_ap <= 0.0 {
            (self.a, SegmentPointLocation::OnVertex(0))
        } else if ab_ap >= sqnab {
            (self.b, SegmentPointLocation::OnVertex(1))
        } else {
            let u = ab_ap / sqnab;
            (
                self.a + ab * u,
                SegmentPointLocation::OnEdge([1.0 - u, u]),
            )
        }
    }
}

impl SupportMap for Segment {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        if self.a.coords.dot(dir) > self.b.coords.dot(dir) {
            self.a
        } else {
            self.b
        }
    }
}

#[cfg(test)]
mod test {
    use crate::math::Point;
    use crate::shape::{Segment, SegmentPointLocation};

    #[test]
    fn segment_projection_clamps_to_vertices() {
        let seg = Segment::new(Point::new(0.0, 0.0, 0.0), Point::new(2.0, 0.0, 0.0));

        let (pt, loc) = seg.project_local_point_and_get_location(&Point::new(-1.0, 1.0, 0.0));
        assert_eq!(pt, seg.a);
        assert_eq!(loc, SegmentPointLocation::OnVertex(0));

        let (pt, loc) = seg.project_local_point_and_get_location(&Point::new(0.5, 1.0, 0.0));
        assert_relative_eq!(pt, Point::new(0.5, 0.0, 0.0));
        assert_relative_eq!(loc.barycentric_coordinates()[1], 0.25);
    }
}
