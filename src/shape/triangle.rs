//! Definition of the triangle shape.

use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::{ConvexShape, Segment, SupportMap};

use na::Unit;

/// Which side(s) of a triangle can generate contacts.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum TriangleSidedness {
    /// Both sides of the triangle collide.
    #[default]
    DoubleSided,
    /// Only the side toward `AC × AB` collides (vertices clockwise when seen from the front).
    Clockwise,
    /// Only the side toward `AB × AC` collides (vertices counterclockwise when seen from the front).
    Counterclockwise,
}

/// A triangle shape.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
    /// The side(s) of this triangle that generate contacts.
    pub sidedness: TriangleSidedness,
    /// The collision margin of this triangle.
    pub margin: Real,
}

/// Description of the location of a point on a triangle.
#[derive(Copy, Clone, Debug)]
pub enum TrianglePointLocation {
    /// The point lies on a vertex.
    OnVertex(u32),
    /// The point lies on an edge.
    ///
    /// The 0-st edge is the segment AB.
    /// The 1-st edge is the segment BC.
    /// The 2-nd edge is the segment AC.
    OnEdge(u32, [Real; 2]),
    /// The point lies on the triangle interior.
    ///
    /// The integer indicates on which side of the face the point is. 0 indicates the point
    /// is on the half-space toward `AB × AC`. 1 indicates the point is on the other
    /// half-space.
    OnFace(u32, [Real; 3]),
}

impl TrianglePointLocation {
    /// The barycentric coordinates corresponding to this point location.
    pub fn barycentric_coordinates(&self) -> [Real; 3] {
        let mut bcoords = [0.0; 3];

        match self {
            TrianglePointLocation::OnVertex(i) => bcoords[*i as usize] = 1.0,
            TrianglePointLocation::OnEdge(i, uv) => {
                let idx = match i {
                    0 => (0, 1),
                    1 => (1, 2),
                    2 => (0, 2),
                    _ => unreachable!(),
                };

                bcoords[idx.0] = uv[0];
                bcoords[idx.1] = uv[1];
            }
            TrianglePointLocation::OnFace(_, uvw) => {
                bcoords[0] = uvw[0];
                bcoords[1] = uvw[1];
                bcoords[2] = uvw[2];
            }
        }

        bcoords
    }

    /// Returns `true` if the point is located on the relative interior of the triangle.
    pub fn is_on_face(&self) -> bool {
        matches!(*self, TrianglePointLocation::OnFace(..))
    }
}

impl From<[Point<Real>; 3]> for Triangle {
    fn from(arr: [Point<Real>; 3]) -> Self {
        Triangle::new(arr[0], arr[1], arr[2])
    }
}

impl Triangle {
    /// Creates a double-sided triangle from three points, with a zero margin.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle {
            a,
            b,
            c,
            sidedness: TriangleSidedness::DoubleSided,
            margin: 0.0,
        }
    }

    /// Returns this triangle with the given sidedness.
    #[inline]
    pub fn with_sidedness(mut self, sidedness: TriangleSidedness) -> Triangle {
        self.sidedness = sidedness;
        self
    }

    /// Returns this triangle with the given collision margin.
    #[inline]
    pub fn with_margin(mut self, margin: Real) -> Triangle {
        self.margin = margin.max(0.0);
        self
    }

    /// The three vertices of this triangle.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 3] {
        [self.a, self.b, self.c]
    }

    /// The normal of this triangle assuming it is oriented ccw.
    ///
    /// The normal points such that it is collinear to `AB × AC` (where `×` denotes the cross
    /// product).
    #[inline]
    pub fn normal(&self) -> Option<Unit<Vector<Real>>> {
        Unit::try_new(self.scaled_normal(), crate::math::DEFAULT_EPSILON)
    }

    /// A vector normal of this triangle.
    ///
    /// The vector points such that it is collinear to `AB × AC` (where `×` denotes the cross
    /// product).
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        ab.cross(&ac)
    }

    /// The scaled normal pointing toward the colliding side of this triangle.
    ///
    /// For double-sided triangles this is `AB × AC`.
    #[inline]
    pub fn front_scaled_normal(&self) -> Vector<Real> {
        match self.sidedness {
            TriangleSidedness::Clockwise => -self.scaled_normal(),
            _ => self.scaled_normal(),
        }
    }

    /// The unit normal pointing toward the colliding side of this triangle.
    ///
    /// Returns `None` if the triangle is degenerate.
    #[inline]
    pub fn front_normal(&self) -> Option<Unit<Vector<Real>>> {
        Unit::try_new(self.front_scaled_normal(), crate::math::DEFAULT_EPSILON)
    }

    /// Is this triangle one-sided?
    #[inline]
    pub fn is_one_sided(&self) -> bool {
        self.sidedness != TriangleSidedness::DoubleSided
    }

    /// The three edges of this triangle, indexed like [`TrianglePointLocation::OnEdge`]: [AB, BC, AC].
    #[inline]
    pub fn edges(&self) -> [Segment; 3] {
        [
            Segment::new(self.a, self.b),
            Segment::new(self.b, self.c),
            Segment::new(self.a, self.c),
        ]
    }

    /// Returns a new triangle with vertices transformed by `m`.
    #[inline]
    pub fn transformed(&self, m: &Isometry<Real>) -> Self {
        Triangle {
            a: m * self.a,
            b: m * self.b,
            c: m * self.c,
            ..*self
        }
    }

    /// The geometric center of this triangle.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        Point::from((self.a.coords + self.b.coords + self.c.coords) / 3.0)
    }

    /// Computes the extents of this triangle on the given direction.
    ///
    /// This computes the min and max values of the dot products between each
    /// vertex of this triangle and `dir`.
    #[inline]
    pub fn extents_on_dir(&self, dir: &Unit<Vector<Real>>) -> (Real, Real) {
        let a = self.a.coords.dot(dir);
        let b = self.b.coords.dot(dir);
        let c = self.c.coords.dot(dir);

        (a.min(b).min(c), a.max(b).max(c))
    }

    /// Tests if this triangle is affinely dependent, i.e., its points are almost aligned.
    pub fn is_affinely_dependent(&self) -> bool {
        const EPS: Real = crate::math::DEFAULT_EPSILON * 100.0;

        let p1p2 = self.b - self.a;
        let p1p3 = self.c - self.a;
        relative_eq!(p1p2.cross(&p1p3).norm_squared(), 0.0, epsilon = EPS * EPS)
    }
}

impl SupportMap for Triangle {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let d1 = self.a.coords.dot(dir);
        let d2 = self.b.coords.dot(dir);
        let d3 = self.c.coords.dot(dir);

        if d1 > d2 {
            if d1 > d3 {
                self.a
            } else {
                self.c
            }
        } else if d2 > d3 {
            self.b
        } else {
            self.c
        }
    }
}

impl ConvexShape for Triangle {
    #[inline]
    fn margin(&self) -> Real {
        self.margin
    }

    // A triangle has no volume: only its margin contains a ball.
    #[inline]
    fn minimum_radius(&self) -> Real {
        self.margin
    }
}

#[cfg(test)]
mod test {
    use crate::math::{Point, Vector};
    use crate::shape::{SupportMap, Triangle, TriangleSidedness};

    #[test]
    fn front_normal_follows_sidedness() {
        let tri = Triangle::new(
            Point::origin(),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        );

        assert_relative_eq!(*tri.front_normal().unwrap(), Vector::z());

        let ccw = tri.with_sidedness(TriangleSidedness::Counterclockwise);
        assert_relative_eq!(*ccw.front_normal().unwrap(), Vector::z());

        let cw = tri.with_sidedness(TriangleSidedness::Clockwise);
        assert_relative_eq!(*cw.front_normal().unwrap(), -Vector::z());
    }

    #[test]
    fn degenerate_triangle_has_no_normal() {
        let p = Point::new(1.0, 2.0, 3.0);
        let tri = Triangle::new(p, p, p);
        assert!(tri.normal().is_none());
        assert!(tri.is_affinely_dependent());
        assert_eq!(tri.local_support_point(&Vector::x()), p);
    }
}
