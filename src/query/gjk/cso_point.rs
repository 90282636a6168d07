use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::SupportMap;
use core::ops::Sub;
use na::Unit;

/// A point of the Minkowski difference of two shapes.
///
/// Each point of the difference `g1 - pos12 * g2` remembers the two shape points it comes
/// from, so that witness points can be recovered from the barycentric coordinates of a
/// simplex built with it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CSOPoint {
    /// The point on the difference. Equal to `self.orig1 - self.orig2` unless it was
    /// shifted with [`CSOPoint::translate`].
    pub point: Point<Real>,
    /// The point on the first shape, in the local-space of the first shape.
    pub orig1: Point<Real>,
    /// The point on the second shape, in the local-space of the first shape.
    pub orig2: Point<Real>,
}

impl CSOPoint {
    /// Initializes a CSO point with `orig1 - orig2`.
    pub fn new(orig1: Point<Real>, orig2: Point<Real>) -> Self {
        let point = Point::from(orig1 - orig2);
        Self::new_with_point(point, orig1, orig2)
    }

    /// Initializes a CSO point with all information provided.
    ///
    /// It is assumed, but not checked, that `point == orig1 - orig2`.
    pub fn new_with_point(point: Point<Real>, orig1: Point<Real>, orig2: Point<Real>) -> Self {
        CSOPoint {
            point,
            orig1,
            orig2,
        }
    }

    /// CSO point where all components are set to zero.
    pub fn origin() -> Self {
        CSOPoint::new(Point::origin(), Point::origin())
    }

    /// Computes the support point of the CSO of `g1` and `g2` toward the unit direction `dir`.
    pub fn from_shapes_toward<G1, G2>(
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        dir: &Unit<Vector<Real>>,
    ) -> Self
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let sp1 = g1.local_support_point_toward(dir);
        let sp2 = g2.support_point_toward(pos12, &-*dir);

        CSOPoint::new(sp1, sp2)
    }

    /// Computes the support point of the CSO of `g1` and `g2` toward the direction `dir`.
    pub fn from_shapes<G1, G2>(pos12: &Isometry<Real>, g1: &G1, g2: &G2, dir: &Vector<Real>) -> Self
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let sp1 = g1.local_support_point(dir);
        let sp2 = g2.support_point(pos12, &-*dir);

        CSOPoint::new(sp1, sp2)
    }

    /// Shifts the CSO point, leaving its source points untouched.
    pub fn translate(&self, dir: &Vector<Real>) -> Self {
        CSOPoint::new_with_point(self.point + dir, self.orig1, self.orig2)
    }

    /// Linear combination of CSO points, applied to the point and its two sources.
    pub fn combine(pts: &[CSOPoint], weights: &[Real]) -> Self {
        let mut res = CSOPoint::new_with_point(Point::origin(), Point::origin(), Point::origin());

        for (pt, w) in pts.iter().zip(weights.iter()) {
            res.point += pt.point.coords * *w;
            res.orig1 += pt.orig1.coords * *w;
            res.orig2 += pt.orig2.coords * *w;
        }

        res
    }
}

impl Sub<CSOPoint> for CSOPoint {
    type Output = Vector<Real>;

    #[inline]
    fn sub(self, rhs: CSOPoint) -> Vector<Real> {
        self.point - rhs.point
    }
}
