use na::Unit;

use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::{ConvexShape, SupportMap};

/// A support mapping that is the point at (0.0, 0.0, 0.0).
pub struct ConstantOrigin;

impl SupportMap for ConstantOrigin {
    #[inline]
    fn support_point(&self, m: &Isometry<Real>, _: &Vector<Real>) -> Point<Real> {
        m.translation.vector.into()
    }

    #[inline]
    fn support_point_toward(&self, m: &Isometry<Real>, _: &Unit<Vector<Real>>) -> Point<Real> {
        m.translation.vector.into()
    }

    #[inline]
    fn local_support_point(&self, _: &Vector<Real>) -> Point<Real> {
        Point::origin()
    }

    #[inline]
    fn local_support_point_toward(&self, _: &Unit<Vector<Real>>) -> Point<Real> {
        Point::origin()
    }
}

/// The Minkowski sum of a shape and a ball.
///
/// Wrapping the core of a [`ConvexShape`] with its own margin gives back the full shape.
pub struct DilatedShape<'a, S: ?Sized + SupportMap> {
    /// The shape involved in the Minkowski sum.
    pub shape: &'a S,
    /// The radius of the ball involved in the Minkoski sum.
    pub radius: Real,
}

impl<'a, S: ?Sized + ConvexShape> DilatedShape<'a, S> {
    /// The full shape of `shape`: its core dilated by its margin.
    #[inline]
    pub fn with_margin(shape: &'a S) -> Self {
        DilatedShape {
            shape,
            radius: shape.margin(),
        }
    }
}

impl<S: ?Sized + SupportMap> SupportMap for DilatedShape<'_, S> {
    // A zero direction leaves the core support point undilated instead of producing NaNs.
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        match Unit::try_new(*dir, crate::math::DEFAULT_EPSILON) {
            Some(dir) => self.local_support_point_toward(&dir),
            None => self.shape.local_support_point(dir),
        }
    }

    #[inline]
    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        self.shape.local_support_point_toward(dir) + **dir * self.radius
    }
}

#[cfg(test)]
mod test {
    use super::DilatedShape;
    use crate::math::{Point, Vector};
    use crate::shape::{Ball, Cuboid, SupportMap};

    #[test]
    fn dilated_core_is_the_full_shape() {
        let ball = Ball::new(0.5);
        let full = DilatedShape::with_margin(&ball);
        assert_relative_eq!(
            full.local_support_point(&Vector::new(0.0, 2.0, 0.0)),
            Point::new(0.0, 0.5, 0.0)
        );

        let cuboid = Cuboid::with_margin(Vector::repeat(1.0), 0.1);
        let full = DilatedShape::with_margin(&cuboid);
        assert_relative_eq!(
            full.local_support_point(&Vector::x()),
            Point::new(1.0, 0.9, 0.9),
            epsilon = 1.0e-6
        );
    }

    #[test]
    fn dilated_zero_direction_is_finite() {
        let ball = Ball::new(0.5);
        let full = DilatedShape::with_margin(&ball);
        let pt = full.local_support_point(&Vector::zeros());
        assert!(pt.coords.iter().all(|e| e.is_finite()));
    }
}
