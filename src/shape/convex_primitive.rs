use crate::math::{Point, Real, Vector};
use crate::shape::{Ball, Capsule, ConvexShape, Cuboid, SupportMap, Triangle};

use na::Unit;

/// One of the convex shapes supported by the pair testers.
///
/// This lets testers for shapes of different kinds live in the same container.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConvexPrimitive {
    /// A ball.
    Ball(Ball),
    /// A box.
    Cuboid(Cuboid),
    /// A capsule.
    Capsule(Capsule),
    /// A triangle used as the convex side of a pair.
    Triangle(Triangle),
}

impl ConvexPrimitive {
    /// The ball wrapped by `self`, if any.
    pub fn as_ball(&self) -> Option<&Ball> {
        match self {
            ConvexPrimitive::Ball(b) => Some(b),
            _ => None,
        }
    }

    /// The triangle wrapped by `self`, if any.
    pub fn as_triangle(&self) -> Option<&Triangle> {
        match self {
            ConvexPrimitive::Triangle(t) => Some(t),
            _ => None,
        }
    }
}

impl SupportMap for ConvexPrimitive {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        match self {
            ConvexPrimitive::Ball(s) => s.local_support_point(dir),
            ConvexPrimitive::Cuboid(s) => s.local_support_point(dir),
            ConvexPrimitive::Capsule(s) => s.local_support_point(dir),
            ConvexPrimitive::Triangle(s) => s.local_support_point(dir),
        }
    }

    #[inline]
    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        match self {
            ConvexPrimitive::Ball(s) => s.local_support_point_toward(dir),
            ConvexPrimitive::Cuboid(s) => s.local_support_point_toward(dir),
            ConvexPrimitive::Capsule(s) => s.local_support_point_toward(dir),
            ConvexPrimitive::Triangle(s) => s.local_support_point_toward(dir),
        }
    }
}

impl ConvexShape for ConvexPrimitive {
    #[inline]
    fn margin(&self) -> Real {
        match self {
            ConvexPrimitive::Ball(s) => s.margin(),
            ConvexPrimitive::Cuboid(s) => s.margin(),
            ConvexPrimitive::Capsule(s) => s.margin(),
            ConvexPrimitive::Triangle(s) => s.margin(),
        }
    }

    #[inline]
    fn minimum_radius(&self) -> Real {
        match self {
            ConvexPrimitive::Ball(s) => s.minimum_radius(),
            ConvexPrimitive::Cuboid(s) => s.minimum_radius(),
            ConvexPrimitive::Capsule(s) => s.minimum_radius(),
            ConvexPrimitive::Triangle(s) => s.minimum_radius(),
        }
    }
}

impl From<Ball> for ConvexPrimitive {
    fn from(s: Ball) -> Self {
        ConvexPrimitive::Ball(s)
    }
}

impl From<Cuboid> for ConvexPrimitive {
    fn from(s: Cuboid) -> Self {
        ConvexPrimitive::Cuboid(s)
    }
}

impl From<Capsule> for ConvexPrimitive {
    fn from(s: Capsule) -> Self {
        ConvexPrimitive::Capsule(s)
    }
}

impl From<Triangle> for ConvexPrimitive {
    fn from(s: Triangle) -> Self {
        ConvexPrimitive::Triangle(s)
    }
}
