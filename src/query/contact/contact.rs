use crate::math::{Point, Real, Vector};
use na::Unit;

/// Geometric description of a contact.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Contact {
    /// Position of the contact, halfway between the surfaces of both shapes.
    pub position: Point<Real>,

    /// Contact normal, pointing from the first shape toward the second one.
    pub normal: Unit<Vector<Real>>,

    /// Depth of the overlap along `self.normal`.
    ///
    /// If this is negative, this contact represents a small gap.
    pub penetration_depth: Real,

    /// Identifier of the pair of features generating this contact, stable across frames.
    pub feature_id: i32,
}

impl Contact {
    /// Creates a new contact.
    #[inline]
    pub fn new(
        position: Point<Real>,
        normal: Unit<Vector<Real>>,
        penetration_depth: Real,
        feature_id: i32,
    ) -> Self {
        Contact {
            position,
            normal,
            penetration_depth,
            feature_id,
        }
    }

    /// Creates a contact from the surface points of both shapes.
    ///
    /// `point1` is on the surface of the first shape, `point2` on the surface of the second one,
    /// and `normal` points from the first shape toward the second one. The depth is measured
    /// along the normal and the position is their midpoint.
    #[inline]
    pub fn from_surface_points(
        point1: Point<Real>,
        point2: Point<Real>,
        normal: Unit<Vector<Real>>,
        feature_id: i32,
    ) -> Self {
        Contact {
            position: na::center(&point1, &point2),
            normal,
            penetration_depth: (point1 - point2).dot(&normal),
            feature_id,
        }
    }
}

#[cfg(test)]
mod test {
    use super::Contact;
    use crate::math::{Point, Vector};

    #[test]
    fn surface_points_give_midpoint_and_depth() {
        let p1 = Point::new(0.0, 0.0, 0.1);
        let p2 = Point::new(0.0, 0.0, -0.1);
        let contact = Contact::from_surface_points(p1, p2, Vector::z_axis(), 6);

        assert_relative_eq!(contact.penetration_depth, 0.2);
        assert_relative_eq!(contact.position, Point::origin());
    }
}
