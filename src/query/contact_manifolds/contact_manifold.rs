use crate::math::{Real, Vector};
use crate::query::Contact;
use crate::utils::WBasis;
use arrayvec::ArrayVec;

/// The maximum number of contacts computed transiently by a single query.
pub const MAX_MANIFOLD_POINTS: usize = 8;

/// A set of contacts between two shapes.
///
/// Queries may compute up to [`MAX_MANIFOLD_POINTS`] contacts; manifolds handed to a solver
/// are usually reduced to four with [`ContactManifold::reduce_to_four`].
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ContactManifold {
    /// The contacts points.
    pub points: ArrayVec<Contact, MAX_MANIFOLD_POINTS>,
}

impl ContactManifold {
    /// Create a new empty contact-manifold.
    pub fn new() -> Self {
        Self::default()
    }

    /// The slice of all the contacts of this manifold.
    #[inline]
    pub fn contacts(&self) -> &[Contact] {
        &self.points
    }

    /// Adds a contact to this manifold.
    ///
    /// Returns `false` if the manifold is already full, in which case the contact is dropped.
    #[inline]
    pub fn push(&mut self, contact: Contact) -> bool {
        self.points.try_push(contact).is_ok()
    }

    /// The number of contacts in this manifold.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Does this manifold contain no contact at all?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Removes all the contacts from `self`.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// The contact with the given feature id, if any.
    pub fn find_by_feature_id(&self, feature_id: i32) -> Option<&Contact> {
        self.points.iter().find(|c| c.feature_id == feature_id)
    }

    /// Finds and returns the contact with the deepest penetration.
    pub fn find_deepest_contact(&self) -> Option<&Contact> {
        let mut deepest = self.points.first()?;

        for pt in &self.points {
            if pt.penetration_depth > deepest.penetration_depth {
                deepest = pt;
            }
        }

        Some(deepest)
    }

    /// Keeps at most four contacts that span the largest area.
    ///
    /// The kept contacts are the deepest one, the one farthest from it, and the two extreme
    /// ones along `normal × (farthest - deepest)`.
    pub fn reduce_to_four(&mut self, normal: &Vector<Real>) {
        if self.points.len() <= 4 {
            return;
        }

        let pts = &self.points;
        let mut deepest = 0;

        for (i, pt) in pts.iter().enumerate() {
            if pt.penetration_depth > pts[deepest].penetration_depth {
                deepest = i;
            }
        }

        let origin = pts[deepest].position;
        let mut farthest = deepest;
        let mut max_sqdist = -1.0;

        for (i, pt) in pts.iter().enumerate() {
            let sqdist = na::distance_squared(&pt.position, &origin);
            if i != deepest && sqdist > max_sqdist {
                max_sqdist = sqdist;
                farthest = i;
            }
        }

        let mut axis = normal.cross(&(pts[farthest].position - origin));

        if axis.norm_squared() <= crate::math::DEFAULT_EPSILON {
            axis = normal
                .try_normalize(crate::math::DEFAULT_EPSILON)
                .unwrap_or_else(Vector::z)
                .orthonormal_basis()[0];
        }

        let mut min_id = None;
        let mut max_id = None;
        let mut min_val = Real::MAX;
        let mut max_val = -Real::MAX;

        for (i, pt) in pts.iter().enumerate() {
            if i == deepest || i == farthest {
                continue;
            }

            let val = (pt.position - origin).dot(&axis);

            if val < min_val {
                min_val = val;
                min_id = Some(i);
            }

            if val > max_val {
                max_val = val;
                max_id = Some(i);
            }
        }

        let mut kept: ArrayVec<usize, 4> = ArrayVec::new();
        kept.push(deepest);
        kept.push(farthest);

        for id in [max_id, min_id].into_iter().flatten() {
            if !kept.contains(&id) {
                kept.push(id);
            }
        }

        let reduced: ArrayVec<Contact, MAX_MANIFOLD_POINTS> =
            kept.iter().map(|i| self.points[*i]).collect();
        self.points = reduced;
    }
}

#[cfg(test)]
mod test {
    use super::ContactManifold;
    use crate::math::{Point, Real, Vector};
    use crate::query::Contact;

    #[test]
    fn reduce_to_four_keeps_deepest_and_extremes() {
        let mut manifold = ContactManifold::new();

        for i in 0..8 {
            let angle = i as Real * core::f64::consts::FRAC_PI_4 as Real;
            let depth = if i == 3 { 0.5 } else { 0.1 };
            assert!(manifold.push(Contact::new(
                Point::new(angle.cos(), angle.sin(), 0.0),
                Vector::z_axis(),
                depth,
                i,
            )));
        }

        assert!(!manifold.push(Contact::new(Point::origin(), Vector::z_axis(), 0.0, 8)));

        manifold.reduce_to_four(&Vector::z());
        assert_eq!(manifold.len(), 4);
        assert_eq!(manifold.points[0].feature_id, 3);
        // The point opposite to the deepest one on the circle.
        assert_eq!(manifold.points[1].feature_id, 7);
        assert_relative_eq!(manifold.find_deepest_contact().unwrap().penetration_depth, 0.5);
    }
}
