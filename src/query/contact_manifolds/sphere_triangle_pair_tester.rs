use na::Unit;

use crate::math::{Point, Vector, DEFAULT_EPSILON};
use crate::query::{Contact, ContactManifold, PairTesterSettings};
use crate::shape::{Ball, Triangle};

/// Computes the contact between a ball centered at the origin and a triangle.
///
/// The normal points from the triangle toward the ball. Returns `None` if the shapes, margins
/// included, don't touch, or if the ball is behind a one-sided triangle.
pub fn contact_ball_triangle(ball: &Ball, triangle: &Triangle) -> Option<Contact> {
    let (proj, location) = triangle.project_local_point_and_get_location(&Point::origin());
    let (normal, dist) = match Unit::try_new_and_get(-proj.coords, DEFAULT_EPSILON) {
        Some(res) => res,
        None => {
            // The center is on the triangle.
            let normal = triangle
                .front_normal()
                .or_else(|| Unit::try_new(-triangle.center().coords, DEFAULT_EPSILON))
                .unwrap_or(Vector::y_axis());
            (normal, 0.0)
        }
    };

    if dist > DEFAULT_EPSILON
        && triangle.is_one_sided()
        && triangle.front_scaled_normal().dot(&normal) < 0.0
    {
        return None;
    }

    if dist > ball.radius + triangle.margin {
        return None;
    }

    Some(Contact::from_surface_points(
        proj + *normal * triangle.margin,
        Point::origin() - *normal * ball.radius,
        normal,
        location.feature_id().to_contact_id(),
    ))
}

/// A contact generator between a ball and triangles, in closed form.
///
/// This needs no persistent state, but exposes the same interface as the other pair testers.
/// Its settings are unused by the closed-form test and are only carried along so that a
/// [`crate::query::PairTester`] switching to another kind keeps them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SphereTrianglePairTester {
    ball: Option<Ball>,
    settings: PairTesterSettings,
}

impl SphereTrianglePairTester {
    /// Creates a tester for `ball` with the default settings.
    pub fn new(ball: Ball) -> Self {
        Self::with_settings(ball, PairTesterSettings::default())
    }

    /// Creates a tester for `ball` with the given settings.
    pub fn with_settings(ball: Ball, settings: PairTesterSettings) -> Self {
        Self {
            ball: Some(ball),
            settings,
        }
    }

    /// The settings of this tester.
    #[inline]
    pub fn settings(&self) -> &PairTesterSettings {
        &self.settings
    }

    /// The ball of this tester, if it wasn't cleaned up.
    #[inline]
    pub fn ball(&self) -> Option<&Ball> {
        self.ball.as_ref()
    }

    /// Sets the ball of this tester.
    pub fn reinitialize(&mut self, ball: Ball) {
        self.ball = Some(ball);
    }

    /// Drops the ball of this tester.
    pub fn cleanup(&mut self) {
        self.ball = None;
    }

    /// Computes the contact between the ball and `triangle`, given in the local-space of the ball.
    pub fn generate_contacts(&mut self, triangle: &Triangle) -> ContactManifold {
        let mut manifold = ContactManifold::new();

        if let Some(contact) = self
            .ball
            .as_ref()
            .and_then(|ball| contact_ball_triangle(ball, triangle))
        {
            let _ = manifold.push(contact);
        }

        manifold
    }
}

#[cfg(test)]
mod test {
    use super::{contact_ball_triangle, SphereTrianglePairTester};
    use crate::math::{Isometry, Point, Real, Vector};
    use crate::shape::{Ball, FeatureId, Triangle, TriangleSidedness};

    fn unit_triangle(z: Real) -> Triangle {
        Triangle::new(
            Point::new(0.0, 0.0, z),
            Point::new(1.0, 0.0, z),
            Point::new(0.0, 1.0, z),
        )
    }

    #[test]
    fn ball_resting_on_triangle_vertex() {
        // The ball center is 0.4 above the first vertex.
        let contact = contact_ball_triangle(&Ball::new(0.5), &unit_triangle(-0.4)).unwrap();

        assert_relative_eq!(contact.penetration_depth, 0.1, epsilon = 1.0e-5);
        assert_relative_eq!(*contact.normal, Vector::z(), epsilon = 1.0e-6);
        assert_eq!(contact.feature_id, FeatureId::Vertex(0).to_contact_id());
    }

    #[test]
    fn ball_above_triangle_face() {
        let tri = unit_triangle(-0.3);
        let mut tester = SphereTrianglePairTester::new(Ball::new(0.5));
        let tri = tri.transformed(&Isometry::translation(-0.2, -0.2, 0.0));

        let manifold = tester.generate_contacts(&tri);
        assert_eq!(manifold.len(), 1);
        assert_relative_eq!(manifold.points[0].penetration_depth, 0.2, epsilon = 1.0e-5);
        assert_eq!(
            manifold.points[0].feature_id,
            FeatureId::Face(0).to_contact_id()
        );
    }

    #[test]
    fn ball_behind_one_sided_triangle() {
        let tri = unit_triangle(-0.3).with_sidedness(TriangleSidedness::Clockwise);
        assert!(contact_ball_triangle(&Ball::new(0.5), &tri).is_none());

        let tri = unit_triangle(-0.3).with_sidedness(TriangleSidedness::Counterclockwise);
        assert!(contact_ball_triangle(&Ball::new(0.5), &tri).is_some());
    }

    #[test]
    fn distant_ball_and_cleaned_up_tester() {
        assert!(contact_ball_triangle(&Ball::new(0.5), &unit_triangle(-2.0)).is_none());

        let mut tester = SphereTrianglePairTester::new(Ball::new(0.5));
        tester.cleanup();
        assert!(tester.generate_contacts(&unit_triangle(0.0)).is_empty());
    }
}
