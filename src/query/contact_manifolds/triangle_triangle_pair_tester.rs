use crate::math::{Isometry, Real, Vector};
use crate::query::contact_manifolds::triangle_convex_pair_tester::TesterCore;
use crate::query::{CollisionState, ContactManifold, PairTesterSettings};
use crate::shape::Triangle;

/// Contacts whose normal is farther than this (in cosine) from the back of the first triangle
/// are discarded when the first triangle is one-sided.
const ONE_SIDED_FILTER_EPSILON: Real = 1.0e-4;

/// A persistent contact generator between a triangle and other triangles.
///
/// The first triangle plays the role of the convex shape of a
/// [`crate::query::TriangleConvexPairTester`]. The convex path only accounts for the sidedness
/// of the other triangle: contacts hitting the back of the first triangle are filtered out
/// afterwards.
#[derive(Clone, Debug)]
pub struct TriangleTrianglePairTester {
    // The first triangle, translated so its centroid is at the origin.
    centered: Option<(Triangle, Vector<Real>)>,
    core: TesterCore,
}

fn center_triangle(triangle: Triangle) -> (Triangle, Vector<Real>) {
    let shift = triangle.center().coords;
    (
        triangle.transformed(&Isometry::translation(-shift.x, -shift.y, -shift.z)),
        shift,
    )
}

impl TriangleTrianglePairTester {
    /// Creates a tester for `triangle` with the default settings.
    pub fn new(triangle: Triangle) -> Self {
        Self::with_settings(triangle, PairTesterSettings::default())
    }

    /// Creates a tester for `triangle` with the given settings.
    pub fn with_settings(triangle: Triangle, settings: PairTesterSettings) -> Self {
        Self {
            centered: Some(center_triangle(triangle)),
            core: TesterCore::new(settings),
        }
    }

    /// The test that will run first on the next query.
    #[inline]
    pub fn state(&self) -> CollisionState {
        self.core.state()
    }

    /// The settings of this tester.
    #[inline]
    pub fn settings(&self) -> &PairTesterSettings {
        &self.core.settings
    }

    /// Resets this tester to the plane test, for a new triangle.
    pub fn reinitialize(&mut self, triangle: Triangle) {
        self.centered = Some(center_triangle(triangle));
        self.core.reset();
    }

    /// Resets this tester and drops its triangle.
    pub fn cleanup(&mut self) {
        self.centered = None;
        self.core.reset();
    }

    /// Computes the contacts between the first triangle and `triangle`.
    ///
    /// `triangle` is expressed in the local-space of the first triangle.
    pub fn generate_contacts(&mut self, triangle: &Triangle) -> ContactManifold {
        let mut manifold = ContactManifold::new();

        let Some((first, shift)) = &self.centered else {
            log::debug!("Contacts requested from a cleaned-up pair tester.");
            return manifold;
        };

        let to_centered = Isometry::translation(-shift.x, -shift.y, -shift.z);
        let triangle = triangle.transformed(&to_centered);
        self.core.generate_contacts(first, &triangle, &mut manifold);

        let front = first.front_normal();
        manifold.points.retain(|contact| {
            contact.position += *shift;

            match front {
                Some(front) if first.is_one_sided() => {
                    contact.normal.dot(&front) <= ONE_SIDED_FILTER_EPSILON
                }
                _ => true,
            }
        });

        manifold
    }
}
