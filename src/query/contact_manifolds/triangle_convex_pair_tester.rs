use arrayvec::ArrayVec;
use na::Unit;

use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON};
use crate::query::gjk::{self, CSOPoint, DilatedShape, GJKResult, VoronoiSimplex};
use crate::query::mpr::{self, SurfaceCast};
use crate::query::{Contact, ContactManifold, PairTesterSettings};
use crate::shape::{ConvexShape, FeatureId, SupportMap, Triangle};

/// Normals closer than this (in cosine) to the triangle normal are classified as face normals.
const FACE_NORMAL_COS_TOLERANCE: Real = 1.0e-4;

/// The test a [`TriangleConvexPairTester`] runs first on its next query.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum CollisionState {
    /// Signed distance between the triangle plane and the deepest point of the convex shape.
    #[default]
    Plane,
    /// Boolean GJK test on the shapes, margins included.
    ExternalSeparated,
    /// Closest points between the cores of the shapes.
    ExternalNear,
    /// Penetration depth of the overlapping shapes, computed with MPR.
    Deep,
}

enum NearOutcome {
    // The shapes, margins included, are farther than their margins.
    Separated,
    // The cores of the shapes overlap.
    Overlapping,
    // The contact is on the back of a one-sided triangle.
    Rejected,
    Contact(Contact, FeatureId),
}

/// The state persisted by a pair tester between two queries.
#[derive(Clone, Debug)]
pub(crate) struct TesterCore {
    pub settings: PairTesterSettings,
    state: CollisionState,
    escape_attempts: u32,
    local_separating_axis: Vector<Real>,
    simplex: VoronoiSimplex,
}

impl TesterCore {
    pub fn new(settings: PairTesterSettings) -> Self {
        Self {
            settings,
            state: CollisionState::Plane,
            escape_attempts: 0,
            local_separating_axis: Vector::zeros(),
            simplex: VoronoiSimplex::new(),
        }
    }

    pub fn reset(&mut self) {
        self.state = CollisionState::Plane;
        self.escape_attempts = 0;
        self.local_separating_axis = Vector::zeros();
        self.simplex.clear();
    }

    #[inline]
    pub fn state(&self) -> CollisionState {
        self.state
    }

    fn set_state(&mut self, state: CollisionState) {
        if state != self.state {
            log::trace!("Pair tester transition: {:?} -> {:?}", self.state, state);
            self.state = state;
            self.escape_attempts = 0;
        }
    }

    // Counts one escape attempt and switches to the plane test once enough were made.
    fn attempt_escape(&mut self) {
        self.escape_attempts += 1;

        if self.escape_attempts >= self.settings.escape_attempt_period {
            self.set_state(CollisionState::Plane);
        }
    }

    pub fn generate_contacts<S: ?Sized + ConvexShape>(
        &mut self,
        shape: &S,
        triangle: &Triangle,
        out: &mut ContactManifold,
    ) {
        // States only hand over to strictly more expensive ones within a single query.
        for _ in 0..4 {
            let next = match self.state {
                CollisionState::Plane => self.test_plane(shape, triangle, out),
                CollisionState::ExternalSeparated => self.test_external_separated(shape, triangle),
                CollisionState::ExternalNear => self.test_external_near(shape, triangle, out),
                CollisionState::Deep => {
                    self.test_deep(shape, triangle, out);
                    None
                }
            };

            match next {
                Some(state) => self.set_state(state),
                None => return,
            }
        }
    }

    fn test_plane<S: ?Sized + ConvexShape>(
        &mut self,
        shape: &S,
        triangle: &Triangle,
        out: &mut ContactManifold,
    ) -> Option<CollisionState> {
        let scaled_normal = triangle.front_scaled_normal();

        if scaled_normal.norm_squared() <= self.settings.degenerate_epsilon {
            log::debug!("Degenerate triangle: skipping the plane test.");
            return Some(CollisionState::ExternalSeparated);
        }

        let mut normal = Unit::new_normalize(scaled_normal);

        // The convex shape is at the origin.
        if !triangle.is_one_sided() && normal.dot(&triangle.a.coords) > 0.0 {
            normal = -normal;
        }

        let deepest = shape.local_support_point(&-*normal);
        let dist = normal.dot(&(deepest - triangle.a));
        let (proj, location) =
            triangle.project_local_point_and_get_location(&(deepest - *normal * dist));

        if !location.is_on_face() {
            // The edges and vertices of the triangle need a full convex test.
            return Some(CollisionState::ExternalSeparated);
        }

        let margin_sum = triangle.margin + shape.margin();

        if dist > margin_sum {
            return None;
        }

        let contact = Contact::from_surface_points(
            proj + *normal * triangle.margin,
            deepest - *normal * shape.margin(),
            normal,
            FeatureId::Face(0).to_contact_id(),
        );

        if contact.penetration_depth <= margin_sum {
            let _ = out.push(contact);
            return None;
        }

        // The core crossed the plane: the plane depth can't be trusted (e.g. the shape slid down
        // a cliff below this triangle). Keep it only if it isn't deeper than what the
        // closest-points test reports.
        match self.closest_points_contact(shape, triangle) {
            NearOutcome::Contact(near, _) => {
                if contact.penetration_depth - self.settings.plane_bias <= near.penetration_depth {
                    let _ = out.push(contact);
                } else {
                    self.set_state(CollisionState::ExternalNear);
                    let _ = out.push(near);
                }
                None
            }
            NearOutcome::Overlapping => Some(CollisionState::Deep),
            NearOutcome::Separated => {
                self.set_state(CollisionState::ExternalSeparated);
                None
            }
            NearOutcome::Rejected => {
                self.set_state(CollisionState::ExternalNear);
                None
            }
        }
    }

    fn test_external_separated<S: ?Sized + ConvexShape>(
        &mut self,
        shape: &S,
        triangle: &Triangle,
    ) -> Option<CollisionState> {
        let triangle_full = DilatedShape::with_margin(triangle);
        let shape_full = DilatedShape::with_margin(shape);

        if gjk::intersection_test(
            &Isometry::identity(),
            &triangle_full,
            &shape_full,
            &mut self.simplex,
            &mut self.local_separating_axis,
        ) {
            return Some(CollisionState::ExternalNear);
        }

        self.attempt_escape();
        None
    }

    fn test_external_near<S: ?Sized + ConvexShape>(
        &mut self,
        shape: &S,
        triangle: &Triangle,
        out: &mut ContactManifold,
    ) -> Option<CollisionState> {
        match self.closest_points_contact(shape, triangle) {
            NearOutcome::Overlapping => Some(CollisionState::Deep),
            NearOutcome::Separated => {
                self.set_state(CollisionState::ExternalSeparated);
                None
            }
            NearOutcome::Rejected => None,
            NearOutcome::Contact(contact, feature) => {
                let _ = out.push(contact);

                // Only face contacts can be handled by the plane test.
                if feature.is_face() {
                    self.attempt_escape();
                }

                None
            }
        }
    }

    fn closest_points_contact<S: ?Sized + ConvexShape>(
        &mut self,
        shape: &S,
        triangle: &Triangle,
    ) -> NearOutcome {
        let pos12 = Isometry::identity();
        let margin_sum = triangle.margin + shape.margin();

        let seed_dir = if self.local_separating_axis.norm_squared() > DEFAULT_EPSILON {
            self.local_separating_axis
        } else {
            // From the triangle centroid toward the convex shape.
            -triangle.center().coords
        };

        self.simplex
            .reset(CSOPoint::from_shapes(&pos12, triangle, shape, &seed_dir));

        match gjk::closest_points(&pos12, triangle, shape, margin_sum, &mut self.simplex) {
            GJKResult::Intersection => NearOutcome::Overlapping,
            GJKResult::NoIntersection(dir) => {
                self.local_separating_axis = *dir;
                NearOutcome::Separated
            }
            GJKResult::ClosestPoints(pt1, pt2, dir) => {
                let robustness_floor = gjk::eps_tol().sqrt() * 0.1;
                let (normal, dist) = match Unit::try_new_and_get(pt2 - pt1, robustness_floor) {
                    Some(res) => res,
                    None => return NearOutcome::Overlapping,
                };

                self.local_separating_axis = *dir;

                if dist > margin_sum {
                    return NearOutcome::Separated;
                }

                if triangle.is_one_sided() && normal.dot(&triangle.front_scaled_normal()) < 0.0 {
                    return NearOutcome::Rejected;
                }

                let feature = classify_point(triangle, &pt1);
                let contact = Contact::from_surface_points(
                    pt1 + *normal * triangle.margin,
                    pt2 - *normal * shape.margin(),
                    normal,
                    feature.to_contact_id(),
                );

                NearOutcome::Contact(contact, feature)
            }
        }
    }

    fn test_deep<S: ?Sized + ConvexShape>(
        &mut self,
        shape: &S,
        triangle: &Triangle,
        out: &mut ContactManifold,
    ) {
        let pos12 = Isometry::identity();
        let triangle_full = DilatedShape::with_margin(triangle);
        let shape_full = DilatedShape::with_margin(shape);
        let margin_sum = triangle.margin + shape.margin();

        let scaled_normal = triangle.front_scaled_normal();
        let front = if scaled_normal.norm_squared() > self.settings.degenerate_epsilon {
            Some(Unit::new_normalize(scaled_normal))
        } else {
            None
        };

        let center = triangle.center();
        let mut dirs: ArrayVec<Unit<Vector<Real>>, 5> = ArrayVec::new();

        for edge in triangle.edges() {
            let (proj, _) = edge.project_local_point_and_get_location(&center);
            if let Some(dir) = Unit::try_new(proj - center, DEFAULT_EPSILON) {
                dirs.push(dir);
            }
        }

        if let Some(front) = front {
            dirs.push(front);

            if !triangle.is_one_sided() {
                dirs.push(-front);
            }
        }

        if dirs.is_empty() {
            log::debug!("Degenerate triangle: casting from its centroid toward the shape.");
            let dir = Unit::try_new(-center.coords, DEFAULT_EPSILON).unwrap_or(Vector::y_axis());
            dirs.push(dir);
        }

        let mut best: Option<SurfaceCast> = None;

        for dir in &dirs {
            let cast = mpr::local_surface_cast(&pos12, &triangle_full, &shape_full, dir)
                .and_then(|cast| fix_sidedness(triangle, front, cast, &triangle_full, &shape_full));

            if let Some(cast) = cast {
                if best.map_or(true, |best| cast.normal_depth() < best.normal_depth()) {
                    best = Some(cast);
                }
            }
        }

        if let Some(initial) = best {
            let mut refined = mpr::refine_penetration(
                &pos12,
                &triangle_full,
                &shape_full,
                &initial,
                self.settings.mpr_refinement_iterations,
            );

            if violates_sidedness(triangle, front, &refined.normal) {
                refined = initial;
            }

            let feature = classify_normal(triangle, &refined.normal);
            let _ = out.push(Contact::from_surface_points(
                refined.point1,
                refined.point2,
                refined.normal,
                feature.to_contact_id(),
            ));

            if refined.normal_depth() < margin_sum {
                self.set_state(CollisionState::ExternalNear);
            }
        } else {
            log::debug!("No surface cast succeeded: leaving the deep state.");
            self.set_state(CollisionState::ExternalNear);
        }

        if let Some(contact) = inner_sphere_contact(shape, triangle, front) {
            let _ = out.push(contact);
        }
    }
}

fn violates_sidedness(
    triangle: &Triangle,
    front: Option<Unit<Vector<Real>>>,
    normal: &Unit<Vector<Real>>,
) -> bool {
    match front {
        Some(front) => triangle.is_one_sided() && normal.dot(&front) < 0.0,
        None => false,
    }
}

// Removes from the normal of `cast` the component pointing to the back of a one-sided triangle.
fn fix_sidedness<G1, G2>(
    triangle: &Triangle,
    front: Option<Unit<Vector<Real>>>,
    cast: SurfaceCast,
    g1: &G1,
    g2: &G2,
) -> Option<SurfaceCast>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    if !violates_sidedness(triangle, front, &cast.normal) {
        return Some(cast);
    }

    let front = front?;
    let normal = Unit::try_new(
        *cast.normal - *front * cast.normal.dot(&front),
        DEFAULT_EPSILON,
    )?;
    let point1 = g1.local_support_point_toward(&normal);
    let point2 = g2.local_support_point_toward(&-normal);
    let depth = (point1 - point2).dot(&normal);

    if depth <= 0.0 {
        return None;
    }

    Some(SurfaceCast {
        depth,
        normal,
        point1,
        point2,
        dir: normal,
    })
}

// The ball of radius `shape.minimum_radius()` at the shape origin, against the triangle interior.
fn inner_sphere_contact<S: ?Sized + ConvexShape>(
    shape: &S,
    triangle: &Triangle,
    front: Option<Unit<Vector<Real>>>,
) -> Option<Contact> {
    let radius = shape.minimum_radius();
    let (proj, location) = triangle.project_local_point_and_get_location(&Point::origin());

    if !location.is_on_face() {
        return None;
    }

    let (normal, dist) = match Unit::try_new_and_get(-proj.coords, DEFAULT_EPSILON) {
        Some(res) => res,
        None => (front?, 0.0),
    };

    if violates_sidedness(triangle, front, &normal) || dist >= radius + triangle.margin {
        return None;
    }

    Some(Contact::from_surface_points(
        proj + *normal * triangle.margin,
        Point::origin() - *normal * radius,
        normal,
        FeatureId::INNER_SPHERE,
    ))
}

/// The feature of `triangle` whose voronoi region contains `point`.
pub fn classify_point(triangle: &Triangle, point: &Point<Real>) -> FeatureId {
    triangle.project_local_point_and_get_feature(point).1
}

/// The feature of `triangle` whose normal cone contains `normal`.
///
/// `normal` points away from the triangle. Normals computed by MPR are approximate: the face
/// is selected if `normal` is almost parallel to the triangle normal, and otherwise the
/// support feature of the triangle along `normal`, with a tolerance relative to its size.
pub fn classify_normal(triangle: &Triangle, normal: &Unit<Vector<Real>>) -> FeatureId {
    let scaled_normal = triangle.scaled_normal();
    let sq_norm = scaled_normal.norm_squared();

    if sq_norm > DEFAULT_EPSILON * DEFAULT_EPSILON {
        let cos = scaled_normal.dot(normal) / sq_norm.sqrt();

        if cos.abs() >= 1.0 - FACE_NORMAL_COS_TOLERANCE {
            return FeatureId::Face(if cos >= 0.0 { 0 } else { 1 });
        }
    }

    let vertices = triangle.vertices();
    let dots = vertices.map(|v| v.coords.dot(normal));
    let max = dots[0].max(dots[1]).max(dots[2]);
    let size = triangle
        .edges()
        .iter()
        .map(|e| e.length())
        .fold(0.0, Real::max);
    let tolerance = (size * 1.0e-3).max(DEFAULT_EPSILON);

    let supporting = dots.map(|d| d >= max - tolerance);

    match supporting {
        [true, true, true] => FeatureId::Face(0),
        [true, true, false] => FeatureId::Edge(0),
        [false, true, true] => FeatureId::Edge(1),
        [true, false, true] => FeatureId::Edge(2),
        [true, false, false] => FeatureId::Vertex(0),
        [false, true, false] => FeatureId::Vertex(1),
        _ => FeatureId::Vertex(2),
    }
}

/// A persistent contact generator between a convex shape and triangles.
///
/// Triangles are given in the local-space of the convex shape, and contact normals point from
/// the triangle toward the convex shape. The tester remembers which test concluded last time
/// (see [`CollisionState`]) and starts from there on the next query, escalating to more
/// expensive tests when a cheap one is inconclusive.
#[derive(Clone, Debug)]
pub struct TriangleConvexPairTester<S> {
    shape: Option<S>,
    pub(crate) core: TesterCore,
}

impl<S: ConvexShape> TriangleConvexPairTester<S> {
    /// Creates a tester for `shape` with the default settings.
    pub fn new(shape: S) -> Self {
        Self::with_settings(shape, PairTesterSettings::default())
    }

    /// Creates a tester for `shape` with the given settings.
    pub fn with_settings(shape: S, settings: PairTesterSettings) -> Self {
        Self {
            shape: Some(shape),
            core: TesterCore::new(settings),
        }
    }

    /// The test that will run first on the next query.
    #[inline]
    pub fn state(&self) -> CollisionState {
        self.core.state()
    }

    /// The convex shape of this tester, if it wasn't cleaned up.
    #[inline]
    pub fn shape(&self) -> Option<&S> {
        self.shape.as_ref()
    }

    /// The settings of this tester.
    #[inline]
    pub fn settings(&self) -> &PairTesterSettings {
        &self.core.settings
    }

    /// Resets this tester to the plane test, for a new convex shape.
    pub fn reinitialize(&mut self, shape: S) {
        self.shape = Some(shape);
        self.core.reset();
    }

    /// Resets this tester and drops its shape.
    ///
    /// A cleaned-up tester generates no contact until it is reinitialized.
    pub fn cleanup(&mut self) {
        self.shape = None;
        self.core.reset();
    }

    /// Computes the contacts between the convex shape and `triangle`.
    ///
    /// The triangle is expressed in the local-space of the convex shape. An empty manifold
    /// means the shapes don't touch.
    pub fn generate_contacts(&mut self, triangle: &Triangle) -> ContactManifold {
        let mut manifold = ContactManifold::new();

        match &self.shape {
            Some(shape) => self.core.generate_contacts(shape, triangle, &mut manifold),
            None => log::debug!("Contacts requested from a cleaned-up pair tester."),
        }

        manifold
    }
}
