//! The Gilbert-Johnson-Keerthi distance algorithm.

use na::Unit;

use crate::math::{Isometry, Point, Real, Vector};
use crate::query::gjk::{CSOPoint, SimplexState, VoronoiSimplex};
use crate::shape::SupportMap;

/// Results of the GJK algorithm.
///
/// All points and vectors are expressed in the local-space of the first shape.
#[derive(Clone, Debug, PartialEq)]
pub enum GJKResult {
    /// The shapes are intersecting.
    Intersection,
    /// The closest points on the first and second shape, and the unit direction from the
    /// first shape toward the second one.
    ClosestPoints(Point<Real>, Point<Real>, Unit<Vector<Real>>),
    /// The shapes are farther apart than the requested maximum distance. Contains a
    /// separating direction from the first shape toward the second one.
    NoIntersection(Unit<Vector<Real>>),
}

/// The absolute tolerance used by the GJK algorithm.
pub fn eps_tol() -> Real {
    let _eps = crate::math::DEFAULT_EPSILON;
    _eps * 10.0
}

const MAX_ITERATIONS: usize = 100;

/// Computes the closest points between two shapes.
///
/// The simplex is used as-is if it is not empty, which lets callers warm-start the search
/// with a single support point along a previously found axis. Otherwise it is seeded along
/// the `x` axis.
pub fn closest_points<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    max_dist: Real,
    simplex: &mut VoronoiSimplex,
) -> GJKResult
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let _eps_tol: Real = eps_tol();
    let _eps_rel: Real = _eps_tol.sqrt();

    if simplex.state() == SimplexState::Empty {
        simplex.reset(CSOPoint::from_shapes(pos12, g1, g2, &Vector::x()));
    }

    let mut proj = simplex.project_origin_and_reduce();

    let mut old_dir;

    if let Some(proj_dir) = Unit::try_new(proj.coords, 0.0) {
        old_dir = -proj_dir;
    } else {
        return GJKResult::Intersection;
    }

    let mut max_bound = Real::MAX;
    let mut dir;
    let mut niter = 0;

    loop {
        let old_max_bound = max_bound;

        if let Some((new_dir, dist)) = Unit::try_new_and_get(-proj.coords, _eps_tol) {
            dir = new_dir;
            max_bound = dist;
        } else {
            // The origin is on the simplex.
            return GJKResult::Intersection;
        }

        if max_bound >= old_max_bound {
            // Upper bounds inconsistencies: the previous simplex was better.
            let (p1, p2) = result(simplex, true);
            return GJKResult::ClosestPoints(p1, p2, old_dir);
        }

        let cso_point = CSOPoint::from_shapes(pos12, g1, g2, &dir);
        let min_bound = -dir.dot(&cso_point.point.coords);

        if !min_bound.is_finite() {
            log::debug!("GJK: non-finite support point, aborting.");
            return GJKResult::NoIntersection(dir);
        }

        if min_bound > max_dist {
            return GJKResult::NoIntersection(dir);
        } else if max_bound - min_bound <= _eps_rel * max_bound {
            // The distance found has a good enough precision.
            let (p1, p2) = result(simplex, false);
            return GJKResult::ClosestPoints(p1, p2, dir);
        }

        if !simplex.add_point(cso_point) {
            let (p1, p2) = result(simplex, false);
            return GJKResult::ClosestPoints(p1, p2, dir);
        }

        old_dir = dir;
        proj = simplex.project_origin_and_reduce();

        if simplex.state() == SimplexState::Tetrahedron {
            if min_bound >= _eps_tol {
                let (p1, p2) = result(simplex, true);
                return GJKResult::ClosestPoints(p1, p2, old_dir);
            } else {
                return GJKResult::Intersection; // Point inside of the cso.
            }
        }

        niter += 1;

        if niter == MAX_ITERATIONS {
            log::debug!(
                "GJK: closest points did not converge after {} iterations.",
                MAX_ITERATIONS
            );
            let (p1, p2) = result(simplex, false);
            return GJKResult::ClosestPoints(p1, p2, dir);
        }
    }
}

/// Tests if two shapes intersect.
///
/// `axis` seeds the search and receives a separating direction (from the first shape toward
/// the second one) when the shapes are disjoint. Passing back the same axis next frame
/// usually terminates the test after a single support-point evaluation.
pub fn intersection_test<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    simplex: &mut VoronoiSimplex,
    axis: &mut Vector<Real>,
) -> bool
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let _eps_tol: Real = eps_tol();

    let mut dir = match Unit::try_new(*axis, _eps_tol) {
        Some(dir) => dir,
        None => Vector::x_axis(),
    };

    let first = CSOPoint::from_shapes_toward(pos12, g1, g2, &dir);

    if first.point.coords.dot(&dir) < 0.0 {
        *axis = *dir;
        return false;
    }

    simplex.reset(first);

    for _ in 0..MAX_ITERATIONS {
        let proj = simplex.project_origin_and_reduce();

        if simplex.state() == SimplexState::Tetrahedron {
            return true;
        }

        dir = match Unit::try_new(-proj.coords, _eps_tol) {
            Some(dir) => dir,
            // The origin is on the simplex.
            None => return true,
        };

        let support = CSOPoint::from_shapes_toward(pos12, g1, g2, &dir);

        if support.point.coords.dot(&dir) < 0.0 {
            *axis = *dir;
            return false;
        }

        if !simplex.add_point(support) {
            // No progress: the projection is the closest point and it isn't the origin.
            *axis = *dir;
            return false;
        }
    }

    log::debug!(
        "GJK: intersection test did not converge after {} iterations.",
        MAX_ITERATIONS
    );
    *axis = *dir;
    false
}

fn result(simplex: &VoronoiSimplex, prev: bool) -> (Point<Real>, Point<Real>) {
    let mut res = (Point::origin(), Point::origin());
    if prev {
        for i in 0..simplex.prev_num_vertices() {
            let coord = simplex.prev_proj_coord(i);
            let point = simplex.prev_point(i);
            res.0 += point.orig1.coords * coord;
            res.1 += point.orig2.coords * coord;
        }

        res
    } else {
        for i in 0..simplex.num_vertices() {
            let coord = simplex.proj_coord(i);
            let point = simplex.point(i);
            res.0 += point.orig1.coords * coord;
            res.1 += point.orig2.coords * coord;
        }

        res
    }
}
