//! Minkowski Portal Refinement, as described by Gary Snethen's XenoCollide.
//!
//! The portal search is written against a ray from an interior point `v0` toward the origin.
//! To cast from the origin along `dir` instead, every support point is shifted by `-dir`:
//! the ray origin becomes `v0 = -dir` and its target the (shifted) origin. The sign of every
//! portal test only depends on which side of the ray line the portal vertices lie, so the
//! length of the shift doesn't matter.

use na::Unit;

use crate::math::{Isometry, Point, Real, Vector};
use crate::query::gjk::{self, CSOPoint};
use crate::shape::SupportMap;

const MAX_PORTAL_DISCOVERY_ITERATIONS: usize = 32;
const MAX_PORTAL_REFINEMENT_ITERATIONS: usize = 64;

/// The result of a surface cast on the Minkowski difference of two shapes.
///
/// Everything is expressed in the local-space of the first shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SurfaceCast {
    /// The distance from the origin to the boundary of the Minkowski difference, along the
    /// cast direction. This is how far the second shape must move along the cast direction
    /// for the shapes to stop overlapping.
    pub depth: Real,
    /// The unit normal of the boundary where the ray exits, pointing from the first shape
    /// toward the second one.
    pub normal: Unit<Vector<Real>>,
    /// The deepest point of the first shape.
    pub point1: Point<Real>,
    /// The deepest point of the second shape.
    pub point2: Point<Real>,
    /// The direction this cast was performed along.
    pub dir: Unit<Vector<Real>>,
}

impl SurfaceCast {
    /// The penetration depth measured along the normal instead of the cast direction.
    #[inline]
    pub fn normal_depth(&self) -> Real {
        self.depth * self.normal.dot(&self.dir)
    }
}

fn support<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    dir: &Vector<Real>,
    shift: &Vector<Real>,
) -> CSOPoint
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    CSOPoint::from_shapes(pos12, g1, g2, dir).translate(shift)
}

/// Casts a ray from the origin of the Minkowski difference `g1 - pos12 * g2` along `dir`, and
/// returns where it exits.
///
/// The shapes must overlap, i.e., the origin must be inside of the Minkowski difference.
/// Returns `None` if that is not the case, or if the portal degenerates.
pub fn local_surface_cast<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    dir: &Unit<Vector<Real>>,
) -> Option<SurfaceCast>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let eps = gjk::eps_tol();
    let tolerance = eps.sqrt() * 0.1;
    let shift = -dir.into_inner();
    let v0 = shift;

    /*
     * Portal discovery.
     */
    let mut v1 = support(pos12, g1, g2, dir, &shift);

    if v1.orig1.coords.dot(dir) - v1.orig2.coords.dot(dir) <= 0.0 {
        // The origin isn't inside of the Minkowski difference.
        return None;
    }

    let mut n = v1.point.coords.cross(&v0);

    if n.norm_squared() <= eps * eps {
        // The support point lies on the ray: it is where the ray exits.
        let exit = v1.point.coords - shift;
        return Some(SurfaceCast {
            depth: exit.dot(dir),
            normal: *dir,
            point1: v1.orig1,
            point2: v1.orig2,
            dir: *dir,
        });
    }

    let mut v2 = support(pos12, g1, g2, &n, &shift);
    n = (v1.point.coords - v0).cross(&(v2.point.coords - v0));

    if n.norm_squared() <= eps * eps {
        log::debug!("MPR: degenerate initial portal.");
        return None;
    }

    if n.dot(&v0) > 0.0 {
        core::mem::swap(&mut v1, &mut v2);
        n = -n;
    }

    let mut v3;
    let mut niter = 0;

    loop {
        v3 = support(pos12, g1, g2, &n, &shift);

        if v1.point.coords.cross(&v3.point.coords).dot(&v0) < 0.0 {
            // The ray is outside of the plane (v0, v1, v3): replace v2.
            v2 = v3;
            n = (v1.point.coords - v0).cross(&(v3.point.coords - v0));
        } else if v3.point.coords.cross(&v2.point.coords).dot(&v0) < 0.0 {
            // The ray is outside of the plane (v0, v3, v2): replace v1.
            v1 = v3;
            n = (v3.point.coords - v0).cross(&(v2.point.coords - v0));
        } else {
            break;
        }

        niter += 1;
        if niter == MAX_PORTAL_DISCOVERY_ITERATIONS {
            log::debug!(
                "MPR: portal discovery did not converge after {} iterations.",
                MAX_PORTAL_DISCOVERY_ITERATIONS
            );
            return None;
        }
    }

    /*
     * Portal refinement.
     */
    let mut niter = 0;

    let normal = loop {
        let scaled_n = (v2.point - v1.point).cross(&(v3.point - v1.point));
        let normal = match Unit::try_new(scaled_n, eps * eps) {
            Some(normal) => normal,
            None => {
                log::debug!("MPR: degenerate portal.");
                return None;
            }
        };

        let v4 = support(pos12, g1, g2, &normal, &shift);

        if (v4.point - v3.point).dot(&normal) <= tolerance {
            break normal;
        }

        let temp = v4.point.coords.cross(&v0);

        if v1.point.coords.dot(&temp) > 0.0 {
            if v2.point.coords.dot(&temp) > 0.0 {
                v1 = v4;
            } else {
                v3 = v4;
            }
        } else if v3.point.coords.dot(&temp) > 0.0 {
            v2 = v4;
        } else {
            v1 = v4;
        }

        niter += 1;
        if niter == MAX_PORTAL_REFINEMENT_ITERATIONS {
            log::debug!(
                "MPR: portal refinement did not converge after {} iterations.",
                MAX_PORTAL_REFINEMENT_ITERATIONS
            );
            return None;
        }
    };

    let ndir = normal.dot(dir);

    if ndir <= eps {
        log::debug!("MPR: the ray is parallel to the final portal.");
        return None;
    }

    // Unshifted portal vertices.
    let p1 = v1.point.coords - shift;
    let p2 = v2.point.coords - shift;
    let p3 = v3.point.coords - shift;
    let depth = normal.dot(&p1) / ndir;
    let exit = dir.into_inner() * depth;

    let scaled_n = (p2 - p1).cross(&(p3 - p1));
    let sqnorm = scaled_n.norm_squared();
    let l1 = (p2 - exit).cross(&(p3 - exit)).dot(&scaled_n) / sqnorm;
    let l2 = (p3 - exit).cross(&(p1 - exit)).dot(&scaled_n) / sqnorm;
    let bcoords = [l1, l2, 1.0 - l1 - l2];
    let witness = CSOPoint::combine(&[v1, v2, v3], &bcoords);

    Some(SurfaceCast {
        depth,
        normal,
        point1: witness.orig1,
        point2: witness.orig2,
        dir: *dir,
    })
}

/// Improves a surface cast by casting again along its normal, as long as this strictly
/// decreases the penetration depth.
pub fn refine_penetration<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    initial: &SurfaceCast,
    max_iters: usize,
) -> SurfaceCast
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let mut best = *initial;

    for _ in 0..max_iters {
        match local_surface_cast(pos12, g1, g2, &best.normal) {
            Some(cast) if cast.depth < best.normal_depth() => best = cast,
            _ => break,
        }
    }

    best
}

#[cfg(test)]
mod test {
    use super::{local_surface_cast, refine_penetration};
    use crate::math::{Isometry, Vector};
    use crate::query::gjk::DilatedShape;
    use crate::shape::{Ball, Cuboid};
    use na::Unit;

    #[test]
    fn surface_cast_between_overlapping_balls() {
        let ball = Ball::new(1.0);
        let full = DilatedShape::with_margin(&ball);
        let pos12 = Isometry::translation(1.5, 0.0, 0.0);

        let cast = local_surface_cast(&pos12, &full, &full, &Vector::x_axis()).unwrap();
        assert_relative_eq!(cast.depth, 0.5, epsilon = 1.0e-3);
        assert_relative_eq!(*cast.normal, Vector::x(), epsilon = 1.0e-2);
        assert_relative_eq!(cast.point1.x, 1.0, epsilon = 1.0e-2);
        assert_relative_eq!(cast.point2.x, 0.5, epsilon = 1.0e-2);
    }

    #[test]
    fn surface_cast_between_overlapping_cuboids() {
        let c = Cuboid::new(Vector::repeat(1.0));
        let pos12 = Isometry::translation(1.8, 0.3, 0.1);

        let dir = Unit::new_normalize(Vector::new(1.0, 0.2, 0.0));
        let cast = local_surface_cast(&pos12, &c, &c, &dir).unwrap();
        assert!(cast.depth > 0.2);

        let refined = refine_penetration(&pos12, &c, &c, &cast, 5);
        assert_relative_eq!(refined.normal_depth(), 0.2, epsilon = 1.0e-3);
        assert_relative_eq!(*refined.normal, Vector::x(), epsilon = 1.0e-3);
    }

    #[test]
    fn surface_cast_rejects_separated_shapes() {
        let c = Cuboid::new(Vector::repeat(1.0));
        let pos12 = Isometry::translation(3.0, 0.0, 0.0);
        assert!(local_surface_cast(&pos12, &c, &c, &Vector::x_axis()).is_none());
    }
}
