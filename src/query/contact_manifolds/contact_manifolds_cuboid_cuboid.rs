use arrayvec::ArrayVec;
use na::Point2;

use crate::math::{Isometry, Point, Real, Vector};
use crate::query::closest_points::closest_points_segment_segment_parameters;
use crate::query::sat::{self, SatAxis, SatResult};
use crate::query::{Contact, ContactManifold, CuboidCuboidSettings};
use crate::shape::{Cuboid, CuboidEdge, CuboidFace};
use crate::utils::{self, WBasis};

/// Offset of the feature ids of contacts generated by a vertex of the first box.
const VERTEX1_ID_OFFSET: i32 = 10_000;
/// Offset of the feature ids of contacts generated by a vertex of the second box.
const VERTEX2_ID_OFFSET: i32 = 10_008;
/// Projected face edges whose cross product is below this are parallel and never clipped
/// against each other.
const CLIP_PARALLEL_EPSILON: Real = 1.0e-8;

/// Feature id of a contact between an edge of the first box and an edge of the second one.
///
/// Only depends on the vertex codes of both edges, so the same pair of physical edges always
/// gets the same id.
pub fn cuboid_edge_edge_feature_id(vids1: (u8, u8), vids2: (u8, u8)) -> i32 {
    let (lo1, hi1) = (vids1.0.min(vids1.1) as i32, vids1.0.max(vids1.1) as i32);
    let (lo2, hi2) = (vids2.0.min(vids2.1) as i32, vids2.0.max(vids2.1) as i32);
    2 * lo1 + 17 * hi1 + 137 * lo2 + 1097 * hi2
}

/// Computes the contacts between two boxes positioned in world-space.
///
/// The manifold is cleared, then filled with at most four contacts (in world-space, normals
/// pointing from the first box toward the second one) if the boxes overlap. The separating
/// axis test result is returned in any case.
pub fn contact_manifold_cuboid_cuboid(
    pos1: &Isometry<Real>,
    cuboid1: &Cuboid,
    pos2: &Isometry<Real>,
    cuboid2: &Cuboid,
    settings: &CuboidCuboidSettings,
    manifold: &mut ContactManifold,
) -> SatResult {
    let pos12 = pos1.inv_mul(pos2);
    let mut sep = local_contact_manifold_cuboid_cuboid(&pos12, cuboid1, cuboid2, settings, manifold);

    for contact in &mut manifold.points {
        contact.position = pos1 * contact.position;
        contact.normal = pos1 * contact.normal;
    }

    sep.axis = pos1 * sep.axis;
    sep
}

/// Computes the contacts between two boxes, in the local-space of the first box.
pub fn local_contact_manifold_cuboid_cuboid(
    pos12: &Isometry<Real>,
    cuboid1: &Cuboid,
    cuboid2: &Cuboid,
    settings: &CuboidCuboidSettings,
    manifold: &mut ContactManifold,
) -> SatResult {
    manifold.clear();

    let sep = sat::local_cuboid_cuboid_penetration(pos12, cuboid1, cuboid2, settings);

    if !sep.colliding {
        return sep;
    }

    match sep.feature {
        SatAxis::Edges(i, j) => {
            edge_edge_contacts(pos12, cuboid1, cuboid2, &sep.axis, i, j, manifold)
        }
        SatAxis::FaceA(_) | SatAxis::FaceB(_) => {
            face_face_contacts(pos12, cuboid1, cuboid2, &sep.axis, settings, manifold)
        }
    }

    if manifold.len() > 4 {
        manifold.reduce_to_four(&sep.axis);
    }

    sep
}

// The two edges of `cuboid` parallel to its `axis`-th local axis that reach the farthest
// along `dir`, the most extreme first.
fn extreme_parallel_edges(cuboid: &Cuboid, axis: usize, dir: &Vector<Real>) -> [CuboidEdge; 2] {
    let (j, k) = match axis {
        0 => (1, 2),
        1 => (0, 2),
        2 => (0, 1),
        _ => unreachable!("Invalid cuboid edge axis."),
    };

    let he = &cuboid.half_extents;
    let mut candidates = [(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)];
    let support = |s: &(Real, Real)| s.0 * he[j] * dir[j] + s.1 * he[k] * dir[k];
    candidates.sort_by(|a, b| support(b).total_cmp(&support(a)));

    [
        cuboid.edge(axis, [candidates[0].0, candidates[0].1]),
        cuboid.edge(axis, [candidates[1].0, candidates[1].1]),
    ]
}

fn edge_edge_contacts(
    pos12: &Isometry<Real>,
    cuboid1: &Cuboid,
    cuboid2: &Cuboid,
    axis: &Vector<Real>,
    i: usize,
    j: usize,
    manifold: &mut ContactManifold,
) {
    let Some(normal) = na::Unit::try_new(*axis, crate::math::DEFAULT_EPSILON) else {
        return;
    };

    let edges1 = extreme_parallel_edges(cuboid1, i, axis);
    let local_axis2 = pos12.inverse_transform_vector(&-axis);
    let mut edges2 = extreme_parallel_edges(cuboid2, j, &local_axis2);
    edges2.iter_mut().for_each(|e| e.transform_by(pos12));

    let mut fallback = None;

    for (k1, e1) in edges1.iter().enumerate() {
        for (k2, e2) in edges2.iter().enumerate() {
            let (s, t) = closest_points_segment_segment_parameters(
                (&e1.vertices[0], &e1.vertices[1]),
                (&e2.vertices[0], &e2.vertices[1]),
            );
            let p1 = e1.vertices[0] + (e1.vertices[1] - e1.vertices[0]) * s;
            let p2 = e2.vertices[0] + (e2.vertices[1] - e2.vertices[0]) * t;
            let fid = cuboid_edge_edge_feature_id(
                (e1.vids[0], e1.vids[1]),
                (e2.vids[0], e2.vids[1]),
            );
            let contact = Contact::from_surface_points(p1, p2, normal, fid);

            if k1 == 0 && k2 == 0 {
                fallback = Some(contact);
            }

            // Clamped parameters mean the edges don't cross when seen along the axis.
            let interior = s > 0.0 && s < 1.0 && t > 0.0 && t < 1.0;

            if interior && contact.penetration_depth >= 0.0 {
                let _ = manifold.push(contact);
            }
        }
    }

    if manifold.is_empty() {
        if let Some(contact) = fallback {
            let _ = manifold.push(contact);
        }
    }
}

// The face of `cuboid` whose normal is the most aligned with `dir`.
fn support_face(cuboid: &Cuboid, dir: &Vector<Real>) -> CuboidFace {
    let iamax = dir.iamax();
    cuboid.face(iamax, (1.0 as Real).copysign(dir[iamax]))
}

// Point-in-convex-quad test in the projection plane. Points on the boundary are inside.
fn is_inside(quad: &[Point2<Real>; 4], pt: &Point2<Real>) -> bool {
    let mut sign = 0.0;

    for i in 0..4 {
        let a = quad[i];
        let b = quad[(i + 1) % 4];
        let new_sign = (b - a).perp(&(pt - a));

        if sign == 0.0 {
            sign = new_sign;
        } else if sign * new_sign < 0.0 {
            return false;
        }
    }

    true
}

fn push_merged(manifold: &mut ContactManifold, contact: Contact, merge_distance: Real) {
    if contact.penetration_depth < 0.0 {
        return;
    }

    let sq_merge_dist = merge_distance * merge_distance;

    if manifold
        .points
        .iter()
        .any(|c| na::distance_squared(&c.position, &contact.position) <= sq_merge_dist)
    {
        return;
    }

    if !manifold.push(contact) {
        log::debug!("Box/box face clipping generated more contacts than a manifold can hold.");
    }
}

fn face_face_contacts(
    pos12: &Isometry<Real>,
    cuboid1: &Cuboid,
    cuboid2: &Cuboid,
    axis: &Vector<Real>,
    settings: &CuboidCuboidSettings,
    manifold: &mut ContactManifold,
) {
    let Some(normal) = na::Unit::try_new(*axis, crate::math::DEFAULT_EPSILON) else {
        return;
    };

    let face1 = support_face(cuboid1, axis);
    let mut face2 = support_face(cuboid2, &pos12.inverse_transform_vector(&-axis));
    face2.transform_by(pos12);

    // Project both faces on a plane orthogonal to the axis, through the origin of the first box.
    let basis = axis.orthonormal_basis();
    let project = |p: &Point<Real>| Point2::new(p.coords.dot(&basis[0]), p.coords.dot(&basis[1]));
    let proj1 = face1.vertices.map(|p| project(&p));
    let proj2 = face2.vertices.map(|p| project(&p));

    let denom1 = face1.normal.dot(axis);
    let denom2 = face2.normal.dot(axis);
    let merge = settings.contact_merge_distance;

    // Vertices of the first face inside of the second one, projected on the second face's plane.
    if denom2.abs() > crate::math::DEFAULT_EPSILON {
        for k in 0..4 {
            if is_inside(&proj2, &proj1[k]) {
                let p1 = face1.vertices[k];
                let t = (face2.vertices[0] - p1).dot(&face2.normal) / denom2;
                let p2 = p1 + axis * t;
                let fid = VERTEX1_ID_OFFSET + face1.vids[k] as i32;
                push_merged(manifold, Contact::from_surface_points(p1, p2, normal, fid), merge);
            }
        }
    }

    // Vertices of the second face inside of the first one.
    if denom1.abs() > crate::math::DEFAULT_EPSILON {
        for k in 0..4 {
            if is_inside(&proj1, &proj2[k]) {
                let p2 = face2.vertices[k];
                let t = (face1.vertices[0] - p2).dot(&face1.normal) / denom1;
                let p1 = p2 + axis * t;
                let fid = VERTEX2_ID_OFFSET + face2.vids[k] as i32;
                push_merged(manifold, Contact::from_surface_points(p1, p2, normal, fid), merge);
            }
        }
    }

    // Intersections between the edges of both faces.
    let mut crossings: ArrayVec<Contact, 16> = ArrayVec::new();

    for e1 in 0..4 {
        let (a1, b1) = (proj1[e1], proj1[(e1 + 1) % 4]);

        for e2 in 0..4 {
            let (a2, b2) = (proj2[e2], proj2[(e2 + 1) % 4]);

            if let Some((s, t)) =
                utils::segments_intersection2d(&a1, &b1, &a2, &b2, CLIP_PARALLEL_EPSILON)
            {
                let (v1a, v1b) = face1.edge(e1);
                let (v2a, v2b) = face2.edge(e2);
                let p1 = v1a + (v1b - v1a) * s;
                let p2 = v2a + (v2b - v2a) * t;
                let fid = cuboid_edge_edge_feature_id(face1.edge_vids(e1), face2.edge_vids(e2));
                crossings.push(Contact::from_surface_points(p1, p2, normal, fid));
            }
        }
    }

    for contact in crossings {
        push_merged(manifold, contact, merge);
    }
}

#[cfg(test)]
mod test {
    use super::{contact_manifold_cuboid_cuboid, cuboid_edge_edge_feature_id};
    use crate::math::{Isometry, Real, Vector};
    use crate::query::{ContactManifold, CuboidCuboidSettings};
    use crate::shape::Cuboid;

    #[test]
    fn edge_edge_ids_are_unique() {
        let mut ids = Vec::new();

        for a in 0..8u8 {
            for b in (a + 1)..8 {
                for c in 0..8u8 {
                    for d in (c + 1)..8 {
                        ids.push(cuboid_edge_edge_feature_id((b, a), (c, d)));
                    }
                }
            }
        }

        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count);
        assert!(ids.iter().all(|id| *id < 10_000));
    }

    #[test]
    fn stacked_boxes_give_four_face_contacts() {
        let c1 = Cuboid::new(Vector::new(2.0, 2.0, 1.0));
        let c2 = Cuboid::new(Vector::repeat(0.5));
        let pos1 = Isometry::identity();
        let pos2 = Isometry::translation(0.0, 0.0, 1.4);
        let mut manifold = ContactManifold::new();

        let sep = contact_manifold_cuboid_cuboid(
            &pos1,
            &c1,
            &pos2,
            &c2,
            &CuboidCuboidSettings::default(),
            &mut manifold,
        );

        assert!(sep.colliding);
        assert_eq!(manifold.len(), 4);

        for contact in manifold.contacts() {
            assert_relative_eq!(*contact.normal, Vector::z(), epsilon = 1.0e-5);
            assert_relative_eq!(contact.penetration_depth, 0.1, epsilon = 1.0e-4);
            // Vertices of the small box.
            assert!(contact.feature_id >= 10_008);
        }
    }

    #[test]
    fn crossed_boxes_give_one_edge_contact() {
        let c = Cuboid::new(Vector::repeat(1.0));
        let pos1 = Isometry::rotation(Vector::y() * core::f64::consts::FRAC_PI_4 as Real);
        let pos2 = Isometry::new(
            Vector::new(0.0, 0.0, 2.6),
            Vector::x() * core::f64::consts::FRAC_PI_4 as Real,
        );
        let mut manifold = ContactManifold::new();

        let sep = contact_manifold_cuboid_cuboid(
            &pos1,
            &c,
            &pos2,
            &c,
            &CuboidCuboidSettings::default(),
            &mut manifold,
        );

        assert!(sep.colliding);
        assert_eq!(manifold.len(), 1);
        let contact = manifold.points[0];
        assert_relative_eq!(contact.penetration_depth, -sep.distance, epsilon = 1.0e-3);
        assert_relative_eq!(contact.position.x, 0.0, epsilon = 1.0e-4);
        assert_relative_eq!(contact.position.y, 0.0, epsilon = 1.0e-4);
        assert!(contact.feature_id < 10_000);
    }

    #[test]
    fn offset_boxes_clip_vertices_and_edge_crossings() {
        let c = Cuboid::new(Vector::repeat(0.5));
        let pos1 = Isometry::identity();
        let pos2 = Isometry::translation(0.5, 0.5, 0.9);
        let mut manifold = ContactManifold::new();

        let sep = contact_manifold_cuboid_cuboid(
            &pos1,
            &c,
            &pos2,
            &c,
            &CuboidCuboidSettings::default(),
            &mut manifold,
        );

        // One corner of each face lies inside the other face, and two pairs of perpendicular
        // edges cross. The parallel edges don't generate anything.
        assert!(sep.colliding);
        assert_eq!(manifold.len(), 4);

        for contact in manifold.contacts() {
            assert_relative_eq!(*contact.normal, Vector::z(), epsilon = 1.0e-5);
            assert_relative_eq!(contact.penetration_depth, 0.1, epsilon = 1.0e-4);
        }

        let ids: Vec<i32> = manifold.contacts().iter().map(|c| c.feature_id).collect();
        assert_eq!(ids.iter().filter(|id| **id < 10_000).count(), 2);
        assert_eq!(ids.iter().filter(|id| (10_000..10_008).contains(*id)).count(), 1);
        assert_eq!(ids.iter().filter(|id| **id >= 10_008).count(), 1);
    }
}
