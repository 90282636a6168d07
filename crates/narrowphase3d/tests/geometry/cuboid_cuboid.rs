use approx::assert_relative_eq;
use na::{Isometry3, Translation3, UnitQuaternion, Vector3};
use narrowphase3d::math::Real;
use narrowphase3d::query::gjk::{self, VoronoiSimplex};
use narrowphase3d::query::sat::{self, SatAxis};
use narrowphase3d::query::{contact_manifold_cuboid_cuboid, ContactManifold, CuboidCuboidSettings};
use narrowphase3d::shape::Cuboid;

fn random_cuboid(rng: &mut oorandom::Rand32) -> Cuboid {
    Cuboid::new(Vector3::from_fn(|_, _| 0.2 + rng.rand_float() as Real * 1.3))
}

fn random_pose(rng: &mut oorandom::Rand32) -> Isometry3<Real> {
    let mut coord = || (rng.rand_float() as Real * 2.0 - 1.0) * 2.5;
    let translation = Translation3::new(coord(), coord(), coord());
    let angle = |rng: &mut oorandom::Rand32| rng.rand_float() as Real * 6.28;
    let rotation =
        UnitQuaternion::from_euler_angles(angle(&mut *rng), angle(&mut *rng), angle(&mut *rng));
    Isometry3::from_parts(translation, rotation)
}

#[test]
fn separated_unit_boxes() {
    let c = Cuboid::new(Vector3::repeat(1.0));
    let pos1 = Isometry3::identity();
    let pos2 = Isometry3::translation(3.0, 0.0, 0.0);
    let settings = CuboidCuboidSettings::default();

    assert!(!sat::intersection_test_cuboid_cuboid(
        &pos1, &c, &pos2, &c, &settings
    ));

    let mut manifold = ContactManifold::new();
    let res = contact_manifold_cuboid_cuboid(&pos1, &c, &pos2, &c, &settings, &mut manifold);
    assert!(!res.colliding);
    assert!(manifold.is_empty());
    assert_relative_eq!(res.distance, 1.0, epsilon = 1.0e-3);
    assert_relative_eq!(res.axis.x.abs(), 1.0, epsilon = 1.0e-5);
}

#[test]
fn touching_unit_boxes_clip_faces() {
    let c = Cuboid::new(Vector3::repeat(1.0));
    let pos1 = Isometry3::identity();
    let pos2 = Isometry3::translation(2.0, 0.0, 0.0);
    let mut manifold = ContactManifold::new();

    let res = contact_manifold_cuboid_cuboid(
        &pos1,
        &c,
        &pos2,
        &c,
        &CuboidCuboidSettings::default(),
        &mut manifold,
    );

    assert!(res.distance.abs() < 1.0e-3);
    assert!(matches!(res.feature, SatAxis::FaceA(_) | SatAxis::FaceB(_)));
    assert!(!manifold.is_empty());

    for contact in manifold.contacts() {
        // Only vertices generate ids past 10000.
        assert!(contact.feature_id >= 10_000);
        assert_relative_eq!(*contact.normal, Vector3::x(), epsilon = 1.0e-5);
        assert!(contact.penetration_depth.abs() < 1.0e-3);
    }
}

#[test]
fn sat_agrees_with_gjk() {
    let mut rng = oorandom::Rand32::new(42);
    let settings = CuboidCuboidSettings::unbiased();
    let mut num_checked = 0;

    for _ in 0..500 {
        let c1 = random_cuboid(&mut rng);
        let c2 = random_cuboid(&mut rng);
        let pos1 = random_pose(&mut rng);
        let pos2 = random_pose(&mut rng);

        let res = sat::cuboid_cuboid_penetration(&pos1, &c1, &pos2, &c2, &settings);

        // Too close to the boundary for both algorithms to agree reliably.
        if res.distance.abs() < 1.0e-2 {
            continue;
        }

        let pos12 = pos1.inv_mul(&pos2);
        let mut simplex = VoronoiSimplex::new();
        let mut axis = Vector3::zeros();
        let gjk_hit = gjk::intersection_test(&pos12, &c1, &c2, &mut simplex, &mut axis);

        assert_eq!(
            sat::intersection_test_cuboid_cuboid(&pos1, &c1, &pos2, &c2, &settings),
            gjk_hit,
            "SAT and GJK disagree for {:?} at {:?} and {:?} at {:?}",
            c1,
            pos1,
            c2,
            pos2
        );
        assert_eq!(res.colliding, gjk_hit);
        num_checked += 1;
    }

    assert!(num_checked > 400);
}

#[test]
fn swapping_boxes_negates_the_axis() {
    let mut rng = oorandom::Rand32::new(7);
    let settings = CuboidCuboidSettings::unbiased();

    for _ in 0..200 {
        let c1 = random_cuboid(&mut rng);
        let c2 = random_cuboid(&mut rng);
        let pos1 = random_pose(&mut rng);
        let pos2 = random_pose(&mut rng);

        let res12 = sat::cuboid_cuboid_penetration(&pos1, &c1, &pos2, &c2, &settings);
        let res21 = sat::cuboid_cuboid_penetration(&pos2, &c2, &pos1, &c1, &settings);

        assert_relative_eq!(res12.distance, res21.distance, epsilon = 1.0e-4);
        assert_eq!(res12.colliding, res21.colliding);
        assert_relative_eq!(res12.axis, -res21.axis, epsilon = 1.0e-3);
    }
}

#[test]
fn static_boxes_keep_their_feature_ids() {
    let c1 = Cuboid::new(Vector3::new(2.0, 2.0, 0.5));
    let c2 = Cuboid::new(Vector3::repeat(0.5));
    let pos1 = Isometry3::identity();
    let pos2 = Isometry3::new(Vector3::new(0.3, -0.2, 0.95), Vector3::z() * 0.4);
    let settings = CuboidCuboidSettings::default();

    let mut first = ContactManifold::new();
    let mut second = ContactManifold::new();
    let _ = contact_manifold_cuboid_cuboid(&pos1, &c1, &pos2, &c2, &settings, &mut first);
    let _ = contact_manifold_cuboid_cuboid(&pos1, &c1, &pos2, &c2, &settings, &mut second);

    assert_eq!(first.len(), 4);
    let ids1: Vec<_> = first.contacts().iter().map(|c| c.feature_id).collect();
    let ids2: Vec<_> = second.contacts().iter().map(|c| c.feature_id).collect();
    assert_eq!(ids1, ids2);
}
