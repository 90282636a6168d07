use approx::assert_relative_eq;
use na::{Point3, Vector3};
use narrowphase3d::math::Real;
use narrowphase3d::query::{CollisionState, TriangleConvexPairTester};
use narrowphase3d::shape::{Cuboid, FeatureId, Triangle};

// A box with a 0.4 core and a 0.1 margin, at the origin of its local-space.
fn cuboid() -> Cuboid {
    Cuboid::with_margin(Vector3::repeat(0.5), 0.1)
}

// A large horizontal triangle at height `z`, with its `x = left` edge running along `y`.
// Its front faces `+z`.
fn floor(z: Real, left: Real) -> Triangle {
    Triangle::new(
        Point3::new(left, -10.0, z),
        Point3::new(left + 20.0, -10.0, z),
        Point3::new(left, 10.0, z),
    )
    .with_margin(0.05)
}

#[test]
fn tester_escalates_then_falls_back_to_the_plane_test() {
    let mut tester = TriangleConvexPairTester::new(cuboid());
    assert_eq!(tester.state(), CollisionState::Plane);

    // Next to the triangle: the plane test can't conclude.
    let manifold = tester.generate_contacts(&floor(-0.6, 1.0));
    assert!(manifold.is_empty());
    assert_eq!(tester.state(), CollisionState::ExternalSeparated);

    // Above its interior, within the margins.
    let manifold = tester.generate_contacts(&floor(-0.52, -5.0));
    assert_eq!(tester.state(), CollisionState::ExternalNear);
    assert_eq!(manifold.len(), 1);
    assert_relative_eq!(manifold.points[0].penetration_depth, 0.03, epsilon = 1.0e-4);
    assert_relative_eq!(*manifold.points[0].normal, Vector3::z(), epsilon = 1.0e-4);

    // The cores overlap.
    let manifold = tester.generate_contacts(&floor(-0.2, -5.0));
    assert_eq!(tester.state(), CollisionState::Deep);
    assert_eq!(manifold.len(), 2);

    let deep = manifold
        .find_by_feature_id(FeatureId::Face(0).to_contact_id())
        .unwrap();
    assert_relative_eq!(deep.penetration_depth, 0.35, epsilon = 1.0e-3);
    assert_relative_eq!(*deep.normal, Vector3::z(), epsilon = 1.0e-3);

    let inner = manifold
        .find_by_feature_id(FeatureId::INNER_SPHERE)
        .unwrap();
    assert_relative_eq!(inner.penetration_depth, 0.35, epsilon = 1.0e-4);

    // Back within the margins.
    let manifold = tester.generate_contacts(&floor(-0.45, -5.0));
    assert!(!manifold.is_empty());
    assert_eq!(tester.state(), CollisionState::ExternalNear);

    // Face contacts eventually go back to the cheapest test.
    let period = tester.settings().escape_attempt_period;
    for _ in 0..period {
        let manifold = tester.generate_contacts(&floor(-0.45, -5.0));
        assert_eq!(manifold.len(), 1);
        assert_relative_eq!(manifold.points[0].penetration_depth, 0.1, epsilon = 1.0e-4);
    }
    assert_eq!(tester.state(), CollisionState::Plane);

    let manifold = tester.generate_contacts(&floor(-0.45, -5.0));
    assert_eq!(tester.state(), CollisionState::Plane);
    assert_eq!(manifold.len(), 1);
    assert_relative_eq!(manifold.points[0].penetration_depth, 0.1, epsilon = 1.0e-5);
}

#[test]
fn escape_attempts_are_rate_limited() {
    let mut tester = TriangleConvexPairTester::new(cuboid());
    let tri = floor(-0.6, 1.0);
    let period = tester.settings().escape_attempt_period as usize;
    let mut num_plane = 0;

    for _ in 0..3 * period {
        assert!(tester.generate_contacts(&tri).is_empty());

        if tester.state() == CollisionState::Plane {
            num_plane += 1;
        }
    }

    assert_eq!(num_plane, 3);
}

#[test]
fn static_configuration_keeps_its_feature_ids() {
    let mut tester = TriangleConvexPairTester::new(cuboid());
    let tri = floor(-0.2, -5.0);

    // Reach the deep state first.
    let _ = tester.generate_contacts(&tri);
    let first = tester.generate_contacts(&tri);
    let second = tester.generate_contacts(&tri);

    assert!(!first.is_empty());
    let ids1: Vec<_> = first.contacts().iter().map(|c| c.feature_id).collect();
    let ids2: Vec<_> = second.contacts().iter().map(|c| c.feature_id).collect();
    assert_eq!(ids1, ids2);
}
