use approx::assert_relative_eq;
use na::{Point3, Vector3};
use narrowphase3d::query::{contact_ball_triangle, PairTester, PairTesterSettings};
use narrowphase3d::shape::{Ball, Cuboid, Triangle};

#[test]
fn ball_touching_unit_triangle() {
    // The ball is centered at (0, 0, 0.4): the triangle is expressed relative to it.
    let center = Vector3::new(0.0, 0.0, 0.4);
    let tri = Triangle::new(
        Point3::new(0.0, 0.0, 0.0) - center,
        Point3::new(1.0, 0.0, 0.0) - center,
        Point3::new(0.0, 1.0, 0.0) - center,
    );

    let mut tester = PairTester::new(Ball::new(0.5).into(), PairTesterSettings::default());
    let manifold = tester.generate_contacts(&tri);

    assert_eq!(manifold.len(), 1);
    let contact = manifold.points[0];
    assert_relative_eq!(contact.penetration_depth, 0.1, epsilon = 1.0e-5);
    assert_relative_eq!(*contact.normal, Vector3::z(), epsilon = 1.0e-5);
}

#[test]
fn degenerate_triangles_never_produce_nans() {
    let points = [
        Point3::new(0.3, 0.0, 0.0),
        Point3::origin(),
        Point3::new(5.0, 5.0, 5.0),
    ];

    for pt in points {
        let tri = Triangle::new(pt, pt, pt);

        if let Some(contact) = contact_ball_triangle(&Ball::new(0.5), &tri) {
            assert_relative_eq!(contact.normal.norm(), 1.0, epsilon = 1.0e-5);
            assert!(contact.penetration_depth >= 0.0);
        }

        let mut tester = PairTester::new(
            Cuboid::with_margin(Vector3::repeat(0.5), 0.05).into(),
            PairTesterSettings::default(),
        );

        for _ in 0..3 {
            for contact in tester.generate_contacts(&tri).contacts() {
                assert!(contact.normal.iter().all(|x| x.is_finite()));
                assert!(contact.penetration_depth.is_finite());
            }
        }
    }

    // A degenerate triangle at the center of the ball still pushes it away.
    let tri = Triangle::new(Point3::origin(), Point3::origin(), Point3::origin());
    let contact = contact_ball_triangle(&Ball::new(0.5), &tri).unwrap();
    assert_relative_eq!(contact.penetration_depth, 0.5, epsilon = 1.0e-5);

    // Too far to touch.
    let far = Point3::new(5.0, 5.0, 5.0);
    assert!(contact_ball_triangle(&Ball::new(0.5), &Triangle::new(far, far, far)).is_none());
}
