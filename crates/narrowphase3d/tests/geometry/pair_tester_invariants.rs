use na::{Point3, Vector3};
use narrowphase3d::math::Real;
use narrowphase3d::query::{PairTester, PairTesterPool};
use narrowphase3d::shape::{Ball, Capsule, ConvexPrimitive, Cuboid, Triangle};

fn random_point(rng: &mut oorandom::Rand32, extent: Real) -> Point3<Real> {
    Point3::from(Vector3::from_fn(|_, _| {
        (rng.rand_float() as Real * 2.0 - 1.0) * extent
    }))
}

fn random_shape(rng: &mut oorandom::Rand32) -> ConvexPrimitive {
    let size = 0.2 + rng.rand_float() as Real * 0.6;

    match rng.rand_range(0..4) {
        0 => Ball::new(size).into(),
        1 => Cuboid::with_margin(Vector3::new(size, size * 1.5, size * 0.7), 0.04).into(),
        2 => Capsule::new_y(size, size * 0.5).into(),
        _ => Triangle::new(
            random_point(rng, 0.8),
            random_point(rng, 0.8),
            random_point(rng, 0.8),
        )
        .with_margin(0.02)
        .into(),
    }
}

fn check_contacts(tester: &mut PairTester, triangle: &Triangle) {
    for contact in tester.generate_contacts(triangle).contacts() {
        assert!(
            (contact.normal.norm() - 1.0).abs() <= 1.0e-4,
            "Non-unit normal: {:?}",
            contact
        );
        assert!(
            contact.penetration_depth >= -1.0e-3,
            "Negative depth: {:?} for {:?}",
            contact,
            triangle
        );
    }
}

#[test]
fn contacts_have_unit_normals_and_non_negative_depths() {
    let mut rng = oorandom::Rand32::new(1234);
    let mut pool = PairTesterPool::default();

    for _ in 0..300 {
        let shape = random_shape(&mut rng);
        let mut tester = pool.acquire(shape);
        let mut triangle = Triangle::new(
            random_point(&mut rng, 1.0),
            random_point(&mut rng, 1.0),
            random_point(&mut rng, 1.0),
        )
        .with_margin(0.03);

        // A few frames of a triangle slowly sliding through the shape.
        let step = random_point(&mut rng, 0.1).coords;
        for _ in 0..5 {
            check_contacts(&mut tester, &triangle);
            triangle = Triangle::new(triangle.a + step, triangle.b + step, triangle.c + step)
                .with_margin(triangle.margin);
        }

        pool.release(tester);
    }
}
