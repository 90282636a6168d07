//! Narrow-phase geometric queries.
//!
//! # Persistent pair testers
//! A [`PairTester`] generates the contacts between one convex shape and the triangles it
//! overlaps, reusing what it learned during the previous query:
//!
//! * [`TriangleConvexPairTester`] for any convex shape.
//! * [`TriangleTrianglePairTester`] when the convex shape is itself a triangle.
//! * [`SphereTrianglePairTester`] for balls, in closed form.
//!
//! # Boxes
//! * [`sat::intersection_test_cuboid_cuboid()`] to determine if two boxes intersect.
//! * [`sat::cuboid_cuboid_penetration()`] to find their axis of least penetration.
//! * [`contact_manifold_cuboid_cuboid()`] to compute up to four contacts between them.
//!
//! # Building blocks
//! The [`gjk`] and [`mpr`] modules work on any pair of [`crate::shape::SupportMap`].

pub use self::closest_points::closest_points_segment_segment;
pub use self::contact::Contact;
pub use self::contact_manifolds::{
    classify_normal, classify_point, contact_ball_triangle, contact_manifold_cuboid_cuboid,
    cuboid_edge_edge_feature_id, local_contact_manifold_cuboid_cuboid, CollisionState,
    ContactManifold, PairKind, PairTester, PairTesterPool, SphereTrianglePairTester,
    TriangleConvexPairTester, TriangleTrianglePairTester, MAX_MANIFOLD_POINTS,
};
pub use self::settings::{CuboidCuboidSettings, PairTesterSettings, SettingsError};

pub mod closest_points;
pub mod contact;
mod contact_manifolds;
pub mod gjk;
pub mod mpr;
mod point;
pub mod sat;
mod settings;
