//! Contact manifolds and the persistent contact generators producing them.
//!
//! Boxes are handled by a separating-axis test followed by face clipping. Any other convex
//! shape is tested against triangles by a pair tester that keeps, from one query to the next,
//! the cheapest test that was conclusive (see [`CollisionState`]).

pub use self::contact_manifold::{ContactManifold, MAX_MANIFOLD_POINTS};
pub use self::contact_manifolds_cuboid_cuboid::{
    contact_manifold_cuboid_cuboid, cuboid_edge_edge_feature_id,
    local_contact_manifold_cuboid_cuboid,
};
pub use self::pair_tester::{PairKind, PairTester, PairTesterPool};
pub use self::sphere_triangle_pair_tester::{contact_ball_triangle, SphereTrianglePairTester};
pub use self::triangle_convex_pair_tester::{
    classify_normal, classify_point, CollisionState, TriangleConvexPairTester,
};
pub use self::triangle_triangle_pair_tester::TriangleTrianglePairTester;

mod contact_manifold;
mod contact_manifolds_cuboid_cuboid;
mod pair_tester;
mod sphere_triangle_pair_tester;
mod triangle_convex_pair_tester;
mod triangle_triangle_pair_tester;
