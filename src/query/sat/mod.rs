//! Application of the Separating Axis Theorem (SAT) to pairs of oriented boxes.
//!
//! Two convex polyhedra are disjoint iff. there exists an axis on which their projections
//! don't overlap. For boxes, it is sufficient to test the three face normals of each box and
//! the nine cross products of their edge directions. The axis with the largest separation (or
//! smallest penetration) is the one used for contact generation.

pub use self::sat_cuboid_cuboid::{
    cuboid_cuboid_penetration, intersection_test_cuboid_cuboid,
    local_cuboid_cuboid_penetration, local_intersection_test_cuboid_cuboid, SatAxis, SatResult,
};

mod sat_cuboid_cuboid;
