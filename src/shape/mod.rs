//! Shapes supported by narrowphase3d.

pub use self::ball::Ball;
pub use self::capsule::Capsule;
pub use self::convex_primitive::ConvexPrimitive;
pub use self::cuboid::Cuboid;
pub use self::cuboid_feature3d::{CuboidEdge, CuboidFace};
pub use self::feature_id::FeatureId;
pub use self::segment::{Segment, SegmentPointLocation};
#[doc(inline)]
pub use self::support_map::{ConvexShape, SupportMap};
pub use self::triangle::{Triangle, TrianglePointLocation, TriangleSidedness};

mod ball;
mod capsule;
mod convex_primitive;
mod cuboid;
mod cuboid_feature3d;
mod feature_id;
mod segment;
mod support_map;
mod triangle;
