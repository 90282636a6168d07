//! The GJK algorithm for distance computation and intersection tests.

pub use self::cso_point::CSOPoint;
pub use self::gjk::*;
pub use self::special_support_maps::*;
pub use self::voronoi_simplex3::{SimplexState, VoronoiSimplex};

mod cso_point;
mod gjk;
mod special_support_maps;
mod voronoi_simplex3;
