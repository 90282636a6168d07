//! Various unsorted geometrical and logical operators.

pub use self::scratch_pool::{ScratchBuffer, ScratchPool};
pub use self::segments_intersection::segments_intersection2d;
pub use self::wops::WBasis;

mod scratch_pool;
mod segments_intersection;
mod wops;
