//! Closest points between simple primitives.

pub use self::closest_points_segment_segment::{
    closest_points_segment_segment, closest_points_segment_segment_parameters,
    closest_points_segment_segment_with_locations,
};

mod closest_points_segment_segment;
