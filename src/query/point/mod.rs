//! Point projection on triangles.

mod point_triangle;
