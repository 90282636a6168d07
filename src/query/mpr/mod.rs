//! Minkowski Portal Refinement: surface casts and penetration depth of overlapping convex shapes.

pub use self::mpr::{local_surface_cast, refine_penetration, SurfaceCast};

mod mpr;
