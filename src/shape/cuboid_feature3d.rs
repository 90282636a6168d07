use crate::math::{Isometry, Point, Real, Vector};

/// A face of a cuboid, computed on demand for contact clipping.
#[derive(Debug, Copy, Clone)]
pub struct CuboidFace {
    /// The four vertices, counterclockwise when seen from outside the cuboid.
    pub vertices: [Point<Real>; 4],
    /// Vertex codes of `self.vertices` (see [`crate::shape::Cuboid::vertex`]).
    pub vids: [u8; 4],
    /// The outward face normal.
    pub normal: Vector<Real>,
    /// The local axis this face is orthogonal to.
    pub axis: usize,
}

impl CuboidFace {
    /// Transforms all the vertices and the normal of this face.
    pub fn transform_by(&mut self, iso: &Isometry<Real>) {
        for v in &mut self.vertices {
            *v = iso * *v;
        }
        self.normal = iso * self.normal;
    }

    /// The `i`-th edge of this face, as the pair of vertex indices `(i, i + 1 mod 4)`.
    #[inline]
    pub fn edge(&self, i: usize) -> (Point<Real>, Point<Real>) {
        (self.vertices[i], self.vertices[(i + 1) % 4])
    }

    /// The vertex codes of the `i`-th edge of this face.
    #[inline]
    pub fn edge_vids(&self, i: usize) -> (u8, u8) {
        (self.vids[i], self.vids[(i + 1) % 4])
    }
}

/// An edge of a cuboid, computed on demand for contact generation.
#[derive(Debug, Copy, Clone)]
pub struct CuboidEdge {
    /// The two endpoints.
    pub vertices: [Point<Real>; 2],
    /// Vertex codes of `self.vertices`.
    pub vids: [u8; 2],
}

impl CuboidEdge {
    /// Transforms the endpoints of this edge.
    pub fn transform_by(&mut self, iso: &Isometry<Real>) {
        self.vertices[0] = iso * self.vertices[0];
        self.vertices[1] = iso * self.vertices[1];
    }
}
