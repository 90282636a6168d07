//! Support mapping based Cuboid shape.

use crate::math::{Point, Real, Vector, DIM};
use crate::shape::{ConvexShape, CuboidEdge, CuboidFace, SupportMap};

/// Shape of a box.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Cuboid {
    /// The half-extents of the cuboid, margin included.
    pub half_extents: Vector<Real>,
    /// The collision margin. The core used by [`SupportMap`] is the box shrunk by this amount.
    pub margin: Real,
}

// NOTE: format of the cuboid vertex codes:
//
// The i-th bit of a vertex code is set to 1 iff. the i-th component of the vertex is negative.
// Codes therefore live in [0, 7] and are stable for a given vertex regardless of the
// cuboid pose, which is what the box/box contact ids are built upon.
impl Cuboid {
    /// Creates a new box from its half-extents, with a zero margin.
    ///
    /// Half-extents are the box half-width along each axis. Each half-extent must be positive.
    #[inline]
    pub fn new(half_extents: Vector<Real>) -> Cuboid {
        Cuboid {
            half_extents,
            margin: 0.0,
        }
    }

    /// Creates a new box with the given collision margin.
    ///
    /// The margin is clamped so the core never has negative extents.
    #[inline]
    pub fn with_margin(half_extents: Vector<Real>, margin: Real) -> Cuboid {
        let margin = margin.max(0.0).min(half_extents.min());
        Cuboid {
            half_extents,
            margin,
        }
    }

    /// The vertex of this cuboid (margin included) identified by the given code.
    #[inline]
    pub fn vertex(&self, code: u8) -> Point<Real> {
        let mut res = self.half_extents;

        for i in 0..DIM {
            if code & (1 << i) != 0 {
                res[i] = -res[i]
            }
        }

        Point::from(res)
    }

    /// The code of the vertex with the given coordinate signs.
    #[inline]
    pub fn vertex_code(negative: [bool; 3]) -> u8 {
        (negative[0] as u8) | ((negative[1] as u8) << 1) | ((negative[2] as u8) << 2)
    }

    /// The face of this cuboid orthogonal to the `axis`-th local axis, on the side given by `sign`.
    ///
    /// Vertices are listed counterclockwise when seen from outside the cuboid.
    pub fn face(&self, axis: usize, sign: Real) -> CuboidFace {
        debug_assert!(axis < DIM, "Invalid cuboid face axis.");
        let i1 = axis;
        let (i2, i3) = if sign > 0.0 {
            ((i1 + 1) % 3, (i1 + 2) % 3)
        } else {
            ((i1 + 2) % 3, (i1 + 1) % 3)
        };

        let mut codes = [0u8; 4];
        let corners = [(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)];
        let mut vertices = [Point::origin(); 4];

        for (k, (s2, s3)) in corners.iter().enumerate() {
            let mut pt = Vector::zeros();
            pt[i1] = sign * self.half_extents[i1];
            pt[i2] = *s2 * self.half_extents[i2];
            pt[i3] = *s3 * self.half_extents[i3];

            let mut negative = [false; 3];
            for i in 0..DIM {
                negative[i] = pt[i] < 0.0;
            }

            codes[k] = Self::vertex_code(negative);
            vertices[k] = Point::from(pt);
        }

        let mut normal = Vector::zeros();
        normal[i1] = sign;

        CuboidFace {
            vertices,
            vids: codes,
            normal,
            axis: i1,
        }
    }

    /// The edge parallel to the `axis`-th local axis, on the side given by `signs` along the
    /// two other axes (taken in increasing order).
    pub fn edge(&self, axis: usize, signs: [Real; 2]) -> CuboidEdge {
        debug_assert!(axis < DIM, "Invalid cuboid edge axis.");
        let (j, k) = match axis {
            0 => (1, 2),
            1 => (0, 2),
            2 => (0, 1),
            _ => unreachable!(),
        };

        let mut a = Vector::zeros();
        a[axis] = self.half_extents[axis];
        a[j] = signs[0] * self.half_extents[j];
        a[k] = signs[1] * self.half_extents[k];
        let mut b = a;
        b[axis] = -a[axis];

        let code = |v: &Vector<Real>| Self::vertex_code([v.x < 0.0, v.y < 0.0, v.z < 0.0]);

        CuboidEdge {
            vertices: [Point::from(a), Point::from(b)],
            vids: [code(&a), code(&b)],
        }
    }
}

impl SupportMap for Cuboid {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let core = self.half_extents.add_scalar(-self.margin);
        Point::new(
            core.x.copysign(dir.x),
            core.y.copysign(dir.y),
            core.z.copysign(dir.z),
        )
    }
}

impl ConvexShape for Cuboid {
    #[inline]
    fn margin(&self) -> Real {
        self.margin
    }

    #[inline]
    fn minimum_radius(&self) -> Real {
        self.half_extents.min()
    }
}

#[cfg(test)]
mod test {
    use crate::math::Vector;
    use crate::shape::{Cuboid, SupportMap};

    #[test]
    fn cuboid_vertex_codes_match_signs() {
        let cuboid = Cuboid::new(Vector::new(1.0, 2.0, 3.0));

        for code in 0..8u8 {
            let v = cuboid.vertex(code);
            let expected = Cuboid::vertex_code([v.x < 0.0, v.y < 0.0, v.z < 0.0]);
            assert_eq!(code, expected);
        }
    }

    #[test]
    fn cuboid_faces_are_ccw_from_outside() {
        let cuboid = Cuboid::new(Vector::new(1.0, 2.0, 3.0));

        for axis in 0..3 {
            for sign in [-1.0, 1.0] {
                let face = cuboid.face(axis, sign);
                let n = (face.vertices[1] - face.vertices[0])
                    .cross(&(face.vertices[2] - face.vertices[0]));
                assert!(n.dot(&face.normal) > 0.0);

                for (v, code) in face.vertices.iter().zip(face.vids.iter()) {
                    assert_eq!(cuboid.vertex(*code), *v);
                }
            }
        }
    }

    #[test]
    fn cuboid_core_excludes_margin() {
        let cuboid = Cuboid::with_margin(Vector::new(1.0, 1.0, 1.0), 0.25);
        let pt = cuboid.local_support_point(&Vector::new(1.0, -1.0, 1.0));
        assert_relative_eq!(pt.coords, Vector::new(0.75, -0.75, 0.75));
    }
}
