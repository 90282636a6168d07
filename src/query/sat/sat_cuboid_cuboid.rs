use crate::math::{Isometry, Matrix, Real, Vector, DIM};
use crate::query::CuboidCuboidSettings;
use crate::shape::Cuboid;

/// Edge/edge axes shorter than this come from nearly parallel edges and are skipped: a face
/// axis already separates such edges, and normalizing the axis would amplify rounding errors.
const MIN_EDGE_AXIS_NORM: Real = 1.0e-3;

/// The kind of axis found by the box/box separating-axis test.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SatAxis {
    /// The normal of a face of the first box, given by its local axis index.
    FaceA(usize),
    /// The normal of a face of the second box, given by its local axis index.
    FaceB(usize),
    /// The cross product of the `i`-th axis of the first box and the `j`-th axis of the second one.
    Edges(usize, usize),
}

/// Result of a box/box separating-axis test.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SatResult {
    /// Whether the boxes overlap.
    pub colliding: bool,
    /// The signed distance along `self.axis`: positive if separated, minus the penetration
    /// depth otherwise.
    pub distance: Real,
    /// The unit axis of least penetration (or greatest separation), pointing from the first box
    /// toward the second one. Expressed in world-space unless stated otherwise.
    pub axis: Vector<Real>,
    /// Which pair of features generated `self.axis`.
    pub feature: SatAxis,
}

// Projection data of the second box in the local-space of the first one.
struct RelativeFrame {
    rot: Matrix<Real>,
    abs_rot: Matrix<Real>,
    t: Vector<Real>,
}

impl RelativeFrame {
    fn new(pos12: &Isometry<Real>, rarb_epsilon: Real) -> Self {
        let rot = pos12.rotation.to_rotation_matrix().into_inner();
        let abs_rot = rot.abs().add_scalar(rarb_epsilon);

        Self {
            rot,
            abs_rot,
            t: pos12.translation.vector,
        }
    }

    // Separation along the `i`-th face normal of the first box.
    fn face_a(&self, he1: &Vector<Real>, he2: &Vector<Real>, i: usize) -> (Real, Vector<Real>) {
        let ra = he1[i];
        let rb = self.abs_rot.row(i).transpose().dot(he2);
        let sign = (1.0 as Real).copysign(self.t[i]);
        (self.t[i].abs() - ra - rb, Vector::ith(i, sign))
    }

    // Separation along the `j`-th face normal of the second box.
    fn face_b(&self, he1: &Vector<Real>, he2: &Vector<Real>, j: usize) -> (Real, Vector<Real>) {
        let axis = self.rot.column(j).into_owned();
        let ra = self.abs_rot.column(j).dot(he1);
        let rb = he2[j];
        let dist = self.t.dot(&axis);
        (dist.abs() - ra - rb, axis * (1.0 as Real).copysign(dist))
    }

    // Separation along `e_i × f_j`, or `None` if both edges are parallel.
    fn edges(
        &self,
        he1: &Vector<Real>,
        he2: &Vector<Real>,
        i: usize,
        j: usize,
    ) -> Option<(Real, Vector<Real>)> {
        let (i1, i2) = ((i + 1) % DIM, (i + 2) % DIM);
        let (j1, j2) = ((j + 1) % DIM, (j + 2) % DIM);

        let axis = Vector::ith(i, 1.0).cross(&self.rot.column(j).into_owned());
        let norm = axis.norm();

        if norm <= MIN_EDGE_AXIS_NORM {
            return None;
        }

        let ra = he1[i1] * self.abs_rot[(i2, j)] + he1[i2] * self.abs_rot[(i1, j)];
        let rb = he2[j1] * self.abs_rot[(i, j2)] + he2[j2] * self.abs_rot[(i, j1)];
        let dist = self.t[i2] * self.rot[(i1, j)] - self.t[i1] * self.rot[(i2, j)];
        let sign = (1.0 as Real).copysign(dist);

        Some(((dist.abs() - ra - rb) / norm, axis * (sign / norm)))
    }
}

/// Tests if two boxes intersect, stopping at the first separating axis.
///
/// `pos12` is the position of the second box relative to the first one.
pub fn local_intersection_test_cuboid_cuboid(
    pos12: &Isometry<Real>,
    cuboid1: &Cuboid,
    cuboid2: &Cuboid,
    settings: &CuboidCuboidSettings,
) -> bool {
    let frame = RelativeFrame::new(pos12, settings.rarb_epsilon);
    let he1 = &cuboid1.half_extents;
    let he2 = &cuboid2.half_extents;

    for i in 0..DIM {
        if frame.face_a(he1, he2, i).0 > 0.0 || frame.face_b(he1, he2, i).0 > 0.0 {
            return false;
        }
    }

    for i in 0..DIM {
        for j in 0..DIM {
            if let Some((sep, _)) = frame.edges(he1, he2, i, j) {
                if sep > 0.0 {
                    return false;
                }
            }
        }
    }

    true
}

/// Tests if two boxes positioned in world-space intersect.
pub fn intersection_test_cuboid_cuboid(
    pos1: &Isometry<Real>,
    cuboid1: &Cuboid,
    pos2: &Isometry<Real>,
    cuboid2: &Cuboid,
    settings: &CuboidCuboidSettings,
) -> bool {
    let pos12 = pos1.inv_mul(pos2);
    local_intersection_test_cuboid_cuboid(&pos12, cuboid1, cuboid2, settings)
}

/// Finds the axis of least penetration between two boxes, among the 15 candidate axes.
///
/// `pos12` is the position of the second box relative to the first one, and the returned axis
/// is expressed in the local-space of the first box. The faces of the second box are tested
/// first; a face of the first box must beat them by `settings.face_a_bias`, and an edge/edge
/// axis must beat the best face by `settings.edge_bias`.
pub fn local_cuboid_cuboid_penetration(
    pos12: &Isometry<Real>,
    cuboid1: &Cuboid,
    cuboid2: &Cuboid,
    settings: &CuboidCuboidSettings,
) -> SatResult {
    let frame = RelativeFrame::new(pos12, settings.rarb_epsilon);
    let he1 = &cuboid1.half_extents;
    let he2 = &cuboid2.half_extents;

    let mut best = SatResult {
        colliding: true,
        distance: -Real::MAX,
        axis: Vector::x(),
        feature: SatAxis::FaceB(0),
    };

    for j in 0..DIM {
        let (sep, axis) = frame.face_b(he1, he2, j);
        if sep > best.distance {
            best.distance = sep;
            best.axis = axis;
            best.feature = SatAxis::FaceB(j);
        }
    }

    for i in 0..DIM {
        let (sep, axis) = frame.face_a(he1, he2, i);
        if sep > best.distance + settings.face_a_bias {
            best.distance = sep;
            best.axis = axis;
            best.feature = SatAxis::FaceA(i);
        }
    }

    let mut separated = best.distance > 0.0;

    for i in 0..DIM {
        for j in 0..DIM {
            if let Some((sep, axis)) = frame.edges(he1, he2, i, j) {
                separated = separated || sep > 0.0;

                if sep > best.distance + settings.edge_bias {
                    best.distance = sep;
                    best.axis = axis;
                    best.feature = SatAxis::Edges(i, j);
                }
            }
        }
    }

    best.colliding = !separated;
    best
}

/// Finds the axis of least penetration between two boxes positioned in world-space.
///
/// The returned axis is in world-space and points from the first box toward the second one.
pub fn cuboid_cuboid_penetration(
    pos1: &Isometry<Real>,
    cuboid1: &Cuboid,
    pos2: &Isometry<Real>,
    cuboid2: &Cuboid,
    settings: &CuboidCuboidSettings,
) -> SatResult {
    let pos12 = pos1.inv_mul(pos2);
    let mut result = local_cuboid_cuboid_penetration(&pos12, cuboid1, cuboid2, settings);
    result.axis = pos1 * result.axis;
    result
}
