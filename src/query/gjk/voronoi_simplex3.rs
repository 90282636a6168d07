use crate::math::{Point, Real};
use crate::query::gjk::{self, CSOPoint};
use crate::shape::{Triangle, TrianglePointLocation};
use num::Zero;

/// The number of vertices currently making up a [`VoronoiSimplex`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SimplexState {
    /// No vertex yet.
    Empty,
    /// A single vertex `A`.
    Point,
    /// The segment `AB`.
    Segment,
    /// The triangle `ABC`.
    Triangle,
    /// The tetrahedron `ABCD`. After a reduction, this means the origin is enclosed.
    Tetrahedron,
}

impl SimplexState {
    /// The number of vertices of a simplex in this state.
    #[inline]
    pub fn num_vertices(self) -> usize {
        match self {
            SimplexState::Empty => 0,
            SimplexState::Point => 1,
            SimplexState::Segment => 2,
            SimplexState::Triangle => 3,
            SimplexState::Tetrahedron => 4,
        }
    }

    #[inline]
    fn from_num_vertices(n: usize) -> Self {
        match n {
            0 => SimplexState::Empty,
            1 => SimplexState::Point,
            2 => SimplexState::Segment,
            3 => SimplexState::Triangle,
            _ => SimplexState::Tetrahedron,
        }
    }
}

// Faces of the tetrahedron `ABCD` that contain `D`, with the index of the opposite vertex.
const FACES_WITH_D: [([usize; 3], usize); 3] = [([0, 1, 3], 2), ([1, 2, 3], 0), ([0, 2, 3], 1)];

/// A simplex of dimension up to 3 using Voronoï regions for computing point projections.
///
/// The most recently added vertex is always the last one. Reductions only keep vertices that
/// contribute to the projection of the origin, in their original order.
#[derive(Clone, Debug)]
pub struct VoronoiSimplex {
    prev_vertices: [CSOPoint; 4],
    prev_proj: [Real; 4],
    prev_state: SimplexState,

    vertices: [CSOPoint; 4],
    proj: [Real; 4],
    state: SimplexState,
}

impl Default for VoronoiSimplex {
    fn default() -> Self {
        Self::new()
    }
}

impl VoronoiSimplex {
    /// Creates a new empty simplex.
    pub fn new() -> VoronoiSimplex {
        VoronoiSimplex {
            prev_vertices: [CSOPoint::origin(); 4],
            prev_proj: [0.0; 4],
            prev_state: SimplexState::Empty,
            vertices: [CSOPoint::origin(); 4],
            proj: [0.0; 4],
            state: SimplexState::Empty,
        }
    }

    /// Removes every vertex of this simplex.
    pub fn clear(&mut self) {
        self.state = SimplexState::Empty;
        self.prev_state = SimplexState::Empty;
    }

    /// Resets this simplex to a single point.
    pub fn reset(&mut self, pt: CSOPoint) {
        self.prev_state = SimplexState::Empty;
        self.state = SimplexState::Point;
        self.vertices[0] = pt;
        self.proj[0] = 1.0;
    }

    /// The current state of this simplex.
    #[inline]
    pub fn state(&self) -> SimplexState {
        self.state
    }

    /// Add a point to this simplex.
    ///
    /// Returns `false` (and leaves the simplex unchanged) if the point is already one of its
    /// vertices, which means GJK can't make any progress.
    pub fn add_point(&mut self, pt: CSOPoint) -> bool {
        let n = self.state.num_vertices();

        for v in &self.vertices[..n] {
            if (v.point - pt.point).norm_squared() < gjk::eps_tol() {
                return false;
            }
        }

        if n == 4 {
            // The origin is already enclosed.
            return false;
        }

        self.prev_vertices = self.vertices;
        self.prev_proj = self.proj;
        self.prev_state = self.state;

        self.vertices[n] = pt;
        self.state = SimplexState::from_num_vertices(n + 1);
        true
    }

    /// Retrieves the barycentric coordinate associated to the `i`-th by the last call to `project_origin_and_reduce`.
    pub fn proj_coord(&self, i: usize) -> Real {
        assert!(i < self.state.num_vertices(), "Index out of bounds.");
        self.proj[i]
    }

    /// The i-th point of this simplex.
    pub fn point(&self, i: usize) -> &CSOPoint {
        assert!(i < self.state.num_vertices(), "Index out of bounds.");
        &self.vertices[i]
    }

    /// Retrieves the barycentric coordinate associated to the `i`-th point before the last call to `add_point`.
    pub fn prev_proj_coord(&self, i: usize) -> Real {
        assert!(i < self.prev_state.num_vertices(), "Index out of bounds.");
        self.prev_proj[i]
    }

    /// The i-th point of the simplex before the last call to `add_point`.
    pub fn prev_point(&self, i: usize) -> &CSOPoint {
        assert!(i < self.prev_state.num_vertices(), "Index out of bounds.");
        &self.prev_vertices[i]
    }

    /// The number of vertices of this simplex.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.state.num_vertices()
    }

    /// The number of vertices of this simplex before the last call to `add_point`.
    #[inline]
    pub fn prev_num_vertices(&self) -> usize {
        self.prev_state.num_vertices()
    }

    /// The maximum squared length of the vertices of this simplex.
    pub fn max_sq_len(&self) -> Real {
        self.vertices[..self.num_vertices()]
            .iter()
            .map(|v| v.point.coords.norm_squared())
            .fold(0.0, Real::max)
    }

    fn keep(&mut self, ids: &[usize], coords: &[Real]) {
        let old = self.vertices;

        for (k, (id, coord)) in ids.iter().zip(coords.iter()).enumerate() {
            self.vertices[k] = old[*id];
            self.proj[k] = *coord;
        }

        self.state = SimplexState::from_num_vertices(ids.len());
    }

    // Reduces to the sub-simplex of the triangle `ids` given by `location`.
    fn keep_triangle_location(&mut self, ids: [usize; 3], location: &TrianglePointLocation) {
        match *location {
            TrianglePointLocation::OnVertex(i) => self.keep(&[ids[i as usize]], &[1.0]),
            TrianglePointLocation::OnEdge(0, uv) => self.keep(&[ids[0], ids[1]], &uv),
            TrianglePointLocation::OnEdge(1, uv) => self.keep(&[ids[1], ids[2]], &uv),
            TrianglePointLocation::OnEdge(_, uv) => self.keep(&[ids[0], ids[2]], &uv),
            TrianglePointLocation::OnFace(_, uvw) => self.keep(&ids, &uvw),
        }
    }

    fn triangle(&self, ids: [usize; 3]) -> Triangle {
        Triangle::new(
            self.vertices[ids[0]].point,
            self.vertices[ids[1]].point,
            self.vertices[ids[2]].point,
        )
    }

    /// Projects the origin on the boundary of this simplex and reduces `self` to the smallest
    /// sub-simplex containing the projection.
    ///
    /// Returns the projection, or the origin itself if it lies inside of the tetrahedron.
    /// The empty simplex projects to the origin.
    pub fn project_origin_and_reduce(&mut self) -> Point<Real> {
        match self.state {
            SimplexState::Empty => Point::origin(),
            SimplexState::Point => {
                self.proj[0] = 1.0;
                self.vertices[0].point
            }
            SimplexState::Segment => self.project_on_segment(),
            SimplexState::Triangle => {
                let (proj, location) = self
                    .triangle([0, 1, 2])
                    .project_local_point_and_get_location(&Point::origin());
                self.keep_triangle_location([0, 1, 2], &location);
                proj
            }
            SimplexState::Tetrahedron => self.project_on_tetrahedron(),
        }
    }

    fn project_on_segment(&mut self) -> Point<Real> {
        let a = self.vertices[0].point;
        let b = self.vertices[1].point;
        let ab = b - a;
        let sqnab = ab.norm_squared();

        if sqnab.is_zero() {
            self.keep(&[1], &[1.0]);
            return b;
        }

        // B was found by searching toward the origin from A, so the origin lies past A along
        // AB: t < 0 is only reachable through rounding errors and clamps to A.
        let t = -a.coords.dot(&ab) / sqnab;

        if t >= 1.0 {
            self.keep(&[1], &[1.0]);
            b
        } else if t <= 0.0 {
            self.keep(&[0], &[1.0]);
            a
        } else {
            self.proj[0] = 1.0 - t;
            self.proj[1] = t;
            a + ab * t
        }
    }

    fn project_on_tetrahedron(&mut self) -> Point<Real> {
        let [a, b, c, d] = [
            self.vertices[0].point,
            self.vertices[1].point,
            self.vertices[2].point,
            self.vertices[3].point,
        ];
        let ab = b - a;
        let ac = c - a;
        let ad = d - a;
        let volume = ab.dot(&ac.cross(&ad));

        let scale = self.max_sq_len();
        let flat = volume.abs() <= gjk::eps_tol() * scale * scale.sqrt();

        // The face ABC can't contain the projection: the previous step projected the origin on
        // it and D was found by searching away from it. Only the faces containing D are tested.
        let mut best: Option<(Real, [usize; 3], Point<Real>, TrianglePointLocation)> = None;

        for (ids, opp) in FACES_WITH_D.iter() {
            let p = self.vertices[ids[0]].point;
            let q = self.vertices[ids[1]].point;
            let r = self.vertices[ids[2]].point;
            let s = self.vertices[*opp].point;
            let n = (q - p).cross(&(r - p));

            // A flat tetrahedron can't enclose anything: every adjacent face is a candidate.
            let origin_outside = flat || n.dot(&-p.coords) * n.dot(&(s - p)) < 0.0;

            if origin_outside {
                let (proj, location) = self
                    .triangle(*ids)
                    .project_local_point_and_get_location(&Point::origin());
                let sqdist = proj.coords.norm_squared();

                if best.as_ref().map(|b| sqdist < b.0).unwrap_or(true) {
                    best = Some((sqdist, *ids, proj, location));
                }
            }
        }

        match best {
            Some((_, ids, proj, location)) => {
                self.keep_triangle_location(ids, &location);
                proj
            }
            None => {
                // The origin is inside of the tetrahedron.
                let la = b.coords.dot(&c.coords.cross(&d.coords)) / volume;
                let lb = -a.coords.dot(&ac.cross(&ad)) / volume;
                let lc = ab.dot(&(-a.coords).cross(&ad)) / volume;
                self.proj = [la, lb, lc, 1.0 - la - lb - lc];
                Point::origin()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{SimplexState, VoronoiSimplex};
    use crate::math::{Point, Real};
    use crate::query::gjk::CSOPoint;

    fn pt(x: Real, y: Real, z: Real) -> CSOPoint {
        CSOPoint::new(Point::new(x, y, z), Point::origin())
    }

    #[test]
    fn segment_keeps_interior_projection() {
        let mut simplex = VoronoiSimplex::new();
        simplex.reset(pt(-1.0, 1.0, 0.0));
        assert!(simplex.add_point(pt(1.0, 1.0, 0.0)));

        let proj = simplex.project_origin_and_reduce();
        assert_eq!(simplex.state(), SimplexState::Segment);
        assert_relative_eq!(proj, Point::new(0.0, 1.0, 0.0));
        assert_relative_eq!(simplex.proj_coord(0), 0.5);
    }

    #[test]
    fn segment_reduces_to_newest_vertex() {
        let mut simplex = VoronoiSimplex::new();
        simplex.reset(pt(3.0, 0.0, 0.0));
        assert!(simplex.add_point(pt(1.0, 0.0, 0.0)));

        let proj = simplex.project_origin_and_reduce();
        assert_eq!(simplex.state(), SimplexState::Point);
        assert_relative_eq!(proj, Point::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn duplicate_points_are_rejected() {
        let mut simplex = VoronoiSimplex::new();
        simplex.reset(pt(1.0, 2.0, 3.0));
        assert!(!simplex.add_point(pt(1.0, 2.0, 3.0)));
        assert_eq!(simplex.state(), SimplexState::Point);
    }

    #[test]
    fn tetrahedron_encloses_origin() {
        let mut simplex = VoronoiSimplex::new();
        simplex.reset(pt(1.0, -1.0, -1.0));
        assert!(simplex.add_point(pt(-1.0, -1.0, -1.0)));
        assert!(simplex.add_point(pt(0.0, 1.0, -1.0)));
        assert!(simplex.add_point(pt(0.0, 0.0, 1.0)));

        let proj = simplex.project_origin_and_reduce();
        assert_eq!(simplex.state(), SimplexState::Tetrahedron);
        assert_eq!(proj, Point::origin());

        let sum: Real = (0..4).map(|i| simplex.proj_coord(i)).sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1.0e-5);
    }

    #[test]
    fn tetrahedron_reduces_to_face_with_d() {
        let mut simplex = VoronoiSimplex::new();
        simplex.reset(pt(1.0, -1.0, -1.0));
        assert!(simplex.add_point(pt(-1.0, -1.0, -1.0)));
        assert!(simplex.add_point(pt(0.0, 1.0, -1.0)));
        assert!(simplex.add_point(pt(5.0, 0.0, 1.0)));

        let proj = simplex.project_origin_and_reduce();
        assert_ne!(simplex.state(), SimplexState::Tetrahedron);
        assert!(proj.coords.norm() > 0.1);
        let newest = simplex.point(simplex.num_vertices() - 1).point;
        assert_relative_eq!(newest, Point::new(5.0, 0.0, 1.0));
    }

    #[test]
    fn flat_tetrahedron_never_encloses() {
        let mut simplex = VoronoiSimplex::new();
        simplex.reset(pt(1.0, -1.0, 0.0));
        assert!(simplex.add_point(pt(-1.0, -1.0, 0.0)));
        assert!(simplex.add_point(pt(0.0, 1.0, 0.0)));
        assert!(simplex.add_point(pt(0.5, 0.5, 0.0)));

        let _ = simplex.project_origin_and_reduce();
        assert_ne!(simplex.state(), SimplexState::Tetrahedron);
    }
}
