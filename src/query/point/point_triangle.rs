use crate::math::{Point, Real, Vector};
use crate::shape::{FeatureId, Triangle, TrianglePointLocation};

enum ProjectionInfo {
    OnAB,
    OnAC,
    OnBC,
    // The u32 indicates if we are on the side of `AB × AC` (0) or on the other side (1).
    OnFace(u32, Real, Real, Real),
}

// Checks on which edge voronoï region the point is, using explicit cross products that are
// more numerically stable than the dot-product formulation.
fn stable_check_edges_voronoi(
    ab: &Vector<Real>,
    ac: &Vector<Real>,
    bc: &Vector<Real>,
    ap: &Vector<Real>,
    bp: &Vector<Real>,
    cp: &Vector<Real>,
    ab_ap: Real,
    ab_bp: Real,
    ac_ap: Real,
    ac_cp: Real,
    ac_bp: Real,
    ab_cp: Real,
) -> ProjectionInfo {
    let n = ab.cross(ac);

    let vc = n.dot(&ab.cross(ap));
    if vc < 0.0 && ab_ap >= 0.0 && ab_bp <= 0.0 {
        return ProjectionInfo::OnAB;
    }

    let vb = -n.dot(&ac.cross(cp));
    if vb < 0.0 && ac_ap >= 0.0 && ac_cp <= 0.0 {
        return ProjectionInfo::OnAC;
    }

    let va = n.dot(&bc.cross(bp));
    if va < 0.0 && ac_bp - ab_bp >= 0.0 && ab_cp - ac_cp >= 0.0 {
        return ProjectionInfo::OnBC;
    }

    let side = if n.dot(ap) >= 0.0 { 0 } else { 1 };
    ProjectionInfo::OnFace(side, va, vb, vc)
}

impl Triangle {
    /// Projects a point on this triangle (margin excluded) and returns the projection location.
    ///
    /// Degenerate triangles never produce NaNs: when the face weights can't be computed, the
    /// point is reported on the face with equal barycentric weights.
    pub fn project_local_point_and_get_location(
        &self,
        pt: &Point<Real>,
    ) -> (Point<Real>, TrianglePointLocation) {
        let a = self.a;
        let b = self.b;
        let c = self.c;

        let ab = b - a;
        let ac = c - a;
        let ap = pt - a;

        let ab_ap = ab.dot(&ap);
        let ac_ap = ac.dot(&ap);

        if ab_ap <= 0.0 && ac_ap <= 0.0 {
            // Voronoï region of `a`.
            return (a, TrianglePointLocation::OnVertex(0));
        }

        let bp = pt - b;
        let ab_bp = ab.dot(&bp);
        let ac_bp = ac.dot(&bp);

        if ab_bp >= 0.0 && ac_bp <= ab_bp {
            // Voronoï region of `b`.
            return (b, TrianglePointLocation::OnVertex(1));
        }

        let cp = pt - c;
        let ab_cp = ab.dot(&cp);
        let ac_cp = ac.dot(&cp);

        if ac_cp >= 0.0 && ab_cp <= ac_cp {
            // Voronoï region of `c`.
            return (c, TrianglePointLocation::OnVertex(2));
        }

        let bc = c - b;
        match stable_check_edges_voronoi(
            &ab, &ac, &bc, &ap, &bp, &cp, ab_ap, ab_bp, ac_ap, ac_cp, ac_bp, ab_cp,
        ) {
            ProjectionInfo::OnAB => {
                // Voronoï region of `ab`.
                let v = ab_ap / ab.norm_squared();
                (a + ab * v, TrianglePointLocation::OnEdge(0, [1.0 - v, v]))
            }
            ProjectionInfo::OnAC => {
                // Voronoï region of `ac`.
                let w = ac_ap / ac.norm_squared();
                (a + ac * w, TrianglePointLocation::OnEdge(2, [1.0 - w, w]))
            }
            ProjectionInfo::OnBC => {
                // Voronoï region of `bc`.
                let w = bc.dot(&bp) / bc.norm_squared();
                (b + bc * w, TrianglePointLocation::OnEdge(1, [1.0 - w, w]))
            }
            ProjectionInfo::OnFace(side, va, vb, vc) => {
                // Voronoï region of the face.
                let denom = va + vb + vc;

                if denom != 0.0 {
                    let v = vb / denom;
                    let w = vc / denom;
                    let bcoords = [1.0 - v - w, v, w];
                    (a + ab * v + ac * w, TrianglePointLocation::OnFace(side, bcoords))
                } else {
                    let third = 1.0 / 3.0;
                    (
                        self.center(),
                        TrianglePointLocation::OnFace(side, [third, third, third]),
                    )
                }
            }
        }
    }

    /// Projects a point on this triangle (margin excluded).
    #[inline]
    pub fn project_local_point(&self, pt: &Point<Real>) -> Point<Real> {
        self.project_local_point_and_get_location(pt).0
    }

    /// Projects a point on this triangle (margin excluded) and returns the feature it lies on.
    #[inline]
    pub fn project_local_point_and_get_feature(
        &self,
        pt: &Point<Real>,
    ) -> (Point<Real>, FeatureId) {
        let (proj, loc) = self.project_local_point_and_get_location(pt);
        (proj, loc.feature_id())
    }
}

impl TrianglePointLocation {
    /// The triangle feature this location lies on.
    #[inline]
    pub fn feature_id(&self) -> FeatureId {
        match *self {
            TrianglePointLocation::OnVertex(i) => FeatureId::Vertex(i),
            TrianglePointLocation::OnEdge(i, _) => FeatureId::Edge(i),
            TrianglePointLocation::OnFace(i, _) => FeatureId::Face(i),
        }
    }
}
