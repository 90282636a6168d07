/// An identifier of a feature of a triangle.
///
/// Vertices and edges are numbered like in [`crate::shape::TrianglePointLocation`]: edge 0 is
/// `AB`, edge 1 is `BC`, edge 2 is `AC`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum FeatureId {
    /// Shape-dependent identifier of a vertex.
    Vertex(u32),
    /// Shape-dependent identifier of an edge.
    Edge(u32),
    /// Shape-dependent identifier of a face.
    Face(u32),
}

impl FeatureId {
    /// Feature id of contacts produced by the inner-sphere test of the deep state.
    pub const INNER_SPHERE: i32 = 7;

    /// The integer id stored in [`crate::query::Contact::feature_id`].
    ///
    /// Vertices map to `0..3`, edges to `3..6` and the face to `6`.
    pub fn to_contact_id(self) -> i32 {
        match self {
            FeatureId::Vertex(i) => i as i32,
            FeatureId::Edge(i) => 3 + i as i32,
            FeatureId::Face(_) => 6,
        }
    }

    /// The feature identified by `id`, the inverse of [`FeatureId::to_contact_id`].
    pub fn from_contact_id(id: i32) -> Option<FeatureId> {
        match id {
            0..=2 => Some(FeatureId::Vertex(id as u32)),
            3..=5 => Some(FeatureId::Edge(id as u32 - 3)),
            6 => Some(FeatureId::Face(0)),
            _ => None,
        }
    }

    /// Returns `true` if this identifies the face of the triangle.
    pub fn is_face(self) -> bool {
        matches!(self, FeatureId::Face(_))
    }
}

#[cfg(test)]
mod test {
    use crate::shape::FeatureId;

    #[test]
    fn contact_ids_are_distinct_and_invertible() {
        let features = [
            FeatureId::Vertex(0),
            FeatureId::Vertex(1),
            FeatureId::Vertex(2),
            FeatureId::Edge(0),
            FeatureId::Edge(1),
            FeatureId::Edge(2),
            FeatureId::Face(0),
        ];

        for (i, f) in features.iter().enumerate() {
            assert_eq!(f.to_contact_id(), i as i32);
            assert_eq!(FeatureId::from_contact_id(f.to_contact_id()), Some(*f));
        }

        assert_eq!(FeatureId::from_contact_id(FeatureId::INNER_SPHERE), None);
    }
}
