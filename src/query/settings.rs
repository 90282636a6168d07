use crate::math::Real;

/// Errors reported when validating query settings.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq)]
pub enum SettingsError {
    /// The escape-attempt period must be at least 1.
    #[error("The escape attempt period must be at least 1.")]
    ZeroEscapePeriod,
    /// A tolerance or bias was negative, infinite, or NaN.
    #[error("The setting `{0}` must be finite and non-negative, found {1}.")]
    InvalidTolerance(&'static str, Real),
}

fn check_tolerance(name: &'static str, value: Real) -> Result<(), SettingsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::InvalidTolerance(name, value))
    }
}

/// Tuning parameters of the persistent convex/triangle pair testers.
///
/// These are empirical constants. They don't affect the correctness of the contacts, only how
/// often the cheaper tests are attempted and which result wins when two tests disagree.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PairTesterSettings {
    /// Number of queries between two attempts at falling back to the plane test.
    pub escape_attempt_period: u32,
    /// Depth bonus given to the plane-test contact when it is cross-checked against the
    /// closest-points contact.
    pub plane_bias: Real,
    /// Triangles with a squared scaled-normal norm below this are treated as degenerate.
    pub degenerate_epsilon: Real,
    /// Maximum number of surface casts performed to refine a deep penetration.
    pub mpr_refinement_iterations: usize,
}

impl Default for PairTesterSettings {
    fn default() -> Self {
        Self {
            escape_attempt_period: 10,
            plane_bias: 1.0e-3,
            degenerate_epsilon: 1.0e-9,
            mpr_refinement_iterations: 4,
        }
    }
}

impl PairTesterSettings {
    /// Checks that these settings can be used by a pair tester.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.escape_attempt_period == 0 {
            return Err(SettingsError::ZeroEscapePeriod);
        }

        check_tolerance("plane_bias", self.plane_bias)?;
        check_tolerance("degenerate_epsilon", self.degenerate_epsilon)
    }
}

/// Tuning parameters of the box/box separating-axis test and contact generation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CuboidCuboidSettings {
    /// Added to every entry of the absolute relative rotation matrix, so that nearly parallel
    /// edges don't produce a meaningless cross-product axis.
    pub rarb_epsilon: Real,
    /// How much better a face axis of the first box must be to replace a face axis of the
    /// second box.
    pub face_a_bias: Real,
    /// How much better an edge/edge axis must be to replace a face axis.
    pub edge_bias: Real,
    /// Clipped contact points closer than this to an already generated point are discarded.
    pub contact_merge_distance: Real,
}

impl Default for CuboidCuboidSettings {
    fn default() -> Self {
        Self {
            rarb_epsilon: 1.0e-5,
            face_a_bias: 1.0e-3,
            edge_bias: 1.0e-2,
            contact_merge_distance: 1.0e-4,
        }
    }
}

impl CuboidCuboidSettings {
    /// Settings without any axis bias: the axis of minimum penetration always wins.
    pub fn unbiased() -> Self {
        Self {
            face_a_bias: 0.0,
            edge_bias: 0.0,
            ..Self::default()
        }
    }

    /// Checks that these settings can be used by the box/box test.
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_tolerance("rarb_epsilon", self.rarb_epsilon)?;
        check_tolerance("face_a_bias", self.face_a_bias)?;
        check_tolerance("edge_bias", self.edge_bias)?;
        check_tolerance("contact_merge_distance", self.contact_merge_distance)
    }
}
