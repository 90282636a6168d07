use alloc::vec::Vec;

use crate::query::{
    CollisionState, ContactManifold, PairTesterSettings, SphereTrianglePairTester,
    TriangleConvexPairTester, TriangleTrianglePairTester,
};
use crate::shape::{ConvexPrimitive, Triangle};

/// The kind of specialized tester used for a pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PairKind {
    /// Any convex shape against a triangle.
    ConvexTriangle,
    /// A triangle against another triangle.
    TriangleTriangle,
    /// A ball against a triangle.
    SphereTriangle,
}

impl PairKind {
    /// The kind of tester suited for the given convex shape.
    pub fn of(shape: &ConvexPrimitive) -> Self {
        match shape {
            ConvexPrimitive::Ball(_) => PairKind::SphereTriangle,
            ConvexPrimitive::Triangle(_) => PairKind::TriangleTriangle,
            ConvexPrimitive::Cuboid(_) | ConvexPrimitive::Capsule(_) => PairKind::ConvexTriangle,
        }
    }
}

/// The persistent contact generator of a (convex shape, triangle) pair.
#[derive(Clone, Debug)]
pub enum PairTester {
    /// The generic state machine.
    ConvexTriangle(TriangleConvexPairTester<ConvexPrimitive>),
    /// The state machine with a one-sided filter for the first triangle.
    TriangleTriangle(TriangleTrianglePairTester),
    /// The closed-form ball test.
    SphereTriangle(SphereTrianglePairTester),
}

impl PairTester {
    /// Creates the tester suited for `shape`.
    pub fn new(shape: ConvexPrimitive, settings: PairTesterSettings) -> Self {
        match shape {
            ConvexPrimitive::Ball(ball) => PairTester::SphereTriangle(
                SphereTrianglePairTester::with_settings(ball, settings),
            ),
            ConvexPrimitive::Triangle(tri) => {
                PairTester::TriangleTriangle(TriangleTrianglePairTester::with_settings(tri, settings))
            }
            _ => PairTester::ConvexTriangle(TriangleConvexPairTester::with_settings(
                shape, settings,
            )),
        }
    }

    /// The kind of this tester.
    pub fn kind(&self) -> PairKind {
        match self {
            PairTester::ConvexTriangle(_) => PairKind::ConvexTriangle,
            PairTester::TriangleTriangle(_) => PairKind::TriangleTriangle,
            PairTester::SphereTriangle(_) => PairKind::SphereTriangle,
        }
    }

    /// The test that will run first on the next query, for testers with a state machine.
    pub fn state(&self) -> Option<CollisionState> {
        match self {
            PairTester::ConvexTriangle(t) => Some(t.state()),
            PairTester::TriangleTriangle(t) => Some(t.state()),
            PairTester::SphereTriangle(_) => None,
        }
    }

    fn settings(&self) -> PairTesterSettings {
        match self {
            PairTester::ConvexTriangle(t) => *t.settings(),
            PairTester::TriangleTriangle(t) => *t.settings(),
            PairTester::SphereTriangle(t) => *t.settings(),
        }
    }

    /// Resets this tester for a new shape.
    ///
    /// The tester is replaced by one of the suitable kind if `shape` needs another one.
    pub fn reinitialize(&mut self, shape: ConvexPrimitive) {
        if self.kind() != PairKind::of(&shape) {
            *self = PairTester::new(shape, self.settings());
            return;
        }

        match (self, shape) {
            (PairTester::SphereTriangle(t), ConvexPrimitive::Ball(ball)) => t.reinitialize(ball),
            (PairTester::TriangleTriangle(t), ConvexPrimitive::Triangle(tri)) => {
                t.reinitialize(tri)
            }
            (PairTester::ConvexTriangle(t), shape) => t.reinitialize(shape),
            _ => unreachable!(),
        }
    }

    /// Resets this tester and drops its shape.
    pub fn cleanup(&mut self) {
        match self {
            PairTester::ConvexTriangle(t) => t.cleanup(),
            PairTester::TriangleTriangle(t) => t.cleanup(),
            PairTester::SphereTriangle(t) => t.cleanup(),
        }
    }

    /// Computes the contacts between the convex shape and `triangle`, given in the local-space
    /// of the convex shape.
    ///
    /// Contact normals point from the triangle toward the convex shape.
    pub fn generate_contacts(&mut self, triangle: &Triangle) -> ContactManifold {
        match self {
            PairTester::ConvexTriangle(t) => t.generate_contacts(triangle),
            PairTester::TriangleTriangle(t) => t.generate_contacts(triangle),
            PairTester::SphereTriangle(t) => t.generate_contacts(triangle),
        }
    }
}

/// A free list of pair testers, reused across broad-phase pairs.
///
/// Testers are handed out by value and must be given back to [`PairTesterPool::release`],
/// which consumes them: a released tester can't be queried anymore.
#[derive(Clone, Debug, Default)]
pub struct PairTesterPool {
    settings: PairTesterSettings,
    free: Vec<PairTester>,
}

impl PairTesterPool {
    /// Creates an empty pool handing out testers with the given settings.
    pub fn new(settings: PairTesterSettings) -> Self {
        Self {
            settings,
            free: Vec::new(),
        }
    }

    /// The settings of the testers created by this pool.
    pub fn settings(&self) -> &PairTesterSettings {
        &self.settings
    }

    /// The number of testers ready to be reused.
    pub fn num_free(&self) -> usize {
        self.free.len()
    }

    /// Hands out a tester for `shape`, reset to its initial state.
    pub fn acquire(&mut self, shape: impl Into<ConvexPrimitive>) -> PairTester {
        let shape = shape.into();
        let kind = PairKind::of(&shape);

        if let Some(i) = self.free.iter().position(|t| t.kind() == kind) {
            let mut tester = self.free.swap_remove(i);
            tester.reinitialize(shape);
            tester
        } else {
            PairTester::new(shape, self.settings)
        }
    }

    /// Gives a tester back to this pool.
    pub fn release(&mut self, mut tester: PairTester) {
        tester.cleanup();
        self.free.push(tester);
    }
}
