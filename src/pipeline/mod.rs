//! Batch processing of the persistent pairs found by a broad-phase.
//!
//! Each [`ContactPair`] owns the testers of one convex shape against the triangles it
//! overlaps. Pairs share no state, so [`process_pairs`] may run them on several threads (with
//! the `parallel` feature), each worker using its own [`ScratchPool`].

use alloc::vec::Vec;

use crate::query::{ContactManifold, PairTester, PairTesterPool, MAX_MANIFOLD_POINTS};
use crate::shape::{ConvexPrimitive, Triangle};
use crate::utils::ScratchPool;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A triangle overlapping the convex shape of a pair, with its persistent tester.
#[derive(Clone, Debug)]
pub struct TriangleSlot {
    /// The triangle, expressed in the local-space of the convex shape.
    pub triangle: Triangle,
    /// The tester of this (convex shape, triangle) pair.
    pub tester: PairTester,
}

/// A convex shape and the triangles it may touch.
#[derive(Clone, Debug)]
pub struct ContactPair {
    shape: ConvexPrimitive,
    /// The triangles overlapping the convex shape, as reported by the broad-phase.
    pub slots: Vec<TriangleSlot>,
    /// The contacts computed by the last call to [`process_pairs`], at most four.
    pub manifold: ContactManifold,
}

impl ContactPair {
    /// Creates a pair for `shape`, without any triangle.
    pub fn new(shape: impl Into<ConvexPrimitive>) -> Self {
        Self {
            shape: shape.into(),
            slots: Vec::new(),
            manifold: ContactManifold::new(),
        }
    }

    /// The convex shape of this pair.
    pub fn shape(&self) -> &ConvexPrimitive {
        &self.shape
    }

    /// Adds a triangle, with a tester taken from `pool`.
    pub fn insert_triangle(&mut self, triangle: Triangle, pool: &mut PairTesterPool) {
        self.slots.push(TriangleSlot {
            triangle,
            tester: pool.acquire(self.shape),
        });
    }

    /// Removes the `i`-th triangle and gives its tester back to `pool`.
    ///
    /// The last triangle takes the place of the removed one.
    pub fn remove_triangle(&mut self, i: usize, pool: &mut PairTesterPool) -> Triangle {
        let slot = self.slots.swap_remove(i);
        pool.release(slot.tester);
        slot.triangle
    }

    /// Gives all the testers of this pair back to `pool`.
    pub fn release(self, pool: &mut PairTesterPool) {
        for slot in self.slots {
            pool.release(slot.tester);
        }
    }
}

/// Runs every tester of `pair` once and keeps the contacts spanning the largest area.
pub fn process_pair(pair: &mut ContactPair, scratch: &mut ScratchPool) {
    let mut contacts = scratch.contacts();

    for slot in &mut pair.slots {
        let manifold = slot.tester.generate_contacts(&slot.triangle);
        contacts.extend_from_slice(manifold.contacts());
    }

    contacts.sort_unstable_by(|a, b| b.penetration_depth.total_cmp(&a.penetration_depth));

    pair.manifold.clear();
    for contact in contacts.iter().take(MAX_MANIFOLD_POINTS) {
        let _ = pair.manifold.push(*contact);
    }

    if let Some(deepest) = contacts.first() {
        pair.manifold.reduce_to_four(&deepest.normal);
    }
}

/// Computes the contact manifold of every pair.
pub fn process_pairs(pairs: &mut [ContactPair]) {
    #[cfg(feature = "parallel")]
    {
        pairs
            .par_iter_mut()
            .for_each_init(ScratchPool::new, |scratch, pair| process_pair(pair, scratch));
    }

    #[cfg(not(feature = "parallel"))]
    {
        let mut scratch = ScratchPool::new();

        for pair in pairs.iter_mut() {
            process_pair(pair, &mut scratch);
        }
    }
}
