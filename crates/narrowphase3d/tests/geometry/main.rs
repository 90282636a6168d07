extern crate nalgebra as na;

mod ball_triangle;
mod cuboid_cuboid;
mod pair_tester_invariants;
mod pair_tester_states;
