//! Approximate repulsive-force kernel for force-directed graph layout.
//!
//! Aggregates the O(n²) all-pairs repulsion of a spring embedder into an
//! expected O(n log n) pass: particles are partitioned by a bucket KD-tree
//! whose nodes carry minimum enclosing discs, each node holds a truncated
//! multipole expansion of its particles, and forces between leaves with
//! non-intersecting discs are read off the expansion instead of being
//! summed pairwise.
//!
//! The entry points live in [`kernel`]: [`kernel::repulsive_forces`] for the
//! one-shot position-in force-out call, [`kernel::compute_forces`] when the
//! caller keeps a [`kernel::Particle`] buffer across layout iterations.

pub mod errors;
pub mod geometry;
pub mod kernel;
pub mod models;
pub mod multipole;

/// ### General helper function
/// - Asserts that two floating point numbers are approximately equal.
///
/// ### Arguments
///
/// * `a` - The first floating point number.
/// * `b` - The second floating point number.
/// * `epsilon` - The maximum difference between `a` and `b` for them to be considered equal.
/// * `optional_message` - An optional message to display if the assertion fails.
///
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64, optional_message: Option<&str>) {
    match optional_message {
        Some(message) => assert!((a - b).abs() < epsilon, "a: {:?},\nb: {:?},\nepsilon: {:?},\n message: {:?}", a, b, epsilon, message),
        None => assert!((a - b).abs() < epsilon, "Expected {} to be approximately equal to {} (epsilon: {})", a, b, epsilon),
    }
}
