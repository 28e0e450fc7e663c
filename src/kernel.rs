mod kd_tree;
mod particle;

pub use kd_tree::*;
pub use particle::*;


use crate::errors::KernelError;
use crate::models::Point2D;
use crate::multipole::repulsive_force;

/// Computes the approximate aggregate repulsive force on every particle,
/// writing the results into `particles[i].force`.
///
/// Builds a spatial partition tree with leaves of at most `bucket_size`
/// particles, computes `precision`-term multipole expansions bottom-up, then
/// accumulates near-field exact and far-field approximated forces per leaf.
/// Expected O(n log n) for well-distributed inputs; degrades toward O(n²) for
/// highly clustered inputs, which is the intended trade-off of the method.
///
/// # Arguments
/// * `particles` - The particles; positions are read, forces overwritten.
/// * `bucket_size` - Maximum particles per tree leaf (positive).
/// * `precision` - Number of multipole terms retained (positive).
///
/// # Errors
///
/// [`KernelError::EmptyPointSet`], [`KernelError::InvalidBucketSize`] or
/// [`KernelError::InvalidPrecision`] on invalid arguments, all detected
/// before any work is done.
pub fn compute_forces(
    particles: &mut [Particle],
    bucket_size: usize,
    precision: usize,
) -> Result<ForceStats, KernelError> {
    if precision == 0 {
        return Err(KernelError::InvalidPrecision(precision));
    }
    let mut tree = KdTree::build(particles, bucket_size)?;
    tree.compute_multipole_coefficients(precision)?;
    Ok(tree.accumulate_forces(particles))
}

/// Pure-function boundary of the kernel: one aggregated repulsive force
/// vector per input position, in input order.
///
/// # Example
/// ```
/// use layout_repulsion::kernel::repulsive_forces;
/// use layout_repulsion::models::Point2D;
///
/// let points = [Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0)];
/// let forces = repulsive_forces(&points, 8, 4).unwrap();
/// // each particle is pushed away from the other
/// assert!(forces[0].x < 0.0);
/// assert!(forces[1].x > 0.0);
/// ```
pub fn repulsive_forces(
    points: &[Point2D],
    bucket_size: usize,
    precision: usize,
) -> Result<Vec<Point2D>, KernelError> {
    let mut particles: Vec<Particle> = points.iter().map(|&p| Particle::new(p)).collect();
    compute_forces(&mut particles, bucket_size, precision)?;
    Ok(particles.iter().map(|p| p.force).collect())
}

/// Exact all-pairs repulsion, O(n²). The reference the approximate kernel is
/// validated against, and the cheaper choice for very small point sets.
pub fn brute_force_repulsion(points: &[Point2D]) -> Vec<Point2D> {
    let mut forces = vec![Point2D::ZERO; points.len()];
    for i in 0..points.len() {
        for j in 0..points.len() {
            if i != j {
                forces[i] += repulsive_force(points[i], points[j]);
            }
        }
    }
    forces
}
