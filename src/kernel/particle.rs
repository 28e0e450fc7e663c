use crate::models::Point2D;

/// A 2D point-particle with an accumulated repulsive force.
///
/// Particles are owned by the caller and persist across layout iterations;
/// the kernel only reads positions and overwrites forces. The force is reset
/// to zero at the start of every force-computation pass.
///
/// # Examples
///
/// ```
/// use layout_repulsion::kernel::Particle;
/// use layout_repulsion::models::Point2D;
///
/// let p = Particle::new(Point2D::new(1.0, 2.0));
/// assert_eq!(p.force, Point2D::ZERO);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub point: Point2D,
    pub force: Point2D,
}

impl Particle {
    /// Creates a particle at `point` with zero accumulated force.
    pub fn new(point: Point2D) -> Self {
        Particle {
            point,
            force: Point2D::ZERO,
        }
    }
}
