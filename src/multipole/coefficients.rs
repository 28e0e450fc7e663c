use crate::errors::KernelError;
use crate::models::Point2D;
use crate::multipole::Complex;

/// Below this squared separation the pairwise repulsion stops growing and a
/// fixed strong repulsion along the connecting direction is used instead.
pub const MIN_SEPARATION_SQ: f64 = 0.1;

/// Truncated multipole expansion of the repulsive force field generated by a
/// set of particles, centred at `center` with `precision` complex terms.
///
/// Treating positions as complex numbers, the aggregate far field of the set
/// is approximated by a finite power series in `1 / (z - center)`. The
/// expansion of a tree node can be shifted to a new centre and summed with a
/// sibling's, which is how internal nodes derive their expansions from their
/// children without revisiting particles.
#[derive(Clone, Debug)]
pub struct MultipoleCoefficients {
    center: Complex,
    terms: Vec<Complex>,
}

impl MultipoleCoefficients {
    /// Computes the expansion of `points` around `center` with `precision`
    /// terms. The zeroth term is the point count; term `k > 0` is
    /// `-(1/k) Σ (zi - center)^k`.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::InvalidPrecision`] if `precision` is zero.
    pub fn from_points(
        precision: usize,
        center: Point2D,
        points: &[Point2D],
    ) -> Result<Self, KernelError> {
        if precision == 0 {
            return Err(KernelError::InvalidPrecision(precision));
        }
        let z0 = Complex::new(center.x, center.y);
        let terms = (0..precision).map(|k| coefficient(k, z0, points)).collect();
        Ok(MultipoleCoefficients { center: z0, terms })
    }

    /// Combines two child expansions into one centred at `center` by shifting
    /// each to the new centre and summing termwise.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::PrecisionMismatch`] if the children disagree on
    /// term count; mismatched expansions must never be silently truncated.
    pub fn merge(
        center: Point2D,
        left: &MultipoleCoefficients,
        right: &MultipoleCoefficients,
    ) -> Result<Self, KernelError> {
        if left.precision() != right.precision() {
            return Err(KernelError::PrecisionMismatch(
                left.precision(),
                right.precision(),
            ));
        }
        let z0 = Complex::new(center.x, center.y);
        let shifted_left = left.shift(z0);
        let shifted_right = right.shift(z0);
        let terms = shifted_left
            .into_iter()
            .zip(shifted_right)
            .map(|(a, b)| a + b)
            .collect();
        Ok(MultipoleCoefficients { center: z0, terms })
    }

    /// Number of terms retained.
    pub fn precision(&self) -> usize {
        self.terms.len()
    }

    /// The `k`th term, if retained. Exposed for inspection and testing.
    pub fn term(&self, k: usize) -> Option<Complex> {
        self.terms.get(k).copied()
    }

    /// Translates the coefficients to a new centre `z1` via the standard
    /// multipole shift recurrence (binomially weighted powers of the centre
    /// offset).
    fn shift(&self, z1: Complex) -> Vec<Complex> {
        let p = self.terms.len();
        let mut shifted = vec![Complex::ZERO; p];
        let a0 = self.terms[0];
        shifted[0] = a0;
        let offset = self.center - z1;
        for l in 1..p {
            let mut s = Complex::ZERO;
            for k in 1..=l {
                s += self.terms[k] * offset.powi((l - k) as u32) * binomial(l - 1, k - 1);
            }
            shifted[l] = s - (a0 * offset.powi(l as u32)) / l as f64;
        }
        shifted
    }

    /// Approximate aggregate force at `v` due to the particles this expansion
    /// summarizes. The real and imaginary parts of the truncated series map to
    /// the x and y force components; the y sign is flipped to match the
    /// caller's coordinate system.
    pub fn approximate_force(&self, v: Point2D) -> Point2D {
        let z = Complex::new(v.x, v.y);
        let dz = z - self.center;
        let mut fz = self.terms[0] / dz;
        let mut dz_to_k_plus_1 = dz;
        let mut k = 0;
        loop {
            fz -= (self.terms[k] * k as f64) / dz_to_k_plus_1;
            k += 1;
            if k == self.terms.len() {
                break;
            }
            dz_to_k_plus_1 = dz_to_k_plus_1 * dz;
        }
        Point2D::new(fz.re, -fz.im)
    }
}

/// The `k`th multipole coefficient of `points` around `z0`.
fn coefficient(k: usize, z0: Complex, points: &[Point2D]) -> Complex {
    if k == 0 {
        return Complex::real(points.len() as f64);
    }
    let mut ak = Complex::ZERO;
    for q in points {
        ak -= (Complex::new(q.x, q.y) - z0).powi(k as u32);
    }
    ak / k as f64
}

fn factorial(n: usize) -> f64 {
    let mut f = 1.0;
    for i in 2..=n {
        f *= i as f64;
    }
    f
}

/// Binomial coefficient over the small integers the shift recurrence needs
/// (bounded by the expansion precision, so overflow is not a concern).
fn binomial(n: usize, k: usize) -> f64 {
    factorial(n) / (factorial(k) * factorial(n - k))
}

/// Exact repulsive force on `u` due to `v`: inverse-square repulsion
/// `(u - v) / |u - v|²`, directed away from `v`.
///
/// Separations below [`MIN_SEPARATION_SQ`] substitute a fixed strong repulsion
/// along the connecting direction; exactly coincident points return a nominal
/// unit force so the result is always finite.
///
/// # Examples
///
/// ```
/// use layout_repulsion::models::Point2D;
/// use layout_repulsion::multipole::repulsive_force;
///
/// let f = repulsive_force(Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0));
/// assert_eq!(f, Point2D::new(-0.1, 0.0)); // pushed away from the other point
///
/// let coincident = repulsive_force(Point2D::ZERO, Point2D::ZERO);
/// assert_eq!(coincident, Point2D::new(1.0, 0.0));
/// ```
pub fn repulsive_force(u: Point2D, v: Point2D) -> Point2D {
    let duv = u - v;
    let l = duv.length_squared();
    if l < MIN_SEPARATION_SQ {
        if l != 0.0 {
            return duv / MIN_SEPARATION_SQ;
        }
        return Point2D::new(1.0, 0.0);
    }
    duv / l
}
