use std::error::Error;
use std::fmt;

/// Represents errors that can occur while computing repulsive forces.
///
/// All of these are invalid-argument conditions detected eagerly at the API
/// boundary; numeric edge cases (collinear triples, coincident particles) are
/// handled by fallback branches and never surface as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// The point or particle collection was empty.
    EmptyPointSet,
    /// The requested leaf bucket size was zero.
    InvalidBucketSize(usize),
    /// The requested multipole precision was zero.
    InvalidPrecision(usize),
    /// Two expansions with different term counts were merged.
    PrecisionMismatch(usize, usize),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KernelError::EmptyPointSet => write!(f, "point set must not be empty"),
            KernelError::InvalidBucketSize(b) => {
                write!(f, "bucket size must be positive, got {}", b)
            }
            KernelError::InvalidPrecision(p) => {
                write!(f, "multipole precision must be positive, got {}", p)
            }
            KernelError::PrecisionMismatch(a, b) => {
                write!(f, "cannot merge expansions of precision {} and {}", a, b)
            }
        }
    }
}

impl Error for KernelError {}
