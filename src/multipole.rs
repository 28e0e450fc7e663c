mod complex;
mod coefficients;

pub use coefficients::*;
pub use complex::*;
