mod disc;
mod min_enclosing_disc;

pub use disc::*;
pub use min_enclosing_disc::*;

#[cfg(test)]
mod disc_tests;
#[cfg(test)]
mod min_enclosing_disc_tests;
