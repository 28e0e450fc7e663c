mod point_2d;

pub use point_2d::*;
