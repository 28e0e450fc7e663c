use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A 2D point, also used as a force vector.
///
/// # Examples
///
/// ```
/// use layout_repulsion::models::Point2D;
///
/// let p = Point2D::new(3.0, 4.0);
/// assert_eq!(p.length(), 5.0);
/// assert_eq!(p.length_squared(), 25.0);
///
/// let q = p - Point2D::new(3.0, 0.0);
/// assert_eq!(q, Point2D::new(0.0, 4.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Point2D { x, y }
    }

    /// Squared Euclidean length; avoids the square root where only
    /// comparisons are needed.
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Point mid-way between `a` and `b`.
    pub fn midpoint(a: Point2D, b: Point2D) -> Point2D {
        Point2D::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }

    /// Squared distance to another point.
    pub fn distance_squared(&self, other: Point2D) -> f64 {
        (*self - other).length_squared()
    }
}

impl Add for Point2D {
    type Output = Point2D;
    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point2D {
    fn add_assign(&mut self, rhs: Point2D) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point2D {
    type Output = Point2D;
    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point2D {
    fn sub_assign(&mut self, rhs: Point2D) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Point2D {
    type Output = Point2D;
    fn neg(self) -> Point2D {
        Point2D::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point2D {
    type Output = Point2D;
    fn mul(self, rhs: f64) -> Point2D {
        Point2D::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point2D {
    type Output = Point2D;
    fn div(self, rhs: f64) -> Point2D {
        Point2D::new(self.x / rhs, self.y / rhs)
    }
}
