use crate::models::Point2D;

/// Absolute slack used by [`Disc::contains`] so that points lying exactly on
/// the boundary are never rejected due to floating error.
pub const CONTAINMENT_TOLERANCE: f64 = 1e-7;

/// Relative tolerance used by [`Disc::on_boundary`].
pub const BOUNDARY_TOLERANCE: f64 = 1e-5;

/// A circle with a cached squared radius, used both as a standalone geometric
/// utility and as the bounding volume of spatial partition tree nodes.
///
/// Immutable once constructed.
///
/// # Examples
///
/// ```
/// use layout_repulsion::geometry::Disc;
/// use layout_repulsion::models::Point2D;
///
/// let d = Disc::from_two_points(Point2D::new(-1.0, 0.0), Point2D::new(1.0, 0.0));
/// assert_eq!(d.center(), Point2D::ZERO);
/// assert_eq!(d.radius(), 1.0);
/// assert!(d.contains(Point2D::new(0.0, 1.0)));
/// assert!(!d.contains(Point2D::new(0.0, 1.1)));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Disc {
    center: Point2D,
    radius: f64,
    radius_squared: f64,
}

impl Disc {
    /// A zero-radius disc centred at `center`.
    pub fn from_point(center: Point2D) -> Self {
        Disc {
            center,
            radius: 0.0,
            radius_squared: 0.0,
        }
    }

    /// The smallest disc with the two specified points on its boundary:
    /// centred at their midpoint, with the points antipodal.
    pub fn from_two_points(a: Point2D, b: Point2D) -> Self {
        let center = Point2D::midpoint(a, b);
        let radius_squared = center.distance_squared(a);
        Disc {
            center,
            radius: radius_squared.sqrt(),
            radius_squared,
        }
    }

    /// The disc through the three specified points.
    ///
    /// For non-collinear inputs this is the circumcircle. Exactly collinear
    /// triples have no circumcircle; they fall back to the disc whose diameter
    /// spans the diagonal of the three points' bounding box.
    pub fn from_three_points(p1: Point2D, p2: Point2D, p3: Point2D) -> Self {
        if Self::collinear(p1, p2, p3) {
            let lower_left = Point2D::new(p1.x.min(p2.x).min(p3.x), p1.y.min(p2.y).min(p3.y));
            let upper_right = Point2D::new(p1.x.max(p2.x).max(p3.x), p1.y.max(p2.y).max(p3.y));
            let center = Point2D::midpoint(lower_left, upper_right);
            let radius_squared = center.distance_squared(upper_right);
            return Disc {
                center,
                radius: radius_squared.sqrt(),
                radius_squared,
            };
        }
        // circumcenter needs both chords non-vertical; reorder so they are
        let dx12 = p2.x - p1.x;
        let dx23 = p3.x - p2.x;
        let center = if dx12 != 0.0 {
            if dx23 != 0.0 {
                Self::circumcenter(p1, p2, p3)
            } else {
                Self::circumcenter(p2, p1, p3)
            }
        } else {
            Self::circumcenter(p2, p3, p1)
        };
        let radius_squared = center.distance_squared(p1);
        Disc {
            center,
            radius: radius_squared.sqrt(),
            radius_squared,
        }
    }

    /// Centre of the circle through three points with `p1.x != p2.x` and
    /// `p2.x != p3.x`. The y coordinate is recovered from whichever chord has
    /// the steeper slope, which keeps the division well conditioned.
    fn circumcenter(p1: Point2D, p2: Point2D, p3: Point2D) -> Point2D {
        let ma = (p2.y - p1.y) / (p2.x - p1.x);
        let mb = (p3.y - p2.y) / (p3.x - p2.x);
        let x = (ma * mb * (p1.y - p3.y) + mb * (p1.x + p2.x) - ma * (p2.x + p3.x))
            / (2.0 * (mb - ma));
        let y = if ma.abs() > mb.abs() {
            (p1.y + p2.y) / 2.0 - (x - (p1.x + p2.x) / 2.0) / ma
        } else {
            (p2.y + p3.y) / 2.0 - (x - (p2.x + p3.x) / 2.0) / mb
        };
        Point2D::new(x, y)
    }

    /// Tests whether the triangle formed by the three points has zero area.
    pub fn collinear(p1: Point2D, p2: Point2D, p3: Point2D) -> bool {
        p1.x * (p2.y - p3.y) + p2.x * (p3.y - p1.y) + p3.x * (p1.y - p2.y) == 0.0
    }

    pub fn center(&self) -> Point2D {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Squared distance from the disc centre to `point`.
    pub fn distance_squared(&self, point: Point2D) -> f64 {
        self.center.distance_squared(point)
    }

    /// Tests whether `point` lies inside the disc, within
    /// [`CONTAINMENT_TOLERANCE`].
    pub fn contains(&self, point: Point2D) -> bool {
        self.distance_squared(point) - CONTAINMENT_TOLERANCE <= self.radius_squared
    }

    /// Tests whether all `points` lie inside the disc, skipping the indices in
    /// the short exclusion list `except`.
    pub fn contains_all_except(&self, points: &[Point2D], except: &[usize]) -> bool {
        points
            .iter()
            .enumerate()
            .all(|(i, &p)| except.contains(&i) || self.contains(p))
    }

    /// Tests whether `point` lies within a small relative tolerance of the
    /// disc boundary.
    pub fn on_boundary(&self, point: Point2D) -> bool {
        let d = self.distance_squared(point);
        if d + self.radius_squared == 0.0 {
            // zero-radius disc queried at its own centre
            return true;
        }
        (d - self.radius_squared).abs() / (d + self.radius_squared) < BOUNDARY_TOLERANCE
    }

    /// Tests whether this disc and `other` overlap.
    pub fn intersects(&self, other: &Disc) -> bool {
        (other.center - self.center).length() < self.radius + other.radius
    }
}
