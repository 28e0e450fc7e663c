use crate::assert_float_eq;
use crate::geometry::Disc;
use crate::models::Point2D;

#[test]
fn test_single_point_disc() {
    let p = Point2D::new(2.0, -3.0);
    let d = Disc::from_point(p);
    assert_eq!(d.center(), p);
    assert_eq!(d.radius(), 0.0);
    assert!(d.contains(p));
    assert!(d.on_boundary(p));
    assert!(!d.contains(Point2D::new(2.1, -3.0)));
}

#[test]
fn test_two_point_disc_is_antipodal() {
    let a = Point2D::new(-1.0, 2.0);
    let b = Point2D::new(3.0, 2.0);
    let d = Disc::from_two_points(a, b);
    assert_eq!(d.center(), Point2D::new(1.0, 2.0));
    assert_float_eq(d.radius(), 2.0, 1e-12, None);
    assert!(d.on_boundary(a));
    assert!(d.on_boundary(b));
}

#[test]
fn test_three_point_disc_passes_through_all() {
    let a = Point2D::new(0.0, 1.0);
    let b = Point2D::new(1.0, 0.0);
    let c = Point2D::new(-1.0, 0.0);
    let d = Disc::from_three_points(a, b, c);
    assert_float_eq(d.center().x, 0.0, 1e-12, None);
    assert_float_eq(d.center().y, 0.0, 1e-12, None);
    assert_float_eq(d.radius(), 1.0, 1e-12, None);
    assert!(d.on_boundary(a));
    assert!(d.on_boundary(b));
    assert!(d.on_boundary(c));
}

#[test]
fn test_three_point_disc_permutation_invariant() {
    let pts = [
        Point2D::new(0.3, 1.7),
        Point2D::new(-2.1, 0.4),
        Point2D::new(1.5, -0.9),
    ];
    let reference = Disc::from_three_points(pts[0], pts[1], pts[2]);
    let orders = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    for [i, j, k] in orders {
        let d = Disc::from_three_points(pts[i], pts[j], pts[k]);
        assert_float_eq(d.center().x, reference.center().x, 1e-9, None);
        assert_float_eq(d.center().y, reference.center().y, 1e-9, None);
        assert_float_eq(d.radius(), reference.radius(), 1e-9, None);
    }
}

#[test]
fn test_three_point_disc_with_vertical_chords() {
    // first chord vertical
    let d = Disc::from_three_points(
        Point2D::new(0.0, 0.0),
        Point2D::new(0.0, 2.0),
        Point2D::new(1.0, 1.0),
    );
    assert_float_eq(d.center().x, 0.0, 1e-12, None);
    assert_float_eq(d.center().y, 1.0, 1e-12, None);
    // second chord vertical
    let d = Disc::from_three_points(
        Point2D::new(1.0, 1.0),
        Point2D::new(0.0, 0.0),
        Point2D::new(0.0, 2.0),
    );
    assert_float_eq(d.center().y, 1.0, 1e-12, None);
}

#[test]
fn test_collinear_fallback_spans_bounding_box() {
    let a = Point2D::new(0.0, 0.0);
    let b = Point2D::new(1.0, 1.0);
    let c = Point2D::new(2.0, 2.0);
    let d = Disc::from_three_points(a, b, c);
    assert_eq!(d.center(), Point2D::new(1.0, 1.0));
    assert_float_eq(d.radius(), 2.0_f64.sqrt(), 1e-12, None);
    assert!(d.contains(a));
    assert!(d.contains(b));
    assert!(d.contains(c));
}

#[test]
fn test_contains_accepts_exact_boundary() {
    let d = Disc::from_two_points(Point2D::new(-1.0, 0.0), Point2D::new(1.0, 0.0));
    // on the boundary up to representation error
    assert!(d.contains(Point2D::new(0.0, 1.0)));
    assert!(d.contains(Point2D::new(2.0_f64.sqrt() / 2.0, 2.0_f64.sqrt() / 2.0)));
}

#[test]
fn test_contains_all_except() {
    let points = [
        Point2D::new(0.0, 0.0),
        Point2D::new(0.5, 0.0),
        Point2D::new(10.0, 0.0),
    ];
    let d = Disc::from_two_points(points[0], points[1]);
    assert!(!d.contains_all_except(&points, &[]));
    assert!(d.contains_all_except(&points, &[2]));
}

#[test]
fn test_intersects() {
    let a = Disc::from_two_points(Point2D::new(-1.0, 0.0), Point2D::new(1.0, 0.0));
    let b = Disc::from_two_points(Point2D::new(1.5, 0.0), Point2D::new(3.0, 0.0));
    let c = Disc::from_two_points(Point2D::new(4.0, 0.0), Point2D::new(5.0, 0.0));
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
    assert!(!a.intersects(&c));
    // tangent discs do not count as intersecting
    let t = Disc::from_two_points(Point2D::new(2.0, 0.0), Point2D::new(4.0, 0.0));
    assert!(!a.intersects(&t));
}

#[test]
fn test_collinear_detection() {
    assert!(Disc::collinear(
        Point2D::new(0.0, 0.0),
        Point2D::new(1.0, 2.0),
        Point2D::new(2.0, 4.0),
    ));
    assert!(!Disc::collinear(
        Point2D::new(0.0, 0.0),
        Point2D::new(1.0, 2.0),
        Point2D::new(2.0, 4.1),
    ));
}
