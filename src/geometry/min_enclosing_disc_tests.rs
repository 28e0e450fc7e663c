use crate::assert_float_eq;
use crate::errors::KernelError;
use crate::geometry::{min_enclosing_disc, min_enclosing_disc_slow};
use crate::models::Point2D;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_empty_input_is_an_error() {
    assert_eq!(
        min_enclosing_disc(&[]).unwrap_err(),
        KernelError::EmptyPointSet
    );
    assert_eq!(
        min_enclosing_disc_slow(&[]).unwrap_err(),
        KernelError::EmptyPointSet
    );
}

#[test]
fn test_single_point() {
    let med = min_enclosing_disc(&[Point2D::new(4.0, -2.0)]).unwrap();
    assert_eq!(med.disc.center(), Point2D::new(4.0, -2.0));
    assert_eq!(med.disc.radius(), 0.0);
    assert_eq!(med.support, vec![0]);
}

#[test]
fn test_two_points() {
    let points = [Point2D::new(0.0, 0.0), Point2D::new(0.0, 6.0)];
    let med = min_enclosing_disc(&points).unwrap();
    assert_float_eq(med.disc.radius(), 3.0, 1e-12, None);
    assert_eq!(med.disc.center(), Point2D::new(0.0, 3.0));
}

#[test]
fn test_all_points_contained_and_support_on_boundary() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let n = rng.random_range(1..60);
        let points: Vec<Point2D> = (0..n)
            .map(|_| Point2D::new(rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0)))
            .collect();
        let med = min_enclosing_disc(&points).unwrap();
        for &p in &points {
            assert!(med.disc.contains(p), "point {:?} escaped the disc", p);
        }
        assert!(!med.support.is_empty() && med.support.len() <= 3);
        for &i in &med.support {
            assert!(
                med.disc.on_boundary(points[i]),
                "support point {:?} not on boundary",
                points[i]
            );
        }
    }
}

#[test]
fn test_matches_slow_oracle() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..10 {
        let n = rng.random_range(2..25);
        let points: Vec<Point2D> = (0..n)
            .map(|_| Point2D::new(rng.random_range(-10.0..10.0), rng.random_range(-10.0..10.0)))
            .collect();
        let fast = min_enclosing_disc(&points).unwrap();
        let slow = min_enclosing_disc_slow(&points).unwrap();
        assert_float_eq(
            fast.disc.radius(),
            slow.radius(),
            1e-6,
            Some("move-to-front and brute-force radii disagree"),
        );
    }
}

#[test]
fn test_duplicate_points() {
    let p = Point2D::new(1.0, 1.0);
    let points = vec![p; 5];
    let med = min_enclosing_disc(&points).unwrap();
    assert_eq!(med.disc.center(), p);
    assert_eq!(med.disc.radius(), 0.0);
}

#[test]
fn test_collinear_points() {
    let points: Vec<Point2D> = (0..10).map(|i| Point2D::new(i as f64, 2.0 * i as f64)).collect();
    let med = min_enclosing_disc(&points).unwrap();
    for &p in &points {
        assert!(med.disc.contains(p));
    }
    // extremes determine the disc
    let expected = points[0].distance_squared(points[9]).sqrt() / 2.0;
    assert_float_eq(med.disc.radius(), expected, 1e-9, None);
}
