use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use layout_repulsion::kernel::{brute_force_repulsion, repulsive_forces};
use layout_repulsion::models::Point2D;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_points(n: usize) -> Vec<Point2D> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|_| Point2D::new(rng.random_range(-100.0..100.0), rng.random_range(-100.0..100.0)))
        .collect()
}

pub fn bench_repulsion(c: &mut Criterion) {
    let _ = env_logger::try_init();
    let mut group = c.benchmark_group("repulsion");
    group.measurement_time(std::time::Duration::from_secs(5));
    group.sample_size(50);

    for &n in &[100_usize, 1_000, 5_000] {
        let points = random_points(n);

        group.bench_with_input(BenchmarkId::new("multipole", n), &points, |b, points| {
            b.iter(|| repulsive_forces(points, 8, 5).unwrap())
        });

        if n <= 1_000 {
            group.bench_with_input(BenchmarkId::new("brute_force", n), &points, |b, points| {
                b.iter(|| brute_force_repulsion(points))
            });
        }
    }
}

pub fn bench_precision(c: &mut Criterion) {
    let mut group = c.benchmark_group("repulsion_precision");
    group.measurement_time(std::time::Duration::from_secs(5));
    group.sample_size(50);

    let points = random_points(2_000);
    for precision in [1_usize, 3, 5, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(precision),
            &precision,
            |b, &precision| b.iter(|| repulsive_forces(&points, 8, precision).unwrap()),
        );
    }
}

criterion_group!(benches, bench_repulsion, bench_precision);
criterion_main!(benches);
