use crate::errors::KernelError;
use crate::geometry::Disc;
use crate::models::Point2D;

/// Result of a minimum enclosing disc computation: the disc itself and the
/// indices of the 1 to 3 input points lying on its boundary that determine it.
#[derive(Clone, Debug)]
pub struct MinDisc {
    pub disc: Disc,
    pub support: Vec<usize>,
}

/// Computes the smallest disc enclosing all `points` with the move-to-front
/// heuristic, after Welzl '91. Expected time linear in the number of points.
///
/// # Errors
///
/// Returns [`KernelError::EmptyPointSet`] for empty input.
///
/// # Examples
///
/// ```
/// use layout_repulsion::geometry::min_enclosing_disc;
/// use layout_repulsion::models::Point2D;
///
/// let points = [
///     Point2D::new(0.0, 0.0),
///     Point2D::new(2.0, 0.0),
///     Point2D::new(1.0, 0.5),
/// ];
/// let med = min_enclosing_disc(&points).unwrap();
/// assert!(points.iter().all(|&p| med.disc.contains(p)));
/// assert!(med.support.iter().all(|&i| med.disc.on_boundary(points[i])));
/// ```
pub fn min_enclosing_disc(points: &[Point2D]) -> Result<MinDisc, KernelError> {
    if points.is_empty() {
        return Err(KernelError::EmptyPointSet);
    }
    let mut order: Vec<usize> = (0..points.len()).collect();
    let n = order.len();
    let (disc, support) = move_to_front(points, &mut order, n, &[]);
    // the first point always ends up in some support, so the disc is present
    let disc = disc.unwrap_or_else(|| Disc::from_point(points[0]));
    Ok(MinDisc { disc, support })
}

/// Minimal disc for the first `limit` points of `order`, given the points in
/// `support` fixed on the boundary. A point violating the current disc is
/// recursed on with itself added to the support (capped at three points,
/// which fully determine a circle) and then moved to the front of the
/// ordering, which amortizes the total work to expected linear time.
fn move_to_front(
    points: &[Point2D],
    order: &mut [usize],
    limit: usize,
    support: &[usize],
) -> (Option<Disc>, Vec<usize>) {
    let mut disc = support_disc(points, support);
    let mut boundary = support.to_vec();
    if support.len() == 3 {
        return (disc, boundary);
    }
    for i in 0..limit {
        let candidate = order[i];
        let inside = disc.is_some_and(|d| d.contains(points[candidate]));
        if !inside {
            let mut extended = support.to_vec();
            extended.push(candidate);
            let (d, b) = move_to_front(points, order, i, &extended);
            disc = d;
            boundary = b;
            order[..=i].rotate_right(1);
        }
    }
    (disc, boundary)
}

/// The disc determined by up to three support points.
fn support_disc(points: &[Point2D], support: &[usize]) -> Option<Disc> {
    match *support {
        [] => None,
        [a] => Some(Disc::from_point(points[a])),
        [a, b] => Some(Disc::from_two_points(points[a], points[b])),
        [a, b, c] => Some(Disc::from_three_points(points[a], points[b], points[c])),
        _ => unreachable!("support never exceeds three points"),
    }
}

/// Computes the minimum enclosing disc by trying every pair and triple of
/// points. Quadratic at best; kept as a reference oracle for testing.
pub fn min_enclosing_disc_slow(points: &[Point2D]) -> Result<Disc, KernelError> {
    if points.is_empty() {
        return Err(KernelError::EmptyPointSet);
    }
    if points.len() == 1 {
        return Ok(Disc::from_point(points[0]));
    }
    let n = points.len();
    let mut best: Option<Disc> = None;
    for i in 0..n {
        for j in 0..n {
            if i != j {
                let c = Disc::from_two_points(points[i], points[j]);
                if c.contains_all_except(points, &[i, j])
                    && best.map_or(true, |b| b.radius() > c.radius())
                {
                    best = Some(c);
                }
            }
            for k in 0..n {
                if k != i && k != j && !Disc::collinear(points[i], points[j], points[k]) {
                    let c = Disc::from_three_points(points[i], points[j], points[k]);
                    if c.contains_all_except(points, &[i, j, k])
                        && best.map_or(true, |b| b.radius() > c.radius())
                    {
                        best = Some(c);
                    }
                }
            }
        }
    }
    Ok(best.unwrap_or_else(|| Disc::from_point(points[0])))
}
