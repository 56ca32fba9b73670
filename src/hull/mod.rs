//! Convex hull of a planar point set.
//!
//! # Example
//!
//! ```
//! use tessera::hull::convex_hull;
//! use tessera::Point2;
//!
//! let points: Vec<Point2<f64>> = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.5, 0.5), // Interior point
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ];
//!
//! let hull = convex_hull(&points);
//!
//! // Hull should be the 4 corners (interior point excluded)
//! assert_eq!(hull.len(), 4);
//! ```

use crate::error::{GeometryError, Result};
use crate::predicates::orient2d;
use crate::primitives::Point2;
use num_traits::Float;
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Working stack for the Graham scan.
struct HullStack<F> {
    points: Vec<Point2<F>>,
}

impl<F: Float> HullStack<F> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    fn push(&mut self, p: Point2<F>) {
        self.points.push(p);
    }

    fn top(&self) -> Point2<F> {
        self.points[self.points.len() - 1]
    }

    fn next_to_top(&self) -> Point2<F> {
        self.points[self.points.len() - 2]
    }

    fn below_next_to_top(&self) -> Point2<F> {
        self.points[self.points.len() - 3]
    }

    /// Drops the element under the top, keeping the top in place.
    fn remove_next_to_top(&mut self) {
        let top = self.points.pop();
        self.points.pop();
        if let Some(top) = top {
            self.points.push(top);
        }
    }

    /// True if the last three points fail to make a strict left turn.
    fn top_turn_is_not_left(&self) -> bool {
        self.len() >= 3
            && orient2d(self.below_next_to_top(), self.next_to_top(), self.top()) <= F::zero()
    }

    fn into_vec(self) -> Vec<Point2<F>> {
        self.points
    }
}

/// Computes the convex hull of a set of points using a Graham scan.
///
/// Returns the hull vertices in counter-clockwise order, starting from the
/// lowest point (ties broken by smallest x). The hull is implicitly closed.
///
/// # Algorithm
///
/// 1. Pick the pivot: minimum y, then minimum x
/// 2. Sort the other points by polar angle around the pivot, nearer first
///    on equal angle
/// 3. Push each point, then pop the element under the top while the last
///    three points do not make a strict left turn
///
/// Collinear boundary points are dropped, so the result is the minimal
/// vertex set. Collinear input yields its two extreme points and identical
/// points collapse to one.
///
/// Inputs of three or fewer points are returned unchanged. Points with a
/// NaN or infinite coordinate are skipped; use [`try_convex_hull`] to
/// reject them instead.
///
/// # Complexity
///
/// - Time: O(n log n) due to sorting
/// - Space: O(n)
///
/// # Example
///
/// ```
/// use tessera::hull::convex_hull;
/// use tessera::Point2;
///
/// let points: Vec<Point2<f64>> = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(0.0, 2.0),
/// ];
///
/// let hull = convex_hull(&points);
/// assert_eq!(hull.len(), 4); // Square corners
/// assert_eq!(hull[0], Point2::new(0.0, 0.0));
/// ```
pub fn convex_hull<F: Float>(points: &[Point2<F>]) -> Vec<Point2<F>> {
    if points.iter().all(Point2::is_finite) {
        return graham_scan(points);
    }

    let finite: Vec<Point2<F>> = points.iter().copied().filter(Point2::is_finite).collect();
    let skipped = points.len() - finite.len();
    warn!(skipped, "convex hull skipped non-finite points");
    graham_scan(&finite)
}

/// Like [`convex_hull`], but fails on any NaN or infinite coordinate.
///
/// # Errors
///
/// Returns [`GeometryError::NonFiniteInput`] if any point is not finite.
pub fn try_convex_hull<F: Float>(points: &[Point2<F>]) -> Result<Vec<Point2<F>>> {
    if !points.iter().all(Point2::is_finite) {
        return Err(GeometryError::NonFiniteInput);
    }
    Ok(graham_scan(points))
}

fn graham_scan<F: Float>(points: &[Point2<F>]) -> Vec<Point2<F>> {
    if points.len() <= 3 {
        return points.to_vec();
    }

    let pivot = points
        .iter()
        .copied()
        .min_by(|a, b| {
            a.y.partial_cmp(&b.y)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
        })
        .unwrap_or_else(Point2::origin);

    let mut sorted: Vec<(PolarKey<F>, Point2<F>)> = points
        .iter()
        .copied()
        .filter(|&p| p != pivot)
        .map(|p| (PolarKey::new(pivot, p), p))
        .collect();
    sorted.sort_by(|(a, _), (b, _)| a.compare(b));

    let mut stack = HullStack::with_capacity(sorted.len() + 1);
    stack.push(pivot);
    for (_, p) in sorted {
        stack.push(p);
        while stack.top_turn_is_not_left() {
            stack.remove_next_to_top();
        }
    }

    let hull = stack.into_vec();
    debug!(input = points.len(), hull = hull.len(), "convex hull");
    hull
}

/// Sort key for the scan: polar angle around the pivot, then distance.
///
/// The angle is the pseudo-angle `1 - dx / (|dx| + dy)`, which grows
/// monotonically with the true angle over `[0, pi]`. Exactly proportional
/// offsets produce bit-identical keys, so collinear runs tie on angle and
/// fall back to distance. Keys compare as plain scalars, which keeps the
/// ordering total no matter how close to collinear the points are.
#[derive(Debug, Clone, Copy)]
struct PolarKey<F> {
    angle: F,
    distance_squared: F,
}

impl<F: Float> PolarKey<F> {
    /// Key of `p` around `pivot`; `p` must differ from `pivot` and lie on or
    /// above its horizontal.
    fn new(pivot: Point2<F>, p: Point2<F>) -> Self {
        let d = p - pivot;
        Self {
            angle: F::one() - d.x / (d.x.abs() + d.y),
            distance_squared: d.magnitude_squared(),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        scalar_cmp(self.angle, other.angle)
            .then_with(|| scalar_cmp(self.distance_squared, other.distance_squared))
    }
}

/// Total order on scalars with NaN after every number.
fn scalar_cmp<F: Float>(a: F, b: F) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Computes the area of a convex hull.
///
/// Uses the shoelace formula on the hull vertices. Returns 0 for fewer than
/// 3 vertices.
///
/// # Example
///
/// ```
/// use tessera::hull::{convex_hull, convex_hull_area};
/// use tessera::Point2;
///
/// let points: Vec<Point2<f64>> = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(0.0, 2.0),
///     Point2::new(1.0, 1.0),
/// ];
///
/// let hull = convex_hull(&points);
/// let area = convex_hull_area(&hull);
///
/// assert!((area - 4.0).abs() < 1e-10); // 2x2 square
/// ```
pub fn convex_hull_area<F: Float>(hull: &[Point2<F>]) -> F {
    if hull.len() < 3 {
        return F::zero();
    }

    let n = hull.len();
    let twice_area = (0..n).fold(F::zero(), |acc, i| {
        let j = (i + 1) % n;
        acc + hull[i].x * hull[j].y - hull[j].x * hull[i].y
    });

    twice_area.abs() / (F::one() + F::one())
}

/// Computes the perimeter of a convex hull.
///
/// Returns 0 for fewer than 2 vertices. A two-point hull is a degenerate
/// closed polygon, so its perimeter is twice the segment length.
pub fn convex_hull_perimeter<F: Float>(hull: &[Point2<F>]) -> F {
    if hull.len() < 2 {
        return F::zero();
    }

    let n = hull.len();
    (0..n).fold(F::zero(), |acc, i| acc + hull[i].distance(hull[(i + 1) % n]))
}

/// Tests if a point is inside a convex hull given in CCW order.
///
/// A point on the boundary is considered inside. Always false for hulls of
/// fewer than 3 vertices.
///
/// # Example
///
/// ```
/// use tessera::hull::{convex_hull, point_in_convex_hull};
/// use tessera::Point2;
///
/// let points: Vec<Point2<f64>> = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(0.0, 2.0),
///     Point2::new(1.0, 0.5),
/// ];
///
/// let hull = convex_hull(&points);
///
/// assert!(point_in_convex_hull(&hull, Point2::new(1.0, 1.0))); // Center
/// assert!(point_in_convex_hull(&hull, Point2::new(0.0, 0.0))); // Corner
/// assert!(!point_in_convex_hull(&hull, Point2::new(3.0, 3.0))); // Outside
/// ```
pub fn point_in_convex_hull<F: Float>(hull: &[Point2<F>], point: Point2<F>) -> bool {
    if hull.len() < 3 {
        return false;
    }

    let n = hull.len();
    (0..n).all(|i| orient2d(hull[i], hull[(i + 1) % n], point) >= F::zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_ccw(hull: &[Point2<f64>]) {
        let n = hull.len();
        for i in 0..n {
            let turn = orient2d(hull[i], hull[(i + 1) % n], hull[(i + 2) % n]);
            assert!(turn > 0.0, "hull not strictly convex CCW at vertex {}", i);
        }
    }

    #[test]
    fn test_convex_hull_empty() {
        let points: Vec<Point2<f64>> = vec![];
        assert!(convex_hull(&points).is_empty());
    }

    #[test]
    fn test_convex_hull_small_inputs_unchanged() {
        let single = vec![Point2::new(1.0_f64, 2.0)];
        assert_eq!(convex_hull(&single), single);

        let pair = vec![Point2::new(0.0_f64, 0.0), Point2::new(1.0, 1.0)];
        assert_eq!(convex_hull(&pair), pair);

        // Clockwise triangle comes back as given.
        let tri = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(0.5, 1.0),
            Point2::new(1.0, 0.0),
        ];
        assert_eq!(convex_hull(&tri), tri);
    }

    #[test]
    fn test_convex_hull_square_with_interior() {
        let points = vec![
            Point2::new(2.0_f64, 2.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 2.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 0.0),
        ];
        let hull = convex_hull(&points);
        assert_eq!(
            hull,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(2.0, 0.0),
                Point2::new(2.0, 2.0),
                Point2::new(0.0, 2.0),
            ]
        );
        assert_ccw(&hull);
    }

    #[test]
    fn test_convex_hull_pivot_tie_breaks_on_x() {
        let points = vec![
            Point2::new(3.0_f64, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 1.0),
        ];
        let hull = convex_hull(&points);
        assert_eq!(hull[0], Point2::new(1.0, 0.0));
        assert_eq!(hull.len(), 3);
    }

    #[test]
    fn test_convex_hull_drops_collinear_boundary_points() {
        let points = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(2.0, 2.0),
            Point2::new(1.0, 2.0),
            Point2::new(0.0, 2.0),
            Point2::new(0.0, 1.0),
        ];
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
        assert_ccw(&hull);
    }

    #[test]
    fn test_convex_hull_collinear_input_is_segment() {
        let points = vec![
            Point2::new(2.0_f64, 2.0),
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 3.0),
            Point2::new(1.0, 1.0),
        ];
        let hull = convex_hull(&points);
        assert_eq!(hull, vec![Point2::new(0.0, 0.0), Point2::new(3.0, 3.0)]);
    }

    #[test]
    fn test_convex_hull_nearly_collinear_input() {
        // Points within 1e-9 of a steep line: orientation signs are noise here
        let points: Vec<Point2<f64>> = (0..2000)
            .map(|i| {
                let t = i as f64 / 2000.0;
                let noise = ((i as f64) * 12.9898).sin();
                Point2::new(t * 1e6, t * 1e5 + noise * 1e-9)
            })
            .collect();

        let hull = convex_hull(&points);

        assert!(!hull.is_empty());
        assert!(hull.len() <= points.len());
        assert_eq!(hull[0], points[0]);
        for v in &hull {
            assert!(points.contains(v));
        }
    }

    #[test]
    fn test_polar_key_is_total_on_collinear_offsets() {
        let pivot = Point2::new(0.0_f64, 0.0);
        let near = PolarKey::new(pivot, Point2::new(1.0, 3.0));
        let far = PolarKey::new(pivot, Point2::new(2.0, 6.0));
        let wider = PolarKey::new(pivot, Point2::new(-1.0, 3.0));

        assert_eq!(near.angle, far.angle);
        assert_eq!(near.compare(&far), Ordering::Less);
        assert_eq!(far.compare(&wider), Ordering::Less);
        assert_eq!(scalar_cmp(f64::NAN, 1.0), Ordering::Greater);
        assert_eq!(scalar_cmp(f64::NAN, f64::NAN), Ordering::Equal);
    }

    #[test]
    fn test_convex_hull_identical_points_collapse() {
        let points = vec![Point2::new(1.0_f64, 1.0); 5];
        assert_eq!(convex_hull(&points), vec![Point2::new(1.0, 1.0)]);
    }

    #[test]
    fn test_convex_hull_duplicate_points() {
        let points = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
        assert_ccw(&hull);
    }

    #[test]
    fn test_convex_hull_does_not_touch_input() {
        let points = vec![
            Point2::new(1.0_f64, 1.0),
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 3.0),
        ];
        let before = points.clone();
        let _ = convex_hull(&points);
        assert_eq!(points, before);
    }

    #[test]
    fn test_convex_hull_many_interior_points() {
        let mut points: Vec<Point2<f64>> = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        for i in 1..10 {
            for j in 1..10 {
                points.push(Point2::new(i as f64, j as f64));
            }
        }

        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
    }

    #[test]
    fn test_convex_hull_is_idempotent() {
        let points: Vec<Point2<f64>> = (0..40)
            .map(|i| {
                let t = i as f64 * 0.7;
                Point2::new(t.cos() * (1.0 + (i % 3) as f64), t.sin() * 2.0)
            })
            .collect();
        let hull = convex_hull(&points);
        assert!(hull.len() > 3);
        assert_eq!(convex_hull(&hull), hull);
    }

    #[test]
    fn test_convex_hull_skips_non_finite() {
        let points = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(f64::NAN, 0.5),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
        assert!(hull.iter().all(Point2::is_finite));
    }

    #[test]
    fn test_try_convex_hull_rejects_non_finite() {
        let points = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(f64::INFINITY, 0.0),
            Point2::new(1.0, 1.0),
        ];
        assert_eq!(try_convex_hull(&points), Err(GeometryError::NonFiniteInput));

        let square = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        assert_eq!(try_convex_hull(&square).unwrap().len(), 4);
    }

    #[test]
    fn test_convex_hull_area_and_perimeter() {
        let hull = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        assert_relative_eq!(convex_hull_area(&hull), 4.0);
        assert_relative_eq!(convex_hull_perimeter(&hull), 8.0);
    }

    #[test]
    fn test_convex_hull_area_degenerate() {
        let hull: Vec<Point2<f64>> = vec![];
        assert_eq!(convex_hull_area(&hull), 0.0);

        let hull = vec![Point2::new(0.0_f64, 0.0), Point2::new(1.0, 1.0)];
        assert_eq!(convex_hull_area(&hull), 0.0);
        assert_relative_eq!(convex_hull_perimeter(&hull), 2.0 * 2.0_f64.sqrt());
    }

    #[test]
    fn test_point_in_convex_hull() {
        let hull = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];

        assert!(point_in_convex_hull(&hull, Point2::new(1.0, 1.0)));
        assert!(point_in_convex_hull(&hull, Point2::new(0.0, 0.0)));
        assert!(point_in_convex_hull(&hull, Point2::new(1.0, 0.0)));
        assert!(!point_in_convex_hull(&hull, Point2::new(3.0, 3.0)));
        assert!(!point_in_convex_hull(&hull, Point2::new(-1.0, 1.0)));
    }

    #[test]
    fn test_convex_hull_f32() {
        let points: Vec<Point2<f32>> = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, 0.25),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        assert_eq!(convex_hull(&points).len(), 4);
    }
}
