//! Delaunay triangulation using a sweeping Bowyer-Watson algorithm.
//!
//! Delaunay triangulation maximizes the minimum angle of all triangles,
//! avoiding skinny triangles when possible. It has the property that no
//! point lies inside the circumcircle of any triangle.
//!
//! # Algorithm
//!
//! 1. Sort the points lexicographically and start from a super-triangle
//!    containing all of them
//! 2. Insert points in sorted order. Triangles whose circumcircle lies
//!    entirely left of the new point can never change again and are
//!    finalized; triangles whose circumcircle strictly contains the point
//!    are removed, and the cavity boundary is re-triangulated against it
//! 3. Drop every triangle that touches the super-triangle
//!
//! The super-triangle is finite, so a triangle near the convex hull whose
//! circumcircle reaches one of its corners can be lost in step 3. The
//! output then covers slightly less than the hull. Every triangle that is
//! emitted still has an empty circumcircle.
//!
//! Circumcircles are computed once per triangle and cached.
//!
//! # Complexity
//!
//! - Time: O(n²) worst case, close to O(n^1.5) for uniformly spread points
//! - Space: O(n)
//!
//! # Example
//!
//! ```
//! use tessera::triangulation::delaunay_triangulation;
//! use tessera::Point2;
//!
//! let points: Vec<Point2<f64>> = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.5, 1.0),
//!     Point2::new(0.5, 0.3),
//! ];
//!
//! let triangles = delaunay_triangulation(&points);
//!
//! // The interior point splits the outer triangle into three
//! assert_eq!(triangles.len(), 3);
//! assert!(triangles.iter().all(|t| t.has_vertex(points[3])));
//! ```

use crate::constant;
use crate::error::{GeometryError, Result};
use crate::predicates::{orient2d, Circumcircle};
use crate::primitives::{Edge, Point2, Triangle2, Triangle3};
use num_traits::Float;
use tracing::{debug, trace, warn};

/// Super-triangle half-width, in multiples of the input extent.
const SUPER_TRIANGLE_SCALE: f64 = 20.0;

/// A working triangle with its circumcircle cached.
///
/// `circle` is `None` for collinear vertices; such a triangle is never
/// finalized early and never invalidated.
#[derive(Debug, Clone, Copy)]
struct Candidate<F> {
    triangle: Triangle2<F>,
    circle: Option<Circumcircle<F>>,
}

impl<F: Float> Candidate<F> {
    /// Builds a candidate, reordering the vertices counter-clockwise.
    fn new(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Self {
        let triangle = if orient2d(a, b, c) < F::zero() {
            Triangle2::new(a, c, b)
        } else {
            Triangle2::new(a, b, c)
        };
        Self {
            triangle,
            circle: triangle.circumcircle(),
        }
    }
}

/// Axis-aligned extent of the input points.
#[derive(Debug, Clone, Copy)]
struct Extent<F> {
    min: Point2<F>,
    max: Point2<F>,
}

impl<F: Float> Extent<F> {
    fn of(points: &[Point2<F>]) -> Self {
        let init = Self {
            min: points[0],
            max: points[0],
        };
        points.iter().skip(1).fold(init, |e, p| Self {
            min: Point2::new(e.min.x.min(p.x), e.min.y.min(p.y)),
            max: Point2::new(e.max.x.max(p.x), e.max.y.max(p.y)),
        })
    }

    fn contains(&self, p: Point2<F>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// A counter-clockwise triangle strictly containing the extent.
    fn super_triangle(&self) -> Candidate<F> {
        let two = F::one() + F::one();
        let mid_x = (self.min.x + self.max.x) / two;
        let mid_y = (self.min.y + self.max.y) / two;

        let mut delta = (self.max.x - self.min.x).max(self.max.y - self.min.y);
        if delta <= F::zero() {
            delta = F::one();
        }
        let reach = constant::<F>(SUPER_TRIANGLE_SCALE) * delta;

        Candidate::new(
            Point2::new(mid_x - reach, mid_y - delta),
            Point2::new(mid_x + reach, mid_y - delta),
            Point2::new(mid_x, mid_y + reach),
        )
    }
}

/// Computes the Delaunay triangulation of a set of points.
///
/// Returns counter-clockwise triangles whose vertices are input points. No
/// input point lies strictly inside the circumcircle of any output
/// triangle. Duplicate points are merged; fewer than three distinct points,
/// or all points collinear, yields an empty result.
///
/// Near the convex hull, triangles whose circumcircle reaches the
/// super-triangle can be missing, so the union of the output may fall short
/// of the full hull for sparse inputs.
///
/// Points with a NaN or infinite coordinate are skipped; use
/// [`try_delaunay_triangulation`] to reject them instead.
///
/// # Example
///
/// ```
/// use tessera::triangulation::delaunay_triangulation;
/// use tessera::Point2;
///
/// // Square with center point
/// let points: Vec<Point2<f64>> = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
///     Point2::new(0.5, 0.5),
/// ];
///
/// let triangles = delaunay_triangulation(&points);
///
/// // Square with center point should produce 4 triangles
/// assert_eq!(triangles.len(), 4);
/// ```
pub fn delaunay_triangulation<F: Float>(points: &[Point2<F>]) -> Vec<Triangle2<F>> {
    let mut sorted: Vec<Point2<F>> = points.iter().copied().filter(Point2::is_finite).collect();
    if sorted.len() < points.len() {
        warn!(
            skipped = points.len() - sorted.len(),
            "delaunay triangulation skipped non-finite points"
        );
    }
    sorted.sort_by(Point2::lex_cmp);
    sorted.dedup();
    bowyer_watson(&sorted)
}

/// Like [`delaunay_triangulation`], but fails on any NaN or infinite coordinate.
///
/// # Errors
///
/// Returns [`GeometryError::NonFiniteInput`] if any point is not finite.
pub fn try_delaunay_triangulation<F: Float>(points: &[Point2<F>]) -> Result<Vec<Triangle2<F>>> {
    if !points.iter().all(Point2::is_finite) {
        return Err(GeometryError::NonFiniteInput);
    }
    Ok(delaunay_triangulation(points))
}

/// Computes the Delaunay triangulation and lifts it onto the `z = 0` plane.
pub fn delaunay_soup<F: Float>(points: &[Point2<F>]) -> Vec<Triangle3<F>> {
    delaunay_triangulation(points)
        .iter()
        .map(Triangle2::to_3d)
        .collect()
}

/// Runs the sweep over lexicographically sorted, distinct, finite points.
fn bowyer_watson<F: Float>(sorted: &[Point2<F>]) -> Vec<Triangle2<F>> {
    if sorted.len() < 3 {
        return Vec::new();
    }

    let extent = Extent::of(sorted);
    let mut candidates = vec![extent.super_triangle()];
    let mut finalized: Vec<Candidate<F>> = Vec::new();
    let mut edges: Vec<Edge<F>> = Vec::new();

    for &p in sorted {
        edges.clear();
        let mut kept = Vec::with_capacity(candidates.len() + 2);

        for candidate in candidates.drain(..) {
            let Some(circle) = candidate.circle else {
                kept.push(candidate);
                continue;
            };

            if p.x > circle.max_x() {
                finalized.push(candidate);
            } else if circle.contains_strict(p) {
                edges.extend(candidate.triangle.edges());
            } else {
                kept.push(candidate);
            }
        }

        let removed = edges.len() / 3;
        cancel_shared_edges(&mut edges);
        trace!(
            removed,
            boundary = edges.len(),
            "inserted point into triangulation"
        );

        kept.extend(edges.iter().map(|e| Candidate::new(e.start(), e.end(), p)));
        candidates = kept;
    }

    let total = finalized.len() + candidates.len();
    let mut degenerate = 0usize;
    let triangles: Vec<Triangle2<F>> = finalized
        .into_iter()
        .chain(candidates)
        .filter(|c| c.triangle.vertices().iter().all(|&v| extent.contains(v)))
        .filter(|c| {
            let keep = c.circle.is_some();
            if !keep {
                degenerate += 1;
            }
            keep
        })
        .map(|c| c.triangle)
        .collect();

    if degenerate > 0 {
        warn!(degenerate, "dropped collinear delaunay triangles");
    }
    debug!(
        points = sorted.len(),
        working = total,
        triangles = triangles.len(),
        "computed delaunay triangulation"
    );
    triangles
}

/// Sorts the edge buffer and removes every edge that occurs more than once.
///
/// Edges shared by two removed triangles are interior to the cavity; the
/// survivors form its boundary. Every copy in a run of equal edges is
/// dropped, not just adjacent pairs.
fn cancel_shared_edges<F: Float>(edges: &mut Vec<Edge<F>>) {
    edges.sort_by(Edge::lex_cmp);

    let mut write = 0;
    let mut i = 0;
    while i < edges.len() {
        let mut j = i + 1;
        while j < edges.len() && edges[j] == edges[i] {
            j += 1;
        }
        if j - i == 1 {
            edges[write] = edges[i];
            write += 1;
        }
        i = j;
    }
    edges.truncate(write);
}
