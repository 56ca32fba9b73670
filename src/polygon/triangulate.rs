//! Polygon triangulation using ear clipping.
//!
//! Converts a simple polygon into a set of triangles that exactly cover it.
//!
//! # Algorithm
//!
//! The ear clipping algorithm works by repeatedly finding and removing "ears":
//! - An ear is a triangle formed by three consecutive vertices
//! - The middle vertex must not be reflex (a straight angle still counts)
//! - No other remaining vertex may lie inside the ear triangle or on its
//!   boundary, unless it coincides with one of the ear's corners
//!
//! The polygon is first brought to counter-clockwise order. Every pass over
//! the remaining ring either clips the first ear it finds or fails, so the
//! loop always terminates.
//!
//! # Complexity
//!
//! - Time: O(n³) worst case for a polygon with n vertices
//! - Space: O(n)
//!
//! # Example
//!
//! ```
//! use tessera::polygon::{Polygon, triangulate_polygon};
//! use tessera::Point2;
//!
//! let square = Polygon::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ]);
//!
//! let triangles = triangulate_polygon(&square).unwrap();
//!
//! // A square is divided into 2 triangles
//! assert_eq!(triangles.len(), 2);
//! ```

use crate::error::{GeometryError, Result};
use crate::polygon::Polygon;
use crate::predicates::{orient2d, point_in_triangle};
use crate::primitives::{Point2, Triangle2, Triangle3};
use num_traits::Float;
use tracing::{debug, trace, warn};

/// Triangulates a polygon using the ear clipping algorithm.
///
/// Returns `n - 2` counter-clockwise triangles on the `z = 0` plane whose
/// union covers the polygon. Fewer than three vertices yields no triangles.
///
/// # Errors
///
/// - [`GeometryError::NonFiniteInput`] if a vertex has a NaN or infinite
///   coordinate.
/// - [`GeometryError::DegeneratePolygon`] if a full pass over the remaining
///   vertices finds no ear, which happens for self-intersecting input.
///
/// # Example
///
/// ```
/// use tessera::polygon::{Polygon, triangulate_polygon, triangulation_area};
/// use tessera::Point2;
///
/// // L-shaped polygon (concave)
/// let l_shape = Polygon::new(vec![
///     Point2::new(0.0_f64, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(2.0, 1.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(1.0, 2.0),
///     Point2::new(0.0, 2.0),
/// ]);
///
/// let triangles = triangulate_polygon(&l_shape).unwrap();
/// assert_eq!(triangles.len(), 4); // 6 vertices -> 4 triangles
/// assert!((triangulation_area(&triangles) - l_shape.area()).abs() < 1e-12);
/// ```
pub fn triangulate_polygon<F: Float>(polygon: &Polygon<F>) -> Result<Vec<Triangle3<F>>> {
    let indices = triangulate_polygon_indexed(polygon)?;
    let v = &polygon.vertices;

    Ok(indices
        .iter()
        .map(|&[i, j, k]| Triangle2::new(v[i], v[j], v[k]).to_3d())
        .collect())
}

/// Triangulates a polygon and returns vertex indices.
///
/// Each triple indexes into `polygon.vertices` and is ordered
/// counter-clockwise regardless of the input winding.
///
/// # Errors
///
/// Same as [`triangulate_polygon`].
///
/// # Example
///
/// ```
/// use tessera::polygon::{Polygon, triangulate_polygon_indexed};
/// use tessera::Point2;
///
/// let pentagon = Polygon::new(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(2.5, 1.5),
///     Point2::new(1.0, 2.5),
///     Point2::new(-0.5, 1.5),
/// ]);
///
/// let indices = triangulate_polygon_indexed(&pentagon).unwrap();
/// assert_eq!(indices.len(), 3); // 5 vertices -> 3 triangles
///
/// for [i, j, k] in &indices {
///     assert!(*i < 5 && *j < 5 && *k < 5);
/// }
/// ```
pub fn triangulate_polygon_indexed<F: Float>(polygon: &Polygon<F>) -> Result<Vec<[usize; 3]>> {
    if !polygon.is_finite() {
        return Err(GeometryError::NonFiniteInput);
    }

    let n = polygon.len();
    if n < 3 {
        return Ok(Vec::new());
    }

    let vertices = &polygon.vertices;

    // Working ring of original indices, counter-clockwise
    let mut ring: Vec<usize> = if polygon.signed_area() < F::zero() {
        (0..n).rev().collect()
    } else {
        (0..n).collect()
    };
    let mut triangles: Vec<[usize; 3]> = Vec::with_capacity(n - 2);

    while ring.len() > 3 {
        let m = ring.len();
        let Some(i) = (0..m).find(|&i| is_ear(vertices, &ring, i)) else {
            warn!(vertices = n, remaining = m, "ear clipping found no ear");
            return Err(GeometryError::DegeneratePolygon { remaining: m });
        };

        let prev = ring[(i + m - 1) % m];
        let next = ring[(i + 1) % m];
        triangles.push([prev, ring[i], next]);
        trace!(vertex = ring[i], remaining = m - 1, "clipped ear");
        ring.remove(i);
    }

    triangles.push([ring[0], ring[1], ring[2]]);

    debug!(
        vertices = n,
        triangles = triangles.len(),
        "triangulated polygon"
    );
    Ok(triangles)
}

/// Checks if ring position `i` forms an ear with its neighbors.
fn is_ear<F: Float>(vertices: &[Point2<F>], ring: &[usize], i: usize) -> bool {
    let m = ring.len();
    let prev = (i + m - 1) % m;
    let next = (i + 1) % m;

    let a = vertices[ring[prev]];
    let b = vertices[ring[i]];
    let c = vertices[ring[next]];

    let turn = orient2d(a, b, c);
    if turn < F::zero() {
        return false;
    }
    // A straight angle clips a zero-area triangle and overlaps nothing.
    if turn == F::zero() {
        return true;
    }

    // Closed test: a reflex vertex touching the diagonal `ac` blocks the ear.
    ring.iter()
        .enumerate()
        .filter(|&(k, _)| k != prev && k != i && k != next)
        .map(|(_, &v)| vertices[v])
        .filter(|&p| p != a && p != b && p != c)
        .all(|p| !point_in_triangle(p, a, b, c))
}

/// Computes the total area of a triangulation.
///
/// Useful for verifying that the triangulation covers the original polygon.
pub fn triangulation_area<F: Float>(triangles: &[Triangle3<F>]) -> F {
    triangles
        .iter()
        .map(Triangle3::area)
        .fold(F::zero(), |a, b| a + b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn polygon(coords: &[(f64, f64)]) -> Polygon<f64> {
        Polygon::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    fn assert_covers(poly: &Polygon<f64>, triangles: &[Triangle3<f64>]) {
        assert_eq!(triangles.len(), poly.len() - 2);
        assert_relative_eq!(triangulation_area(triangles), poly.area(), epsilon = 1e-9);
        for t in triangles {
            assert!(t.normal().z >= 0.0, "triangle {:?} is clockwise", t);
            assert!(t.vertices().iter().all(|v| v.z == 0.0));
        }
    }

    #[test]
    fn test_triangulate_too_few_vertices() {
        assert!(triangulate_polygon(&Polygon::<f64>::empty()).unwrap().is_empty());
        let segment = polygon(&[(0.0, 0.0), (1.0, 0.0)]);
        assert!(triangulate_polygon(&segment).unwrap().is_empty());
    }

    #[test]
    fn test_triangulate_triangle() {
        let tri = polygon(&[(0.0, 0.0), (2.0, 0.0), (1.0, 2.0)]);
        let triangles = triangulate_polygon(&tri).unwrap();
        assert_eq!(triangles.len(), 1);
        assert_relative_eq!(triangles[0].area(), 2.0);
    }

    #[test]
    fn test_triangulate_square() {
        let square = polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let triangles = triangulate_polygon(&square).unwrap();
        assert_covers(&square, &triangles);
    }

    #[test]
    fn test_triangulate_l_shape() {
        let l_shape = polygon(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        let triangles = triangulate_polygon(&l_shape).unwrap();
        assert_covers(&l_shape, &triangles);
        assert_relative_eq!(triangulation_area(&triangles), 3.0);
    }

    #[test]
    fn test_triangulate_clockwise_input() {
        let cw = polygon(&[
            (0.0, 0.0),
            (0.0, 2.0),
            (1.0, 2.0),
            (1.0, 1.0),
            (2.0, 1.0),
            (2.0, 0.0),
        ]);
        assert!(cw.signed_area() < 0.0);
        let triangles = triangulate_polygon(&cw).unwrap();
        assert_covers(&cw, &triangles);
    }

    #[test]
    fn test_triangulate_star() {
        let coords: Vec<(f64, f64)> = (0..10)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::PI / 5.0;
                let r = if i % 2 == 0 { 2.0 } else { 0.8 };
                (r * angle.cos(), r * angle.sin())
            })
            .collect();
        let star = polygon(&coords);
        let triangles = triangulate_polygon(&star).unwrap();
        assert_covers(&star, &triangles);
    }

    #[test]
    fn test_triangulate_collinear_vertex_on_edge() {
        let square = polygon(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let triangles = triangulate_polygon(&square).unwrap();
        assert_covers(&square, &triangles);
        assert_relative_eq!(triangulation_area(&triangles), 4.0);
    }

    #[test]
    fn test_triangulate_indexed_matches_points() {
        let l_shape = polygon(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        let indices = triangulate_polygon_indexed(&l_shape).unwrap();
        let triangles = triangulate_polygon(&l_shape).unwrap();
        assert_eq!(indices.len(), triangles.len());

        // Every vertex is used by some triangle
        for v in 0..l_shape.len() {
            assert!(indices.iter().any(|t| t.contains(&v)));
        }
    }

    #[test]
    fn test_triangulate_self_intersecting_fails() {
        let crossed = polygon(&[(0.0, 1.0), (0.0, 0.0), (1.0, 0.0), (2.0, 2.0), (4.0, 0.0)]);
        assert_eq!(
            triangulate_polygon(&crossed),
            Err(GeometryError::DegeneratePolygon { remaining: 4 })
        );
    }

    #[test]
    fn test_triangulate_rejects_non_finite() {
        let poly = polygon(&[(0.0, 0.0), (1.0, f64::INFINITY), (0.0, 1.0)]);
        assert_eq!(
            triangulate_polygon_indexed(&poly),
            Err(GeometryError::NonFiniteInput)
        );
    }

    #[test]
    fn test_triangulate_f32() {
        let square: Polygon<f32> = Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]);
        let triangles = triangulate_polygon(&square).unwrap();
        assert!((triangulation_area(&triangles) - 1.0).abs() < 1e-6);
    }
}
