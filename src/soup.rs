//! Measures over unindexed triangle soups.
//!
//! Every algorithm that produces triangles returns a plain
//! `Vec<Triangle3<F>>`: each triangle owns its three points and no vertex
//! sharing is tracked.

use crate::primitives::{Point3, Triangle3};
use num_traits::Float;

/// An unordered collection of independent triangles.
pub type TriangleSoup<F> = Vec<Triangle3<F>>;

/// Sum of the triangle areas.
pub fn surface_area<F: Float>(soup: &[Triangle3<F>]) -> F {
    soup.iter()
        .map(Triangle3::area)
        .fold(F::zero(), |acc, a| acc + a)
}

/// Signed volume enclosed by a closed soup, by the divergence theorem.
///
/// Positive when the triangle normals point outward. The value is only
/// meaningful for a closed, consistently oriented surface; an isosurface
/// that reaches the sampling bounds is open.
///
/// # Example
///
/// ```
/// use tessera::soup::signed_volume;
/// use tessera::{Point3, Triangle3};
///
/// let o = Point3::new(0.0_f64, 0.0, 0.0);
/// let x = Point3::new(1.0, 0.0, 0.0);
/// let y = Point3::new(0.0, 1.0, 0.0);
/// let z = Point3::new(0.0, 0.0, 1.0);
///
/// // Unit corner tetrahedron with outward normals
/// let tetra = vec![
///     Triangle3::new(o, y, x),
///     Triangle3::new(o, x, z),
///     Triangle3::new(o, z, y),
///     Triangle3::new(x, y, z),
/// ];
///
/// assert!((signed_volume(&tetra) - 1.0 / 6.0).abs() < 1e-12);
/// ```
pub fn signed_volume<F: Float>(soup: &[Triangle3<F>]) -> F {
    let six = F::one() + F::one() + F::one() + F::one() + F::one() + F::one();
    let sum = soup.iter().fold(F::zero(), |acc, t| {
        acc + t.a.to_vec().dot(t.b.to_vec().cross(t.c.to_vec()))
    });
    sum / six
}

/// Axis-aligned bounds of every vertex as `(min, max)`, or `None` when empty.
pub fn bounding_box<F: Float>(soup: &[Triangle3<F>]) -> Option<(Point3<F>, Point3<F>)> {
    let first = soup.first()?.a;

    let bounds = soup
        .iter()
        .flat_map(|t| t.vertices())
        .fold((first, first), |(min, max), v| (min.min(v), max.max(v)));
    Some(bounds)
}
