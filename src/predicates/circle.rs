//! Circumcircle construction and containment tests.

use super::orient2d;
use crate::primitives::Point2;
use num_traits::Float;

/// The circle passing through the three vertices of a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumcircle<F> {
    /// Circumcenter.
    pub center: Point2<F>,
    /// Circumradius.
    pub radius: F,
    /// Squared circumradius, kept to avoid a square root per containment test.
    pub radius_squared: F,
}

impl<F: Float> Circumcircle<F> {
    /// Returns true if `p` lies strictly inside the circle.
    ///
    /// Exact comparison with no tolerance: points on the circle are outside.
    #[inline]
    pub fn contains_strict(&self, p: Point2<F>) -> bool {
        self.center.distance_squared(p) < self.radius_squared
    }

    /// The largest x coordinate reached by the circle.
    #[inline]
    pub fn max_x(&self) -> F {
        self.center.x + self.radius
    }
}

/// Computes the circumcircle of triangle `abc`.
///
/// Returns `None` when the points are collinear (the circumcenter is
/// undefined) or when the construction overflows.
///
/// # Example
///
/// ```
/// use tessera::predicates::circumcircle;
/// use tessera::Point2;
///
/// let circle = circumcircle(
///     Point2::new(0.0_f64, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(0.0, 2.0),
/// )
/// .unwrap();
///
/// assert_eq!(circle.center, Point2::new(1.0, 1.0));
/// assert!((circle.radius - 2.0_f64.sqrt()).abs() < 1e-12);
/// ```
pub fn circumcircle<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Option<Circumcircle<F>> {
    // Work relative to `a` to keep magnitudes small.
    let ab = b - a;
    let ac = c - a;
    let d = (F::one() + F::one()) * ab.cross(ac);
    if d == F::zero() {
        return None;
    }

    let ab_sq = ab.magnitude_squared();
    let ac_sq = ac.magnitude_squared();
    let ux = (ac.y * ab_sq - ab.y * ac_sq) / d;
    let uy = (ab.x * ac_sq - ac.x * ab_sq) / d;

    let radius_squared = ux * ux + uy * uy;
    if !ux.is_finite() || !uy.is_finite() || !radius_squared.is_finite() {
        return None;
    }

    Some(Circumcircle {
        center: Point2::new(a.x + ux, a.y + uy),
        radius: radius_squared.sqrt(),
        radius_squared,
    })
}

/// Tests if `p` lies strictly inside the circumcircle of triangle `abc`.
///
/// Uses the lifted-paraboloid determinant instead of constructing the center,
/// and accepts either winding. Collinear `abc` never contains anything.
///
/// # Example
///
/// ```
/// use tessera::predicates::in_circumcircle;
/// use tessera::Point2;
///
/// let a = Point2::new(0.0_f64, 0.0);
/// let b = Point2::new(1.0, 0.0);
/// let c = Point2::new(0.5, 0.866);
///
/// assert!(in_circumcircle(Point2::new(0.5, 0.29), a, b, c));
/// assert!(!in_circumcircle(Point2::new(10.0, 10.0), a, b, c));
/// ```
pub fn in_circumcircle<F: Float>(p: Point2<F>, a: Point2<F>, b: Point2<F>, c: Point2<F>) -> bool {
    let orientation = orient2d(a, b, c);
    if orientation == F::zero() {
        return false;
    }

    let ax = a.x - p.x;
    let ay = a.y - p.y;
    let bx = b.x - p.x;
    let by = b.y - p.y;
    let cx = c.x - p.x;
    let cy = c.y - p.y;

    let aa = ax * ax + ay * ay;
    let bb = bx * bx + by * by;
    let cc = cx * cx + cy * cy;

    let det = ax * (by * cc - cy * bb) - ay * (bx * cc - cx * bb) + aa * (bx * cy - cx * by);

    if orientation > F::zero() {
        det > F::zero()
    } else {
        det < F::zero()
    }
}
