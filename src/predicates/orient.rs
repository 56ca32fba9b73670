//! Orientation and point-in-triangle predicates.
//!
//! These evaluate in plain floating-point arithmetic with no hidden epsilon;
//! zero means "collinear as far as the arithmetic can tell".

use crate::primitives::Point2;
use num_traits::Float;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// `c` lies to the left of the directed line `a -> b`.
    CounterClockwise,
    /// `c` lies to the right of the directed line `a -> b`.
    Clockwise,
    /// The three points are collinear.
    Collinear,
}

impl Orientation {
    /// Classifies the turn `a -> b -> c`.
    #[inline]
    pub fn of<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Self {
        let cross = orient2d(a, b, c);
        if cross > F::zero() {
            Orientation::CounterClockwise
        } else if cross < F::zero() {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }
}

/// Cross product of `(b - a)` and `(c - a)`.
///
/// Equals twice the signed area of triangle `abc`: positive for a
/// counter-clockwise turn, negative for clockwise, zero if collinear.
#[inline]
pub fn orient2d<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> F {
    (b - a).cross(c - a)
}

/// Tests whether `p` lies strictly inside triangle `abc`.
///
/// Points on an edge or coinciding with a vertex are not inside. Works for
/// either winding; a degenerate triangle contains nothing.
pub fn point_in_triangle_strict<F: Float>(
    p: Point2<F>,
    a: Point2<F>,
    b: Point2<F>,
    c: Point2<F>,
) -> bool {
    let d1 = orient2d(a, b, p);
    let d2 = orient2d(b, c, p);
    let d3 = orient2d(c, a, p);

    let zero = F::zero();
    (d1 > zero && d2 > zero && d3 > zero) || (d1 < zero && d2 < zero && d3 < zero)
}

/// Tests whether `p` lies inside or on the boundary of triangle `abc`.
///
/// Works for either winding. For a degenerate triangle this reports every
/// point on the supporting line, so callers should check the area first.
pub fn point_in_triangle<F: Float>(p: Point2<F>, a: Point2<F>, b: Point2<F>, c: Point2<F>) -> bool {
    let d1 = orient2d(a, b, p);
    let d2 = orient2d(b, c, p);
    let d3 = orient2d(c, a, p);

    let zero = F::zero();
    (d1 >= zero && d2 >= zero && d3 >= zero) || (d1 <= zero && d2 <= zero && d3 <= zero)
}
