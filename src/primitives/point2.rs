//! 2D point type.

use super::{Point3, Vec2};
use num_traits::Float;
use std::cmp::Ordering;
use std::ops::{Add, Sub};

/// A 2D point with x and y coordinates.
///
/// Generic over floating-point types (`f32` or `f64`). The derived
/// `PartialOrd` compares `x` first, then `y`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Point2<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Point2<F> {
    /// Creates a new point.
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// Creates a point at the origin (0, 0).
    #[inline]
    pub fn origin() -> Self {
        Self {
            x: F::zero(),
            y: F::zero(),
        }
    }

    /// Computes the squared distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Self) -> F {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Computes the Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> F {
        self.distance_squared(other).sqrt()
    }

    /// Linearly interpolates between `self` and `other`.
    ///
    /// When `t = 0`, returns `self`. When `t = 1`, returns `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: F) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Returns true if both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Lexicographic comparison (x, then y).
    ///
    /// NaN coordinates compare as equal so this can feed `sort_by` directly.
    #[inline]
    pub fn lex_cmp(&self, other: &Self) -> Ordering {
        self.x
            .partial_cmp(&other.x)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.y.partial_cmp(&other.y).unwrap_or(Ordering::Equal))
    }

    /// Lifts the point into 3D with the given z coordinate.
    #[inline]
    pub fn with_z(self, z: F) -> Point3<F> {
        Point3::new(self.x, self.y, z)
    }

    /// Converts this point to a vector from the origin.
    #[inline]
    pub fn to_vec(self) -> Vec2<F> {
        Vec2::new(self.x, self.y)
    }
}

// Point - Point = Vec2
impl<F: Float> Sub for Point2<F> {
    type Output = Vec2<F>;

    #[inline]
    fn sub(self, other: Self) -> Vec2<F> {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

// Point + Vec2 = Point
impl<F: Float> Add<Vec2<F>> for Point2<F> {
    type Output = Self;

    #[inline]
    fn add(self, v: Vec2<F>) -> Self {
        Self {
            x: self.x + v.x,
            y: self.y + v.y,
        }
    }
}

impl<F: Float> Default for Point2<F> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<F: Float> From<(F, F)> for Point2<F> {
    fn from((x, y): (F, F)) -> Self {
        Self { x, y }
    }
}

impl<F: Float> From<[F; 2]> for Point2<F> {
    fn from([x, y]: [F; 2]) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a: Point2<f64> = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn test_lex_cmp_orders_by_x_then_y() {
        let a: Point2<f64> = Point2::new(0.0, 5.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(1.0, 2.0);

        assert_eq!(a.lex_cmp(&b), Ordering::Less);
        assert_eq!(b.lex_cmp(&c), Ordering::Less);
        assert_eq!(c.lex_cmp(&c), Ordering::Equal);
        assert_eq!(c.lex_cmp(&a), Ordering::Greater);
    }

    #[test]
    fn test_derived_order_matches_lex_cmp() {
        let a: Point2<f64> = Point2::new(1.0, 3.0);
        let b = Point2::new(1.0, 4.0);
        assert!(a < b);
        assert_eq!(a.partial_cmp(&b), Some(a.lex_cmp(&b)));
    }

    #[test]
    fn test_sort_lexicographic() {
        let mut points: Vec<Point2<f64>> = vec![
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, -1.0),
        ];
        points.sort_by(Point2::lex_cmp);
        assert_eq!(points[0], Point2::new(0.0, 0.0));
        assert_eq!(points[1], Point2::new(0.0, 1.0));
        assert_eq!(points[3], Point2::new(2.0, 0.0));
    }

    #[test]
    fn test_lerp() {
        let a: Point2<f64> = Point2::new(0.0, 2.0);
        let b = Point2::new(4.0, -2.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.25), Point2::new(1.0, 1.0));
    }

    #[test]
    fn test_is_finite() {
        assert!(Point2::new(1.0_f64, 2.0).is_finite());
        assert!(!Point2::new(f64::NAN, 2.0).is_finite());
        assert!(!Point2::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_with_z() {
        let p = Point2::new(1.0_f64, 2.0).with_z(0.0);
        assert_eq!(p, Point3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_point_arithmetic() {
        let a: Point2<f64> = Point2::new(1.0, 2.0);
        let b = Point2::new(4.0, 6.0);
        let v = b - a;
        assert_eq!(v, Vec2::new(3.0, 4.0));
        assert_eq!(a + v, b);
    }

    #[test]
    fn test_conversions() {
        let p: Point2<f64> = (1.0, 2.0).into();
        let q: Point2<f64> = [1.0, 2.0].into();
        assert_eq!(p, q);
    }
}
