//! Triangles in 2D and 3D.

use super::{Edge, Point2, Point3, Vec3};
use crate::predicates::{circumcircle, orient2d, Circumcircle};
use num_traits::Float;

/// A triangle in the plane, stored as an ordered triple of points.
///
/// Orientation is preserved as given; see [`Triangle2::signed_area`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle2<F> {
    /// First vertex.
    pub a: Point2<F>,
    /// Second vertex.
    pub b: Point2<F>,
    /// Third vertex.
    pub c: Point2<F>,
}

impl<F: Float> Triangle2<F> {
    /// Creates a new triangle from three points.
    #[inline]
    pub fn new(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Self {
        Self { a, b, c }
    }

    /// Returns the vertices in order.
    #[inline]
    pub fn vertices(&self) -> [Point2<F>; 3] {
        [self.a, self.b, self.c]
    }

    /// Returns the three undirected edges.
    #[inline]
    pub fn edges(&self) -> [Edge<F>; 3] {
        [
            Edge::new(self.a, self.b),
            Edge::new(self.b, self.c),
            Edge::new(self.c, self.a),
        ]
    }

    /// Signed area: positive for counter-clockwise vertex order.
    #[inline]
    pub fn signed_area(&self) -> F {
        orient2d(self.a, self.b, self.c) / (F::one() + F::one())
    }

    /// Unsigned area.
    #[inline]
    pub fn area(&self) -> F {
        self.signed_area().abs()
    }

    /// Returns true if the vertices are in counter-clockwise order.
    #[inline]
    pub fn is_ccw(&self) -> bool {
        orient2d(self.a, self.b, self.c) > F::zero()
    }

    /// Returns true if `p` is one of the three vertices.
    #[inline]
    pub fn has_vertex(&self, p: Point2<F>) -> bool {
        self.a == p || self.b == p || self.c == p
    }

    /// The circle through all three vertices, or `None` when they are collinear.
    #[inline]
    pub fn circumcircle(&self) -> Option<Circumcircle<F>> {
        circumcircle(self.a, self.b, self.c)
    }

    /// Lifts the triangle into 3D on the `z = 0` plane.
    #[inline]
    pub fn to_3d(&self) -> Triangle3<F> {
        Triangle3::new(
            self.a.with_z(F::zero()),
            self.b.with_z(F::zero()),
            self.c.with_z(F::zero()),
        )
    }
}

/// A triangle in space, stored as an ordered triple of points.
///
/// Triangle soups are plain `Vec<Triangle3<F>>`: each triangle owns its
/// three points and no vertex sharing is tracked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle3<F> {
    /// First vertex.
    pub a: Point3<F>,
    /// Second vertex.
    pub b: Point3<F>,
    /// Third vertex.
    pub c: Point3<F>,
}

impl<F: Float> Triangle3<F> {
    /// Creates a new triangle from three points.
    #[inline]
    pub fn new(a: Point3<F>, b: Point3<F>, c: Point3<F>) -> Self {
        Self { a, b, c }
    }

    /// Returns the vertices in order.
    #[inline]
    pub fn vertices(&self) -> [Point3<F>; 3] {
        [self.a, self.b, self.c]
    }

    /// Un-normalized face normal `(b - a) × (c - a)`; its length is twice the area.
    #[inline]
    pub fn normal(&self) -> Vec3<F> {
        (self.b - self.a).cross(self.c - self.a)
    }

    /// Unit face normal, or `None` for a degenerate triangle.
    #[inline]
    pub fn unit_normal(&self) -> Option<Vec3<F>> {
        self.normal().normalize()
    }

    /// Area of the triangle.
    #[inline]
    pub fn area(&self) -> F {
        self.normal().magnitude() / (F::one() + F::one())
    }

    /// Centroid (average of the three vertices).
    pub fn centroid(&self) -> Point3<F> {
        let three = F::one() + F::one() + F::one();
        Point3::new(
            (self.a.x + self.b.x + self.c.x) / three,
            (self.a.y + self.b.y + self.c.y) / three,
            (self.a.z + self.b.z + self.c.z) / three,
        )
    }
}
