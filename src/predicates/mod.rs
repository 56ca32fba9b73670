//! Geometric predicates shared by the hull and triangulation algorithms.
//!
//! All predicates use exact comparisons against zero; callers decide how to
//! treat ties.

mod circle;
mod orient;

pub use circle::{circumcircle, in_circumcircle, Circumcircle};
pub use orient::{orient2d, point_in_triangle, point_in_triangle_strict, Orientation};
