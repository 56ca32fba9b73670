//! Point set generation.

mod point_sets;

pub use point_sets::{fibonacci_sphere, regular_polygon};
