//! Parametric curves.

mod bezier;

pub use bezier::{bezier_point, bezier_polyline, ControlPoint};
