//! Deterministic point sets used as algorithm inputs.
//!
//! - [`regular_polygon`]: vertices of a regular n-gon, counter-clockwise
//! - [`fibonacci_sphere`]: near-uniform points on the unit sphere along a
//!   golden-angle spiral
//!
//! # Example
//!
//! ```
//! use tessera::sampling::{fibonacci_sphere, regular_polygon};
//! use tessera::Point3;
//!
//! let hexagon = regular_polygon(6, 2.0_f64, 0.0);
//! assert_eq!(hexagon.len(), 6);
//! assert!((hexagon[0].x - 2.0).abs() < 1e-12);
//!
//! let sphere: Vec<Point3<f64>> = fibonacci_sphere(200);
//! assert!(sphere.iter().all(|p| (p.to_vec().magnitude() - 1.0).abs() < 1e-12));
//! ```

use crate::constant;
use crate::primitives::{Point2, Point3};
use num_traits::{Float, FloatConst};

/// Vertices of a regular polygon centered at the origin.
///
/// Vertex `i` sits at angle `phase + 2πi/n` on the circle of `radius`, so the
/// polygon winds counter-clockwise for a positive radius.
///
/// Returns an empty vector for `n == 0`.
pub fn regular_polygon<F: Float + FloatConst>(n: usize, radius: F, phase: F) -> Vec<Point2<F>> {
    if n == 0 {
        return Vec::new();
    }

    let step = F::TAU() / constant(n as f64);
    (0..n)
        .map(|i| {
            let angle = phase + step * constant(i as f64);
            Point2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// `n` points on the unit sphere spaced along a golden-angle spiral.
///
/// The polar angle of point `i` is `acos(1 - 2i/n)`, which keeps the
/// samples equal-area in `z`; the azimuth advances by `π(1 + √5)` per point.
/// The first point is the north pole.
pub fn fibonacci_sphere<F: Float + FloatConst>(n: usize) -> Vec<Point3<F>> {
    if n == 0 {
        return Vec::new();
    }

    let two = F::one() + F::one();
    let increment = F::PI() * (F::one() + constant::<F>(5.0).sqrt());
    let count = constant::<F>(n as f64);

    (0..n)
        .map(|i| {
            let index = constant::<F>(i as f64);
            let inclination = (F::one() - two * index / count).acos();
            let azimuth = increment * index;
            let ring = inclination.sin();
            Point3::new(
                ring * azimuth.cos(),
                ring * azimuth.sin(),
                inclination.cos(),
            )
        })
        .collect()
}
