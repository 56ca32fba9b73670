//! Bézier curves of any degree, evaluated with de Casteljau's algorithm.
//!
//! The control polygon is a plain slice of points, so the same functions
//! serve planar and spatial curves.
//!
//! # Example
//!
//! ```
//! use tessera::curves::{bezier_point, bezier_polyline};
//! use tessera::Point2;
//!
//! let control = [
//!     Point2::new(0.0_f64, 0.0),
//!     Point2::new(1.0, 2.0),
//!     Point2::new(2.0, 0.0),
//! ];
//!
//! let apex = bezier_point(&control, 0.5).unwrap();
//! assert_eq!(apex, Point2::new(1.0, 1.0));
//!
//! let polyline = bezier_polyline(&control, 8);
//! assert_eq!(polyline.len(), 9);
//! assert_eq!(polyline[8], Point2::new(2.0, 0.0));
//! ```

use crate::constant;
use crate::primitives::{Point2, Point3};
use num_traits::Float;

/// A point type that can be blended linearly, usable as a Bézier control point.
pub trait ControlPoint: Copy {
    /// Coordinate type.
    type Scalar: Float;

    /// Returns `self + (other - self) * t`.
    fn lerp(self, other: Self, t: Self::Scalar) -> Self;
}

impl<F: Float> ControlPoint for Point2<F> {
    type Scalar = F;

    #[inline]
    fn lerp(self, other: Self, t: F) -> Self {
        Point2::lerp(self, other, t)
    }
}

impl<F: Float> ControlPoint for Point3<F> {
    type Scalar = F;

    #[inline]
    fn lerp(self, other: Self, t: F) -> Self {
        Point3::lerp(self, other, t)
    }
}

/// Evaluates the Bézier curve with the given control polygon at `t`.
///
/// Runs de Casteljau's algorithm: the control polygon is repeatedly
/// replaced by the points at `t` along each of its edges until one point
/// remains. `t = 0` gives the first control point and `t = 1` the last.
/// Values outside `[0, 1]` extrapolate.
///
/// Returns `None` when `control` is empty.
pub fn bezier_point<P: ControlPoint>(control: &[P], t: P::Scalar) -> Option<P> {
    let mut work = control.to_vec();

    for level in (1..work.len()).rev() {
        for k in 0..level {
            work[k] = work[k].lerp(work[k + 1], t);
        }
    }
    work.first().copied()
}

/// Samples the curve at `segments + 1` evenly spaced parameters.
///
/// Sample `i` is taken at `t = i / segments`, so the first and last samples
/// are exactly the end control points. `segments == 0` yields just the
/// start point; an empty control polygon yields nothing.
pub fn bezier_polyline<P: ControlPoint>(control: &[P], segments: usize) -> Vec<P> {
    let (Some(&first), Some(&last)) = (control.first(), control.last()) else {
        return Vec::new();
    };
    if segments == 0 {
        return vec![first];
    }

    let count = constant::<P::Scalar>(segments as f64);
    let mut samples: Vec<P> = (0..segments)
        .filter_map(|i| bezier_point(control, constant::<P::Scalar>(i as f64) / count))
        .collect();
    samples.push(last);
    samples
}
