//! Simple polygons and their triangulation.
//!
//! This module provides:
//! - Signed area, winding and bounds of a polygon
//! - Ear clipping triangulation into a triangle soup
//!
//! # Example
//!
//! ```
//! use tessera::polygon::{Polygon, triangulate_polygon, triangulation_area};
//! use tessera::Point2;
//!
//! // Clockwise input is accepted
//! let arrow = Polygon::new(vec![
//!     Point2::new(0.0_f64, 0.0),
//!     Point2::new(1.0, 3.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(1.0, 1.0),
//! ]);
//! assert!(arrow.signed_area() < 0.0);
//!
//! let triangles = triangulate_polygon(&arrow).unwrap();
//! assert_eq!(triangles.len(), 2);
//! assert!((triangulation_area(&triangles) - arrow.area()).abs() < 1e-12);
//! ```

mod core;
mod triangulate;

pub use core::{polygon_area, polygon_signed_area, Polygon};
pub use triangulate::{triangulate_polygon, triangulate_polygon_indexed, triangulation_area};
