//! Triangulation of point sets.
//!
//! This module provides Delaunay triangulation by incremental Bowyer-Watson
//! insertion with a left-to-right sweep.

mod delaunay;

pub use delaunay::{delaunay_soup, delaunay_triangulation, try_delaunay_triangulation};
