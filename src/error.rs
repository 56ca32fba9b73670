//! Error types for tessera operations.

use thiserror::Error;

/// Result alias used by the fallible algorithms in this crate.
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Errors reported when an algorithm's input violates its preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Ear clipping found no removable ear; the polygon is not simple.
    #[error("degenerate polygon: no ear found among {remaining} remaining vertices")]
    DegeneratePolygon {
        /// Number of vertices left in the working polygon when the scan failed.
        remaining: usize,
    },

    /// An input coordinate was NaN or infinite.
    #[error("non-finite coordinate in input")]
    NonFiniteInput,

    /// A sampling resolution component was zero.
    #[error("invalid resolution ({nx}, {ny}, {nz}): every axis needs at least one cell")]
    InvalidResolution {
        /// Cells along X.
        nx: usize,
        /// Cells along Y.
        ny: usize,
        /// Cells along Z.
        nz: usize,
    },

    /// Sampling bounds are non-finite or empty on some axis.
    #[error("invalid bounds: upper corner must be finite and strictly above the lower corner")]
    InvalidBounds,

    /// A grid cell size component is non-finite or not positive.
    #[error("invalid cell size: every component must be finite and positive")]
    InvalidCellSize,

    /// A dense grid has fewer than two samples along some axis.
    #[error("grid of shape ({nx}, {ny}, {nz}) has no complete cell")]
    GridTooSmall {
        /// Samples along X.
        nx: usize,
        /// Samples along Y.
        ny: usize,
        /// Samples along Z.
        nz: usize,
    },
}
