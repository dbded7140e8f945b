//! Error types for the gauge core

use thiserror::Error;

/// Failures reported by a drawing surface backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// The backend refused a drawing call (e.g. a cairo status error).
    #[error("drawing backend error: {0}")]
    Backend(String),

    /// A paint could not be built from the given parameters.
    #[error("invalid paint: {0}")]
    InvalidPaint(String),
}

/// Errors raised by gauge setters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GaugeError {
    /// `max` must be strictly greater than `min`, both finite.
    #[error("invalid range: max ({max}) must be greater than min ({min})")]
    InvalidRange { min: f64, max: f64 },

    /// Calibration break-points must be finite and strictly ascending.
    #[error("calibration break-point at index {index} is not above its predecessor")]
    UnsortedBreakpoints { index: usize },

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
