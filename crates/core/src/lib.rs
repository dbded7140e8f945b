//! flow-gauge-core: value state, animation and the drawing contract for
//! the flow gauge.
//!
//! This crate contains the `Surface` trait renderers paint through, the
//! `GaugeRenderer` hooks, and `GaugeFrame`, the driver that owns range,
//! value, animation and calibration state. It has no GTK or Cairo
//! dependencies.

pub mod animation;
pub mod constants;
mod error;
pub mod frame;
pub mod recording;
mod renderer;
pub mod surface;

pub use animation::ValueAnimator;
pub use constants::{
    ANIMATION_FRAME_INTERVAL, ANIMATION_SNAP_THRESHOLD, DEFAULT_ANIMATION_DURATION, UP_ANGLE,
};
pub use error::{GaugeError, SurfaceError};
pub use frame::{sweep_for_value, GaugeFrame};
pub use recording::{DrawOp, RecordingSurface};
pub use renderer::{FrameContext, GaugeRenderer};
pub use surface::{
    LineCap, LinearGradient, Paint, Stroke, Surface, TextAlign, TextExtents, TextStyle,
};

// Re-export types used in trait signatures for convenience
pub use flow_gauge_types::{CalibrationSet, Color, GaugeStyle, Point, Rect};
