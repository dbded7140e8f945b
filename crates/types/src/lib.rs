//! flow-gauge-types: Shared data types for the flow gauge.
//!
//! This crate contains pure data types (colors, geometry, style and
//! calibration) shared by the gauge core, its renderers and the demo.
//! Only the optional `cairo` feature pulls in a drawing backend.

pub mod calibration;
pub mod color;
pub mod geometry;
pub mod style;

// Re-export commonly used types at the crate root for convenience
pub use calibration::{CalibrationSet, Tick};
pub use color::{fade_stops, Color, ColorStop, GradientExtend};
pub use geometry::{Point, Rect};
pub use style::GaugeStyle;
