//! flow-gauge: a circular flow gauge for GTK4
//!
//! This library provides the demo side of the gauge:
//! - A GTK4 displayer that hosts the gauge in a `DrawingArea`
//! - The demo window and its input parsing
//! - Settings management

pub mod config;
pub mod displayers;
pub mod ui;

// Re-export commonly used types
pub use config::DemoSettings;
pub use displayers::FlowDisplayer;
pub use flow_gauge_core::{GaugeError, GaugeFrame};
pub use flow_gauge_render::FlowRenderer;
