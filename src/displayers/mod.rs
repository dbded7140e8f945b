//! GTK displayers for the gauge

mod flow;

pub use flow::{FlowDisplayer, SharedGauge};
