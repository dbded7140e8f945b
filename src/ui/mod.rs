//! Demo user interface

pub mod demo_input;
pub mod demo_window;

pub use demo_window::{build_demo_window, DemoController};
