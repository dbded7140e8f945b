//! flow-gauge-render: Cairo rendering for the flow gauge

pub mod arc_path;
pub mod cairo_surface;
pub mod export;
pub mod flow_display;
pub mod geometry;
pub mod pango_text;

pub use arc_path::ArcPath;
pub use cairo_surface::CairoSurface;
pub use export::{render_image, render_png};
pub use flow_display::FlowRenderer;
pub use geometry::ArcGeometry;
