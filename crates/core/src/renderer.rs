//! Renderer hooks driven by `GaugeFrame`

use flow_gauge_types::{CalibrationSet, GaugeStyle, Rect};

use crate::error::SurfaceError;
use crate::surface::Surface;

/// Everything a renderer needs for one draw pass.
///
/// Built by `GaugeFrame` from its value state; read-only during drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameContext<'a> {
    /// Arc start angle in degrees
    pub start_angle: f64,
    /// Full configured sweep in degrees
    pub sweep_angle: f64,
    /// Sweep covered by the displayed value, in `[0, sweep_angle]`
    pub progress_sweep: f64,
    /// Value currently shown (may differ from the target while animating)
    pub display_value: f64,
    pub calibration: &'a CalibrationSet,
    pub unit: &'a str,
    pub info: Option<&'a str>,
    /// Formatted time of the latest reading
    pub date_text: Option<String>,
}

impl FrameContext<'_> {
    /// `"<rounded value><unit>"`, the main center line.
    pub fn value_text(&self) -> String {
        format!("{}{}", self.display_value.round() as i64, self.unit)
    }
}

/// Trait for gauge renderers.
///
/// `GaugeFrame` owns range, value, animation and calibration state and
/// calls these hooks; implementations own style and derived geometry.
/// Construction (`Default`) plays the role of view initialisation.
pub trait GaugeRenderer {
    fn style(&self) -> &GaugeStyle;

    /// Replace the style. Geometry is re-derived by the next
    /// `init_arc_rect`, which the frame issues right after.
    fn set_style(&mut self, style: GaugeStyle);

    /// Derive ring rectangles and shape paths from the drawable bounds.
    ///
    /// Must be idempotent. Degenerate bounds leave the renderer not ready.
    fn init_arc_rect(&mut self, bounds: Rect);

    /// False until usable geometry has been derived.
    fn is_ready(&self) -> bool;

    /// Outer ring and calibration.
    fn draw_arc(&self, surface: &mut dyn Surface, ctx: &FrameContext<'_>)
        -> Result<(), SurfaceError>;

    /// Progress arc, progress point, hub, needle and sweep fill.
    fn draw_progress_arc(
        &self,
        surface: &mut dyn Surface,
        ctx: &FrameContext<'_>,
    ) -> Result<(), SurfaceError>;

    /// Center value, info and date lines.
    fn draw_text(&self, surface: &mut dyn Surface, ctx: &FrameContext<'_>)
        -> Result<(), SurfaceError>;
}
