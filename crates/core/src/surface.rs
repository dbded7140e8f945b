//! Abstract 2D drawing surface
//!
//! Gauge renderers paint through this trait instead of a concrete backend.
//! Angles are in degrees, 0° at 3 o'clock, clockwise positive. Arcs are
//! described by the rectangle that bounds their full ellipse.

use flow_gauge_types::{Color, ColorStop, GradientExtend, Point, Rect};

use crate::error::SurfaceError;

/// Linear gradient between two points
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: Vec<ColorStop>,
    pub extend: GradientExtend,
}

/// Source used for filling or stroking
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear(LinearGradient),
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Stroke parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f64,
    pub cap: LineCap,
}

impl Stroke {
    pub fn new(paint: impl Into<Paint>, width: f64, cap: LineCap) -> Self {
        Self {
            paint: paint.into(),
            width,
            cap,
        }
    }
}

/// Horizontal placement of text relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub family: String,
    pub size: f64,
    pub color: Color,
    pub align: TextAlign,
}

/// Text extents returned by `Surface::measure_text`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextExtents {
    pub width: f64,
    pub height: f64,
}

impl TextExtents {
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// A standard 2D vector canvas.
///
/// Transform state is stack based: every `save` must be paired with a
/// `restore`. `rotate` composes with the current transform.
pub trait Surface {
    fn save(&mut self) -> Result<(), SurfaceError>;

    fn restore(&mut self) -> Result<(), SurfaceError>;

    /// Rotate the coordinate system by `degrees` around `pivot`.
    fn rotate(&mut self, degrees: f64, pivot: Point);

    /// Stroke the arc of the ellipse bounded by `rect`.
    fn stroke_arc(
        &mut self,
        rect: Rect,
        start_angle: f64,
        sweep_angle: f64,
        stroke: &Stroke,
    ) -> Result<(), SurfaceError>;

    /// Fill the pie slice of the ellipse bounded by `rect` (arc closed
    /// through the center).
    fn fill_pie(
        &mut self,
        rect: Rect,
        start_angle: f64,
        sweep_angle: f64,
        paint: &Paint,
    ) -> Result<(), SurfaceError>;

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint)
        -> Result<(), SurfaceError>;

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), SurfaceError>;

    /// Fill the closed polygon through `points`.
    fn fill_path(&mut self, points: &[Point], paint: &Paint) -> Result<(), SurfaceError>;

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> Result<TextExtents, SurfaceError>;

    /// Draw `text` with its baseline at `anchor.y`, placed horizontally
    /// according to `style.align`.
    fn draw_text(&mut self, text: &str, anchor: Point, style: &TextStyle)
        -> Result<(), SurfaceError>;
}
