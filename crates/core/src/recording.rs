//! Recording surface
//!
//! Captures every drawing call as a `DrawOp` in device coordinates instead
//! of rasterizing. Used for headless inspection of a draw pass and by the
//! test suites of the renderers.

use flow_gauge_types::{Point, Rect};

use crate::error::SurfaceError;
use crate::surface::{Paint, Stroke, Surface, TextExtents, TextStyle};

/// Approximate advance of one glyph as a fraction of the font size
const GLYPH_ADVANCE: f64 = 0.6;

/// 2D affine transform: `x' = a*x + c*y + e`, `y' = b*x + d*y + f`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// `self` followed by `other` applied in local coordinates.
    fn then_local(&self, other: &Transform) -> Transform {
        Transform {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    fn rotation_about(degrees: f64, pivot: Point) -> Transform {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Transform {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: pivot.x - cos * pivot.x + sin * pivot.y,
            f: pivot.y - sin * pivot.x - cos * pivot.y,
        }
    }

    /// Net rotation in degrees, normalized to [0, 360).
    pub fn rotation_degrees(&self) -> f64 {
        self.b.atan2(self.a).to_degrees().rem_euclid(360.0)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One recorded drawing call. Points are in device coordinates; arcs keep
/// their local rectangle plus the rotation active when they were drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    StrokeArc {
        rect: Rect,
        start_angle: f64,
        sweep_angle: f64,
        stroke: Stroke,
        rotation: f64,
    },
    FillPie {
        rect: Rect,
        start_angle: f64,
        sweep_angle: f64,
        paint: Paint,
        rotation: f64,
    },
    FillCircle {
        center: Point,
        radius: f64,
        paint: Paint,
    },
    StrokeLine {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    FillPath {
        points: Vec<Point>,
        paint: Paint,
    },
    Text {
        text: String,
        anchor: Point,
        rotation: f64,
        style: TextStyle,
    },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    transform: Transform,
    stack: Vec<Transform>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// True when every `save` has been matched by a `restore`.
    pub fn is_balanced(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
        self.transform = Transform::IDENTITY;
        self.stack.clear();
    }

    /// Texts drawn so far, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) -> Result<(), SurfaceError> {
        self.stack.push(self.transform);
        Ok(())
    }

    fn restore(&mut self) -> Result<(), SurfaceError> {
        self.transform = self
            .stack
            .pop()
            .ok_or_else(|| SurfaceError::Backend("restore without matching save".to_string()))?;
        Ok(())
    }

    fn rotate(&mut self, degrees: f64, pivot: Point) {
        self.transform = self
            .transform
            .then_local(&Transform::rotation_about(degrees, pivot));
    }

    fn stroke_arc(
        &mut self,
        rect: Rect,
        start_angle: f64,
        sweep_angle: f64,
        stroke: &Stroke,
    ) -> Result<(), SurfaceError> {
        self.ops.push(DrawOp::StrokeArc {
            rect,
            start_angle,
            sweep_angle,
            stroke: stroke.clone(),
            rotation: self.transform.rotation_degrees(),
        });
        Ok(())
    }

    fn fill_pie(
        &mut self,
        rect: Rect,
        start_angle: f64,
        sweep_angle: f64,
        paint: &Paint,
    ) -> Result<(), SurfaceError> {
        self.ops.push(DrawOp::FillPie {
            rect,
            start_angle,
            sweep_angle,
            paint: paint.clone(),
            rotation: self.transform.rotation_degrees(),
        });
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: f64,
        paint: &Paint,
    ) -> Result<(), SurfaceError> {
        self.ops.push(DrawOp::FillCircle {
            center: self.transform.apply(center),
            radius,
            paint: paint.clone(),
        });
        Ok(())
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), SurfaceError> {
        self.ops.push(DrawOp::StrokeLine {
            from: self.transform.apply(from),
            to: self.transform.apply(to),
            stroke: stroke.clone(),
        });
        Ok(())
    }

    fn fill_path(&mut self, points: &[Point], paint: &Paint) -> Result<(), SurfaceError> {
        self.ops.push(DrawOp::FillPath {
            points: points.iter().map(|p| self.transform.apply(*p)).collect(),
            paint: paint.clone(),
        });
        Ok(())
    }

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> Result<TextExtents, SurfaceError> {
        Ok(TextExtents {
            width: text.chars().count() as f64 * style.size * GLYPH_ADVANCE,
            height: style.size,
        })
    }

    fn draw_text(
        &mut self,
        text: &str,
        anchor: Point,
        style: &TextStyle,
    ) -> Result<(), SurfaceError> {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            anchor: self.transform.apply(anchor),
            rotation: self.transform.rotation_degrees(),
            style: style.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_gauge_types::Color;

    fn assert_close(a: Point, b: Point) {
        assert!(a.distance_to(b) < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_rotations_compose_about_pivot() {
        let mut surface = RecordingSurface::new();
        let pivot = Point::new(100.0, 100.0);
        surface.save().unwrap();
        surface.rotate(45.0, pivot);
        surface.rotate(45.0, pivot);
        surface
            .fill_circle(Point::new(150.0, 100.0), 1.0, &Color::WHITE.into())
            .unwrap();
        surface.restore().unwrap();
        assert!(surface.is_balanced());

        match &surface.ops()[0] {
            DrawOp::FillCircle { center, .. } => assert_close(*center, Point::new(100.0, 150.0)),
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn test_restore_resets_transform() {
        let mut surface = RecordingSurface::new();
        surface.save().unwrap();
        surface.rotate(90.0, Point::ORIGIN);
        surface.restore().unwrap();
        let p = Point::new(3.0, 4.0);
        surface
            .fill_path(&[p], &Color::WHITE.into())
            .unwrap();
        match &surface.ops()[0] {
            DrawOp::FillPath { points, .. } => assert_close(points[0], p),
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn test_unmatched_restore_is_an_error() {
        let mut surface = RecordingSurface::new();
        assert!(surface.restore().is_err());
    }

    #[test]
    fn test_rotation_degrees_normalized() {
        let mut surface = RecordingSurface::new();
        surface.rotate(-90.0, Point::ORIGIN);
        assert!((surface.transform.rotation_degrees() - 270.0).abs() < 1e-9);
    }
}
