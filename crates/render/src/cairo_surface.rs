//! Cairo backend for the gauge `Surface`
//!
//! Wraps a borrowed `cairo::Context`, so it works the same for a GTK
//! `DrawingArea` draw function and for an offscreen `ImageSurface`.

use cairo::Context;
use std::f64::consts::PI;

use flow_gauge_core::{
    LineCap, Paint, Stroke, Surface, SurfaceError, TextAlign, TextExtents, TextStyle,
};
use flow_gauge_types::{GradientExtend, Point, Rect};

use crate::pango_text::{pango_logical_width, pango_show_text_at, pango_text_extents};

fn backend(e: cairo::Error) -> SurfaceError {
    SurfaceError::Backend(e.to_string())
}

pub struct CairoSurface<'a> {
    cr: &'a Context,
}

impl<'a> CairoSurface<'a> {
    pub fn new(cr: &'a Context) -> Self {
        Self { cr }
    }

    fn apply_paint(&self, paint: &Paint) -> Result<(), SurfaceError> {
        match paint {
            Paint::Solid(color) => {
                color.apply_to_cairo(self.cr);
                Ok(())
            }
            Paint::Linear(gradient) => {
                if gradient.stops.is_empty() {
                    return Err(SurfaceError::InvalidPaint(
                        "linear gradient without color stops".to_string(),
                    ));
                }
                let pattern = cairo::LinearGradient::new(
                    gradient.start.x,
                    gradient.start.y,
                    gradient.end.x,
                    gradient.end.y,
                );
                for stop in &gradient.stops {
                    let c = stop.color;
                    pattern.add_color_stop_rgba(stop.position, c.r, c.g, c.b, c.a);
                }
                pattern.set_extend(match gradient.extend {
                    GradientExtend::Pad => cairo::Extend::Pad,
                    GradientExtend::Repeat => cairo::Extend::Repeat,
                    GradientExtend::Reflect => cairo::Extend::Reflect,
                });
                self.cr.set_source(&pattern).map_err(backend)
            }
        }
    }

    fn apply_stroke(&self, stroke: &Stroke) -> Result<(), SurfaceError> {
        self.apply_paint(&stroke.paint)?;
        self.cr.set_line_width(stroke.width);
        self.cr.set_line_cap(match stroke.cap {
            LineCap::Butt => cairo::LineCap::Butt,
            LineCap::Round => cairo::LineCap::Round,
            LineCap::Square => cairo::LineCap::Square,
        });
        Ok(())
    }

    /// Append the arc of the ellipse bounded by `rect` to the current path.
    fn ellipse_arc(&self, rect: Rect, start_angle: f64, sweep_angle: f64) -> Result<(), SurfaceError> {
        let c = rect.center();
        let (start, end) = (
            start_angle.to_radians(),
            (start_angle + sweep_angle).to_radians(),
        );

        // Scale a unit circle; the path keeps device coordinates after restore
        self.cr.save().map_err(backend)?;
        self.cr.translate(c.x, c.y);
        self.cr.scale(rect.width() / 2.0, rect.height() / 2.0);
        if sweep_angle >= 0.0 {
            self.cr.arc(0.0, 0.0, 1.0, start, end);
        } else {
            self.cr.arc_negative(0.0, 0.0, 1.0, start, end);
        }
        self.cr.restore().map_err(backend)
    }
}

impl Surface for CairoSurface<'_> {
    fn save(&mut self) -> Result<(), SurfaceError> {
        self.cr.save().map_err(backend)
    }

    fn restore(&mut self) -> Result<(), SurfaceError> {
        self.cr.restore().map_err(backend)
    }

    fn rotate(&mut self, degrees: f64, pivot: Point) {
        self.cr.translate(pivot.x, pivot.y);
        self.cr.rotate(degrees.to_radians());
        self.cr.translate(-pivot.x, -pivot.y);
    }

    fn stroke_arc(
        &mut self,
        rect: Rect,
        start_angle: f64,
        sweep_angle: f64,
        stroke: &Stroke,
    ) -> Result<(), SurfaceError> {
        if rect.is_degenerate() {
            return Ok(());
        }
        self.cr.new_path(); // Clear any existing path to prevent spurious lines
        self.ellipse_arc(rect, start_angle, sweep_angle)?;
        self.apply_stroke(stroke)?;
        self.cr.stroke().map_err(backend)
    }

    fn fill_pie(
        &mut self,
        rect: Rect,
        start_angle: f64,
        sweep_angle: f64,
        paint: &Paint,
    ) -> Result<(), SurfaceError> {
        if rect.is_degenerate() {
            return Ok(());
        }
        let c = rect.center();
        self.cr.new_path();
        self.cr.move_to(c.x, c.y);
        self.ellipse_arc(rect, start_angle, sweep_angle)?;
        self.cr.close_path();
        self.apply_paint(paint)?;
        self.cr.fill().map_err(backend)
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: f64,
        paint: &Paint,
    ) -> Result<(), SurfaceError> {
        self.cr.new_path();
        self.cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
        self.apply_paint(paint)?;
        self.cr.fill().map_err(backend)
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), SurfaceError> {
        self.cr.new_path();
        self.cr.move_to(from.x, from.y);
        self.cr.line_to(to.x, to.y);
        self.apply_stroke(stroke)?;
        self.cr.stroke().map_err(backend)
    }

    fn fill_path(&mut self, points: &[Point], paint: &Paint) -> Result<(), SurfaceError> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };
        self.cr.new_path();
        self.cr.move_to(first.x, first.y);
        for p in rest {
            self.cr.line_to(p.x, p.y);
        }
        self.cr.close_path();
        self.apply_paint(paint)?;
        self.cr.fill().map_err(backend)
    }

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> Result<TextExtents, SurfaceError> {
        Ok(pango_text_extents(self.cr, text, &style.family, style.size))
    }

    fn draw_text(
        &mut self,
        text: &str,
        anchor: Point,
        style: &TextStyle,
    ) -> Result<(), SurfaceError> {
        let width = pango_logical_width(self.cr, text, &style.family, style.size);
        let x = match style.align {
            TextAlign::Left => anchor.x,
            TextAlign::Center => anchor.x - width / 2.0,
            TextAlign::Right => anchor.x - width,
        };
        style.color.apply_to_cairo(self.cr);
        pango_show_text_at(self.cr, x, anchor.y, text, &style.family, style.size);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_gauge_core::LinearGradient;
    use flow_gauge_types::{Color, ColorStop};

    fn image() -> cairo::ImageSurface {
        cairo::ImageSurface::create(cairo::Format::ARgb32, 100, 100).unwrap()
    }

    fn alpha_at(surface: &mut cairo::ImageSurface, x: usize, y: usize) -> u8 {
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        // ARGB32 is native-endian; alpha is the high byte of each u32
        let offset = y * stride + x * 4;
        let pixel = u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);
        (pixel >> 24) as u8
    }

    #[test]
    fn test_fill_circle_paints_pixels() {
        let mut img = image();
        {
            let cr = Context::new(&img).unwrap();
            let mut surface = CairoSurface::new(&cr);
            surface
                .fill_circle(Point::new(50.0, 50.0), 10.0, &Color::WHITE.into())
                .unwrap();
        }
        img.flush();
        assert_eq!(alpha_at(&mut img, 50, 50), 255);
        assert_eq!(alpha_at(&mut img, 5, 5), 0);
    }

    #[test]
    fn test_stroke_arc_follows_rotation() {
        let mut img = image();
        {
            let cr = Context::new(&img).unwrap();
            let mut surface = CairoSurface::new(&cr);
            surface.save().unwrap();
            surface.rotate(90.0, Point::new(50.0, 50.0));
            // Short arc at 3 o'clock, rotated to 6 o'clock
            let stroke = Stroke::new(Color::WHITE, 6.0, LineCap::Butt);
            surface
                .stroke_arc(Rect::new(10.0, 10.0, 90.0, 90.0), -10.0, 20.0, &stroke)
                .unwrap();
            surface.restore().unwrap();
        }
        img.flush();
        assert!(alpha_at(&mut img, 50, 90) > 200);
        assert_eq!(alpha_at(&mut img, 90, 50), 0);
    }

    #[test]
    fn test_empty_gradient_is_rejected() {
        let img = image();
        let cr = Context::new(&img).unwrap();
        let mut surface = CairoSurface::new(&cr);
        let paint = Paint::Linear(LinearGradient {
            start: Point::ORIGIN,
            end: Point::new(100.0, 0.0),
            stops: Vec::new(),
            extend: GradientExtend::Reflect,
        });
        assert!(matches!(
            surface.fill_circle(Point::new(50.0, 50.0), 5.0, &paint),
            Err(SurfaceError::InvalidPaint(_))
        ));

        let paint = Paint::Linear(LinearGradient {
            start: Point::ORIGIN,
            end: Point::new(100.0, 0.0),
            stops: vec![ColorStop::new(0.0, Color::WHITE)],
            extend: GradientExtend::Pad,
        });
        assert!(surface.fill_circle(Point::new(50.0, 50.0), 5.0, &paint).is_ok());
    }
}
