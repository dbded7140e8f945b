//! Flow gauge renderer
//!
//! Draws the gauge in ordered passes so later shapes overlay earlier ones:
//! outer ring, calibration, progress arc, progress point, hub, needle,
//! sweep fill, and finally the center text.

use flow_gauge_core::{
    FrameContext, GaugeRenderer, LineCap, LinearGradient, Paint, Stroke, Surface, SurfaceError,
    TextAlign, TextStyle, UP_ANGLE,
};
use flow_gauge_types::{fade_stops, Color, ColorStop, GaugeStyle, GradientExtend, Point, Rect};

use crate::arc_path::ArcPath;
use crate::geometry::ArcGeometry;

/// Renderer for the flow gauge
#[derive(Debug, Clone, Default)]
pub struct FlowRenderer {
    style: GaugeStyle,
    geometry: Option<ArcGeometry>,
}

impl FlowRenderer {
    pub fn new(style: GaugeStyle) -> Self {
        Self {
            style,
            geometry: None,
        }
    }

    pub fn geometry(&self) -> Option<&ArcGeometry> {
        self.geometry.as_ref()
    }

    /// Where the progress point sits for a progress of `sweep` degrees.
    ///
    /// Measured along the progress arc path; `None` when the arc is empty
    /// or the geometry is not ready.
    pub fn progress_point(&self, start_angle: f64, sweep: f64) -> Option<Point> {
        let geom = self.geometry.as_ref()?;
        let (point, _tangent) = ArcPath::new(geom.outer, start_angle, sweep).end()?;
        // The origin doubles as the "not computed" sentinel
        (point != Point::ORIGIN).then_some(point)
    }

    /// Horizontal gradient across the ring, reflected past its ends.
    fn horizontal_gradient(outer: Rect, stops: Vec<ColorStop>) -> Paint {
        let y = outer.center().y;
        Paint::Linear(LinearGradient {
            start: Point::new(outer.right, y),
            end: Point::new(outer.left, y),
            stops,
            extend: GradientExtend::Reflect,
        })
    }

    fn progress_paint(&self, outer: Rect) -> Paint {
        let stops = fade_stops(
            self.style.progress_arc_color,
            self.style.progress_arc_color.a,
            0.0,
            self.style.progress_gradient_stops,
        );
        Self::horizontal_gradient(outer, stops)
    }

    fn sweep_fill_paint(&self, outer: Rect) -> Paint {
        let alpha = self.style.sweep_fill_alpha;
        let color = self.style.progress_arc_color;
        let stops = vec![
            ColorStop::new(0.0, color.with_alpha(alpha)),
            ColorStop::new(0.5, color.with_alpha(alpha / 2.0)),
            ColorStop::new(1.0, Color::TRANSPARENT),
        ];
        Self::horizontal_gradient(outer, stops)
    }

    fn text_style(&self, size: f64, color: Color) -> TextStyle {
        TextStyle {
            family: self.style.font_family.clone(),
            size,
            color,
            align: TextAlign::Center,
        }
    }

    /// Ticks and labels, laid out pointing up and reached by rotating the
    /// surface one tick at a time around the center.
    fn draw_calibration(
        &self,
        surface: &mut dyn Surface,
        geom: &ArcGeometry,
        ctx: &FrameContext<'_>,
    ) -> Result<(), SurfaceError> {
        let calibration = ctx.calibration;
        if calibration.is_empty() {
            return Ok(());
        }

        let style = &self.style;
        let large = Stroke::new(
            style.large_calibration_color,
            style.large_calibration_width,
            LineCap::Butt,
        );
        let small = Stroke::new(
            style.small_calibration_color,
            style.small_calibration_width,
            LineCap::Butt,
        );
        let label_style = self.text_style(style.calibration_text_size, style.calibration_text_color);
        let step = calibration.tick_angle(ctx.sweep_angle);
        let from = Point::new(geom.center.x, geom.calibration_start);
        let to = Point::new(geom.center.x, geom.calibration_end);

        with_saved_state(surface, |surface| {
            surface.rotate(ctx.start_angle - UP_ANGLE, geom.center);
            for tick in calibration.ticks() {
                let stroke = if tick.is_large() { &large } else { &small };
                surface.stroke_line(from, to, stroke)?;
                if let Some(label) = tick.label {
                    let text = format!("• {}{}", label, ctx.unit);
                    surface.draw_text(
                        &text,
                        Point::new(geom.center.x, geom.label_baseline),
                        &label_style,
                    )?;
                }
                surface.rotate(step, geom.center);
            }
            Ok(())
        })
    }

    fn draw_needle(
        &self,
        surface: &mut dyn Surface,
        geom: &ArcGeometry,
        angle: f64,
    ) -> Result<(), SurfaceError> {
        with_saved_state(surface, |surface| {
            surface.rotate(angle - UP_ANGLE, geom.center);
            surface.fill_path(&geom.indicator, &self.style.indicator_color.into())
        })
    }
}

/// Run `draw` between `save` and `restore`. The state is restored even
/// when `draw` fails; the first error wins.
fn with_saved_state(
    surface: &mut dyn Surface,
    draw: impl FnOnce(&mut dyn Surface) -> Result<(), SurfaceError>,
) -> Result<(), SurfaceError> {
    surface.save()?;
    let drawn = draw(&mut *surface);
    let restored = surface.restore();
    drawn.and(restored)
}

impl GaugeRenderer for FlowRenderer {
    fn style(&self) -> &GaugeStyle {
        &self.style
    }

    fn set_style(&mut self, style: GaugeStyle) {
        self.style = style;
    }

    fn init_arc_rect(&mut self, bounds: Rect) {
        self.geometry = ArcGeometry::compute(bounds, &self.style);
        if self.geometry.is_none() {
            log::debug!("Flow gauge not ready for bounds {:?}", bounds);
        }
    }

    fn is_ready(&self) -> bool {
        self.geometry.is_some()
    }

    fn draw_arc(
        &self,
        surface: &mut dyn Surface,
        ctx: &FrameContext<'_>,
    ) -> Result<(), SurfaceError> {
        let Some(geom) = self.geometry.as_ref() else {
            return Ok(());
        };

        let ring = Stroke::new(
            self.style.outer_arc_color,
            self.style.outer_arc_width,
            LineCap::Round,
        );
        surface.stroke_arc(geom.outer, ctx.start_angle, ctx.sweep_angle, &ring)?;

        self.draw_calibration(surface, geom, ctx)
    }

    fn draw_progress_arc(
        &self,
        surface: &mut dyn Surface,
        ctx: &FrameContext<'_>,
    ) -> Result<(), SurfaceError> {
        let Some(geom) = self.geometry.as_ref() else {
            return Ok(());
        };
        let progress = ctx.progress_sweep;
        let has_progress = progress != 0.0;

        if has_progress {
            let stroke = Stroke {
                paint: self.progress_paint(geom.outer),
                width: self.style.outer_arc_width,
                cap: LineCap::Round,
            };
            surface.stroke_arc(geom.outer, ctx.start_angle, progress, &stroke)?;

            if let Some(point) = self.progress_point(ctx.start_angle, progress) {
                surface.fill_circle(
                    point,
                    self.style.progress_point_radius,
                    &self.style.progress_point_color.into(),
                )?;
            }
        }

        surface.fill_circle(
            geom.center,
            self.style.hub_radius,
            &self.style.inner_arc_color.into(),
        )?;

        // At zero progress the needle rests on the start angle
        self.draw_needle(surface, geom, ctx.start_angle + progress)?;

        if has_progress {
            surface.fill_pie(
                geom.outer,
                ctx.start_angle,
                progress,
                &self.sweep_fill_paint(geom.outer),
            )?;
        }
        Ok(())
    }

    fn draw_text(
        &self,
        surface: &mut dyn Surface,
        ctx: &FrameContext<'_>,
    ) -> Result<(), SurfaceError> {
        let Some(geom) = self.geometry.as_ref() else {
            return Ok(());
        };
        let style = &self.style;
        let center = geom.center;

        let value_style = self.text_style(style.value_text_size, style.value_text_color);
        let value_text = ctx.value_text();
        let value_baseline = center.y + style.text_spacing;
        surface.draw_text(&value_text, Point::new(center.x, value_baseline), &value_style)?;

        if let Some(info) = ctx.info {
            let value_height = surface.measure_text(&value_text, &value_style)?.height();
            let info_style = self.text_style(style.info_text_size, style.info_text_color);
            let baseline = value_baseline - value_height - style.text_spacing / 2.0;
            surface.draw_text(info, Point::new(center.x, baseline), &info_style)?;
        }

        if let Some(date) = ctx.date_text.as_deref().filter(|d| !d.is_empty()) {
            let date_style = self.text_style(style.date_text_size, style.date_text_color);
            let date_height = surface.measure_text(date, &date_style)?.height();
            let baseline = value_baseline + date_height + style.text_spacing;
            surface.draw_text(date, Point::new(center.x, baseline), &date_style)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_gauge_core::{DrawOp, GaugeFrame, RecordingSurface};

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 400.0, 400.0);

    fn gauge() -> GaugeFrame<FlowRenderer> {
        let mut frame = GaugeFrame::<FlowRenderer>::default();
        frame.on_bounds_changed(BOUNDS);
        frame.set_range(0.0, 1000.0).unwrap();
        frame
    }

    fn draw(frame: &GaugeFrame<FlowRenderer>) -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        frame.try_draw(&mut surface).unwrap();
        assert!(surface.is_balanced());
        surface
    }

    fn assert_close(a: Point, b: Point) {
        assert!(a.distance_to(b) < 1e-6, "{a:?} != {b:?}");
    }

    fn is_gradient(paint: &Paint) -> bool {
        matches!(paint, Paint::Linear(_))
    }

    fn progress_arcs(surface: &RecordingSurface) -> Vec<f64> {
        surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::StrokeArc {
                    sweep_angle,
                    stroke,
                    ..
                } if is_gradient(&stroke.paint) => Some(*sweep_angle),
                _ => None,
            })
            .collect()
    }

    fn circles(surface: &RecordingSurface) -> Vec<(Point, f64)> {
        surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillCircle { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }

    fn needle_tip(surface: &RecordingSurface) -> Point {
        surface
            .ops()
            .iter()
            .find_map(|op| match op {
                DrawOp::FillPath { points, .. } => Some(points[0]),
                _ => None,
            })
            .expect("needle drawn")
    }

    fn direction_degrees(from: Point, to: Point) -> f64 {
        (to.y - from.y).atan2(to.x - from.x).to_degrees().rem_euclid(360.0)
    }

    #[test]
    fn test_half_value_scenario() {
        let mut frame = gauge();
        frame.set_value_at(500.0, false, false, None);
        assert_eq!(frame.progress_sweep(), 135.0);

        let surface = draw(&frame);
        assert_eq!(progress_arcs(&surface), vec![135.0]);

        // Start 135° + 135° = 270°: the point sits at the top of the ring,
        // the middle of the arc's angular span
        let outer = frame.renderer().geometry().unwrap().outer;
        let point = circles(&surface)
            .into_iter()
            .find(|(_, r)| *r == frame.style().progress_point_radius)
            .map(|(p, _)| p)
            .expect("progress point drawn");
        assert_close(point, Point::new(outer.center().x, outer.top));

        let tip = needle_tip(&surface);
        assert!((direction_degrees(outer.center(), tip) - 270.0).abs() < 1e-6);
    }

    #[test]
    fn test_pass_order() {
        let mut frame = gauge();
        frame
            .set_calibration(vec![0.0, 500.0, 1000.0], Some(vec!["lo".into()]), 1)
            .unwrap();
        frame.set_value_at(250.0, false, false, None);
        let surface = draw(&frame);

        let kinds: Vec<&str> = surface
            .ops()
            .iter()
            .map(|op| match op {
                DrawOp::StrokeArc { stroke, .. } if is_gradient(&stroke.paint) => "progress",
                DrawOp::StrokeArc { .. } => "ring",
                DrawOp::StrokeLine { .. } => "tick",
                DrawOp::Text { text, .. } if text.starts_with('•') => "label",
                DrawOp::Text { .. } => "text",
                DrawOp::FillCircle { .. } => "circle",
                DrawOp::FillPath { .. } => "needle",
                DrawOp::FillPie { .. } => "sweep",
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "ring", "tick", "label", "tick", "tick", "tick", "tick", "progress", "circle",
                "circle", "needle", "sweep", "text"
            ]
        );
    }

    #[test]
    fn test_calibration_scenario_labels() {
        let mut frame = gauge();
        frame.set_unit_info("MB");
        let labels = ["较差", "中等", "良好", "优秀", "极好"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        frame
            .set_calibration(
                vec![350.0, 550.0, 600.0, 650.0, 700.0, 950.0],
                Some(labels),
                0,
            )
            .unwrap();
        let surface = draw(&frame);
        let style = frame.style();
        let geom = *frame.renderer().geometry().unwrap();

        let ticks: Vec<(Point, Point, f64)> = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::StrokeLine { from, to, stroke } => Some((*from, *to, stroke.width)),
                _ => None,
            })
            .collect();
        assert_eq!(ticks.len(), 6);
        assert!(ticks
            .iter()
            .all(|(_, _, w)| *w == style.large_calibration_width));

        // Successive ticks 54° apart, starting at the arc start
        for (i, (from, to, _)) in ticks.iter().enumerate() {
            let angle = direction_degrees(geom.center, *to);
            let expected = (135.0 + 54.0 * i as f64).rem_euclid(360.0);
            let diff = (angle - expected).abs();
            assert!(diff < 1e-6 || (diff - 360.0).abs() < 1e-6, "tick {i}: {angle}");
            assert!(geom.center.distance_to(*from) > geom.center.distance_to(*to));
        }

        let labels: Vec<&str> = surface
            .texts()
            .into_iter()
            .filter(|t| t.starts_with("• "))
            .collect();
        assert_eq!(
            labels,
            vec!["• 较差MB", "• 中等MB", "• 良好MB", "• 优秀MB", "• 极好MB"]
        );
    }

    #[test]
    fn test_small_ticks_between_breakpoints() {
        let mut frame = gauge();
        frame
            .set_calibration(vec![0.0, 500.0, 1000.0], None, 3)
            .unwrap();
        let surface = draw(&frame);
        let widths: Vec<f64> = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::StrokeLine { stroke, .. } => Some(stroke.width),
                _ => None,
            })
            .collect();
        assert_eq!(widths.len(), 9);
        let large = frame.style().large_calibration_width;
        assert_eq!(widths.iter().filter(|w| **w == large).count(), 3);
    }

    #[test]
    fn test_zero_progress_skips_overlay() {
        let mut frame = gauge();
        frame
            .set_calibration(vec![0.0, 1000.0], Some(vec!["a".into(), "b".into()]), 0)
            .unwrap();
        frame.set_value_at(0.0, false, false, None);
        let surface = draw(&frame);

        assert!(progress_arcs(&surface).is_empty());
        assert!(!surface
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::FillPie { .. })));

        // Only the hub remains; nothing is drawn at the origin
        let circles = circles(&surface);
        assert_eq!(circles.len(), 1);
        assert_eq!(circles[0].1, frame.style().hub_radius);
        assert!(circles.iter().all(|(p, _)| *p != Point::ORIGIN));

        // Ring and calibration are still there
        assert!(surface
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::StrokeArc { .. })));
        assert_eq!(
            surface
                .ops()
                .iter()
                .filter(|op| matches!(op, DrawOp::StrokeLine { .. }))
                .count(),
            2
        );

        let center = frame.renderer().geometry().unwrap().center;
        let tip = needle_tip(&surface);
        assert!((direction_degrees(center, tip) - 135.0).abs() < 1e-6);
    }

    #[test]
    fn test_full_value_sweeps_whole_arc() {
        let mut frame = gauge();
        frame.set_value_at(5000.0, false, false, None);
        let surface = draw(&frame);
        assert_eq!(progress_arcs(&surface), vec![270.0]);
    }

    /// Recording surface whose lines and polygons fail to draw
    #[derive(Default)]
    struct BrokenShapes {
        inner: RecordingSurface,
    }

    impl Surface for BrokenShapes {
        fn save(&mut self) -> Result<(), SurfaceError> {
            self.inner.save()
        }

        fn restore(&mut self) -> Result<(), SurfaceError> {
            self.inner.restore()
        }

        fn rotate(&mut self, degrees: f64, pivot: Point) {
            self.inner.rotate(degrees, pivot)
        }

        fn stroke_arc(
            &mut self,
            rect: Rect,
            start_angle: f64,
            sweep_angle: f64,
            stroke: &Stroke,
        ) -> Result<(), SurfaceError> {
            self.inner.stroke_arc(rect, start_angle, sweep_angle, stroke)
        }

        fn fill_pie(
            &mut self,
            rect: Rect,
            start_angle: f64,
            sweep_angle: f64,
            paint: &Paint,
        ) -> Result<(), SurfaceError> {
            self.inner.fill_pie(rect, start_angle, sweep_angle, paint)
        }

        fn fill_circle(
            &mut self,
            center: Point,
            radius: f64,
            paint: &Paint,
        ) -> Result<(), SurfaceError> {
            self.inner.fill_circle(center, radius, paint)
        }

        fn stroke_line(&mut self, _: Point, _: Point, _: &Stroke) -> Result<(), SurfaceError> {
            Err(SurfaceError::Backend("line".to_string()))
        }

        fn fill_path(&mut self, _: &[Point], _: &Paint) -> Result<(), SurfaceError> {
            Err(SurfaceError::Backend("path".to_string()))
        }

        fn measure_text(
            &mut self,
            text: &str,
            style: &TextStyle,
        ) -> Result<flow_gauge_core::TextExtents, SurfaceError> {
            self.inner.measure_text(text, style)
        }

        fn draw_text(
            &mut self,
            text: &str,
            anchor: Point,
            style: &TextStyle,
        ) -> Result<(), SurfaceError> {
            self.inner.draw_text(text, anchor, style)
        }
    }

    #[test]
    fn test_failed_passes_restore_surface_state() {
        let mut frame = gauge();
        frame
            .set_calibration(vec![0.0, 500.0, 1000.0], None, 1)
            .unwrap();
        let mut surface = BrokenShapes::default();
        assert!(frame.try_draw(&mut surface).is_err());
        assert!(surface.inner.is_balanced());

        // Needle pass on its own
        let renderer = frame.renderer();
        let geom = *renderer.geometry().unwrap();
        let mut surface = BrokenShapes::default();
        let result = renderer.draw_needle(&mut surface, &geom, 200.0);
        assert_eq!(result, Err(SurfaceError::Backend("path".to_string())));
        assert!(surface.inner.is_balanced());
    }

    #[test]
    fn test_not_ready_draws_nothing() {
        let mut frame = GaugeFrame::<FlowRenderer>::default();
        frame.set_value_at(300.0, false, false, None);
        assert!(draw(&frame).ops().is_empty());

        frame.on_bounds_changed(Rect::from_size(0.0, 0.0));
        assert!(draw(&frame).ops().is_empty());

        frame.on_bounds_changed(BOUNDS);
        assert!(!draw(&frame).ops().is_empty());

        frame.set_arc_spacing(500.0);
        assert!(!frame.renderer().is_ready());
        assert!(draw(&frame).ops().is_empty());
    }

    #[test]
    fn test_configure_is_idempotent() {
        let mut frame = gauge();
        let first = *frame.renderer().geometry().unwrap();
        frame.on_bounds_changed(BOUNDS);
        assert_eq!(*frame.renderer().geometry().unwrap(), first);
    }

    #[test]
    fn test_arc_spacing_moves_inner_ring() {
        let mut frame = gauge();
        frame.set_arc_spacing(20.0);
        let geom = frame.renderer().geometry().unwrap();
        assert_eq!(geom.inner, geom.outer.inset(20.0));
    }

    #[test]
    fn test_center_text_lines() {
        let mut frame = gauge();
        frame.set_unit_info("MB");
        frame.set_info("已使用");
        let at = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        frame.set_value_at(321.4, false, false, Some(at));
        let surface = draw(&frame);

        let lines: Vec<(String, Point)> = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, anchor, .. } => Some((text.clone(), *anchor)),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 3);
        let (value, info, date) = (&lines[0], &lines[1], &lines[2]);
        assert_eq!(value.0, "321MB");
        assert_eq!(info.0, "已使用");
        assert_eq!(date.0, "2024-01-02 08:30");
        assert!(info.1.y < value.1.y && value.1.y < date.1.y);
        assert_eq!(value.1.x, 200.0);
    }

    #[test]
    fn test_style_colors_flow_into_paints() {
        let mut frame = gauge();
        let red = Color::new(1.0, 0.0, 0.0, 1.0);
        frame.set_outer_arc_paint(9.0, red);
        frame.set_progress_point_paint(4.0, Color::WHITE);
        frame.set_progress_outer_arc_color(red);
        frame.set_value_at(400.0, false, false, None);
        let surface = draw(&frame);

        match &surface.ops()[0] {
            DrawOp::StrokeArc { stroke, .. } => {
                assert_eq!(stroke.width, 9.0);
                assert_eq!(stroke.paint, Paint::Solid(red));
            }
            other => panic!("unexpected first op {other:?}"),
        }
        let progress = surface.ops().iter().find_map(|op| match op {
            DrawOp::StrokeArc { stroke, .. } => match &stroke.paint {
                Paint::Linear(g) => Some(g.clone()),
                _ => None,
            },
            _ => None,
        });
        let gradient = progress.expect("progress arc drawn");
        assert_eq!(gradient.stops[0].color, red);
        assert_eq!(gradient.stops.last().unwrap().color.a, 0.0);
        assert!(circles(&surface).iter().any(|(_, r)| *r == 4.0));
    }
}
