//! Derived ring geometry for the flow gauge

use flow_gauge_types::{GaugeStyle, Point, Rect};

/// Rectangles and shapes derived from the drawable bounds and the style.
///
/// Shapes are laid out pointing straight up from the center; renderers
/// rotate them into place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    /// Bounds of the outer ring
    pub outer: Rect,
    /// Outer ring inset by the arc spacing
    pub inner: Rect,
    pub center: Point,
    /// Needle triangle: tip, then the two base corners
    pub indicator: [Point; 3],
    /// Tick line extent along the vertical through the center
    pub calibration_start: f64,
    pub calibration_end: f64,
    /// Baseline of calibration labels
    pub label_baseline: f64,
}

impl ArcGeometry {
    /// Space kept around the outer ring for calibration labels.
    pub fn label_margin(style: &GaugeStyle) -> f64 {
        (style.calibration_label_offset + style.calibration_text_size)
            .max(style.outer_arc_width / 2.0)
    }

    /// Derive geometry for `bounds`, or `None` if the bounds are
    /// degenerate or too small for the arc spacing.
    pub fn compute(bounds: Rect, style: &GaugeStyle) -> Option<Self> {
        if bounds.is_degenerate() {
            return None;
        }

        let outer = bounds.centered_square().inset(Self::label_margin(style));
        if outer.is_degenerate() {
            return None;
        }

        let spacing = style.arc_spacing.max(0.0);
        if spacing >= outer.width().min(outer.height()) / 2.0 {
            return None;
        }
        let inner = outer.inset(spacing);
        let center = outer.center();

        let indicator_start = inner.top + spacing / 2.0;
        let tip = Point::new(center.x, indicator_start + style.indicator_offset);
        let base_y = tip.y + style.indicator_length;
        let indicator = [
            tip,
            Point::new(center.x - style.indicator_half_width, base_y),
            Point::new(center.x + style.indicator_half_width, base_y),
        ];

        let calibration_start = inner.top - style.calibration_length / 2.0;
        let calibration_end = calibration_start + style.calibration_length;
        let label_baseline = calibration_end - style.calibration_label_offset;

        Some(Self {
            outer,
            inner,
            center,
            indicator,
            calibration_start,
            calibration_end,
            label_baseline,
        })
    }
}
