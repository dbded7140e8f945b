//! Gauge frame: value state and draw sequencing around a renderer
//!
//! The frame is passive. The host reports bounds changes through
//! `on_bounds_changed`, advances animations with `tick` once per frame and
//! paints with `on_frame`. Every mutating setter raises the redraw flag.

use std::fmt::Write as _;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime};
use log::{debug, warn};

use flow_gauge_types::{CalibrationSet, Color, GaugeStyle, Rect};

use crate::animation::ValueAnimator;
use crate::constants::{DEFAULT_ANIMATION_DURATION, DEFAULT_MAX, DEFAULT_MIN};
use crate::error::GaugeError;
use crate::renderer::{FrameContext, GaugeRenderer};
use crate::surface::Surface;

/// Sweep in degrees for `value` on a `[min, max]` scale spanning
/// `total_sweep` degrees. Out-of-range values are clamped.
pub fn sweep_for_value(value: f64, min: f64, max: f64, total_sweep: f64) -> f64 {
    if max.is_nan() || min.is_nan() || max <= min || !value.is_finite() {
        return 0.0;
    }
    (value.clamp(min, max) - min) / (max - min) * total_sweep
}

pub struct GaugeFrame<R: GaugeRenderer> {
    renderer: R,
    min: f64,
    max: f64,
    value: f64,
    animator: ValueAnimator,
    calibration: CalibrationSet,
    info: Option<String>,
    unit: String,
    updated_at: Option<NaiveDateTime>,
    bounds: Option<Rect>,
    dirty: bool,
}

impl<R: GaugeRenderer + Default> Default for GaugeFrame<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

impl<R: GaugeRenderer> GaugeFrame<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            value: DEFAULT_MIN,
            animator: ValueAnimator::new(DEFAULT_MIN, DEFAULT_ANIMATION_DURATION),
            calibration: CalibrationSet::default(),
            info: None,
            unit: String::new(),
            updated_at: None,
            bounds: None,
            dirty: true,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn style(&self) -> &GaugeStyle {
        self.renderer.style()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Raw value as last set (not clamped).
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Value currently shown, which trails `value` while animating.
    pub fn displayed_value(&self) -> f64 {
        self.animator.displayed()
    }

    pub fn calibration(&self) -> &CalibrationSet {
        &self.calibration
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    pub fn unit_info(&self) -> &str {
        &self.unit
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_active()
    }

    /// True if a setter or animation is waiting for a frame.
    pub fn needs_frame(&self) -> bool {
        self.dirty || self.animator.is_active()
    }

    /// Sweep of the displayed value in degrees.
    pub fn progress_sweep(&self) -> f64 {
        sweep_for_value(
            self.animator.displayed(),
            self.min,
            self.max,
            self.renderer.style().effective_sweep(),
        )
    }

    // ---- host lifecycle ----

    /// Re-derive geometry for new drawable bounds.
    pub fn on_bounds_changed(&mut self, bounds: Rect) {
        if bounds.is_degenerate() {
            debug!("Ignoring degenerate gauge bounds {:?}", bounds);
        }
        self.bounds = Some(bounds);
        self.renderer.init_arc_rect(bounds);
        self.dirty = true;
    }

    /// Advance animations to `now`. Returns true if a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let animated = self.animator.advance(now);
        let dirty = std::mem::take(&mut self.dirty);
        animated || dirty
    }

    /// Paint the gauge. Never fails: an unconfigured renderer is a no-op
    /// and surface errors are logged.
    pub fn on_frame(&self, surface: &mut dyn Surface) {
        if let Err(e) = self.try_draw(surface) {
            warn!("Gauge draw pass failed: {}", e);
        }
    }

    /// Paint the gauge, reporting the first surface error.
    pub fn try_draw(&self, surface: &mut dyn Surface) -> Result<(), GaugeError> {
        if !self.renderer.is_ready() {
            return Ok(());
        }
        let ctx = self.frame_context();
        self.renderer.draw_arc(surface, &ctx)?;
        self.renderer.draw_progress_arc(surface, &ctx)?;
        self.renderer.draw_text(surface, &ctx)?;
        Ok(())
    }

    fn frame_context(&self) -> FrameContext<'_> {
        let style = self.renderer.style();
        FrameContext {
            start_angle: style.start_angle,
            sweep_angle: style.effective_sweep(),
            progress_sweep: self.progress_sweep(),
            display_value: self.animator.displayed(),
            calibration: &self.calibration,
            unit: &self.unit,
            info: self.info.as_deref(),
            date_text: self.date_text(&style.date_format),
        }
    }

    fn date_text(&self, format: &str) -> Option<String> {
        let at = self.updated_at?;
        let mut text = String::new();
        if write!(text, "{}", at.format(format)).is_err() {
            warn!("Invalid date format {:?}", format);
            return None;
        }
        Some(text)
    }

    // ---- value state ----

    /// Set the value range. On error the previous range is kept.
    pub fn set_range(&mut self, min: f64, max: f64) -> Result<(), GaugeError> {
        if !min.is_finite() || !max.is_finite() || max <= min {
            return Err(GaugeError::InvalidRange { min, max });
        }
        debug!("Gauge range set to [{}, {}]", min, max);
        self.min = min;
        self.max = max;
        self.dirty = true;
        Ok(())
    }

    /// Set the value, stamping it with the local time.
    pub fn set_value(&mut self, value: f64, animate: bool, reset_from_zero: bool) {
        self.set_value_at(
            value,
            animate,
            reset_from_zero,
            Some(Local::now().naive_local()),
        );
    }

    /// Set the value with an explicit reading time (`None` hides the date
    /// line).
    ///
    /// With `animate` the displayed value moves from its current position,
    /// or from `min` when `reset_from_zero` is set, to `value`.
    pub fn set_value_at(
        &mut self,
        value: f64,
        animate: bool,
        reset_from_zero: bool,
        at: Option<NaiveDateTime>,
    ) {
        debug!(
            "Gauge value {} (animate={}, reset={})",
            value, animate, reset_from_zero
        );
        self.value = value;
        self.updated_at = at;
        if animate {
            let from = if reset_from_zero {
                self.min
            } else {
                self.animator.displayed()
            };
            self.animator.animate_to(from, value);
        } else {
            self.animator.jump_to(value);
        }
        self.dirty = true;
    }

    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.animator.set_duration(duration);
    }

    /// Replace the calibration scale.
    ///
    /// With two or more break-points the range becomes `[first, last]`.
    /// Unsorted break-points are rejected and leave all state untouched.
    pub fn set_calibration(
        &mut self,
        breakpoints: Vec<f64>,
        labels: Option<Vec<String>>,
        ticks_between: usize,
    ) -> Result<(), GaugeError> {
        let calibration = CalibrationSet::new(breakpoints, labels, ticks_between);
        if let Some(index) = calibration.first_unsorted_index() {
            return Err(GaugeError::UnsortedBreakpoints { index });
        }
        if let Some((min, max)) = calibration.range() {
            self.set_range(min, max)?;
        }
        debug!(
            "Gauge calibration: {} break-points, {} ticks",
            calibration.breakpoints.len(),
            calibration.total_ticks()
        );
        self.calibration = calibration;
        self.dirty = true;
        Ok(())
    }

    pub fn set_info(&mut self, info: impl Into<String>) {
        let info = info.into();
        self.info = (!info.is_empty()).then_some(info);
        self.dirty = true;
    }

    pub fn set_unit_info(&mut self, unit: impl Into<String>) {
        self.unit = unit.into();
        self.dirty = true;
    }

    // ---- style ----

    /// Replace the whole style and re-derive geometry.
    pub fn set_style(&mut self, style: GaugeStyle) {
        self.renderer.set_style(style);
        if let Some(bounds) = self.bounds {
            self.renderer.init_arc_rect(bounds);
        }
        self.dirty = true;
    }

    fn update_style(&mut self, f: impl FnOnce(&GaugeStyle) -> GaugeStyle) {
        let style = f(self.renderer.style());
        self.set_style(style);
    }

    pub fn set_arc_spacing(&mut self, spacing: f64) {
        self.update_style(|s| s.with_arc_spacing(spacing));
    }

    pub fn set_outer_arc_paint(&mut self, width: f64, color: Color) {
        self.update_style(|s| s.with_outer_arc(width, color));
    }

    pub fn set_progress_outer_arc_color(&mut self, color: Color) {
        self.update_style(|s| s.with_progress_arc_color(color));
    }

    pub fn set_progress_point_paint(&mut self, radius: f64, color: Color) {
        self.update_style(|s| s.with_progress_point(radius, color));
    }

    pub fn set_indicator_paint(&mut self, color: Color) {
        self.update_style(|s| s.with_indicator_color(color));
    }
}
