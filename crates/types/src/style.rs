//! Gauge style configuration
//!
//! `GaugeStyle` is an immutable value object: renderers read it during a
//! draw pass and setters replace it wholesale through the `with_*`
//! builders, so no paint state is ever mutated mid-frame.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Visual configuration for a flow gauge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GaugeStyle {
    // Arc geometry
    #[serde(default = "default_start_angle")]
    pub start_angle: f64, // Degrees (0 = right, 90 = down, 180 = left, 270 = up)
    #[serde(default = "default_sweep_angle")]
    pub sweep_angle: f64, // Degrees, clockwise from start_angle
    #[serde(default = "default_arc_spacing")]
    pub arc_spacing: f64, // Gap between outer and inner ring

    // Outer ring
    #[serde(default = "default_outer_arc_width")]
    pub outer_arc_width: f64,
    #[serde(default = "default_outer_arc_color")]
    pub outer_arc_color: Color,

    // Progress ring, point and sweep fill
    #[serde(default = "default_accent_color")]
    pub progress_arc_color: Color,
    #[serde(default = "default_progress_gradient_stops")]
    pub progress_gradient_stops: usize,
    #[serde(default = "default_progress_point_radius")]
    pub progress_point_radius: f64,
    #[serde(default = "default_accent_color")]
    pub progress_point_color: Color,
    #[serde(default = "default_sweep_fill_alpha")]
    pub sweep_fill_alpha: f64,

    // Hub and needle
    #[serde(default = "default_accent_color")]
    pub inner_arc_color: Color,
    #[serde(default = "default_hub_radius")]
    pub hub_radius: f64,
    #[serde(default = "default_accent_color")]
    pub indicator_color: Color,
    #[serde(default = "default_indicator_offset")]
    pub indicator_offset: f64, // Distance from the inner ring to the needle tip
    #[serde(default = "default_indicator_length")]
    pub indicator_length: f64,
    #[serde(default = "default_indicator_half_width")]
    pub indicator_half_width: f64,

    // Calibration
    #[serde(default = "default_large_calibration_width")]
    pub large_calibration_width: f64,
    #[serde(default = "default_large_calibration_color")]
    pub large_calibration_color: Color,
    #[serde(default = "default_small_calibration_width")]
    pub small_calibration_width: f64,
    #[serde(default = "default_small_calibration_color")]
    pub small_calibration_color: Color,
    #[serde(default = "default_calibration_length")]
    pub calibration_length: f64,
    #[serde(default = "default_calibration_text_size")]
    pub calibration_text_size: f64,
    #[serde(default = "default_accent_color")]
    pub calibration_text_color: Color,
    #[serde(default = "default_calibration_label_offset")]
    pub calibration_label_offset: f64, // Label baseline distance outside the ticks

    // Center text
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_value_text_size")]
    pub value_text_size: f64,
    #[serde(default = "default_value_text_color")]
    pub value_text_color: Color,
    #[serde(default = "default_small_text_size")]
    pub date_text_size: f64,
    #[serde(default = "default_secondary_text_color")]
    pub date_text_color: Color,
    #[serde(default = "default_small_text_size")]
    pub info_text_size: f64,
    #[serde(default = "default_secondary_text_color")]
    pub info_text_color: Color,
    #[serde(default = "default_text_spacing")]
    pub text_spacing: f64,
    #[serde(default = "default_date_format")]
    pub date_format: String, // chrono strftime pattern
}

// Default values
fn default_start_angle() -> f64 {
    135.0 // Bottom-left, opening downwards
}

fn default_sweep_angle() -> f64 {
    270.0
}

fn default_arc_spacing() -> f64 {
    10.0
}

fn default_outer_arc_width() -> f64 {
    6.0
}

fn default_outer_arc_color() -> Color {
    Color::from_argb32(0xFF3E_4D6D)
}

fn default_accent_color() -> Color {
    Color::from_argb32(0xFFE2_AA24)
}

fn default_progress_gradient_stops() -> usize {
    11
}

fn default_progress_point_radius() -> f64 {
    6.0
}

fn default_sweep_fill_alpha() -> f64 {
    0.1
}

fn default_hub_radius() -> f64 {
    42.0
}

fn default_indicator_offset() -> f64 {
    40.0
}

fn default_indicator_length() -> f64 {
    40.0
}

fn default_indicator_half_width() -> f64 {
    6.0
}

fn default_large_calibration_width() -> f64 {
    2.0
}

fn default_large_calibration_color() -> Color {
    Color::from_rgba8(255, 255, 255, 200)
}

fn default_small_calibration_width() -> f64 {
    0.5
}

fn default_small_calibration_color() -> Color {
    Color::from_rgba8(255, 255, 255, 100)
}

fn default_calibration_length() -> f64 {
    8.0
}

fn default_calibration_text_size() -> f64 {
    14.0
}

fn default_calibration_label_offset() -> f64 {
    20.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_value_text_size() -> f64 {
    36.0
}

fn default_value_text_color() -> Color {
    Color::WHITE
}

fn default_small_text_size() -> f64 {
    14.0
}

fn default_secondary_text_color() -> Color {
    Color::new(1.0, 1.0, 1.0, 0.6)
}

fn default_text_spacing() -> f64 {
    20.0
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Default for GaugeStyle {
    fn default() -> Self {
        Self {
            start_angle: default_start_angle(),
            sweep_angle: default_sweep_angle(),
            arc_spacing: default_arc_spacing(),
            outer_arc_width: default_outer_arc_width(),
            outer_arc_color: default_outer_arc_color(),
            progress_arc_color: default_accent_color(),
            progress_gradient_stops: default_progress_gradient_stops(),
            progress_point_radius: default_progress_point_radius(),
            progress_point_color: default_accent_color(),
            sweep_fill_alpha: default_sweep_fill_alpha(),
            inner_arc_color: default_accent_color(),
            hub_radius: default_hub_radius(),
            indicator_color: default_accent_color(),
            indicator_offset: default_indicator_offset(),
            indicator_length: default_indicator_length(),
            indicator_half_width: default_indicator_half_width(),
            large_calibration_width: default_large_calibration_width(),
            large_calibration_color: default_large_calibration_color(),
            small_calibration_width: default_small_calibration_width(),
            small_calibration_color: default_small_calibration_color(),
            calibration_length: default_calibration_length(),
            calibration_text_size: default_calibration_text_size(),
            calibration_text_color: default_accent_color(),
            calibration_label_offset: default_calibration_label_offset(),
            font_family: default_font_family(),
            value_text_size: default_value_text_size(),
            value_text_color: default_value_text_color(),
            date_text_size: default_small_text_size(),
            date_text_color: default_secondary_text_color(),
            info_text_size: default_small_text_size(),
            info_text_color: default_secondary_text_color(),
            text_spacing: default_text_spacing(),
            date_format: default_date_format(),
        }
    }
}

impl GaugeStyle {
    /// Sweep angle limited to (0, 360]. Non-positive or NaN sweeps fall back
    /// to the default so angle-per-unit math stays well defined.
    pub fn effective_sweep(&self) -> f64 {
        if self.sweep_angle.is_finite() && self.sweep_angle > 0.0 {
            self.sweep_angle.min(360.0)
        } else {
            default_sweep_angle()
        }
    }

    pub fn with_arc_spacing(&self, spacing: f64) -> Self {
        Self {
            arc_spacing: spacing.max(0.0),
            ..self.clone()
        }
    }

    pub fn with_outer_arc(&self, width: f64, color: Color) -> Self {
        Self {
            outer_arc_width: width,
            outer_arc_color: color,
            ..self.clone()
        }
    }

    pub fn with_progress_arc_color(&self, color: Color) -> Self {
        Self {
            progress_arc_color: color,
            ..self.clone()
        }
    }

    pub fn with_progress_point(&self, radius: f64, color: Color) -> Self {
        Self {
            progress_point_radius: radius,
            progress_point_color: color,
            ..self.clone()
        }
    }

    pub fn with_indicator_color(&self, color: Color) -> Self {
        Self {
            indicator_color: color,
            ..self.clone()
        }
    }
}
