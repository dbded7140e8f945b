//! Foundational color types used throughout flow-gauge.
//!
//! Color and ColorStop are the building blocks for every paint the gauge
//! uses, from the flat outer ring to the faded progress gradient.

use serde::{Deserialize, Serialize};

/// RGBA color with alpha channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    /// Build a color from a packed `0xAARRGGBB` value.
    pub fn from_argb32(argb: u32) -> Self {
        Self::from_rgba8(
            (argb >> 16) as u8,
            (argb >> 8) as u8,
            argb as u8,
            (argb >> 24) as u8,
        )
    }

    /// Parse `#RRGGBB` or `#AARRGGBB`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let packed = u32::from_str_radix(digits, 16).ok()?;
        match digits.len() {
            6 => Some(Self::from_argb32(0xFF00_0000 | packed)),
            8 => Some(Self::from_argb32(packed)),
            _ => None,
        }
    }

    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        (
            (self.r * 255.0) as u8,
            (self.g * 255.0) as u8,
            (self.b * 255.0) as u8,
            (self.a * 255.0) as u8,
        )
    }

    /// Same color with a different alpha.
    pub fn with_alpha(&self, a: f64) -> Self {
        Self { a, ..*self }
    }

    /// Apply to Cairo context
    #[cfg(feature = "cairo")]
    pub fn apply_to_cairo(&self, cr: &cairo::Context) {
        cr.set_source_rgba(self.r, self.g, self.b, self.a);
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

/// Color stop for gradients
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ColorStop {
    pub position: f64, // 0.0 to 1.0
    pub color: Color,
}

impl ColorStop {
    pub fn new(position: f64, color: Color) -> Self {
        Self { position, color }
    }
}

/// Evenly spaced stops fading `color` from `from_alpha` to `to_alpha`.
///
/// With `count < 2` a single stop at `from_alpha` is returned.
pub fn fade_stops(color: Color, from_alpha: f64, to_alpha: f64, count: usize) -> Vec<ColorStop> {
    if count < 2 {
        return vec![ColorStop::new(0.0, color.with_alpha(from_alpha))];
    }
    let last = (count - 1) as f64;
    (0..count)
        .map(|i| {
            let t = i as f64 / last;
            ColorStop::new(t, color.with_alpha(from_alpha + (to_alpha - from_alpha) * t))
        })
        .collect()
}

/// How a gradient continues past its end points
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum GradientExtend {
    #[serde(rename = "pad")]
    Pad,
    #[serde(rename = "repeat")]
    Repeat,
    #[serde(rename = "reflect")]
    #[default]
    Reflect,
}
