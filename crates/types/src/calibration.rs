//! Calibration scale: break-points, labels and tick layout

use serde::{Deserialize, Serialize};

/// Ordered break-points with optional labels and subdivision count.
///
/// Labels are addressed by break-point index. Their count may differ from
/// the break-point count; break-points without a label draw a bare tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CalibrationSet {
    #[serde(default)]
    pub breakpoints: Vec<f64>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    #[serde(default)]
    pub ticks_between: usize, // Small ticks between two large ticks
}

/// A single tick position on the scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick<'a> {
    /// Set for ticks that sit on a break-point
    pub breakpoint: Option<usize>,
    pub label: Option<&'a str>,
}

impl Tick<'_> {
    pub fn is_large(&self) -> bool {
        self.breakpoint.is_some()
    }
}

impl CalibrationSet {
    pub fn new(breakpoints: Vec<f64>, labels: Option<Vec<String>>, ticks_between: usize) -> Self {
        Self {
            breakpoints,
            labels,
            ticks_between,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    /// Index of the first break-point that is not strictly above its
    /// predecessor (or is not finite), if any.
    pub fn first_unsorted_index(&self) -> Option<usize> {
        if let Some(i) = self.breakpoints.iter().position(|b| !b.is_finite()) {
            return Some(i);
        }
        self.breakpoints
            .windows(2)
            .position(|w| w[1] <= w[0])
            .map(|i| i + 1)
    }

    /// `(first, last)` when there are at least two break-points.
    pub fn range(&self) -> Option<(f64, f64)> {
        match self.breakpoints.as_slice() {
            [first, .., last] => Some((*first, *last)),
            _ => None,
        }
    }

    /// Number of ticks drawn across the arc: `(n - 1) * (k + 1) + 1`.
    pub fn total_ticks(&self) -> usize {
        match self.breakpoints.len() {
            0 => 0,
            n => (n - 1) * (self.ticks_between + 1) + 1,
        }
    }

    /// Angle between two neighbouring ticks for an arc of `sweep` degrees.
    pub fn tick_angle(&self, sweep: f64) -> f64 {
        let total = self.total_ticks();
        if total < 2 {
            0.0
        } else {
            sweep / (total - 1) as f64
        }
    }

    pub fn label(&self, breakpoint: usize) -> Option<&str> {
        self.labels
            .as_ref()
            .and_then(|labels| labels.get(breakpoint))
            .map(String::as_str)
    }

    /// Ticks in drawing order. Every `(k + 1)`-th tick is large.
    pub fn ticks(&self) -> impl Iterator<Item = Tick<'_>> + '_ {
        let stride = self.ticks_between + 1;
        (0..self.total_ticks()).map(move |index| {
            let breakpoint = (index % stride == 0).then_some(index / stride);
            Tick {
                breakpoint,
                label: breakpoint.and_then(|b| self.label(b)),
            }
        })
    }
}
