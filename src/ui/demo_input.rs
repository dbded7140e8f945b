//! Parsing of the demo window's text inputs
//!
//! Everything here validates user text before it reaches the gauge, so
//! malformed input is reported instead of being applied.

use anyhow::{anyhow, bail, Context, Result};
use rand::Rng;

/// Parse whitespace-separated integer break-points.
pub fn parse_breakpoints(text: &str) -> Result<Vec<f64>> {
    text.split_whitespace()
        .map(|token| {
            token
                .parse::<i64>()
                .map(|v| v as f64)
                .with_context(|| format!("Invalid break-point '{}'", token))
        })
        .collect()
}

/// Parse whitespace-separated labels; blank input means no labels.
pub fn parse_labels(text: &str) -> Option<Vec<String>> {
    let labels: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    (!labels.is_empty()).then_some(labels)
}

/// Parse the number of small ticks between break-points; blank means 0.
pub fn parse_ticks_between(text: &str) -> Result<usize> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    text.parse::<usize>()
        .with_context(|| format!("Invalid tick count '{}'", text))
}

/// Parse a gauge value.
pub fn parse_value(text: &str) -> Result<f64> {
    let text = text.trim();
    if text.is_empty() {
        bail!("Enter a value");
    }
    let value = text
        .parse::<f64>()
        .with_context(|| format!("Invalid value '{}'", text))?;
    if !value.is_finite() {
        return Err(anyhow!("Value must be finite"));
    }
    Ok(value)
}

/// Uniform random integer in `[min, max)`, or `min` when the range holds
/// no integer.
pub fn random_value<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    let low = min.ceil() as i64;
    let high = max.ceil() as i64;
    if high <= low {
        return min;
    }
    rng.gen_range(low..high) as f64
}
