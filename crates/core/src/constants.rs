//! Shared constants for the gauge core

use std::time::Duration;

/// Animation frame interval for smooth 60fps animations (16ms)
pub const ANIMATION_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Default time the displayed value takes to reach a new target.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(600);

/// Threshold for snapping animation values to their target, as a fraction
/// of the distance being animated. Below it the animation is complete.
pub const ANIMATION_SNAP_THRESHOLD: f64 = 0.001;

/// Rotation that turns the surface's "up" direction (270°) onto angle 0°.
/// Tick and needle shapes are laid out pointing up and rotated by
/// `angle - UP_ANGLE` into place.
pub const UP_ANGLE: f64 = 270.0;

/// Default gauge range
pub const DEFAULT_MIN: f64 = 0.0;
pub const DEFAULT_MAX: f64 = 1000.0;
