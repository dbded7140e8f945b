//! Displayed-value animation
//!
//! The animator does not own a timer. The host calls `advance` once per
//! frame with the frame timestamp; the clock starts on the first frame
//! after `animate_to`, so that frame always shows the start value.

use std::time::{Duration, Instant};

use crate::constants::ANIMATION_SNAP_THRESHOLD;

#[derive(Debug, Clone)]
pub struct ValueAnimator {
    duration: Duration,
    from: f64,
    to: f64,
    displayed: f64,
    started_at: Option<Instant>,
    active: bool,
}

impl ValueAnimator {
    pub fn new(initial: f64, duration: Duration) -> Self {
        Self {
            duration,
            from: initial,
            to: initial,
            displayed: initial,
            started_at: None,
            active: false,
        }
    }

    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Show `value` immediately and cancel any running animation.
    pub fn jump_to(&mut self, value: f64) {
        self.from = value;
        self.to = value;
        self.displayed = value;
        self.started_at = None;
        self.active = false;
    }

    /// Replace the current animation with one from `from` to `to`.
    pub fn animate_to(&mut self, from: f64, to: f64) {
        self.from = from;
        self.to = to;
        self.displayed = from;
        self.started_at = None;
        self.active = true;
    }

    /// Advance to the frame at `now`. Returns true if the displayed value
    /// belongs to an animation frame and needs drawing.
    pub fn advance(&mut self, now: Instant) -> bool {
        if !self.active {
            return false;
        }

        let Some(started_at) = self.started_at else {
            self.started_at = Some(now);
            self.displayed = self.from;
            return true;
        };

        let t = if self.duration.is_zero() {
            1.0
        } else {
            (now.saturating_duration_since(started_at).as_secs_f64()
                / self.duration.as_secs_f64())
            .min(1.0)
        };
        let eased = ease_out_cubic(t);
        let distance = self.to - self.from;
        self.displayed = self.from + distance * eased;

        if t >= 1.0 || (self.to - self.displayed).abs() <= distance.abs() * ANIMATION_SNAP_THRESHOLD
        {
            self.displayed = self.to;
            self.active = false;
        }
        true
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(600);

    #[test]
    fn test_first_frame_shows_start_value() {
        let mut anim = ValueAnimator::new(300.0, DURATION);
        anim.animate_to(300.0, 800.0);
        let t0 = Instant::now();
        assert!(anim.advance(t0));
        assert_eq!(anim.displayed(), 300.0);
        assert!(anim.is_active());
    }

    #[test]
    fn test_progresses_monotonically_and_finishes() {
        let mut anim = ValueAnimator::new(0.0, DURATION);
        anim.animate_to(0.0, 100.0);
        let t0 = Instant::now();
        anim.advance(t0);

        let mut last = anim.displayed();
        let mut frames = 0;
        for ms in (16..=600).step_by(16) {
            if !anim.advance(t0 + Duration::from_millis(ms)) {
                break;
            }
            frames += 1;
            assert!(anim.displayed() >= last);
            assert!(anim.displayed() <= 100.0);
            last = anim.displayed();
        }

        // Snapping ends the animation before the full duration elapses
        assert!(frames > 10);
        assert_eq!(anim.displayed(), 100.0);
        assert!(!anim.is_active());
        assert!(!anim.advance(t0 + DURATION * 2));
    }

    #[test]
    fn test_new_target_replaces_running_animation() {
        let mut anim = ValueAnimator::new(0.0, DURATION);
        anim.animate_to(0.0, 100.0);
        let t0 = Instant::now();
        anim.advance(t0);
        anim.advance(t0 + Duration::from_millis(300));
        let midway = anim.displayed();
        assert!(midway > 0.0 && midway < 100.0);

        anim.animate_to(midway, 20.0);
        assert_eq!(anim.target(), 20.0);
        anim.advance(t0 + Duration::from_millis(316));
        assert_eq!(anim.displayed(), midway);
    }

    #[test]
    fn test_zero_duration_completes_on_second_frame() {
        let mut anim = ValueAnimator::new(0.0, Duration::ZERO);
        anim.animate_to(10.0, 50.0);
        let t0 = Instant::now();
        anim.advance(t0);
        assert_eq!(anim.displayed(), 10.0);
        anim.advance(t0);
        assert_eq!(anim.displayed(), 50.0);
        assert!(!anim.is_active());
    }

    #[test]
    fn test_jump_cancels_animation() {
        let mut anim = ValueAnimator::new(0.0, DURATION);
        anim.animate_to(0.0, 100.0);
        anim.jump_to(42.0);
        assert!(!anim.is_active());
        assert_eq!(anim.displayed(), 42.0);
        assert!(!anim.advance(Instant::now()));
    }
}
