//! Arc path measurement
//!
//! Locates points along an elliptical arc by arc length, the way the
//! progress point is placed at the far end of the progress arc.

use flow_gauge_types::{Point, Rect};

/// Segments used to approximate the length of a non-circular arc
const ELLIPSE_SEGMENTS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    rect: Rect,
    start_angle: f64,
    sweep_angle: f64,
}

impl ArcPath {
    pub fn new(rect: Rect, start_angle: f64, sweep_angle: f64) -> Self {
        Self {
            rect,
            start_angle,
            sweep_angle,
        }
    }

    fn radii(&self) -> (f64, f64) {
        (self.rect.width() / 2.0, self.rect.height() / 2.0)
    }

    fn is_circular(&self) -> bool {
        let (rx, ry) = self.radii();
        (rx - ry).abs() <= f64::EPSILON * rx.abs().max(1.0)
    }

    fn point_at_angle(&self, degrees: f64) -> Point {
        let (rx, ry) = self.radii();
        let c = self.rect.center();
        let (sin, cos) = degrees.to_radians().sin_cos();
        Point::new(c.x + rx * cos, c.y + ry * sin)
    }

    /// Unit tangent in the drawing direction at `degrees`.
    fn tangent_at_angle(&self, degrees: f64) -> (f64, f64) {
        let (rx, ry) = self.radii();
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dir = self.sweep_angle.signum();
        let (tx, ty) = (-rx * sin * dir, ry * cos * dir);
        let len = tx.hypot(ty);
        if len > 0.0 {
            (tx / len, ty / len)
        } else {
            (0.0, 0.0)
        }
    }

    fn sample_angles(&self) -> impl Iterator<Item = f64> + '_ {
        (0..=ELLIPSE_SEGMENTS)
            .map(move |i| self.start_angle + self.sweep_angle * i as f64 / ELLIPSE_SEGMENTS as f64)
    }

    /// Total arc length.
    pub fn length(&self) -> f64 {
        if self.rect.is_degenerate() || self.sweep_angle == 0.0 {
            return 0.0;
        }
        if self.is_circular() {
            let (r, _) = self.radii();
            return r * self.sweep_angle.abs().to_radians();
        }
        let points: Vec<Point> = self.sample_angles().map(|a| self.point_at_angle(a)).collect();
        points.windows(2).map(|w| w[0].distance_to(w[1])).sum()
    }

    /// Angle reached after travelling `distance` along the arc.
    fn angle_at_distance(&self, distance: f64) -> f64 {
        if self.is_circular() {
            let total = self.length();
            return self.start_angle + self.sweep_angle * (distance / total);
        }

        let mut travelled = 0.0;
        let mut previous: Option<(f64, Point)> = None;
        for angle in self.sample_angles() {
            let point = self.point_at_angle(angle);
            if let Some((prev_angle, prev_point)) = previous {
                let step = prev_point.distance_to(point);
                if travelled + step >= distance && step > 0.0 {
                    let t = (distance - travelled) / step;
                    return prev_angle + (angle - prev_angle) * t;
                }
                travelled += step;
            }
            previous = Some((angle, point));
        }
        self.start_angle + self.sweep_angle
    }

    /// Position and unit tangent at `distance` along the arc (clamped to
    /// the arc). `None` for an empty arc.
    pub fn pos_tan(&self, distance: f64) -> Option<(Point, (f64, f64))> {
        let total = self.length();
        if total <= 0.0 || !distance.is_finite() {
            return None;
        }
        let angle = self.angle_at_distance(distance.clamp(0.0, total));
        Some((self.point_at_angle(angle), self.tangent_at_angle(angle)))
    }

    /// Position and tangent at the end of the arc.
    pub fn end(&self) -> Option<(Point, (f64, f64))> {
        self.pos_tan(self.length())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_circle_length_and_end_point() {
        let path = ArcPath::new(Rect::new(0.0, 0.0, 200.0, 200.0), 135.0, 135.0);
        assert!(close(path.length(), 100.0 * 135f64.to_radians()));

        // 135° + 135° = 270°: straight up from the center
        let (p, (tx, ty)) = path.end().unwrap();
        assert!(close(p.x, 100.0));
        assert!(close(p.y, 0.0));
        // Clockwise travel at the top heads right
        assert!(close(tx, 1.0) && close(ty, 0.0));
    }

    #[test]
    fn test_midpoint_by_length() {
        let path = ArcPath::new(Rect::new(0.0, 0.0, 100.0, 100.0), 0.0, 180.0);
        let (p, _) = path.pos_tan(path.length() / 2.0).unwrap();
        assert!(close(p.x, 50.0));
        assert!(close(p.y, 100.0));
    }

    #[test]
    fn test_ellipse_end_matches_parametric_end() {
        let path = ArcPath::new(Rect::new(0.0, 0.0, 300.0, 100.0), 0.0, 90.0);
        let (p, _) = path.end().unwrap();
        assert!((p.x - 150.0).abs() < 1e-6);
        assert!((p.y - 100.0).abs() < 1e-6);
        // Quarter of an ellipse with semi-axes 150 and 50
        assert!(path.length() > 150.0 && path.length() < 200.0);
    }

    #[test]
    fn test_empty_arcs_have_no_position() {
        assert!(ArcPath::new(Rect::from_size(100.0, 100.0), 90.0, 0.0).end().is_none());
        assert!(ArcPath::new(Rect::from_size(0.0, 100.0), 90.0, 45.0).end().is_none());
    }
}
