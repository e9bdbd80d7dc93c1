//! Canvas-space geometry: the viewport transform and connection curves.

use serde::{Deserialize, Serialize};

pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 2.0;

/// Largest perpendicular offset of a connection's control point.
const CURVE_OFFSET_CAP: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pan offset and zoom factor mapping canvas space to screen space.
///
/// Process-local view state: never part of a persisted document and never
/// recorded in history.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub zoom: f64,
    pub canvas_offset: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            canvas_offset: Point::default(),
        }
    }
}

impl Viewport {
    /// Maps a container-relative screen point into canvas space.
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.canvas_offset.x) / self.zoom,
            y: (screen.y - self.canvas_offset.y) / self.zoom,
        }
    }

    /// Forward transform: canvas space back to container-relative screen space.
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.zoom + self.canvas_offset.x,
            y: canvas.y * self.zoom + self.canvas_offset.y,
        }
    }

    pub fn pan(&mut self, delta: Point) {
        self.canvas_offset.x += delta.x;
        self.canvas_offset.y += delta.y;
    }

    /// Adjusts zoom by `delta`, clamped to `[ZOOM_MIN, ZOOM_MAX]`.
    pub fn adjust_zoom(&mut self, delta: f64) {
        self.zoom = (self.zoom + delta).clamp(ZOOM_MIN, ZOOM_MAX);
    }
}

/// A quadratic connection curve between two node centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionPath {
    pub start: Point,
    pub control: Point,
    pub end: Point,
    /// Tangent angle at the target end, in degrees; orients the arrowhead.
    pub angle_deg: f64,
}

impl ConnectionPath {
    /// SVG path data for the curve.
    pub fn to_svg_path(&self) -> String {
        format!(
            "M {} {} Q {} {} {} {}",
            self.start.x, self.start.y, self.control.x, self.control.y, self.end.x, self.end.y
        )
    }
}

/// Builds the curved path between two centers.
///
/// The control point sits perpendicular to the center line, offset by
/// `min(80, distance / 3)`, so edges sharing endpoints stay visually
/// distinct from a straight overlapping line.
pub fn connection_path(source: Point, target: Point) -> ConnectionPath {
    let dx = target.x - source.x;
    let dy = target.y - source.y;
    let distance = (dx * dx + dy * dy).sqrt();

    let offset = CURVE_OFFSET_CAP.min(distance / 3.0);
    let perpendicular = dy.atan2(dx) + std::f64::consts::FRAC_PI_2;

    let control = Point {
        x: (source.x + target.x) / 2.0 + offset * perpendicular.cos(),
        y: (source.y + target.y) / 2.0 + offset * perpendicular.sin(),
    };

    ConnectionPath {
        start: source,
        control,
        end: target,
        angle_deg: dy.atan2(dx).to_degrees(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_and_canvas_transforms_are_inverses() {
        let vp = Viewport {
            zoom: 1.5,
            canvas_offset: Point::new(40.0, -25.0),
        };
        let p = Point::new(123.0, 456.0);
        let back = vp.canvas_to_screen(vp.screen_to_canvas(p));
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn control_point_offset_caps_at_eighty() {
        let path = connection_path(Point::new(0.0, 0.0), Point::new(1200.0, 0.0));
        // Horizontal line: the control point hangs straight off the midline.
        assert!((path.control.x - 600.0).abs() < 1e-9);
        assert!((path.control.y.abs() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn short_connections_use_a_third_of_the_distance() {
        let path = connection_path(Point::new(0.0, 0.0), Point::new(90.0, 0.0));
        assert!((path.control.y.abs() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_zero_length_path_stays_finite() {
        let p = Point::new(10.0, 10.0);
        let path = connection_path(p, p);
        assert_eq!(path.start, path.end);
        assert!(path.control.x.is_finite() && path.control.y.is_finite());
    }
}
