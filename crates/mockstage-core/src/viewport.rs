//! Viewport mapping between screen and canvas coordinates.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Maps pointer positions from screen space into the unscaled canvas space
/// the engine works in.
///
/// Panning and zooming themselves belong to other tools; the engine only
/// needs the resulting transform to interpret pointer input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    /// Top-left of the canvas container in screen coordinates.
    pub origin: Vec2,
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl Viewport {
    /// Create a viewport with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a screen point to canvas coordinates: subtract the container
    /// origin, divide by zoom.
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.origin.x) / self.zoom,
            (screen.y - self.origin.y) / self.zoom,
        )
    }

    /// Convert a canvas point back to screen coordinates.
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point::new(
            canvas.x * self.zoom + self.origin.x,
            canvas.y * self.zoom + self.origin.y,
        )
    }

    /// Set the zoom level, clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_mapping() {
        let vp = Viewport::new();
        let p = Point::new(123.0, 456.0);
        assert_eq!(vp.screen_to_canvas(p), p);
    }

    #[test]
    fn test_offset_and_zoom() {
        let vp = Viewport {
            origin: Vec2::new(50.0, 100.0),
            zoom: 2.0,
            ..Viewport::default()
        };
        let canvas = vp.screen_to_canvas(Point::new(150.0, 300.0));
        assert_eq!(canvas, Point::new(50.0, 100.0));
    }

    #[test]
    fn test_round_trip() {
        let vp = Viewport {
            origin: Vec2::new(-30.0, 17.0),
            zoom: 1.5,
            ..Viewport::default()
        };
        let original = Point::new(12.0, -42.0);
        let back = vp.canvas_to_screen(vp.screen_to_canvas(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut vp = Viewport::new();
        vp.set_zoom(0.001);
        assert!((vp.zoom - vp.min_zoom).abs() < f64::EPSILON);
        vp.set_zoom(1000.0);
        assert!((vp.zoom - vp.max_zoom).abs() < f64::EPSILON);
    }
}
