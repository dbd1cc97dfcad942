//! Rubber-band rectangle for multi-select over empty canvas.

use kurbo::{Point, Rect};

/// Drags smaller than this (in canvas units) finalize as a plain click
/// instead of a marquee selection.
pub const MIN_MARQUEE_SIZE: f64 = 2.0;

/// An in-progress marquee drag.
#[derive(Debug, Clone)]
pub struct Marquee {
    /// Anchor corner, fixed at pointer-down.
    pub start: Point,
    /// Corner tracking the pointer.
    pub current: Point,
}

impl Marquee {
    /// Start a marquee at the pointer-down point.
    pub fn new(start: Point) -> Self {
        Self {
            start,
            current: start,
        }
    }

    /// Track the pointer.
    pub fn update(&mut self, point: Point) {
        self.current = point;
    }

    /// The marquee as a normalized rectangle (non-negative width/height
    /// regardless of drag direction).
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.start.x.min(self.current.x),
            self.start.y.min(self.current.y),
            self.start.x.max(self.current.x),
            self.start.y.max(self.current.y),
        )
    }

    /// Whether the drag is still too small to count as a selection.
    pub fn is_click(&self) -> bool {
        let rect = self.to_rect();
        rect.width() < MIN_MARQUEE_SIZE || rect.height() < MIN_MARQUEE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_any_drag_direction() {
        let mut m = Marquee::new(Point::new(100.0, 100.0));
        m.update(Point::new(40.0, 160.0)); // up-left / down-left drag
        assert_eq!(m.to_rect(), Rect::new(40.0, 100.0, 100.0, 160.0));
    }

    #[test]
    fn test_small_drag_is_click() {
        let mut m = Marquee::new(Point::new(10.0, 10.0));
        m.update(Point::new(11.0, 11.0));
        assert!(m.is_click());
        m.update(Point::new(40.0, 40.0));
        assert!(!m.is_click());
    }

    #[test]
    fn test_thin_drag_is_still_click() {
        let mut m = Marquee::new(Point::new(0.0, 0.0));
        m.update(Point::new(100.0, 1.0));
        assert!(m.is_click());
    }
}
