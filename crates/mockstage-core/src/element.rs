//! Element data model for mockup scenes.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a scene element.
pub type ElementId = Uuid;

/// A positioned element in a mockup scene (a chat bubble, an avatar, a
/// status bar, ...).
///
/// Elements are owned and mutated by the external scene store. The engine
/// reads them as an immutable snapshot for one interaction tick and proposes
/// every change through an emitted [`Command`](crate::command::Command).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier, assigned by the store.
    pub id: ElementId,
    /// Display name shown in layer lists.
    pub name: String,
    /// Axis-aligned bounds in canvas coordinates.
    pub bounds: Rect,
    /// Rotation in degrees around the element center.
    /// Hit testing and bounds math ignore it.
    #[serde(default)]
    pub rotation: f64,
    /// Locked elements stay selectable but are excluded from every transform.
    #[serde(default)]
    pub locked: bool,
    /// Hidden elements are skipped by hit testing and marquee selection.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Group membership. Grouping is a store concern; the engine only carries
    /// the id through.
    #[serde(default)]
    pub group_id: Option<ElementId>,
}

fn default_visible() -> bool {
    true
}

impl Element {
    /// Create a new element with default flags.
    pub fn new(name: impl Into<String>, bounds: Rect) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            bounds,
            rotation: 0.0,
            locked: false,
            visible: true,
            group_id: None,
        }
    }

    /// Center of the element's bounds.
    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    /// Whether the bounds are finite and usable for transforms.
    pub fn has_valid_bounds(&self) -> bool {
        self.bounds.x0.is_finite()
            && self.bounds.y0.is_finite()
            && self.bounds.x1.is_finite()
            && self.bounds.y1.is_finite()
    }

    /// Check if a canvas-local point hits this element.
    ///
    /// Uses the unrotated axis-aligned bounds; a rotated element's visual
    /// footprint is not considered. Hidden, zero-area, and NaN-bounded
    /// elements never match.
    pub fn hit_test(&self, point: Point) -> bool {
        self.visible && self.bounds.contains(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_inside() {
        let el = Element::new("bubble", Rect::new(10.0, 10.0, 110.0, 60.0));
        assert!(el.hit_test(Point::new(50.0, 30.0)));
        assert!(!el.hit_test(Point::new(150.0, 30.0)));
    }

    #[test]
    fn test_hidden_element_never_hits() {
        let mut el = Element::new("bubble", Rect::new(0.0, 0.0, 100.0, 100.0));
        el.visible = false;
        assert!(!el.hit_test(Point::new(50.0, 50.0)));
    }

    #[test]
    fn test_zero_area_never_hits() {
        let el = Element::new("dot", Rect::new(10.0, 10.0, 10.0, 10.0));
        assert!(!el.hit_test(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_nan_bounds_are_invalid() {
        let el = Element::new("broken", Rect::new(f64::NAN, 0.0, 10.0, 10.0));
        assert!(!el.has_valid_bounds());
        assert!(!el.hit_test(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_serde_defaults() {
        let json = r#"{"id":"6f2c9e9e-1d5f-4a8e-9a63-1b2f3c4d5e6f","name":"avatar","bounds":{"x0":0.0,"y0":0.0,"x1":40.0,"y1":40.0}}"#;
        let el: Element = serde_json::from_str(json).unwrap();
        assert!(el.visible);
        assert!(!el.locked);
        assert!(el.group_id.is_none());
        assert!((el.rotation).abs() < f64::EPSILON);
    }
}
