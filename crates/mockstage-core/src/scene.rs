//! Scene snapshot queries: hit testing and rectangle selection.

use crate::element::{Element, ElementId};
use crate::error::{EngineError, EngineResult};
use kurbo::{Point, Rect};

/// A read-only view over the element list for one interaction tick.
///
/// Slice order is z-order: later elements paint on top. The store owns the
/// elements; the engine never holds this view past the current tick.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    elements: &'a [Element],
}

impl<'a> Scene<'a> {
    /// Wrap an element slice as a scene snapshot.
    pub fn new(elements: &'a [Element]) -> Self {
        Self { elements }
    }

    /// All elements in z-order (back to front).
    pub fn elements(&self) -> &'a [Element] {
        self.elements
    }

    /// Look up an element by id.
    pub fn get(&self, id: ElementId) -> Option<&'a Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    /// Find the topmost visible element whose bounds contain the point.
    ///
    /// Scans front to back; returns `None` when the point lands on empty
    /// canvas.
    pub fn topmost_at(&self, point: Point) -> Option<&'a Element> {
        self.elements.iter().rev().find(|el| el.hit_test(point))
    }

    /// Find every visible element whose bounds intersect the rectangle.
    ///
    /// Ids are returned in z-order. Touching edges do not count as an
    /// intersection.
    pub fn intersecting(&self, rect: Rect) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|el| el.visible && rect.intersect(el.bounds).area() > 0.0)
            .map(|el| el.id)
            .collect()
    }

    /// Check if the scene has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements in the scene.
    pub fn len(&self) -> usize {
        self.elements.len()
    }
}

/// Validate a snapshot before handing it to the engine.
///
/// The engine itself tolerates degenerate elements as silent no-ops; this
/// gives the caller something to log when a store bug produces them.
pub fn validate_elements(elements: &[Element]) -> EngineResult<()> {
    for el in elements {
        if !el.has_valid_bounds() {
            return Err(EngineError::InvalidGeometry(format!(
                "element {} ({}) has non-finite bounds",
                el.id, el.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_elements() -> Vec<Element> {
        vec![
            Element::new("background", Rect::new(0.0, 0.0, 400.0, 800.0)),
            Element::new("bubble", Rect::new(20.0, 100.0, 220.0, 160.0)),
            Element::new("avatar", Rect::new(180.0, 120.0, 220.0, 160.0)),
        ]
    }

    #[test]
    fn test_topmost_wins_overlap() {
        let elements = scene_elements();
        let scene = Scene::new(&elements);
        // (200, 140) is inside both "bubble" and "avatar"; "avatar" paints later.
        let hit = scene.topmost_at(Point::new(200.0, 140.0)).unwrap();
        assert_eq!(hit.name, "avatar");
    }

    #[test]
    fn test_hit_falls_through_hidden() {
        let mut elements = scene_elements();
        elements[2].visible = false;
        let scene = Scene::new(&elements);
        let hit = scene.topmost_at(Point::new(200.0, 140.0)).unwrap();
        assert_eq!(hit.name, "bubble");
    }

    #[test]
    fn test_empty_canvas_misses() {
        let elements = scene_elements();
        let scene = Scene::new(&elements);
        assert!(scene.topmost_at(Point::new(-50.0, -50.0)).is_none());
    }

    #[test]
    fn test_intersecting_is_z_order_independent() {
        let a = Element::new("a", Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = Element::new("b", Rect::new(100.0, 100.0, 110.0, 110.0));
        let elements = vec![a.clone(), b.clone()];
        let scene = Scene::new(&elements);

        let small = scene.intersecting(Rect::new(-5.0, -5.0, 15.0, 15.0));
        assert_eq!(small, vec![a.id]);

        let large = scene.intersecting(Rect::new(-5.0, -5.0, 115.0, 115.0));
        assert_eq!(large, vec![a.id, b.id]);

        let reversed = vec![b.clone(), a.clone()];
        let scene = Scene::new(&reversed);
        let mut large2 = scene.intersecting(Rect::new(-5.0, -5.0, 115.0, 115.0));
        large2.sort();
        let mut expected = vec![a.id, b.id];
        expected.sort();
        assert_eq!(large2, expected);
    }

    #[test]
    fn test_touching_edge_does_not_intersect() {
        let a = Element::new("a", Rect::new(0.0, 0.0, 10.0, 10.0));
        let elements = vec![a];
        let scene = Scene::new(&elements);
        assert!(scene.intersecting(Rect::new(10.0, 0.0, 20.0, 10.0)).is_empty());
    }

    #[test]
    fn test_validate_elements() {
        let mut elements = scene_elements();
        assert!(validate_elements(&elements).is_ok());
        elements[1].bounds = Rect::new(0.0, f64::NAN, 10.0, 10.0);
        assert!(validate_elements(&elements).is_err());
    }
}
