//! Selection set and manipulation handle system.

use crate::element::ElementId;
use crate::scene::Scene;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Handle hit tolerance in screen pixels. Divide by zoom before testing
/// against canvas-local points.
pub const HANDLE_HIT_TOLERANCE: f64 = 12.0;

/// Distance from the selection's top edge to the rotation handle, in canvas
/// units.
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;

/// Corner positions on the selection bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// The diagonally opposite corner, which stays fixed during a resize.
    pub fn opposite(self) -> Self {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }
}

/// Edge positions on the selection bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Corner handle: scales both dimensions, opposite corner fixed.
    Corner(Corner),
    /// Edge midpoint handle: scales one dimension, opposite edge fixed.
    Edge(Edge),
    /// Rotation handle, positioned above the top-center of the bounds.
    Rotate,
}

/// A manipulation handle with its position on the canvas.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    /// Position in canvas coordinates.
    pub position: Point,
    /// Handle type.
    pub kind: HandleKind,
}

impl Handle {
    /// Create a new handle.
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a canvas-local point hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// Generate the handles for a selection bounding box: four corners, four
/// edge midpoints, and the rotation handle above the top-center.
pub fn selection_handles(bounds: Rect) -> Vec<Handle> {
    let cx = (bounds.x0 + bounds.x1) / 2.0;
    let cy = (bounds.y0 + bounds.y1) / 2.0;
    vec![
        Handle::new(Point::new(bounds.x0, bounds.y0), HandleKind::Corner(Corner::TopLeft)),
        Handle::new(Point::new(bounds.x1, bounds.y0), HandleKind::Corner(Corner::TopRight)),
        Handle::new(Point::new(bounds.x0, bounds.y1), HandleKind::Corner(Corner::BottomLeft)),
        Handle::new(Point::new(bounds.x1, bounds.y1), HandleKind::Corner(Corner::BottomRight)),
        Handle::new(Point::new(cx, bounds.y0), HandleKind::Edge(Edge::Top)),
        Handle::new(Point::new(bounds.x1, cy), HandleKind::Edge(Edge::Right)),
        Handle::new(Point::new(cx, bounds.y1), HandleKind::Edge(Edge::Bottom)),
        Handle::new(Point::new(bounds.x0, cy), HandleKind::Edge(Edge::Left)),
        Handle::new(Point::new(cx, bounds.y0 - ROTATE_HANDLE_OFFSET), HandleKind::Rotate),
    ]
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(bounds: Rect, point: Point, tolerance: f64) -> Option<HandleKind> {
    selection_handles(bounds)
        .into_iter()
        .find(|h| h.hit_test(point, tolerance))
        .map(|h| h.kind)
}

/// The set of currently selected element ids.
///
/// Ephemeral: rebuilt over the course of an interaction session and never
/// persisted. Aggregate bounds are derived from the scene snapshot on demand.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    ids: HashSet<ElementId>,
}

impl SelectionState {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with a single id.
    pub fn select(&mut self, id: ElementId) {
        self.ids.clear();
        self.ids.insert(id);
    }

    /// Add or remove an id from the selection.
    pub fn toggle(&mut self, id: ElementId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Empty the selection.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Replace the selection with the given ids.
    pub fn set(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.ids = ids.into_iter().collect();
    }

    /// Add the given ids to the selection.
    pub fn extend(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.ids.extend(ids);
    }

    /// Check if an id is selected.
    pub fn is_selected(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    /// The selected ids, in no particular order.
    pub fn ids(&self) -> &HashSet<ElementId> {
        &self.ids
    }

    /// Number of selected elements.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the selection is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The minimal axis-aligned box enclosing every selected element's
    /// bounds, locked elements included. `None` iff the selection is empty
    /// or no selected element has usable bounds.
    pub fn bounds(&self, scene: &Scene) -> Option<Rect> {
        let mut result: Option<Rect> = None;
        for el in scene.elements() {
            if !self.ids.contains(&el.id) || !el.has_valid_bounds() {
                continue;
            }
            result = Some(match result {
                Some(r) => r.union(el.bounds),
                None => el.bounds,
            });
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    #[test]
    fn test_select_replaces() {
        let mut sel = SelectionState::new();
        let a = ElementId::new_v4();
        let b = ElementId::new_v4();
        sel.select(a);
        sel.select(b);
        assert!(!sel.is_selected(a));
        assert!(sel.is_selected(b));
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn test_toggle() {
        let mut sel = SelectionState::new();
        let a = ElementId::new_v4();
        sel.toggle(a);
        assert!(sel.is_selected(a));
        sel.toggle(a);
        assert!(!sel.is_selected(a));
    }

    #[test]
    fn test_bounds_single() {
        let el = Element::new("a", Rect::new(10.0, 20.0, 110.0, 70.0));
        let elements = vec![el.clone()];
        let scene = Scene::new(&elements);
        let mut sel = SelectionState::new();
        sel.select(el.id);
        assert_eq!(sel.bounds(&scene), Some(Rect::new(10.0, 20.0, 110.0, 70.0)));
    }

    #[test]
    fn test_bounds_multi_is_min_max_reduction() {
        let a = Element::new("a", Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = Element::new("b", Rect::new(100.0, 100.0, 110.0, 110.0));
        let c = Element::new("c", Rect::new(-20.0, 40.0, -5.0, 60.0));
        let elements = vec![a.clone(), b.clone(), c.clone()];
        let scene = Scene::new(&elements);
        let mut sel = SelectionState::new();
        sel.set([a.id, b.id, c.id]);
        let bounds = sel.bounds(&scene).unwrap();
        assert_eq!(bounds, Rect::new(-20.0, 0.0, 110.0, 110.0));
    }

    #[test]
    fn test_bounds_empty_is_none() {
        let elements: Vec<Element> = Vec::new();
        let scene = Scene::new(&elements);
        assert!(SelectionState::new().bounds(&scene).is_none());
    }

    #[test]
    fn test_locked_elements_count_toward_bounds() {
        let a = Element::new("a", Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut b = Element::new("b", Rect::new(50.0, 50.0, 60.0, 60.0));
        b.locked = true;
        let elements = vec![a.clone(), b.clone()];
        let scene = Scene::new(&elements);
        let mut sel = SelectionState::new();
        sel.set([a.id, b.id]);
        assert_eq!(sel.bounds(&scene).unwrap(), Rect::new(0.0, 0.0, 60.0, 60.0));
    }

    #[test]
    fn test_handle_layout() {
        let handles = selection_handles(Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(handles.len(), 9);
        assert!(matches!(handles[0].kind, HandleKind::Corner(Corner::TopLeft)));
        let rotate = handles.last().unwrap();
        assert!(matches!(rotate.kind, HandleKind::Rotate));
        assert_eq!(rotate.position, Point::new(50.0, -ROTATE_HANDLE_OFFSET));
    }

    #[test]
    fn test_handle_hit_test() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            hit_test_handles(bounds, Point::new(101.0, 99.0), 6.0),
            Some(HandleKind::Corner(Corner::BottomRight))
        );
        assert_eq!(
            hit_test_handles(bounds, Point::new(50.0, 102.0), 6.0),
            Some(HandleKind::Edge(Edge::Bottom))
        );
        assert!(hit_test_handles(bounds, Point::new(50.0, 50.0), 6.0).is_none());
    }
}
