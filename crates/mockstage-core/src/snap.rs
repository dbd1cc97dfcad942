//! Grid snapping and alignment-guide detection.

use crate::config::EngineConfig;
use crate::scene::Scene;
use crate::selection::SelectionState;
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// How close (in canvas units) a sibling's center or edge must be before a
/// guide is registered.
pub const GUIDE_THRESHOLD: f64 = 5.0;

/// Orientation of an alignment guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuideAxis {
    /// A vertical line at `position` on the x axis.
    Vertical,
    /// A horizontal line at `position` on the y axis.
    Horizontal,
}

/// What the guide aligns with on the sibling element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuideKind {
    /// Sibling center.
    Center,
    /// Sibling left or top edge.
    Edge,
}

/// A transient alignment line shown while the selection nearly coincides
/// with a non-selected element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    /// Line orientation.
    pub axis: GuideAxis,
    /// Canvas coordinate of the line (x for vertical, y for horizontal).
    pub position: f64,
    /// What the line aligns with.
    pub kind: GuideKind,
}

/// Quantize a value to the nearest multiple of the grid size.
///
/// Identity for a non-positive grid. Idempotent: snapping a snapped value
/// changes nothing.
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    if grid_size > 0.0 {
        (value / grid_size).round() * grid_size
    } else {
        value
    }
}

/// Snap both axes of a vector to the grid.
pub fn snap_vec_to_grid(v: Vec2, grid_size: f64) -> Vec2 {
    Vec2::new(snap_to_grid(v.x, grid_size), snap_to_grid(v.y, grid_size))
}

/// Detect alignment guides between the selection bounds and every
/// non-selected visible element.
///
/// For the selection's center and top-left corner, a sibling center or
/// left/top edge within [`GUIDE_THRESHOLD`] registers a guide at the
/// sibling's coordinate.
pub fn detect_guides(scene: &Scene, selection: &SelectionState, bounds: Rect) -> Vec<Guide> {
    let mut guides = Vec::new();
    let center = bounds.center();

    for el in scene.elements() {
        if selection.is_selected(el.id) || !el.visible || !el.has_valid_bounds() {
            continue;
        }
        let el_center = el.bounds.center();

        if (el_center.x - center.x).abs() < GUIDE_THRESHOLD {
            guides.push(Guide {
                axis: GuideAxis::Vertical,
                position: el_center.x,
                kind: GuideKind::Center,
            });
        }
        if (el_center.y - center.y).abs() < GUIDE_THRESHOLD {
            guides.push(Guide {
                axis: GuideAxis::Horizontal,
                position: el_center.y,
                kind: GuideKind::Center,
            });
        }
        if (el.bounds.x0 - bounds.x0).abs() < GUIDE_THRESHOLD {
            guides.push(Guide {
                axis: GuideAxis::Vertical,
                position: el.bounds.x0,
                kind: GuideKind::Edge,
            });
        }
        if (el.bounds.y0 - bounds.y0).abs() < GUIDE_THRESHOLD {
            guides.push(Guide {
                axis: GuideAxis::Horizontal,
                position: el.bounds.y0,
                kind: GuideKind::Edge,
            });
        }
    }

    guides
}

/// Result of snapping a move delta.
#[derive(Debug, Clone)]
pub struct SnapResult {
    /// The snapped delta.
    pub delta: Vec2,
    /// Whether the x component was adjusted.
    pub snapped_x: bool,
    /// Whether the y component was adjusted.
    pub snapped_y: bool,
    /// Guides the delta was aligned to, if any.
    pub guides: Vec<Guide>,
}

impl SnapResult {
    /// A result with no snapping applied.
    pub fn none(delta: Vec2) -> Self {
        Self {
            delta,
            snapped_x: false,
            snapped_y: false,
            guides: Vec::new(),
        }
    }
}

/// Best per-axis guide adjustment for the selection bounds moved by `raw`.
fn guide_adjustments(
    scene: &Scene,
    selection: &SelectionState,
    moved: Rect,
) -> (Option<(f64, Guide)>, Option<(f64, Guide)>) {
    let mut best_x: Option<(f64, Guide)> = None;
    let mut best_y: Option<(f64, Guide)> = None;
    let center = moved.center();

    let mut consider_x = |target: f64, value: f64, kind: GuideKind| {
        let adjust = target - value;
        if adjust.abs() < GUIDE_THRESHOLD
            && best_x.map_or(true, |(a, _)| adjust.abs() < a.abs())
        {
            best_x = Some((
                adjust,
                Guide {
                    axis: GuideAxis::Vertical,
                    position: target,
                    kind,
                },
            ));
        }
    };
    let mut consider_y = |target: f64, value: f64, kind: GuideKind| {
        let adjust = target - value;
        if adjust.abs() < GUIDE_THRESHOLD
            && best_y.map_or(true, |(a, _)| adjust.abs() < a.abs())
        {
            best_y = Some((
                adjust,
                Guide {
                    axis: GuideAxis::Horizontal,
                    position: target,
                    kind,
                },
            ));
        }
    };

    for el in scene.elements() {
        if selection.is_selected(el.id) || !el.visible || !el.has_valid_bounds() {
            continue;
        }
        let el_center = el.bounds.center();
        consider_x(el_center.x, center.x, GuideKind::Center);
        consider_x(el.bounds.x0, moved.x0, GuideKind::Edge);
        consider_y(el_center.y, center.y, GuideKind::Center);
        consider_y(el.bounds.y0, moved.y0, GuideKind::Edge);
    }

    (best_x, best_y)
}

/// Snap a raw move delta for the given selection bounds.
///
/// Guide alignment wins over grid quantization on any axis where a guide is
/// within range; the grid applies to the remaining axes when enabled.
pub fn snap_move_delta(
    raw: Vec2,
    bounds: Rect,
    scene: &Scene,
    selection: &SelectionState,
    config: &EngineConfig,
) -> SnapResult {
    let mut result = SnapResult::none(raw);

    let (guide_x, guide_y) = if config.snap_to_guides {
        guide_adjustments(scene, selection, bounds + raw)
    } else {
        (None, None)
    };

    if let Some((adjust, guide)) = guide_x {
        result.delta.x = raw.x + adjust;
        result.snapped_x = true;
        result.guides.push(guide);
    } else if config.snap_to_grid {
        result.delta.x = snap_to_grid(raw.x, config.grid_size);
        result.snapped_x = true;
    }

    if let Some((adjust, guide)) = guide_y {
        result.delta.y = raw.y + adjust;
        result.snapped_y = true;
        result.guides.push(guide);
    } else if config.snap_to_grid {
        result.delta.y = snap_to_grid(raw.y, config.grid_size);
        result.snapped_y = true;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    #[test]
    fn test_snap_to_grid_nearest() {
        assert_eq!(snap_to_grid(10.0, 8.0), 8.0);
        assert_eq!(snap_to_grid(11.0, 8.0), 8.0);
        assert_eq!(snap_to_grid(12.0, 8.0), 16.0);
        assert_eq!(snap_to_grid(-3.0, 8.0), 0.0);
        assert_eq!(snap_to_grid(-5.0, 8.0), -8.0);
    }

    #[test]
    fn test_snap_to_grid_idempotent() {
        for v in [-37.0, -8.0, 0.0, 3.9, 4.0, 123.4] {
            let once = snap_to_grid(v, 8.0);
            assert_eq!(snap_to_grid(once, 8.0), once);
        }
    }

    #[test]
    fn test_snap_to_grid_disabled_grid() {
        assert_eq!(snap_to_grid(13.7, 0.0), 13.7);
    }

    #[test]
    fn test_move_delta_grid_example() {
        let elements: Vec<Element> = Vec::new();
        let scene = Scene::new(&elements);
        let config = EngineConfig {
            grid_size: 8.0,
            snap_to_grid: true,
            snap_to_guides: false,
            ..EngineConfig::default()
        };
        let result = snap_move_delta(
            Vec2::new(10.0, 11.0),
            Rect::new(0.0, 0.0, 10.0, 10.0),
            &scene,
            &SelectionState::new(),
            &config,
        );
        assert_eq!(result.delta, Vec2::new(8.0, 8.0));
        assert!(result.snapped_x && result.snapped_y);
    }

    #[test]
    fn test_detect_center_guide() {
        let sibling = Element::new("s", Rect::new(100.0, 0.0, 140.0, 40.0));
        let elements = vec![sibling];
        let scene = Scene::new(&elements);
        let selection = SelectionState::new();
        // Selection centered at x=118: sibling center x=120 is within range.
        let guides = detect_guides(&scene, &selection, Rect::new(98.0, 200.0, 138.0, 240.0));
        assert_eq!(guides.len(), 1);
        assert_eq!(guides[0].axis, GuideAxis::Vertical);
        assert_eq!(guides[0].position, 120.0);
        assert_eq!(guides[0].kind, GuideKind::Center);
    }

    #[test]
    fn test_detect_ignores_selected_and_hidden() {
        let mut a = Element::new("a", Rect::new(0.0, 0.0, 40.0, 40.0));
        a.visible = false;
        let b = Element::new("b", Rect::new(0.0, 100.0, 40.0, 140.0));
        let elements = vec![a, b.clone()];
        let scene = Scene::new(&elements);
        let mut selection = SelectionState::new();
        selection.select(b.id);
        // Bounds aligned with both siblings' left edges; only guides from
        // elements that are visible and outside the selection count.
        let guides = detect_guides(&scene, &selection, Rect::new(1.0, 300.0, 41.0, 340.0));
        assert!(guides.is_empty());
    }

    #[test]
    fn test_guide_beats_grid() {
        let sibling = Element::new("s", Rect::new(103.0, 0.0, 163.0, 40.0));
        let elements = vec![sibling];
        let scene = Scene::new(&elements);
        let config = EngineConfig {
            grid_size: 8.0,
            snap_to_grid: true,
            snap_to_guides: true,
            ..EngineConfig::default()
        };
        // Raw move puts the selection's left edge at x=101; sibling edge at
        // 103 is in guide range while the grid would pull to 104.
        let result = snap_move_delta(
            Vec2::new(101.0, 0.0),
            Rect::new(0.0, 200.0, 40.0, 240.0),
            &scene,
            &SelectionState::new(),
            &config,
        );
        assert_eq!(result.delta.x, 103.0);
        assert_eq!(result.guides.len(), 1);
        assert_eq!(result.guides[0].kind, GuideKind::Edge);
        // y had no guide in range: grid applies.
        assert_eq!(result.delta.y, 0.0);
    }
}
