//! Pure move/resize/rotate math.
//!
//! Everything here is a function of its arguments; the engine decides when
//! to call and which elements participate.

use crate::selection::{Corner, Edge, HandleKind};
use kurbo::{Point, Rect, Vec2};

/// Minimum element size after a resize, in canvas units.
pub const MIN_ELEMENT_SIZE: f64 = 1.0;

/// Rotation snap increment (degrees) applied while shift is held.
pub const ROTATION_SNAP_INCREMENT: f64 = 15.0;

/// Compute the bounds produced by dragging a handle by `delta`.
///
/// Corner handles displace their corner and keep the opposite corner fixed;
/// edge handles displace one edge and keep the opposite edge fixed. The
/// result is normalized (a drag through the fixed side flips instead of
/// inverting) and clamped to [`MIN_ELEMENT_SIZE`].
///
/// `keep_aspect` preserves the aspect ratio of `bounds` during a corner
/// resize; it has no effect on edge handles. The rotate handle leaves the
/// bounds unchanged.
pub fn resize_bounds(bounds: Rect, handle: HandleKind, delta: Vec2, keep_aspect: bool) -> Rect {
    let (new_x0, new_y0, new_x1, new_y1) = match handle {
        HandleKind::Corner(Corner::TopLeft) => {
            (bounds.x0 + delta.x, bounds.y0 + delta.y, bounds.x1, bounds.y1)
        }
        HandleKind::Corner(Corner::TopRight) => {
            (bounds.x0, bounds.y0 + delta.y, bounds.x1 + delta.x, bounds.y1)
        }
        HandleKind::Corner(Corner::BottomLeft) => {
            (bounds.x0 + delta.x, bounds.y0, bounds.x1, bounds.y1 + delta.y)
        }
        HandleKind::Corner(Corner::BottomRight) => {
            (bounds.x0, bounds.y0, bounds.x1 + delta.x, bounds.y1 + delta.y)
        }
        HandleKind::Edge(Edge::Top) => (bounds.x0, bounds.y0 + delta.y, bounds.x1, bounds.y1),
        HandleKind::Edge(Edge::Right) => (bounds.x0, bounds.y0, bounds.x1 + delta.x, bounds.y1),
        HandleKind::Edge(Edge::Bottom) => (bounds.x0, bounds.y0, bounds.x1, bounds.y1 + delta.y),
        HandleKind::Edge(Edge::Left) => (bounds.x0 + delta.x, bounds.y0, bounds.x1, bounds.y1),
        HandleKind::Rotate => return bounds,
    };

    let (x0, x1) = if new_x0 < new_x1 { (new_x0, new_x1) } else { (new_x1, new_x0) };
    let (y0, y1) = if new_y0 < new_y1 { (new_y0, new_y1) } else { (new_y1, new_y0) };

    let (width, height) = if keep_aspect && matches!(handle, HandleKind::Corner(_)) {
        let aspect = bounds.width() / bounds.height().max(0.1);
        let new_width = (x1 - x0).max(MIN_ELEMENT_SIZE);
        let new_height = (y1 - y0).max(MIN_ELEMENT_SIZE);
        let size = new_width.max(new_height);
        (size, size / aspect)
    } else {
        (
            (x1 - x0).max(MIN_ELEMENT_SIZE),
            (y1 - y0).max(MIN_ELEMENT_SIZE),
        )
    };

    Rect::new(x0, y0, x0 + width, y0 + height)
}

/// Pointer angle around a pivot, in radians.
pub fn pointer_angle(pivot: Point, point: Point) -> f64 {
    (point.y - pivot.y).atan2(point.x - pivot.x)
}

/// Rotation delta between the gesture-start pointer angle and the current
/// one, in radians.
pub fn rotation_delta(pivot: Point, start: Point, current: Point) -> f64 {
    pointer_angle(pivot, current) - pointer_angle(pivot, start)
}

/// Snap a rotation delta (radians) to [`ROTATION_SNAP_INCREMENT`] degrees.
pub fn snap_rotation(delta: f64) -> f64 {
    let increment = ROTATION_SNAP_INCREMENT.to_radians();
    (delta / increment).round() * increment
}

/// Rotate a point around a pivot by `angle` radians.
pub fn rotate_about(point: Point, pivot: Point, angle: f64) -> Point {
    let (sin_a, cos_a) = angle.sin_cos();
    let dx = point.x - pivot.x;
    let dy = point.y - pivot.y;
    Point::new(
        pivot.x + dx * cos_a - dy * sin_a,
        pivot.y + dx * sin_a + dy * cos_a,
    )
}

/// Normalize an angle in degrees to `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees % 360.0;
    if wrapped < 0.0 { wrapped + 360.0 } else { wrapped }
}
