//! Typed intent channel between the engine and the scene store.
//!
//! The engine never mutates elements; every proposed change is a [`Command`]
//! the embedder dispatches to its store. Commands from one pointer-move tick
//! form one undo/redo transaction.

use crate::element::ElementId;
use crate::selection::HandleKind;
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A change intent emitted during pointer handling or from toolbar actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Full replacement of the selected-id set.
    SelectionChanged { ids: Vec<ElementId> },
    /// Translate an element by a delta in canvas units. Deltas are
    /// incremental: apply each to the element's current position.
    Move { id: ElementId, delta: Vec2 },
    /// Set an element's bounds. Absolute, so re-applying the latest resize
    /// of a gesture is idempotent.
    Resize {
        id: ElementId,
        bounds: Rect,
        handle: HandleKind,
    },
    /// Set an element's absolute rotation in degrees, normalized to
    /// `[0, 360)`.
    Rotate { id: ElementId, degrees: f64 },
    /// Clone an element (the store assigns the new id).
    Duplicate { id: ElementId },
    /// Remove an element.
    Delete { id: ElementId },
    /// Toggle an element's locked flag.
    Lock { id: ElementId },
}

impl Command {
    /// The element this command targets, if it targets exactly one.
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Command::SelectionChanged { .. } => None,
            Command::Move { id, .. }
            | Command::Resize { id, .. }
            | Command::Rotate { id, .. }
            | Command::Duplicate { id }
            | Command::Delete { id }
            | Command::Lock { id } => Some(*id),
        }
    }
}
