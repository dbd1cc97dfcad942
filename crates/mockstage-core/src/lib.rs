//! Mockstage Core Library
//!
//! Canvas interaction engine for the mockstage mockup composition tool:
//! pointer input goes in, selection and transform commands come out. The
//! engine owns no elements and renders nothing; the embedding store applies
//! the emitted commands and feeds an updated scene snapshot back each tick.

pub mod command;
pub mod config;
pub mod element;
pub mod engine;
pub mod error;
pub mod input;
pub mod marquee;
pub mod scene;
pub mod selection;
pub mod snap;
pub mod transform;
pub mod viewport;

pub use command::Command;
pub use config::{EngineConfig, DEFAULT_GRID_SIZE};
pub use element::{Element, ElementId};
pub use engine::{CanvasEngine, InteractionState, ToolMode};
pub use error::{EngineError, EngineResult};
pub use input::{Modifiers, MouseButton, PointerEvent};
pub use marquee::Marquee;
pub use scene::{validate_elements, Scene};
pub use selection::{
    Corner, Edge, Handle, HandleKind, SelectionState, HANDLE_HIT_TOLERANCE, ROTATE_HANDLE_OFFSET,
};
pub use snap::{detect_guides, snap_to_grid, Guide, GuideAxis, GuideKind, GUIDE_THRESHOLD};
pub use transform::{resize_bounds, MIN_ELEMENT_SIZE};
pub use viewport::Viewport;
