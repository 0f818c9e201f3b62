//! Interactive editing on top of `sc-core`: normalized input, the live
//! document, selection, undoable commands, and the direct-manipulation
//! gesture engine.
//!
//! Gestures preview by mutating the [`Document`] directly; only at
//! drag-end does the accumulated delta become a command on the
//! [`CommandStack`]. See the [`gesture`] module for the lifecycle
//! drivers and the concrete gestures built on them.

pub mod commands;
pub mod document;
pub mod gesture;
pub mod guides;
pub mod input;
pub mod selection;
pub mod tracks;

pub use commands::{Command, CommandStack, EditCommand, PropertyEdit};
pub use document::{Document, DocumentError};
pub use gesture::drag::{DragDriver, DragExportGesture, DragHandler, DragPayload};
pub use gesture::surface::InputSurface;
pub use gesture::{EditContext, GestureError, GestureHandler, GestureObserver, GestureOutcome};
pub use input::{InputEvent, Key, Modifiers, PointerEvent};
pub use selection::Selection;
