//! Direct-manipulation gesture engine.
//!
//! A gesture is an ephemeral controller bound to exactly one
//! press-to-release input sequence. Two drivers own the lifecycle:
//!
//! - [`drag::DragDriver`] — single-shot press → drag-detect →
//!   release/exit, used to initiate drag-and-drop exports.
//! - [`surface::InputSurface`] — the shared overlay every multi-phase
//!   gesture hooks into: press → [drag-start → drag-update]* →
//!   drag-end → release, with escape-to-cancel and key interception.
//!
//! Both drivers hold at most one active gesture in an exclusive slot,
//! tear down on every exit path (including callback errors), and notify
//! the observer exactly once.

pub mod divider;
pub mod drag;
pub mod marquee;
pub mod resize;
pub mod select;
pub mod surface;
pub mod tracks;

use crate::commands::CommandStack;
use crate::document::{Document, DocumentError};
use crate::input::{Key, PointerEvent};
use crate::selection::Selection;
use sc_core::NodeId;
use thiserror::Error;

/// Errors from gesture wiring and callbacks.
#[derive(Debug, Error)]
pub enum GestureError {
    /// A gesture is already active on this driver; the caller wired two
    /// overlapping gestures onto one surface.
    #[error("a gesture is already active on this surface")]
    SlotOccupied,

    /// Gestures start from pointer presses only.
    #[error("a gesture must start from a pointer press")]
    NotAPress,

    /// The gesture's target is missing or of the wrong kind.
    #[error("node {node} is not a {expected}")]
    WrongKind {
        node: NodeId,
        expected: &'static str,
    },

    #[error(transparent)]
    Document(#[from] DocumentError),

    /// A phase callback failed for a gesture-specific reason.
    #[error("gesture callback failed: {0}")]
    Callback(String),
}

/// How a gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Normal release.
    Completed,
    /// Escape-cancelled by the user; the live document was reverted.
    Cancelled,
    /// A phase callback returned an error; teardown still ran.
    Failed,
}

/// The gesture's owner, notified exactly once on termination, after all
/// hooks are cleared.
pub trait GestureObserver {
    fn gesture_did_terminate(&mut self, outcome: GestureOutcome);
}

/// Mutable collaborators a gesture edits through.
pub struct EditContext<'a> {
    pub doc: &'a mut Document,
    pub selection: &'a mut Selection,
    pub history: &'a mut CommandStack,
}

/// Phase callbacks for multi-phase gestures. Every method defaults to a
/// no-op so concrete gestures implement only the phases they use.
///
/// Callbacks mutate the live document directly — that is the preview
/// mechanism, not yet history. The drag-end callback is where the
/// capture → revert → commit protocol runs.
pub trait GestureHandler {
    fn on_press(&mut self, ctx: &mut EditContext, ev: &PointerEvent) -> Result<(), GestureError> {
        let _ = (ctx, ev);
        Ok(())
    }

    fn on_drag_start(
        &mut self,
        ctx: &mut EditContext,
        ev: &PointerEvent,
    ) -> Result<(), GestureError> {
        let _ = (ctx, ev);
        Ok(())
    }

    fn on_drag_update(
        &mut self,
        ctx: &mut EditContext,
        ev: &PointerEvent,
    ) -> Result<(), GestureError> {
        let _ = (ctx, ev);
        Ok(())
    }

    fn on_drag_end(
        &mut self,
        ctx: &mut EditContext,
        ev: &PointerEvent,
    ) -> Result<(), GestureError> {
        let _ = (ctx, ev);
        Ok(())
    }

    fn on_release(
        &mut self,
        ctx: &mut EditContext,
        ev: &PointerEvent,
    ) -> Result<(), GestureError> {
        let _ = (ctx, ev);
        Ok(())
    }

    /// Non-escape key press/release during the gesture.
    fn on_key(
        &mut self,
        ctx: &mut EditContext,
        key: &Key,
        pressed: bool,
    ) -> Result<(), GestureError> {
        let _ = (ctx, key, pressed);
        Ok(())
    }

    /// Escape: restore the pre-gesture state. Also invoked by resize-kind
    /// gestures themselves as the revert step of their commit protocol.
    fn on_cancel(&mut self, ctx: &mut EditContext) -> Result<(), GestureError> {
        let _ = ctx;
        Ok(())
    }
}
