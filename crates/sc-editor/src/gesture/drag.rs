//! Single-shot drag gesture driver.
//!
//! The simpler of the two lifecycle variants: press → first of
//! {drag-detected, released, exited} → done. Hooks live on the pressed
//! element itself, not the shared overlay. Whichever terminal event
//! fires first runs its callback, then teardown and the one observer
//! notification run unconditionally — even when the callback fails.

use super::{EditContext, GestureError, GestureObserver, GestureOutcome};
use crate::input::{InputEvent, PointerEvent};
use kurbo::Vec2;
use sc_core::NodeId;

/// Callbacks for the single-shot variant.
pub trait DragHandler {
    fn on_press(&mut self, ctx: &mut EditContext, ev: &PointerEvent) -> Result<(), GestureError> {
        let _ = (ctx, ev);
        Ok(())
    }

    /// The pointer moved far enough to count as a drag. Terminal.
    fn on_drag_detected(
        &mut self,
        ctx: &mut EditContext,
        ev: &PointerEvent,
    ) -> Result<(), GestureError> {
        let _ = (ctx, ev);
        Ok(())
    }

    /// Released without dragging. Terminal.
    fn on_release(&mut self, ctx: &mut EditContext, ev: &PointerEvent) -> Result<(), GestureError> {
        let _ = (ctx, ev);
        Ok(())
    }

    /// Pointer left the element without dragging. Terminal.
    fn on_exit(&mut self, ctx: &mut EditContext, ev: &PointerEvent) -> Result<(), GestureError> {
        let _ = (ctx, ev);
        Ok(())
    }
}

struct ActiveDrag<H: DragHandler> {
    handler: H,
    observer: Box<dyn GestureObserver>,
}

/// Driver for one element's press/drag-detect/release/exit hooks.
pub struct DragDriver<H: DragHandler> {
    active: Option<ActiveDrag<H>>,
}

impl<H: DragHandler> Default for DragDriver<H> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<H: DragHandler> DragDriver<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Start from a press event on the element. `on_press` failures run
    /// teardown and notification before the error propagates.
    pub fn start(
        &mut self,
        ctx: &mut EditContext,
        event: &InputEvent,
        mut handler: H,
        observer: Box<dyn GestureObserver>,
    ) -> Result<(), GestureError> {
        if self.active.is_some() {
            return Err(GestureError::SlotOccupied);
        }
        let InputEvent::PointerPressed(press) = event else {
            return Err(GestureError::NotAPress);
        };

        if let Err(err) = handler.on_press(ctx, press) {
            let mut observer = observer;
            observer.gesture_did_terminate(GestureOutcome::Failed);
            return Err(err);
        }
        self.active = Some(ActiveDrag { handler, observer });
        Ok(())
    }

    /// Feed an event. The first terminal event runs its callback, tears
    /// down, and notifies once. Returns the finished handler so callers
    /// can collect what the gesture produced (e.g. a drag payload).
    pub fn dispatch(
        &mut self,
        ctx: &mut EditContext,
        event: &InputEvent,
    ) -> Result<Option<H>, GestureError> {
        let terminal = matches!(
            event,
            InputEvent::PointerMoved(_)
                | InputEvent::PointerReleased(_)
                | InputEvent::PointerExited(_)
        );
        if !terminal {
            return Ok(None);
        }

        // Slot is cleared before the callback runs
        let Some(ActiveDrag {
            mut handler,
            mut observer,
        }) = self.active.take()
        else {
            return Ok(None);
        };

        let result = match event {
            InputEvent::PointerMoved(ev) => handler.on_drag_detected(ctx, ev),
            InputEvent::PointerReleased(ev) => handler.on_release(ctx, ev),
            InputEvent::PointerExited(ev) => handler.on_exit(ctx, ev),
            _ => Ok(()),
        };

        let outcome = if result.is_err() {
            GestureOutcome::Failed
        } else {
            GestureOutcome::Completed
        };
        observer.gesture_did_terminate(outcome);
        result.map(|()| Some(handler))
    }
}

/// What a drag-and-drop initiation hands to the platform dragboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DragPayload {
    /// The full selection, in selection order.
    pub nodes: Vec<NodeId>,
    /// Offset from the dragged group's bounds origin to the grab point,
    /// in canvas coordinates.
    pub grab_offset: Vec2,
}

/// Packages the current selection for an OS-level drag.
///
/// A payload is produced only when the selection shares a single common
/// parent — a multi-parent selection cannot be coherently relocated, so
/// drag-detected yields nothing and the gesture simply completes.
#[derive(Default)]
pub struct DragExportGesture {
    payload: Option<DragPayload>,
}

impl DragExportGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// The payload produced by drag-detected, if any.
    pub fn take_payload(&mut self) -> Option<DragPayload> {
        self.payload.take()
    }
}

impl DragHandler for DragExportGesture {
    fn on_drag_detected(
        &mut self,
        ctx: &mut EditContext,
        ev: &PointerEvent,
    ) -> Result<(), GestureError> {
        let Some(_parent) = ctx.selection.common_parent(ctx.doc) else {
            log::debug!("drag export refused: selection has no common parent");
            return Ok(());
        };

        let grab = ctx.doc.to_canvas(ev.pos);
        let origin = ctx
            .selection
            .items()
            .iter()
            .filter_map(|id| ctx.doc.bounds_of(*id))
            .reduce(|a, b| a.union(b))
            .map(|r| r.origin())
            .unwrap_or(grab);

        self.payload = Some(DragPayload {
            nodes: ctx.selection.items().to_vec(),
            grab_offset: grab - origin,
        });
        Ok(())
    }
}
