//! The shared interaction surface for multi-phase gestures.
//!
//! The surface is the transparent overlay covering the editing canvas.
//! It owns a single exclusive slot — `Option<ActiveGesture>` — instead
//! of independent nullable hook fields, so two overlapping gestures are
//! a typed error rather than silent clobbering.
//!
//! Teardown discipline: the active gesture is taken out of the slot
//! before any terminal callback runs, the observer is notified exactly
//! once on every exit path, and the first callback error propagates only
//! after cleanup finished.

use super::{EditContext, GestureError, GestureHandler, GestureObserver, GestureOutcome};
use crate::input::{InputEvent, Key, PointerEvent};

struct ActiveGesture {
    handler: Box<dyn GestureHandler>,
    observer: Box<dyn GestureObserver>,
    pressed: PointerEvent,
    last: PointerEvent,
    dragged: bool,
}

impl ActiveGesture {
    /// Clear hooks (by construction: the gesture is already out of the
    /// slot) and notify the observer. Consumes the gesture, making it
    /// inert.
    fn terminate(mut self, outcome: GestureOutcome) {
        log::debug!("gesture terminated: {outcome:?}");
        self.observer.gesture_did_terminate(outcome);
    }
}

/// The multi-phase gesture driver.
#[derive(Default)]
pub struct InputSurface {
    active: Option<ActiveGesture>,
}

impl InputSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture currently owns the surface.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The press event that started the active gesture.
    pub fn press_event(&self) -> Option<PointerEvent> {
        self.active.as_ref().map(|a| a.pressed)
    }

    /// The most recent pointer event the active gesture saw.
    pub fn last_event(&self) -> Option<PointerEvent> {
        self.active.as_ref().map(|a| a.last)
    }

    /// Start a gesture from a press event.
    ///
    /// Precondition failures (`SlotOccupied`, `NotAPress`) leave any
    /// active gesture untouched and notify nothing. If the handler's
    /// `on_press` fails, teardown and observer notification still run
    /// before the error propagates.
    pub fn begin(
        &mut self,
        ctx: &mut EditContext,
        event: &InputEvent,
        handler: Box<dyn GestureHandler>,
        observer: Box<dyn GestureObserver>,
    ) -> Result<(), GestureError> {
        if self.active.is_some() {
            return Err(GestureError::SlotOccupied);
        }
        let InputEvent::PointerPressed(press) = event else {
            return Err(GestureError::NotAPress);
        };

        let mut active = ActiveGesture {
            handler,
            observer,
            pressed: *press,
            last: *press,
            dragged: false,
        };
        log::debug!("gesture started at {:?}", press.pos);

        if let Err(err) = active.handler.on_press(ctx, press) {
            active.terminate(GestureOutcome::Failed);
            return Err(err);
        }
        self.active = Some(active);
        Ok(())
    }

    /// Feed an input event to the active gesture. Events while idle are
    /// ignored.
    pub fn dispatch(&mut self, ctx: &mut EditContext, event: &InputEvent) -> Result<(), GestureError> {
        let Some(mut active) = self.active.take() else {
            return Ok(());
        };

        match event {
            InputEvent::PointerMoved(ev) => {
                active.last = *ev;
                let result = if !active.dragged {
                    active.dragged = true;
                    log::trace!("drag started at {:?}", ev.pos);
                    // The move that detects the drag also delivers the
                    // first update, so single-move drags preview once.
                    active
                        .handler
                        .on_drag_start(ctx, ev)
                        .and_then(|()| active.handler.on_drag_update(ctx, ev))
                } else {
                    active.handler.on_drag_update(ctx, ev)
                };
                self.continue_or_fail(active, result)
            }

            InputEvent::PointerReleased(ev) => {
                active.last = *ev;
                let mut first_err: Option<GestureError> = None;

                if active.dragged
                    && let Err(err) = active.handler.on_drag_end(ctx, ev)
                {
                    // must not block on_release or termination
                    first_err = Some(err);
                }
                if let Err(err) = active.handler.on_release(ctx, ev) {
                    first_err.get_or_insert(err);
                }

                let outcome = if first_err.is_some() {
                    GestureOutcome::Failed
                } else {
                    GestureOutcome::Completed
                };
                active.terminate(outcome);
                match first_err {
                    Some(err) => Err(err),
                    None => Ok(()),
                }
            }

            InputEvent::KeyPressed { key: Key::Escape, .. } => {
                let result = active.handler.on_cancel(ctx);
                let outcome = if result.is_err() {
                    GestureOutcome::Failed
                } else {
                    GestureOutcome::Cancelled
                };
                active.terminate(outcome);
                result
            }

            InputEvent::KeyPressed { key, .. } => {
                let result = active.handler.on_key(ctx, key, true);
                self.continue_or_fail(active, result)
            }

            InputEvent::KeyReleased { key, .. } => {
                let result = active.handler.on_key(ctx, key, false);
                self.continue_or_fail(active, result)
            }

            // A second press or an exit cannot occur mid-gesture on the
            // overlay; keep the gesture running.
            InputEvent::PointerPressed(_) | InputEvent::PointerExited(_) => {
                self.active = Some(active);
                Ok(())
            }
        }
    }

    fn continue_or_fail(
        &mut self,
        active: ActiveGesture,
        result: Result<(), GestureError>,
    ) -> Result<(), GestureError> {
        match result {
            Ok(()) => {
                self.active = Some(active);
                Ok(())
            }
            Err(err) => {
                active.terminate(GestureOutcome::Failed);
                Err(err)
            }
        }
    }
}
