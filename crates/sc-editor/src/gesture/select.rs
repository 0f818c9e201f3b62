//! Click selection and selected-set relocation.

use super::{EditContext, GestureError, GestureHandler};
use crate::commands::{Command, EditCommand, PropertyEdit};
use crate::input::PointerEvent;
use kurbo::Point;
use sc_core::{NodeId, PropertyId, PropertyValue};

struct MoveTarget {
    id: NodeId,
    start_x: f64,
    start_y: f64,
}

/// Press selects per the decision table below, drag relocates the whole
/// selection, drag-end commits one batched move.
///
/// Press decision over (extend modifier, hit already selected, an
/// ancestor of the hit selected):
///
/// - plain click, unselected, no ancestor selected — selection becomes
///   the hit; drag may relocate.
/// - plain click, unselected, ancestor selected — selection untouched
///   (the ancestor stays the unit of manipulation); drag may relocate.
/// - plain click on a selected node — selection untouched; drag may
///   relocate.
/// - extend click on a selected node — toggled out; no drag.
/// - extend click on an unselected node — toggled in (ancestor state is
///   irrelevant); no drag.
///
/// Relocation additionally requires the selection to share a single
/// common parent; otherwise the drag previews nothing and commits
/// nothing. Selection changes themselves never reach the history.
pub struct SelectAndMoveGesture {
    hit: NodeId,
    drag_allowed: bool,
    press: Point,
    moves: Vec<MoveTarget>,
}

impl SelectAndMoveGesture {
    pub fn new(hit: NodeId) -> Self {
        Self {
            hit,
            drag_allowed: false,
            press: Point::ZERO,
            moves: Vec::new(),
        }
    }

    fn restore_starts(&self, ctx: &mut EditContext) -> Result<(), GestureError> {
        for target in &self.moves {
            ctx.doc.set_properties(
                target.id,
                &[
                    (PropertyId::X, PropertyValue::Float(target.start_x)),
                    (PropertyId::Y, PropertyValue::Float(target.start_y)),
                ],
            )?;
        }
        Ok(())
    }
}

impl GestureHandler for SelectAndMoveGesture {
    fn on_press(&mut self, ctx: &mut EditContext, ev: &PointerEvent) -> Result<(), GestureError> {
        self.press = ctx.doc.to_canvas(ev.pos);

        let extend = ev.modifiers.shift;
        let selected = ctx.selection.contains(self.hit);
        let ancestor_selected = ctx.selection.ancestor_selected(ctx.doc, self.hit);

        if extend {
            ctx.selection.toggle(self.hit);
            self.drag_allowed = false;
        } else {
            if !selected && !ancestor_selected {
                ctx.selection.replace([self.hit]);
            }
            self.drag_allowed = true;
        }
        Ok(())
    }

    fn on_drag_start(
        &mut self,
        ctx: &mut EditContext,
        _ev: &PointerEvent,
    ) -> Result<(), GestureError> {
        if !self.drag_allowed {
            return Ok(());
        }
        if ctx.selection.common_parent(ctx.doc).is_none() {
            log::debug!("move refused: selection spans multiple parents");
            return Ok(());
        }
        for &id in ctx.selection.items() {
            let x = ctx.doc.property(id, PropertyId::X)?;
            let y = ctx.doc.property(id, PropertyId::Y)?;
            self.moves.push(MoveTarget {
                id,
                start_x: x.as_float().unwrap_or(0.0),
                start_y: y.as_float().unwrap_or(0.0),
            });
        }
        Ok(())
    }

    fn on_drag_update(
        &mut self,
        ctx: &mut EditContext,
        ev: &PointerEvent,
    ) -> Result<(), GestureError> {
        if self.moves.is_empty() {
            return Ok(());
        }
        let p = ctx.doc.to_canvas(ev.pos);
        let dx = p.x - self.press.x;
        let dy = p.y - self.press.y;

        for target in &self.moves {
            ctx.doc.set_properties(
                target.id,
                &[
                    (PropertyId::X, PropertyValue::Float(target.start_x + dx)),
                    (PropertyId::Y, PropertyValue::Float(target.start_y + dy)),
                ],
            )?;
        }
        Ok(())
    }

    fn on_drag_end(&mut self, ctx: &mut EditContext, _ev: &PointerEvent) -> Result<(), GestureError> {
        if self.moves.is_empty() {
            return Ok(());
        }
        let mut commands = Vec::with_capacity(self.moves.len());
        for target in &self.moves {
            let live_x = ctx.doc.property(target.id, PropertyId::X)?;
            let live_y = ctx.doc.property(target.id, PropertyId::Y)?;
            commands.push(EditCommand::new(
                target.id,
                "Move",
                [
                    PropertyEdit::new(
                        PropertyId::X,
                        PropertyValue::Float(target.start_x),
                        live_x,
                    ),
                    PropertyEdit::new(
                        PropertyId::Y,
                        PropertyValue::Float(target.start_y),
                        live_y,
                    ),
                ],
            ));
        }
        self.restore_starts(ctx)?;

        ctx.history.push(
            ctx.doc,
            Command::Batch {
                label: "Move".into(),
                commands,
            },
        )?;
        Ok(())
    }

    fn on_cancel(&mut self, ctx: &mut EditContext) -> Result<(), GestureError> {
        self.restore_starts(ctx)
    }
}
