//! Grid column/row resize gestures.

use super::{EditContext, GestureError, GestureHandler};
use crate::commands::{Command, EditCommand, PropertyEdit};
use crate::document::{Document, DocumentError};
use crate::input::PointerEvent;
use crate::tracks::TrackResizer;
use kurbo::Point;
use sc_core::{NodeId, NodeKind, PropertyId, PropertyValue};

/// Shared machinery for both track axes. The property id selects the
/// track, the axis selects which pointer component drives the delta.
struct TrackGesture {
    target: NodeId,
    prop: PropertyId,
    resizer: TrackResizer,
    press: Option<Point>,
    horizontal: bool,
}

impl TrackGesture {
    fn new(doc: &Document, target: NodeId, prop: PropertyId) -> Result<Self, GestureError> {
        let node = doc
            .graph
            .get_by_id(target)
            .ok_or(DocumentError::UnknownNode(target))?;
        let NodeKind::Grid { columns, rows } = &node.kind else {
            return Err(GestureError::WrongKind {
                node: target,
                expected: "grid",
            });
        };
        let (track, horizontal) = match prop {
            PropertyId::ColumnWidth(i) => (columns.get(i), true),
            PropertyId::RowHeight(i) => (rows.get(i), false),
            _ => (None, false),
        };
        let Some(track) = track else {
            return Err(DocumentError::UnsupportedProperty { node: target, prop }.into());
        };
        Ok(Self {
            target,
            prop,
            resizer: TrackResizer::new(track),
            press: None,
            horizontal,
        })
    }

    fn restore_start(&self, ctx: &mut EditContext) -> Result<(), GestureError> {
        ctx.doc.set_property(
            self.target,
            self.prop,
            &PropertyValue::Float(self.resizer.start_size()),
        )?;
        Ok(())
    }

    fn on_press(&mut self, ctx: &mut EditContext, ev: &PointerEvent) -> Result<(), GestureError> {
        self.press = Some(ctx.doc.to_canvas(ev.pos));
        Ok(())
    }

    fn on_drag_update(
        &mut self,
        ctx: &mut EditContext,
        ev: &PointerEvent,
    ) -> Result<(), GestureError> {
        let Some(press) = self.press else {
            return Ok(());
        };
        let p = ctx.doc.to_canvas(ev.pos);
        let delta = if self.horizontal {
            p.x - press.x
        } else {
            p.y - press.y
        };
        ctx.doc.set_property(
            self.target,
            self.prop,
            &PropertyValue::Float(self.resizer.size_for_delta(delta)),
        )?;
        Ok(())
    }

    fn on_drag_end(&mut self, ctx: &mut EditContext, label: &str) -> Result<(), GestureError> {
        let live = ctx.doc.property(self.target, self.prop)?;
        self.restore_start(ctx)?;

        let command = Command::Edit(EditCommand::new(
            self.target,
            label,
            [PropertyEdit::new(
                self.prop,
                PropertyValue::Float(self.resizer.start_size()),
                live,
            )],
        ));
        ctx.history.push(ctx.doc, command)?;
        Ok(())
    }
}

/// Drags a grid column's width, clamped to the track's min/max.
pub struct ResizeColumnGesture(TrackGesture);

impl ResizeColumnGesture {
    pub fn new(doc: &Document, target: NodeId, column: usize) -> Result<Self, GestureError> {
        TrackGesture::new(doc, target, PropertyId::ColumnWidth(column)).map(Self)
    }
}

impl GestureHandler for ResizeColumnGesture {
    fn on_press(&mut self, ctx: &mut EditContext, ev: &PointerEvent) -> Result<(), GestureError> {
        self.0.on_press(ctx, ev)
    }

    fn on_drag_update(
        &mut self,
        ctx: &mut EditContext,
        ev: &PointerEvent,
    ) -> Result<(), GestureError> {
        self.0.on_drag_update(ctx, ev)
    }

    fn on_drag_end(&mut self, ctx: &mut EditContext, _ev: &PointerEvent) -> Result<(), GestureError> {
        self.0.on_drag_end(ctx, "Resize Column")
    }

    fn on_cancel(&mut self, ctx: &mut EditContext) -> Result<(), GestureError> {
        self.0.restore_start(ctx)
    }
}

/// Drags a grid row's height, clamped to the track's min/max.
pub struct ResizeRowGesture(TrackGesture);

impl ResizeRowGesture {
    pub fn new(doc: &Document, target: NodeId, row: usize) -> Result<Self, GestureError> {
        TrackGesture::new(doc, target, PropertyId::RowHeight(row)).map(Self)
    }
}

impl GestureHandler for ResizeRowGesture {
    fn on_press(&mut self, ctx: &mut EditContext, ev: &PointerEvent) -> Result<(), GestureError> {
        self.0.on_press(ctx, ev)
    }

    fn on_drag_update(
        &mut self,
        ctx: &mut EditContext,
        ev: &PointerEvent,
    ) -> Result<(), GestureError> {
        self.0.on_drag_update(ctx, ev)
    }

    fn on_drag_end(&mut self, ctx: &mut EditContext, _ev: &PointerEvent) -> Result<(), GestureError> {
        self.0.on_drag_end(ctx, "Resize Row")
    }

    fn on_cancel(&mut self, ctx: &mut EditContext) -> Result<(), GestureError> {
        self.0.restore_start(ctx)
    }
}
