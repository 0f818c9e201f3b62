//! Generic node resize via cardinal handles.

use super::{EditContext, GestureError, GestureHandler};
use crate::commands::{Command, EditCommand, PropertyEdit};
use crate::document::{Document, DocumentError};
use crate::guides::AlignmentGuides;
use crate::input::PointerEvent;
use kurbo::Rect;
use sc_core::geometry::{CardinalPoint, constrain_aspect, resize_rect};
use sc_core::{NodeId, PropertyId, PropertyValue, node_exposes};

const FRAME_PROPS: [PropertyId; 4] = [
    PropertyId::X,
    PropertyId::Y,
    PropertyId::Width,
    PropertyId::Height,
];

/// Resizes any node exposing frame properties by dragging one of its
/// eight handles.
///
/// Every update writes size and position in one atomic property batch so
/// the preview never shows a half-applied frame. Shift snaps to the
/// starting aspect ratio (some kinds mandate it, see
/// [`with_fixed_aspect`](Self::with_fixed_aspect)); the moving edges snap
/// to sibling alignment guides unless Alt is held.
pub struct ResizeGesture {
    target: NodeId,
    handle: CardinalPoint,
    start_bounds: Rect,
    start_x: f64,
    start_y: f64,
    start_values: Vec<(PropertyId, PropertyValue)>,
    guides: AlignmentGuides,
    fixed_aspect: bool,
}

impl ResizeGesture {
    pub fn new(doc: &Document, target: NodeId, handle: CardinalPoint) -> Result<Self, GestureError> {
        let node = doc
            .graph
            .get_by_id(target)
            .ok_or(DocumentError::UnknownNode(target))?;
        if !node_exposes(node, PropertyId::Width) {
            return Err(GestureError::WrongKind {
                node: target,
                expected: "sized node",
            });
        }
        let start_bounds = doc
            .bounds_of(target)
            .ok_or(DocumentError::UnknownNode(target))?;

        let mut start_values = Vec::with_capacity(FRAME_PROPS.len());
        for prop in FRAME_PROPS {
            start_values.push((prop, doc.property(target, prop)?));
        }
        let start_x = doc.property(target, PropertyId::X)?.as_float().unwrap_or(0.0);
        let start_y = doc.property(target, PropertyId::Y)?.as_float().unwrap_or(0.0);

        Ok(Self {
            target,
            handle,
            start_bounds,
            start_x,
            start_y,
            start_values,
            guides: AlignmentGuides::for_siblings(doc, target),
            fixed_aspect: false,
        })
    }

    /// Force aspect-ratio snapping regardless of the Shift key, for node
    /// kinds whose proportions are fixed.
    pub fn with_fixed_aspect(mut self) -> Self {
        self.fixed_aspect = true;
        self
    }

    /// Write the candidate frame as one atomic batch. The pin moves by
    /// the candidate's displacement from the starting bounds — both are
    /// in canvas coordinates, so the parent's own placement cancels out
    /// and the anchor edges never drift.
    fn apply_rect(&self, ctx: &mut EditContext, rect: Rect) -> Result<(), GestureError> {
        let dx = rect.x0 - self.start_bounds.x0;
        let dy = rect.y0 - self.start_bounds.y0;
        ctx.doc.set_properties(
            self.target,
            &[
                (PropertyId::X, PropertyValue::Float(self.start_x + dx)),
                (PropertyId::Y, PropertyValue::Float(self.start_y + dy)),
                (PropertyId::Width, PropertyValue::Float(rect.width())),
                (PropertyId::Height, PropertyValue::Float(rect.height())),
            ],
        )?;
        Ok(())
    }

    fn restore_start(&self, ctx: &mut EditContext) -> Result<(), GestureError> {
        ctx.doc.set_properties(self.target, &self.start_values)?;
        Ok(())
    }
}

impl GestureHandler for ResizeGesture {
    fn on_drag_update(
        &mut self,
        ctx: &mut EditContext,
        ev: &PointerEvent,
    ) -> Result<(), GestureError> {
        let p = ctx.doc.to_canvas(ev.pos);
        let mut candidate = resize_rect(self.start_bounds, self.handle, p);

        if self.fixed_aspect || ev.modifiers.shift {
            candidate = constrain_aspect(self.start_bounds, candidate, self.handle);
        }
        if !ev.modifiers.alt {
            candidate = self.guides.snap_rect(candidate, self.handle);
        }
        self.apply_rect(ctx, candidate)
    }

    fn on_drag_end(&mut self, ctx: &mut EditContext, _ev: &PointerEvent) -> Result<(), GestureError> {
        let mut edits = Vec::with_capacity(self.start_values.len());
        for (prop, before) in &self.start_values {
            let after = ctx.doc.property(self.target, *prop)?;
            edits.push(PropertyEdit::new(*prop, before.clone(), after));
        }
        self.restore_start(ctx)?;

        let command = Command::Edit(EditCommand::new(self.target, "Resize", edits));
        ctx.history.push(ctx.doc, command)?;
        Ok(())
    }

    fn on_cancel(&mut self, ctx: &mut EditContext) -> Result<(), GestureError> {
        self.restore_start(ctx)
    }
}
