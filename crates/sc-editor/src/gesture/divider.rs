//! Split divider adjustment.

use super::{EditContext, GestureError, GestureHandler};
use crate::commands::{Command, EditCommand, PropertyEdit};
use crate::document::{Document, DocumentError};
use crate::input::PointerEvent;
use sc_core::{NodeId, NodeKind, Orientation, PropertyId, PropertyValue};

/// Drags one divider of a `Split` node along its orientation axis.
///
/// The live dividers vector is the preview; drag-end captures it, restores
/// the pre-gesture vector, and pushes a single `Dividers` command. A
/// divider released where it started pushes nothing.
pub struct AdjustDividerGesture {
    target: NodeId,
    index: usize,
    orientation: Orientation,
    start: Vec<f64>,
}

impl AdjustDividerGesture {
    /// `index` addresses the divider within the split's dividers vector.
    pub fn new(doc: &Document, target: NodeId, index: usize) -> Result<Self, GestureError> {
        let node = doc
            .graph
            .get_by_id(target)
            .ok_or(DocumentError::UnknownNode(target))?;
        let NodeKind::Split {
            orientation,
            dividers,
            ..
        } = &node.kind
        else {
            return Err(GestureError::WrongKind {
                node: target,
                expected: "split",
            });
        };
        if index >= dividers.len() {
            return Err(GestureError::Callback(format!(
                "split {target} has no divider {index}"
            )));
        }
        Ok(Self {
            target,
            index,
            orientation: *orientation,
            start: dividers.clone(),
        })
    }

    fn live_dividers(&self, ctx: &EditContext) -> Result<Vec<f64>, GestureError> {
        let value = ctx.doc.property(self.target, PropertyId::Dividers)?;
        Ok(value.as_floats().unwrap_or_default().to_vec())
    }

    fn restore_start(&self, ctx: &mut EditContext) -> Result<(), GestureError> {
        ctx.doc.set_property(
            self.target,
            PropertyId::Dividers,
            &PropertyValue::Floats(self.start.clone()),
        )?;
        Ok(())
    }
}

impl GestureHandler for AdjustDividerGesture {
    fn on_drag_update(
        &mut self,
        ctx: &mut EditContext,
        ev: &PointerEvent,
    ) -> Result<(), GestureError> {
        let Some(bounds) = ctx.doc.bounds_of(self.target) else {
            return Err(DocumentError::UnknownNode(self.target).into());
        };
        let p = ctx.doc.to_canvas(ev.pos);

        let (offset, extent) = match self.orientation {
            Orientation::Horizontal => (p.x - bounds.x0, bounds.width()),
            Orientation::Vertical => (p.y - bounds.y0, bounds.height()),
        };
        if extent <= 0.0 {
            return Ok(());
        }
        let fraction = offset / extent;

        let mut dividers = self.live_dividers(ctx)?;
        // Neighbors bound the travel; the first/last divider stops at the
        // container edges.
        let lo = if self.index == 0 {
            0.0
        } else {
            dividers[self.index - 1]
        };
        let hi = if self.index + 1 == dividers.len() {
            1.0
        } else {
            dividers[self.index + 1]
        };
        dividers[self.index] = fraction.clamp(lo, hi);

        ctx.doc.set_property(
            self.target,
            PropertyId::Dividers,
            &PropertyValue::Floats(dividers),
        )?;
        Ok(())
    }

    fn on_drag_end(&mut self, ctx: &mut EditContext, _ev: &PointerEvent) -> Result<(), GestureError> {
        let live = self.live_dividers(ctx)?;
        self.restore_start(ctx)?;

        let command = Command::Edit(EditCommand::new(
            self.target,
            "Adjust Divider",
            [PropertyEdit::new(
                PropertyId::Dividers,
                PropertyValue::Floats(self.start.clone()),
                PropertyValue::Floats(live),
            )],
        ));
        ctx.history.push(ctx.doc, command)?;
        Ok(())
    }

    fn on_cancel(&mut self, ctx: &mut EditContext) -> Result<(), GestureError> {
        self.restore_start(ctx)
    }
}
