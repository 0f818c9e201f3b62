//! Rubber-band selection.

use super::{EditContext, GestureError, GestureHandler};
use crate::input::PointerEvent;
use kurbo::{Point, Rect};
use sc_core::NodeId;
use sc_core::geometry::rects_intersect;

/// Rubber-band selection over the children of a scope node.
///
/// Each drag update replaces the selection wholesale with the candidates
/// whose bounds intersect the band, so membership is decided by the final
/// frame alone. A press-release with no drag behaves as a click: select
/// the hit node, or clear on background. Escape restores the pre-gesture
/// selection.
pub struct MarqueeGesture {
    scope: NodeId,
    press: Point,
    band: Option<Rect>,
    previous: Vec<NodeId>,
    dragged: bool,
}

impl MarqueeGesture {
    /// `scope` names the container whose direct children are candidates.
    pub fn new(scope: NodeId) -> Self {
        Self {
            scope,
            press: Point::ZERO,
            band: None,
            previous: Vec::new(),
            dragged: false,
        }
    }

    /// The current band rect in canvas coordinates, for overlay painting.
    pub fn band(&self) -> Option<Rect> {
        self.band
    }

    fn candidates(&self, ctx: &EditContext) -> Vec<NodeId> {
        let Some(idx) = ctx.doc.graph.index_of(self.scope) else {
            return Vec::new();
        };
        ctx.doc
            .graph
            .children(idx)
            .into_iter()
            .map(|c| ctx.doc.graph.graph[c].id)
            .collect()
    }
}

impl GestureHandler for MarqueeGesture {
    fn on_press(&mut self, ctx: &mut EditContext, ev: &PointerEvent) -> Result<(), GestureError> {
        self.press = ctx.doc.to_canvas(ev.pos);
        self.previous = ctx.selection.items().to_vec();
        Ok(())
    }

    fn on_drag_start(
        &mut self,
        _ctx: &mut EditContext,
        _ev: &PointerEvent,
    ) -> Result<(), GestureError> {
        self.dragged = true;
        Ok(())
    }

    fn on_drag_update(
        &mut self,
        ctx: &mut EditContext,
        ev: &PointerEvent,
    ) -> Result<(), GestureError> {
        let p = ctx.doc.to_canvas(ev.pos);
        let band = Rect::from_points(self.press, p);
        self.band = Some(band);

        let hits: Vec<NodeId> = self
            .candidates(ctx)
            .into_iter()
            .filter(|id| {
                ctx.doc
                    .bounds_of(*id)
                    .is_some_and(|b| rects_intersect(b, band))
            })
            .collect();
        ctx.selection.replace(hits);
        Ok(())
    }

    fn on_release(&mut self, ctx: &mut EditContext, ev: &PointerEvent) -> Result<(), GestureError> {
        if self.dragged {
            self.band = None;
            return Ok(());
        }
        // Plain click: select what was hit, clear on background
        let p = ctx.doc.to_canvas(ev.pos);
        match ctx.doc.hit_test(p) {
            Some(hit) => ctx.selection.replace([hit]),
            None => ctx.selection.clear(),
        }
        Ok(())
    }

    fn on_cancel(&mut self, ctx: &mut EditContext) -> Result<(), GestureError> {
        self.band = None;
        ctx.selection.replace(self.previous.clone());
        Ok(())
    }
}
