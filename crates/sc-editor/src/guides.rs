//! Sibling alignment guides.
//!
//! While a resize drag is in progress, the moving edges of the candidate
//! bounds snap to the edges and centers of the target's siblings. Each
//! axis snaps independently. Holding Alt suppresses guides entirely (the
//! gesture simply skips calling `snap_rect`).

use crate::document::Document;
use kurbo::Rect;
use sc_core::geometry::CardinalPoint;
use sc_core::NodeId;

/// Default snap distance in canvas units.
pub const SNAP_TOLERANCE: f64 = 6.0;

#[derive(Debug, Clone)]
pub struct AlignmentGuides {
    xs: Vec<f64>,
    ys: Vec<f64>,
    tolerance: f64,
}

impl AlignmentGuides {
    /// Collect guide lines from the bounds of `target`'s siblings.
    pub fn for_siblings(doc: &Document, target: NodeId) -> Self {
        let mut xs = Vec::new();
        let mut ys = Vec::new();

        if let Some(idx) = doc.graph.index_of(target)
            && let Some(parent) = doc.graph.parent(idx)
        {
            for sibling in doc.graph.children(parent) {
                if sibling == idx {
                    continue;
                }
                let id = doc.graph.graph[sibling].id;
                if let Some(b) = doc.bounds_of(id) {
                    xs.extend([b.x0, (b.x0 + b.x1) / 2.0, b.x1]);
                    ys.extend([b.y0, (b.y0 + b.y1) / 2.0, b.y1]);
                }
            }
        }

        Self {
            xs,
            ys,
            tolerance: SNAP_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Snap the edges of `candidate` that `handle` moves. The anchor
    /// edges never move, so they are never snapped.
    pub fn snap_rect(&self, candidate: Rect, handle: CardinalPoint) -> Rect {
        let mut out = candidate;

        if handle.affects_width() {
            let moving_east = matches!(
                handle,
                CardinalPoint::E | CardinalPoint::NE | CardinalPoint::SE
            );
            if moving_east {
                if let Some(x) = self.nearest(&self.xs, candidate.x1) {
                    out.x1 = x;
                }
            } else if let Some(x) = self.nearest(&self.xs, candidate.x0) {
                out.x0 = x;
            }
        }

        if handle.affects_height() {
            let moving_south = matches!(
                handle,
                CardinalPoint::S | CardinalPoint::SE | CardinalPoint::SW
            );
            if moving_south {
                if let Some(y) = self.nearest(&self.ys, candidate.y1) {
                    out.y1 = y;
                }
            } else if let Some(y) = self.nearest(&self.ys, candidate.y0) {
                out.y0 = y;
            }
        }

        out
    }

    fn nearest(&self, lines: &[f64], v: f64) -> Option<f64> {
        lines
            .iter()
            .copied()
            .filter(|line| (line - v).abs() <= self.tolerance)
            .min_by(|a, b| {
                (a - v)
                    .abs()
                    .partial_cmp(&(b - v).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}
