//! Layout resolution: scene graph → absolute bounds.
//!
//! Converts per-node constraints into absolute canvas rects. Split panes
//! are sliced by their normalized dividers, grid children are placed on
//! track offsets, groups take the union of their children, and everything
//! else is pinned parent-relative with its intrinsic size.

use crate::model::{NodeKind, Orientation, SceneGraph, Track};
use kurbo::{Point, Rect, Size};
use petgraph::graph::NodeIndex;
use std::collections::HashMap;

/// The canvas dimensions.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Estimated glyph advance for text nodes without a font backend.
const TEXT_ADVANCE: f64 = 8.0;
const TEXT_HEIGHT: f64 = 16.0;

/// Resolve absolute bounds for every node in the graph.
pub fn resolve_layout(graph: &SceneGraph, viewport: Viewport) -> HashMap<NodeIndex, Rect> {
    let mut bounds = HashMap::new();
    let root_rect = Rect::new(0.0, 0.0, viewport.width, viewport.height);
    assign(graph, graph.root, root_rect, &mut bounds);
    bounds
}

fn intrinsic_size(kind: &NodeKind) -> Size {
    match kind {
        NodeKind::Rect { width, height } | NodeKind::Split { width, height, .. } => {
            Size::new(*width, *height)
        }
        NodeKind::Ellipse { rx, ry } => Size::new(rx * 2.0, ry * 2.0),
        NodeKind::Text { content } => {
            Size::new(content.chars().count() as f64 * TEXT_ADVANCE, TEXT_HEIGHT)
        }
        NodeKind::Grid { columns, rows } => Size::new(track_sum(columns), track_sum(rows)),
        NodeKind::Root | NodeKind::Group => Size::ZERO,
    }
}

fn track_sum(tracks: &[Track]) -> f64 {
    tracks.iter().map(|t| t.size).sum()
}

fn track_offset(tracks: &[Track], index: usize) -> f64 {
    tracks.iter().take(index).map(|t| t.size).sum()
}

/// Record `rect` for `idx` and lay out its children inside it.
fn assign(graph: &SceneGraph, idx: NodeIndex, rect: Rect, bounds: &mut HashMap<NodeIndex, Rect>) {
    bounds.insert(idx, rect);

    let children = graph.children(idx);
    match &graph.graph[idx].kind {
        NodeKind::Split {
            orientation,
            dividers,
            ..
        } => {
            let n = children.len();
            for (i, child) in children.iter().enumerate() {
                let lo = if i == 0 {
                    0.0
                } else {
                    dividers.get(i - 1).copied().unwrap_or(0.0)
                };
                let hi = if i + 1 == n {
                    1.0
                } else {
                    dividers.get(i).copied().unwrap_or(1.0)
                };
                let pane = match orientation {
                    Orientation::Horizontal => Rect::new(
                        rect.x0 + lo * rect.width(),
                        rect.y0,
                        rect.x0 + hi * rect.width(),
                        rect.y1,
                    ),
                    Orientation::Vertical => Rect::new(
                        rect.x0,
                        rect.y0 + lo * rect.height(),
                        rect.x1,
                        rect.y0 + hi * rect.height(),
                    ),
                };
                assign(graph, *child, pane, bounds);
            }
        }
        NodeKind::Grid { columns, rows } => {
            for child in children {
                let (col, row) = graph.graph[child].cell().unwrap_or((0, 0));
                let x0 = rect.x0 + track_offset(columns, col);
                let y0 = rect.y0 + track_offset(rows, row);
                let w = columns.get(col).map_or(0.0, |t| t.size);
                let h = rows.get(row).map_or(0.0, |t| t.size);
                assign(graph, child, Rect::new(x0, y0, x0 + w, y0 + h), bounds);
            }
        }
        _ => {
            for child in &children {
                let node = &graph.graph[*child];
                let (px, py) = node.position().unwrap_or((0.0, 0.0));
                let origin = Point::new(rect.x0 + px, rect.y0 + py);
                let r = Rect::from_origin_size(origin, intrinsic_size(&node.kind));
                assign(graph, *child, r, bounds);
            }
            // Group bounds are the union of the children just placed
            if matches!(graph.graph[idx].kind, NodeKind::Group) {
                let union = children
                    .iter()
                    .filter_map(|c| bounds.get(c).copied())
                    .reduce(|a, b| a.union(b));
                if let Some(u) = union {
                    bounds.insert(idx, u);
                }
            }
        }
    }
}
