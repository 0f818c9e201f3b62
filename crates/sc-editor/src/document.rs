//! The live document: scene graph plus resolved bounds.
//!
//! Gestures mutate nodes through this type for immediate visual preview
//! (every property write forces a layout pass) and read the same values
//! back when building edit commands. Hit testing walks the resolved
//! bounds front to back.

use kurbo::{Affine, Point, Rect};
use sc_core::geometry::{canvas_point, rects_intersect};
use sc_core::{
    NodeId, NodeIndex, NodeKind, PropertyId, PropertyValue, SceneGraph, Viewport, resolve_layout,
};
use std::collections::HashMap;
use thiserror::Error;

/// Errors from document reads and writes.
#[derive(Debug, Error, PartialEq)]
pub enum DocumentError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    #[error("node {node} does not expose property {prop:?}")]
    UnsupportedProperty { node: NodeId, prop: PropertyId },
}

/// The live object graph the gesture engine edits.
pub struct Document {
    pub graph: SceneGraph,
    bounds: HashMap<NodeIndex, Rect>,
    viewport: Viewport,
    view_transform: Affine,
}

impl Document {
    pub fn new(graph: SceneGraph, viewport: Viewport) -> Self {
        let bounds = resolve_layout(&graph, viewport);
        Self {
            graph,
            bounds,
            viewport,
            view_transform: Affine::IDENTITY,
        }
    }

    /// Canvas pan/zoom applied by the host shell.
    pub fn set_view_transform(&mut self, view: Affine) {
        self.view_transform = view;
    }

    /// Map a screen point to canvas coordinates. Degenerate transforms
    /// fall back to raw screen coordinates (see `sc_core::geometry`).
    pub fn to_canvas(&self, screen: Point) -> Point {
        canvas_point(self.view_transform, screen)
    }

    /// Recompute all bounds. Called after every mutation so previews are
    /// immediately visible.
    pub fn relayout(&mut self) {
        self.bounds = resolve_layout(&self.graph, self.viewport);
    }

    /// Resolved absolute bounds of a node.
    pub fn bounds_of(&self, id: NodeId) -> Option<Rect> {
        let idx = self.graph.index_of(id)?;
        self.bounds.get(&idx).copied()
    }

    /// The parent node's id, if any.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        let idx = self.graph.index_of(id)?;
        let parent = self.graph.parent(idx)?;
        Some(self.graph.graph[parent].id)
    }

    /// Read one property.
    pub fn property(&self, id: NodeId, prop: PropertyId) -> Result<PropertyValue, DocumentError> {
        let node = self
            .graph
            .get_by_id(id)
            .ok_or(DocumentError::UnknownNode(id))?;
        node.property(prop)
            .ok_or(DocumentError::UnsupportedProperty { node: id, prop })
    }

    /// Write one property and force a layout pass.
    pub fn set_property(
        &mut self,
        id: NodeId,
        prop: PropertyId,
        value: &PropertyValue,
    ) -> Result<(), DocumentError> {
        self.set_properties(id, &[(prop, value.clone())])
    }

    /// Write several properties of one node atomically, then force a
    /// single layout pass. Fails without partial application if any
    /// property is unsupported.
    pub fn set_properties(
        &mut self,
        id: NodeId,
        values: &[(PropertyId, PropertyValue)],
    ) -> Result<(), DocumentError> {
        {
            let node = self
                .graph
                .get_by_id(id)
                .ok_or(DocumentError::UnknownNode(id))?;
            for (prop, _) in values {
                if node.property(*prop).is_none() {
                    return Err(DocumentError::UnsupportedProperty {
                        node: id,
                        prop: *prop,
                    });
                }
            }
        }
        let node = self
            .graph
            .get_by_id_mut(id)
            .ok_or(DocumentError::UnknownNode(id))?;
        for (prop, value) in values {
            if !node.set_property(*prop, value) {
                // validated above; a false here means a value-shape bug
                return Err(DocumentError::UnsupportedProperty {
                    node: id,
                    prop: *prop,
                });
            }
        }
        self.relayout();
        Ok(())
    }

    /// Find the topmost node at a canvas position. `None` means background.
    pub fn hit_test(&self, p: Point) -> Option<NodeId> {
        self.hit_test_node(self.graph.root, p)
    }

    fn hit_test_node(&self, idx: NodeIndex, p: Point) -> Option<NodeId> {
        // Children in reverse order: last painted is topmost
        for &child in self.graph.children(idx).iter().rev() {
            if let Some(hit) = self.hit_test_node(child, p) {
                return Some(hit);
            }
        }

        let node = &self.graph.graph[idx];
        if matches!(node.kind, NodeKind::Root) {
            return None;
        }
        if let Some(b) = self.bounds.get(&idx)
            && b.contains(p)
        {
            return Some(node.id);
        }
        None
    }

    /// All non-root nodes whose bounds intersect `rect` with positive
    /// area. Used for marquee selection.
    pub fn hit_test_rect(&self, rect: Rect) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_intersecting(self.graph.root, rect, &mut out);
        out
    }

    fn collect_intersecting(&self, idx: NodeIndex, rect: Rect, out: &mut Vec<NodeId>) {
        let node = &self.graph.graph[idx];
        if !matches!(node.kind, NodeKind::Root)
            && let Some(b) = self.bounds.get(&idx)
            && rects_intersect(*b, rect)
        {
            out.push(node.id);
        }
        for child in self.graph.children(idx) {
            self.collect_intersecting(child, rect, out);
        }
    }
}
