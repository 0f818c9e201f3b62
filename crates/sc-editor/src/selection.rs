//! Selection model.
//!
//! An ordered set of node ids. Selection changes are never pushed to the
//! command history — only property edits are undoable.

use crate::document::Document;
use sc_core::NodeId;

#[derive(Debug, Default, Clone)]
pub struct Selection {
    items: Vec<NodeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.items.contains(&id)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replace the whole selection (marquee updates, plain clicks).
    pub fn replace<I: IntoIterator<Item = NodeId>>(&mut self, ids: I) {
        self.items.clear();
        for id in ids {
            if !self.items.contains(&id) {
                self.items.push(id);
            }
        }
    }

    /// Toggle membership (extend-modifier clicks).
    pub fn toggle(&mut self, id: NodeId) {
        if let Some(pos) = self.items.iter().position(|i| *i == id) {
            self.items.remove(pos);
        } else {
            self.items.push(id);
        }
    }

    /// Whether any selected node is a strict ancestor of `id`.
    pub fn ancestor_selected(&self, doc: &Document, id: NodeId) -> bool {
        self.items
            .iter()
            .any(|sel| doc.graph.is_ancestor_of(*sel, id))
    }

    /// The parent shared by every selected node, if there is exactly one.
    /// Relocation and drag export require this.
    pub fn common_parent(&self, doc: &Document) -> Option<NodeId> {
        doc.graph.common_parent(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_core::{NodeKind, SceneGraph, SceneNode, Viewport};

    fn doc() -> Document {
        let mut g = SceneGraph::new();
        let group = g.add_node(
            g.root,
            SceneNode::new(NodeId::intern("sel_grp"), NodeKind::Group),
        );
        g.add_node(
            group,
            SceneNode::new(
                NodeId::intern("sel_a"),
                NodeKind::Rect {
                    width: 10.0,
                    height: 10.0,
                },
            ),
        );
        g.add_node(
            g.root,
            SceneNode::new(
                NodeId::intern("sel_b"),
                NodeKind::Rect {
                    width: 10.0,
                    height: 10.0,
                },
            ),
        );
        Document::new(g, Viewport::default())
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut sel = Selection::new();
        let a = NodeId::intern("sel_a");
        sel.toggle(a);
        assert!(sel.contains(a));
        sel.toggle(a);
        assert!(!sel.contains(a));
    }

    #[test]
    fn replace_dedupes() {
        let mut sel = Selection::new();
        let a = NodeId::intern("sel_a");
        sel.replace([a, a]);
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn ancestor_query() {
        let doc = doc();
        let mut sel = Selection::new();
        sel.replace([NodeId::intern("sel_grp")]);
        assert!(sel.ancestor_selected(&doc, NodeId::intern("sel_a")));
        assert!(!sel.ancestor_selected(&doc, NodeId::intern("sel_b")));
    }

    #[test]
    fn common_parent_requires_single_parent() {
        let doc = doc();
        let mut sel = Selection::new();
        sel.replace([NodeId::intern("sel_a"), NodeId::intern("sel_b")]);
        assert_eq!(sel.common_parent(&doc), None);
        sel.replace([NodeId::intern("sel_a")]);
        assert_eq!(sel.common_parent(&doc), Some(NodeId::intern("sel_grp")));
    }
}
