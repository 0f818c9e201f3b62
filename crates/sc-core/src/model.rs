//! Scene-graph document model.
//!
//! The document is a tree of visual elements stored in a stable directed
//! graph: nodes are elements (shapes, text, splitters, grids, groups) and
//! edges are parent→child containment. Gestures edit nodes in place for
//! live preview; committed edits go through the command stack in the
//! editor crate.

use crate::id::NodeId;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Axis of a split container: `Horizontal` lays panes side by side,
/// `Vertical` stacks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One grid column or row. `size` is the current extent; `min`/`max`
/// bound what a resize gesture may set it to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub size: f64,
    pub min: f64,
    pub max: f64,
}

impl Track {
    pub fn fixed(size: f64) -> Self {
        Self {
            size,
            min: 0.0,
            max: f64::INFINITY,
        }
    }

    pub fn bounded(size: f64, min: f64, max: f64) -> Self {
        Self { size, min, max }
    }
}

/// The node kinds in the scene tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NodeKind {
    /// Root of the document. Fills the viewport.
    Root,

    /// Container whose bounds are the union of its children.
    Group,

    /// Rectangle.
    Rect { width: f64, height: f64 },

    /// Ellipse / circle.
    Ellipse { rx: f64, ry: f64 },

    /// Text label. Intrinsic size is estimated from content.
    Text { content: String },

    /// Split container. Children are panes separated by normalized
    /// dividers in `(0, 1)`, sorted ascending. `dividers.len()` is one
    /// less than the pane count.
    Split {
        orientation: Orientation,
        width: f64,
        height: f64,
        dividers: Vec<f64>,
    },

    /// Grid container. Children carry a `Cell` constraint naming their
    /// column/row. Size is the sum of the tracks.
    Grid {
        columns: Vec<Track>,
        rows: Vec<Track>,
    },
}

/// Positioning of a node within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    /// Parent-relative pin (drag-placed nodes).
    Position { x: f64, y: f64 },
    /// Grid cell placement.
    Cell { col: usize, row: usize },
}

/// A single node in the scene tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub constraints: SmallVec<[Constraint; 2]>,
}

impl SceneNode {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            constraints: SmallVec::new(),
        }
    }

    /// Convenience: node pinned at a parent-relative position.
    pub fn at(id: NodeId, kind: NodeKind, x: f64, y: f64) -> Self {
        let mut node = Self::new(id, kind);
        node.constraints.push(Constraint::Position { x, y });
        node
    }

    /// The `Position` constraint, if any.
    pub fn position(&self) -> Option<(f64, f64)> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::Position { x, y } => Some((*x, *y)),
            _ => None,
        })
    }

    /// The `Cell` constraint, if any.
    pub fn cell(&self) -> Option<(usize, usize)> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::Cell { col, row } => Some((*col, *row)),
            _ => None,
        })
    }
}

/// The complete document — a tree of `SceneNode` values.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    /// The underlying directed graph. Edges go parent → child.
    pub graph: StableDiGraph<SceneNode, ()>,

    /// The root node index.
    pub root: NodeIndex,

    /// Index from NodeId → NodeIndex for fast lookup.
    pub id_index: HashMap<NodeId, NodeIndex>,
}

impl SceneGraph {
    /// Create an empty scene graph with a root node.
    #[must_use]
    pub fn new() -> Self {
        let mut graph = StableDiGraph::new();
        let root_node = SceneNode::new(NodeId::intern("root"), NodeKind::Root);
        let root = graph.add_node(root_node);

        let mut id_index = HashMap::new();
        id_index.insert(NodeId::intern("root"), root);

        Self {
            graph,
            root,
            id_index,
        }
    }

    /// Add a node as a child of `parent`. Returns the new node's index.
    pub fn add_node(&mut self, parent: NodeIndex, node: SceneNode) -> NodeIndex {
        let id = node.id;
        let idx = self.graph.add_node(node);
        self.graph.add_edge(parent, idx, ());
        self.id_index.insert(id, idx);
        idx
    }

    /// Remove a node, keeping `id_index` synchronized.
    pub fn remove_node(&mut self, idx: NodeIndex) -> Option<SceneNode> {
        let removed = self.graph.remove_node(idx);
        if let Some(removed_node) = &removed {
            self.id_index.remove(&removed_node.id);
        }
        removed
    }

    /// Look up a node by id.
    pub fn get_by_id(&self, id: NodeId) -> Option<&SceneNode> {
        self.id_index.get(&id).map(|idx| &self.graph[*idx])
    }

    /// Look up a node mutably by id.
    pub fn get_by_id_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.id_index
            .get(&id)
            .copied()
            .map(|idx| &mut self.graph[idx])
    }

    /// Get the index for a NodeId.
    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    /// Get the parent index of a node.
    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .next()
    }

    /// Children of a node in document order.
    ///
    /// Sorts by `NodeIndex` so the result is deterministic regardless of
    /// how `petgraph` iterates its adjacency list on different targets.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .collect();
        children.sort();
        children
    }

    /// Whether `ancestor` lies on the parent chain of `id` (strictly above it).
    pub fn is_ancestor_of(&self, ancestor: NodeId, id: NodeId) -> bool {
        let Some(anc_idx) = self.index_of(ancestor) else {
            return false;
        };
        let Some(mut idx) = self.index_of(id) else {
            return false;
        };
        while let Some(parent) = self.parent(idx) {
            if parent == anc_idx {
                return true;
            }
            idx = parent;
        }
        false
    }

    /// The single parent shared by all of `ids`, if there is one.
    ///
    /// Relocation and drag export only make sense when every member of a
    /// selection lives under the same parent; everything else queries this
    /// instead of special-casing.
    pub fn common_parent(&self, ids: &[NodeId]) -> Option<NodeId> {
        let mut iter = ids.iter();
        let first = self.index_of(*iter.next()?)?;
        let parent = self.parent(first)?;
        for id in iter {
            let idx = self.index_of(*id)?;
            if self.parent(idx) != Some(parent) {
                return None;
            }
        }
        Some(self.graph[parent].id)
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
