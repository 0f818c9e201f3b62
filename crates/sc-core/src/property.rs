//! Per-kind property descriptors and generic get/set.
//!
//! Gestures and edit commands address node attributes through
//! `PropertyId` instead of matching on `NodeKind` themselves, so the
//! same commit path serves rectangles, splits, and grid tracks alike.

use crate::model::{Constraint, NodeKind, SceneNode};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// An editable attribute of a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyId {
    /// Parent-relative x position.
    X,
    /// Parent-relative y position.
    Y,
    Width,
    Height,
    /// Normalized divider positions of a `Split`.
    Dividers,
    /// Size of grid column `i`.
    ColumnWidth(usize),
    /// Size of grid row `i`.
    RowHeight(usize),
}

/// A property value. Equality is exact — commands compare the captured
/// live value against the pre-gesture value bit for bit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Float(f64),
    Floats(Vec<f64>),
}

impl PropertyValue {
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Floats(_) => None,
        }
    }

    pub fn as_floats(&self) -> Option<&[f64]> {
        match self {
            Self::Floats(v) => Some(v),
            Self::Float(_) => None,
        }
    }
}

/// The editable attribute set for a node kind.
///
/// This is the single source of truth for what a node exposes: gestures
/// consult it to build edit commands, and the get/set paths below refuse
/// anything outside it.
pub fn properties_of(kind: &NodeKind) -> SmallVec<[PropertyId; 6]> {
    use PropertyId::*;
    match kind {
        NodeKind::Root => SmallVec::new(),
        NodeKind::Group | NodeKind::Text { .. } => SmallVec::from_slice(&[X, Y]),
        NodeKind::Rect { .. } | NodeKind::Ellipse { .. } => {
            SmallVec::from_slice(&[X, Y, Width, Height])
        }
        NodeKind::Split { .. } => SmallVec::from_slice(&[X, Y, Width, Height, Dividers]),
        NodeKind::Grid { columns, rows } => {
            let mut props: SmallVec<[PropertyId; 6]> = SmallVec::from_slice(&[X, Y]);
            props.extend((0..columns.len()).map(ColumnWidth));
            props.extend((0..rows.len()).map(RowHeight));
            props
        }
    }
}

impl SceneNode {
    /// Read a property. `None` if this kind does not expose it.
    pub fn property(&self, prop: PropertyId) -> Option<PropertyValue> {
        if !node_exposes(self, prop) {
            return None;
        }
        match prop {
            PropertyId::X => Some(PropertyValue::Float(self.position().map_or(0.0, |p| p.0))),
            PropertyId::Y => Some(PropertyValue::Float(self.position().map_or(0.0, |p| p.1))),
            PropertyId::Width => match &self.kind {
                NodeKind::Rect { width, .. } | NodeKind::Split { width, .. } => {
                    Some(PropertyValue::Float(*width))
                }
                NodeKind::Ellipse { rx, .. } => Some(PropertyValue::Float(rx * 2.0)),
                _ => None,
            },
            PropertyId::Height => match &self.kind {
                NodeKind::Rect { height, .. } | NodeKind::Split { height, .. } => {
                    Some(PropertyValue::Float(*height))
                }
                NodeKind::Ellipse { ry, .. } => Some(PropertyValue::Float(ry * 2.0)),
                _ => None,
            },
            PropertyId::Dividers => match &self.kind {
                NodeKind::Split { dividers, .. } => Some(PropertyValue::Floats(dividers.clone())),
                _ => None,
            },
            PropertyId::ColumnWidth(i) => match &self.kind {
                NodeKind::Grid { columns, .. } => {
                    columns.get(i).map(|t| PropertyValue::Float(t.size))
                }
                _ => None,
            },
            PropertyId::RowHeight(i) => match &self.kind {
                NodeKind::Grid { rows, .. } => rows.get(i).map(|t| PropertyValue::Float(t.size)),
                _ => None,
            },
        }
    }

    /// Write a property. Returns false if the kind does not expose it or
    /// the value shape does not match.
    pub fn set_property(&mut self, prop: PropertyId, value: &PropertyValue) -> bool {
        if !node_exposes(self, prop) {
            return false;
        }
        match prop {
            PropertyId::X => {
                let Some(v) = value.as_float() else {
                    return false;
                };
                self.set_position_component(v, true);
                true
            }
            PropertyId::Y => {
                let Some(v) = value.as_float() else {
                    return false;
                };
                self.set_position_component(v, false);
                true
            }
            PropertyId::Width => {
                let Some(v) = value.as_float() else {
                    return false;
                };
                match &mut self.kind {
                    NodeKind::Rect { width, .. } | NodeKind::Split { width, .. } => {
                        *width = v;
                        true
                    }
                    NodeKind::Ellipse { rx, .. } => {
                        *rx = v / 2.0;
                        true
                    }
                    _ => false,
                }
            }
            PropertyId::Height => {
                let Some(v) = value.as_float() else {
                    return false;
                };
                match &mut self.kind {
                    NodeKind::Rect { height, .. } | NodeKind::Split { height, .. } => {
                        *height = v;
                        true
                    }
                    NodeKind::Ellipse { ry, .. } => {
                        *ry = v / 2.0;
                        true
                    }
                    _ => false,
                }
            }
            PropertyId::Dividers => {
                let Some(v) = value.as_floats() else {
                    return false;
                };
                match &mut self.kind {
                    NodeKind::Split { dividers, .. } => {
                        *dividers = v.to_vec();
                        true
                    }
                    _ => false,
                }
            }
            PropertyId::ColumnWidth(i) => {
                let Some(v) = value.as_float() else {
                    return false;
                };
                match &mut self.kind {
                    NodeKind::Grid { columns, .. } if i < columns.len() => {
                        columns[i].size = v;
                        true
                    }
                    _ => false,
                }
            }
            PropertyId::RowHeight(i) => {
                let Some(v) = value.as_float() else {
                    return false;
                };
                match &mut self.kind {
                    NodeKind::Grid { rows, .. } if i < rows.len() => {
                        rows[i].size = v;
                        true
                    }
                    _ => false,
                }
            }
        }
    }

    fn set_position_component(&mut self, v: f64, is_x: bool) {
        for c in &mut self.constraints {
            if let Constraint::Position { x, y } = c {
                if is_x {
                    *x = v;
                } else {
                    *y = v;
                }
                return;
            }
        }
        let (x, y) = if is_x { (v, 0.0) } else { (0.0, v) };
        self.constraints.push(Constraint::Position { x, y });
    }
}

/// Whether a node's kind exposes the given property.
pub fn node_exposes(node: &SceneNode, prop: PropertyId) -> bool {
    properties_of(&node.kind).contains(&prop)
}
