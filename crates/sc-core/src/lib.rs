pub mod geometry;
pub mod id;
pub mod layout;
pub mod model;
pub mod property;

pub use geometry::{CardinalPoint, canvas_point, constrain_aspect, resize_rect};
pub use id::NodeId;
pub use layout::{Viewport, resolve_layout};
pub use model::*;
pub use property::{PropertyId, PropertyValue, node_exposes, properties_of};

// Re-export petgraph types so downstream crates don't need a direct dependency
pub use petgraph::graph::NodeIndex;
