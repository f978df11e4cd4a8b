#![warn(missing_docs)]

//! Box topology for the cubecut kernel.
//!
//! Builds the vertex/edge/face adjacency graph of a box from a fixed
//! combinatorial template whose corner slots are mapped onto caller-chosen
//! vertex keys. Entity handles are slotmap keys; iteration follows template
//! order.

mod error;
mod graph;
mod template;

pub use error::{SkippedEntry, TopoError};
pub use graph::{Edge, EdgeSnapPoint, Face, LabelMap, SlotLabelMap, TopologyGraph, Vertex};
pub use template::{BoxTemplate, BOX_EDGES, BOX_FACES};

slotmap::new_key_type! {
    /// Handle to a vertex in a [`TopologyGraph`].
    pub struct VertexId;
    /// Handle to an edge in a [`TopologyGraph`].
    pub struct EdgeId;
    /// Handle to a face in a [`TopologyGraph`].
    pub struct FaceId;
}
