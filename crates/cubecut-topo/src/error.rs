//! Error types for topology construction.

use std::fmt;

use thiserror::Error;

/// A template entry the builder could not use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkippedEntry {
    /// A slot's vertex key repeats an earlier slot's key.
    DuplicateVertexKey {
        /// Slot whose key was dropped.
        slot: usize,
        /// The repeated key.
        key: String,
    },
    /// An edge references a slot with no vertex.
    EdgeUnknownSlot {
        /// Template edge index.
        edge: usize,
        /// The missing slot.
        slot: usize,
    },
    /// An edge joins a slot to itself.
    DegenerateEdge {
        /// Template edge index.
        edge: usize,
    },
    /// An edge repeats an earlier edge's endpoints.
    DuplicateEdge {
        /// Template edge index.
        edge: usize,
    },
    /// A face references a slot with no vertex.
    FaceUnknownSlot {
        /// Template face index.
        face: usize,
        /// The missing slot.
        slot: usize,
    },
    /// Two consecutive face corners are not joined by any template edge.
    FaceMissingEdge {
        /// Template face index.
        face: usize,
        /// The unjoined slots.
        slots: [usize; 2],
    },
}

impl fmt::Display for SkippedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateVertexKey { slot, key } => {
                write!(f, "slot {slot}: vertex key {key:?} already used")
            }
            Self::EdgeUnknownSlot { edge, slot } => {
                write!(f, "edge #{edge}: unknown slot {slot}")
            }
            Self::DegenerateEdge { edge } => write!(f, "edge #{edge}: both ends on one slot"),
            Self::DuplicateEdge { edge } => write!(f, "edge #{edge}: duplicate of an earlier edge"),
            Self::FaceUnknownSlot { face, slot } => {
                write!(f, "face #{face}: unknown slot {slot}")
            }
            Self::FaceMissingEdge { face, slots } => {
                write!(f, "face #{face}: no edge between slots {} and {}", slots[0], slots[1])
            }
        }
    }
}

/// Errors from strict topology construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopoError {
    /// The template did not map cleanly onto the vertex keys.
    #[error("box template has {} invalid entr{}", skipped.len(), if skipped.len() == 1 { "y" } else { "ies" })]
    InvalidTemplate {
        /// Every entry the best-effort builder would have skipped.
        skipped: Vec<SkippedEntry>,
    },
}
