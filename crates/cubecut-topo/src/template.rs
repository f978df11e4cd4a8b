//! Combinatorial box template.
//!
//! Corner slots 0-7 follow the standard octant layout (`-` / `+` per axis):
//! ```text
//!       7------6          y
//!      /|     /|          |
//!     4------5 |          +---x
//!     | 3----|-2         /
//!     |/     |/         z
//!     0------1
//! ```
//! Slots 0,1,4,5 sit at `+z`, slots 4-7 at `+y`. Face loops are wound so
//! that `(v1 - v0) x (v2 - v0)` points out of the box.

/// The 12 box edges as slot pairs.
pub const BOX_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// The 6 box faces as outward-wound slot loops.
pub const BOX_FACES: [[usize; 4]; 6] = [
    [0, 3, 2, 1],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [2, 3, 7, 6],
    [1, 2, 6, 5],
    [0, 4, 7, 3],
];

/// Edge and face definitions in terms of corner slots.
///
/// The graph builder maps slots to caller-chosen vertex keys, so one
/// template serves every labeling of the box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxTemplate {
    /// Edges as slot pairs, in output order.
    pub edges: Vec<[usize; 2]>,
    /// Faces as slot loops, in output order.
    pub faces: Vec<[usize; 4]>,
}

impl BoxTemplate {
    /// The standard 8-corner, 12-edge, 6-face box.
    pub fn standard() -> Self {
        Self {
            edges: BOX_EDGES.to_vec(),
            faces: BOX_FACES.to_vec(),
        }
    }

    /// Number of corner slots referenced, one past the highest slot.
    pub fn vertex_count(&self) -> usize {
        let edge_slots = self.edges.iter().flatten();
        let face_slots = self.faces.iter().flatten();
        edge_slots.chain(face_slots).max().map_or(0, |&s| s + 1)
    }
}

impl Default for BoxTemplate {
    fn default() -> Self {
        Self::standard()
    }
}
