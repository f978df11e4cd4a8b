//! Validation findings shared by both entry points.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Euler characteristic of a closed genus-0 surface.
pub const EXPECTED_EULER: i64 = 2;

/// Outcome of validating a mesh.
///
/// Defects are reported as flags and counts; `details` holds one
/// human-readable line per finding for logs and debug views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Every undirected edge is shared by exactly two faces.
    pub is_manifold: bool,
    /// Every directed edge appears once and its reverse is present.
    /// `None` when orientation was not evaluated (raw meshes).
    pub is_oriented: Option<bool>,
    /// Some face has a zero-area leading triangle.
    pub has_degenerate_faces: bool,
    /// Some face has a vertex off the plane of its first three.
    pub has_non_planar_faces: bool,
    /// `V - E + F`.
    pub euler_characteristic: i64,
    /// Distinct vertices.
    pub vertex_count: usize,
    /// Distinct undirected edges.
    pub edge_count: usize,
    /// Faces counted in the Euler characteristic.
    pub face_count: usize,
    /// Edges used by exactly one face.
    pub open_edges: usize,
    /// Edges used by more than two faces.
    pub overshared_edges: usize,
    /// Orientation violations found.
    pub orientation_errors: usize,
    /// Degenerate triangles (raw) or faces (structure).
    pub degenerate_count: usize,
    /// Non-planar faces.
    pub non_planar_count: usize,
    /// Vertex entries that repeat an earlier position.
    pub duplicate_vertices: usize,
    /// Vertices not used by any face; not evaluated, always zero.
    pub isolated_vertices: usize,
    /// Diagnostic lines.
    pub details: Vec<String>,
}

impl ValidationReport {
    /// True for a closed, consistently oriented, genus-0 surface with no
    /// degenerate or non-planar faces.
    pub fn is_sound_solid(&self) -> bool {
        self.is_manifold
            && self.is_oriented != Some(false)
            && self.euler_characteristic == EXPECTED_EULER
            && !self.has_degenerate_faces
            && !self.has_non_planar_faces
    }
}

/// Counts how many times each undirected edge is used.
#[derive(Debug)]
pub(crate) struct EdgeTally<K> {
    counts: HashMap<(K, K), usize>,
}

impl<K: Clone + Eq + Hash + Ord> EdgeTally<K> {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    pub fn add(&mut self, a: &K, b: &K) {
        let key = if a <= b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        };
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// `(open, overshared)` edge counts.
    pub fn defects(&self) -> (usize, usize) {
        self.counts
            .values()
            .fold((0, 0), |(open, over), &count| match count {
                1 => (open + 1, over),
                2 => (open, over),
                _ => (open, over + 1),
            })
    }
}

pub(crate) fn euler(v: usize, e: usize, f: usize) -> i64 {
    v as i64 - e as i64 + f as i64
}
