//! Validation of raw coordinate buffers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ValidateError};
use crate::report::{euler, EdgeTally, ValidationReport, EXPECTED_EULER};

/// Decimal digits kept when matching raw vertex positions.
pub const RAW_KEY_DECIMALS: i32 = 6;

/// Triangle mesh as flat buffers, the way renderers hold it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMesh {
    /// `x, y, z` per vertex.
    pub positions: Vec<f64>,
    /// Three vertex indices per triangle. Without indices, every three
    /// consecutive vertices form a triangle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<Vec<u32>>,
}

impl RawMesh {
    /// Non-indexed mesh.
    pub fn new(positions: Vec<f64>) -> Self {
        Self {
            positions,
            indices: None,
        }
    }

    /// Indexed mesh.
    pub fn indexed(positions: Vec<f64>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices: Some(indices),
        }
    }

    /// Number of complete vertices in `positions`.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.vertex_count() / 3,
        }
    }

    fn triangle(&self, t: usize) -> [usize; 3] {
        match &self.indices {
            Some(indices) => [
                indices[3 * t] as usize,
                indices[3 * t + 1] as usize,
                indices[3 * t + 2] as usize,
            ],
            None => [3 * t, 3 * t + 1, 3 * t + 2],
        }
    }
}

/// Position quantized to [`RAW_KEY_DECIMALS`] digits.
///
/// Components are the bit patterns of the rounded, scaled coordinates, so
/// magnitudes past the `i64` range stay distinct and every NaN shares one
/// key of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct VertexKey([u64; 3]);

impl VertexKey {
    fn of(mesh: &RawMesh, vertex: usize) -> Option<Self> {
        let p = mesh.positions.get(3 * vertex..3 * vertex + 3)?;
        Some(Self([quantize(p[0]), quantize(p[1]), quantize(p[2])]))
    }

    fn is_finite(&self) -> bool {
        self.0.iter().all(|&bits| f64::from_bits(bits).is_finite())
    }
}

fn quantize(c: f64) -> u64 {
    let q = (c * 10f64.powi(RAW_KEY_DECIMALS)).round();
    if q.is_nan() {
        f64::NAN.to_bits()
    } else if q == 0.0 {
        // -0.0 and 0.0
        0
    } else {
        q.to_bits()
    }
}

/// Check a triangle mesh by coordinates.
///
/// Vertices closer than the key precision are the same vertex. Triangles
/// with repeated corners, by index or by position, are degenerate and left
/// out of the edge and face counts; so are triangles indexing past the end
/// of `positions`. Orientation is not evaluated.
///
/// # Errors
///
/// [`ValidateError::MissingPositions`] if the mesh has no vertices.
pub fn validate_raw(mesh: &RawMesh) -> Result<ValidationReport> {
    let vertex_count = mesh.vertex_count();
    if vertex_count == 0 {
        return Err(ValidateError::MissingPositions);
    }

    let mut unique = HashSet::with_capacity(vertex_count);
    let mut duplicate_vertices = 0;
    let mut non_finite = 0;
    for v in 0..vertex_count {
        if let Some(key) = VertexKey::of(mesh, v) {
            if !key.is_finite() {
                non_finite += 1;
            }
            if !unique.insert(key) {
                duplicate_vertices += 1;
            }
        }
    }

    let triangle_count = mesh.triangle_count();
    let mut edges = EdgeTally::new();
    let mut degenerate = 0;
    let mut out_of_range = 0;
    for t in 0..triangle_count {
        let [a, b, c] = mesh.triangle(t);
        if a == b || b == c || c == a {
            degenerate += 1;
            continue;
        }
        let (Some(ka), Some(kb), Some(kc)) = (
            VertexKey::of(mesh, a),
            VertexKey::of(mesh, b),
            VertexKey::of(mesh, c),
        ) else {
            degenerate += 1;
            out_of_range += 1;
            continue;
        };
        if ka == kb || kb == kc || kc == ka {
            degenerate += 1;
            continue;
        }
        edges.add(&ka, &kb);
        edges.add(&kb, &kc);
        edges.add(&kc, &ka);
    }

    let (open_edges, overshared_edges) = edges.defects();
    let v = unique.len();
    let e = edges.len();
    let f = triangle_count - degenerate;
    let euler_characteristic = euler(v, e, f);

    let mut details = vec![
        format!("Vertices: {v}, Edges: {e}, Faces: {f}"),
        format!(
            "Euler Characteristic: {euler_characteristic} (Expected: {EXPECTED_EULER} for simple closed mesh)"
        ),
        format!("Open Edges (Boundaries): {open_edges}"),
        format!("Degenerate Triangles: {degenerate}"),
        format!("Duplicate Vertices: {duplicate_vertices}"),
    ];
    if overshared_edges > 0 {
        details.push(format!("Non-Manifold Edges (>2 faces): {overshared_edges}"));
    }
    if out_of_range > 0 {
        details.push(format!("Triangles Indexing Missing Vertices: {out_of_range}"));
    }
    if non_finite > 0 {
        details.push(format!("Non-Finite Vertices: {non_finite}"));
    }
    if mesh.positions.len() % 3 != 0 {
        details.push(format!(
            "Trailing Position Components Ignored: {}",
            mesh.positions.len() % 3
        ));
    }

    let report = ValidationReport {
        is_manifold: open_edges == 0 && overshared_edges == 0,
        is_oriented: None,
        has_degenerate_faces: degenerate > 0,
        has_non_planar_faces: false,
        euler_characteristic,
        vertex_count: v,
        edge_count: e,
        face_count: f,
        open_edges,
        overshared_edges,
        orientation_errors: 0,
        degenerate_count: degenerate,
        non_planar_count: 0,
        duplicate_vertices,
        isolated_vertices: 0,
        details,
    };
    debug!(
        vertices = v,
        edges = e,
        faces = f,
        euler = euler_characteristic,
        manifold = report.is_manifold,
        "validated raw mesh"
    );
    Ok(report)
}
