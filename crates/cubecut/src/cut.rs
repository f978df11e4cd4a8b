//! The boundary to the external cut engine.

use cubecut_math::Point3;
use cubecut_resolve::BoxPose;
use cubecut_snap::SnapAddress;
use cubecut_validate::{FaceAdjacency, FaceKind, FacePolygon, ValidationReport};

/// A resolved cut point.
#[derive(Debug, Clone, PartialEq)]
pub struct CutPoint {
    /// Canonical address.
    pub address: SnapAddress,
    /// World position.
    pub position: Point3,
}

impl CutPoint {
    /// Canonical address text, the identifier used in face loops.
    pub fn id(&self) -> String {
        self.address.to_string()
    }
}

/// Input handed to a [`CutEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct CutRequest {
    /// Box placement and size.
    pub pose: BoxPose,
    /// Distinct cut points in caller order.
    pub points: Vec<CutPoint>,
}

/// What a [`CutEngine`] returns for one cut.
#[derive(Debug, Clone)]
pub struct CutResult<P> {
    /// Solid pieces, in the engine's own representation.
    pub pieces: Vec<P>,
    /// Faces of the kept piece: clipped box faces plus the cut face, as
    /// loops of snap address text.
    pub polygons: Vec<FacePolygon>,
}

/// Computes the solids and cross-section for a plane through the cut points.
///
/// Implementations own the boolean/CSG work and reject point sets that do
/// not define a plane.
pub trait CutEngine {
    /// Solid representation.
    type Piece;
    /// Engine failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Perform the cut.
    fn cut(&mut self, request: &CutRequest) -> Result<CutResult<Self::Piece>, Self::Error>;
}

/// One side of the cut outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutSegment {
    /// Start vertex id.
    pub start: String,
    /// End vertex id.
    pub end: String,
}

/// An accepted cut.
#[derive(Debug, Clone)]
pub struct CutOutcome<P> {
    /// The resolved cut points.
    pub points: Vec<CutPoint>,
    /// Solid pieces from the engine.
    pub pieces: Vec<P>,
    /// Faces of the kept piece, with coordinates filled in.
    pub polygons: Vec<FacePolygon>,
    /// Faces sharing an edge.
    pub adjacency: Vec<FaceAdjacency>,
    /// Outline of the cut faces, in loop order.
    pub segments: Vec<CutSegment>,
    /// Validation findings for `polygons`.
    pub report: ValidationReport,
}

pub(crate) fn cut_segments(polygons: &[FacePolygon]) -> Vec<CutSegment> {
    polygons
        .iter()
        .filter(|p| p.kind == FaceKind::Cut)
        .flat_map(|p| {
            let ids = &p.vertex_ids;
            ids.iter().enumerate().map(move |(i, start)| CutSegment {
                start: start.clone(),
                end: ids[(i + 1) % ids.len()].clone(),
            })
        })
        .collect()
}
