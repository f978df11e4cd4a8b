#![warn(missing_docs)]

//! Mesh validation for cubecut cut results.
//!
//! Two entry points share one report shape:
//!
//! - [`validate_raw`] checks a triangle mesh given as coordinate buffers,
//!   welding vertices by rounded position.
//! - [`validate_structure`] checks face loops of vertex identifiers, adding
//!   an orientation check and, with a [`PointResolver`], degenerate and
//!   non-planar face checks.
//!
//! Both count manifold defects and the Euler characteristic. Raw validation
//! leaves degenerate triangles out of the face count; structural
//! validation counts every face passed in.

mod adjacency;
mod error;
mod raw;
mod report;
mod structure;

pub use adjacency::{face_adjacency, FaceAdjacency, DEFAULT_ADJACENCY_EPSILON};
pub use error::{Result, ValidateError};
pub use raw::{validate_raw, RawMesh, RAW_KEY_DECIMALS};
pub use report::{ValidationReport, EXPECTED_EULER};
pub use structure::{
    validate_structure, FaceKind, FacePolygon, PointResolver, DEGENERATE_TOLERANCE,
    PLANARITY_TOLERANCE,
};
