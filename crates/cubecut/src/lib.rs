#![warn(missing_docs)]

//! Symbolic box-section kernel.
//!
//! Points on a box are named by [`SnapAddress`] (a corner, an exact ratio
//! along an edge, or a face center) instead of by coordinates. A
//! [`BoxScene`] pairs the box [`TopologyGraph`] with a [`GeometryResolver`]
//! for its size and pose, hands resolved cut points to an external
//! [`CutEngine`], and validates what comes back.
//!
//! # Example
//!
//! ```
//! use cubecut::{BoxScene, BoxSize, Point3};
//!
//! let scene = BoxScene::standard(BoxSize::cube(10.0).unwrap());
//! let p = scene.resolver().resolve_text("E:4-0@7/10").unwrap();
//! assert_eq!(p, Point3::new(-5.0, -2.0, 5.0));
//! assert_eq!(cubecut::canonicalize("E:4-0@7/10").as_deref(), Some("E:0-4@3/10"));
//! ```

pub use cubecut_math;
pub use cubecut_resolve;
pub use cubecut_snap;
pub use cubecut_topo;
pub use cubecut_validate;

pub use cubecut_math::{Basis3, Point3, Tolerance, Vec3};
pub use cubecut_resolve::{BoxPose, BoxSize, FaceName, GeometryResolver, OctantMap, SizePatch};
pub use cubecut_snap::{
    canonicalize, normalize, parse, serialize, FaceKey, Ratio, SnapAddress, VertexKey,
};
pub use cubecut_topo::{BoxTemplate, LabelMap, TopologyGraph};
pub use cubecut_validate::{
    validate_raw, validate_structure, FaceKind, FacePolygon, RawMesh, ValidationReport,
};

mod config;
mod cut;
mod error;
mod scene;

pub use config::{BasisConfig, SceneConfig, SizeConfig};
pub use cut::{CutEngine, CutOutcome, CutPoint, CutRequest, CutResult, CutSegment};
pub use error::{ConfigError, Result, SceneError};
pub use scene::BoxScene;
