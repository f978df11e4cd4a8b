#![warn(missing_docs)]

//! Geometry resolution for the cubecut kernel.
//!
//! Turns [`SnapAddress`](cubecut_snap::SnapAddress) values into world
//! positions for a box of given size, origin and orientation. Corner keys
//! are placed by an [`OctantMap`]; edges interpolate between corners and
//! face addresses resolve to the mean of four corners.
//!
//! Unknown keys and malformed addresses resolve to `None`.

mod face;
mod octant;
mod pose;
mod resolver;

pub use face::{CanonicalFaceBasis, FaceFrame, FaceName, FaceResolution};
pub use octant::{OctantMap, OctantSigns};
pub use pose::{BoxPose, BoxSize, SizePatch};
pub use resolver::{EdgeResolution, GeometryResolver, LabelMap};
