#![warn(missing_docs)]

//! Symbolic point addresses for the cubecut kernel.
//!
//! A [`SnapAddress`] names a point on a box by topology instead of by
//! coordinates: a corner, an exact ratio along an edge, or a face center.
//! Every address has one canonical form, so two texts that denote the same
//! point canonicalize to identical values.
//!
//! Malformed input never panics or errors through the main surface;
//! [`parse`], [`normalize`] and [`canonicalize`] return `None` and leave the
//! decision to the caller.
//!
//! # Example
//!
//! ```
//! use cubecut_snap::canonicalize;
//!
//! assert_eq!(canonicalize("E:2-1@3/10").as_deref(), Some("E:1-2@7/10"));
//! assert_eq!(canonicalize("E:0-1@0/4").as_deref(), Some("V:0"));
//! assert_eq!(canonicalize("E:0-1"), None);
//! ```

mod address;
mod error;
mod key;
mod ratio;

pub use address::{canonicalize, normalize, parse, serialize, SnapAddress, SnapKind};
pub use error::{Result, SnapError};
pub use key::{FaceKey, VertexKey};
pub use ratio::Ratio;
