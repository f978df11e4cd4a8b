//! Error types for scene configuration and cutting.

use cubecut_topo::TopoError;
use cubecut_validate::ValidationReport;
use thiserror::Error;

/// A scene configuration that cannot describe a box.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// JSON syntax or shape error.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML syntax or shape error.
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A box length is zero, negative or not finite.
    #[error("box size must be finite and positive, got {lx} x {ly} x {lz}")]
    InvalidSize {
        /// x length.
        lx: f64,
        /// y length.
        ly: f64,
        /// z length.
        lz: f64,
    },

    /// The origin has a non-finite component.
    #[error("box origin must be finite, got {0:?}")]
    InvalidOrigin([f64; 3]),

    /// The basis vectors are not orthonormal.
    #[error("box basis is not orthonormal")]
    NonOrthonormalBasis,

    /// The octant map has no entries.
    #[error("octant map is empty")]
    EmptyOctants,

    /// Corner slot list does not match the box template.
    #[error("expected {expected} vertex keys, got {found}")]
    VertexKeyCount {
        /// Corner slots in the template.
        expected: usize,
        /// Keys supplied.
        found: usize,
    },

    /// A corner key has no octant, so it could never be resolved.
    #[error("vertex key {0:?} is not in the octant map")]
    UnknownVertexKey(String),

    /// The topology could not be built from the vertex keys.
    #[error(transparent)]
    Topology(#[from] TopoError),
}

/// Why a cut was not performed or not accepted.
#[derive(Error, Debug)]
pub enum SceneError {
    /// A cut point could not be parsed or placed on the box.
    #[error("cannot resolve cut point {0:?}")]
    Unresolved(String),

    /// Fewer than three distinct cut points.
    #[error("a cut needs three distinct points, got {0}")]
    TooFewPoints(usize),

    /// The cut engine failed.
    #[error("cut engine failed: {0}")]
    Engine(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The engine returned a piece that fails validation.
    #[error("cut result rejected: {}", .0.details.join("; "))]
    Rejected(Box<ValidationReport>),
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
