//! Error types for mesh validation.

use thiserror::Error;

/// Input that cannot be validated at all.
///
/// Topological and geometric defects are findings, reported through
/// [`ValidationReport`](crate::ValidationReport), never errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidateError {
    /// The mesh carries no vertex positions.
    #[error("mesh has no position data")]
    MissingPositions,
}

/// Result type for validation.
pub type Result<T> = std::result::Result<T, ValidateError>;
