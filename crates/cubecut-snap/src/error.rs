//! Error types for snap address parsing.

use thiserror::Error;

/// Why a piece of address text or an address value was rejected.
///
/// The public `parse`/`normalize` surface reports failure as `None`; this
/// type backs the `FromStr` impl and serde for callers that want a reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapError {
    /// Text does not match any of the `V:` / `E:` / `F:` grammars.
    #[error("malformed snap address: {0:?}")]
    Malformed(String),

    /// A vertex or face key is empty or contains a reserved character.
    #[error("invalid key {0:?}: keys must be non-empty and free of ':', '-', '@', '/'")]
    InvalidKey(String),

    /// Ratio text is not `<uint>/<uint>`.
    #[error("invalid ratio {0:?}")]
    InvalidRatio(String),

    /// Ratio denominator is zero.
    #[error("ratio denominator is zero")]
    ZeroDenominator,

    /// Ratio lies outside `[0, 1]` once its sign is fixed.
    #[error("ratio {numerator}/{denominator} lies outside the edge")]
    RatioOutOfRange {
        /// Numerator after sign normalization.
        numerator: i64,
        /// Denominator after sign normalization.
        denominator: i64,
    },

    /// Edge whose two endpoints are the same vertex.
    #[error("edge endpoints are both {0:?}")]
    SelfEdge(String),
}

/// Result type for snap address operations.
pub type Result<T> = std::result::Result<T, SnapError>;
