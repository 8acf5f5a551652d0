//! Error types for trigon-geometry.

use thiserror::Error;

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Errors that can occur in geometry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Two coordinates being compared or combined have different lengths.
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// The apex solver only works in two dimensions.
    #[error("{dim}-dimensional targets are not supported")]
    UnsupportedDimension { dim: usize },

    /// The apex solver only works with exactly two partners.
    #[error("{count} partners not supported, expected exactly 2")]
    UnsupportedPartnerCount { count: usize },
}
