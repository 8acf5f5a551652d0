//! Error types for trigon-core.

use thiserror::Error;
use trigon_geometry::GeometryError;

use crate::point::PointId;

/// Result type for trigon-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while positioning a point.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Dimension mismatch, unsupported partner count or dimension.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// A point was given itself as a partner.
    #[error("point {0} cannot be its own partner")]
    SelfPartner(PointId),

    /// The same point was listed twice as a partner.
    #[error("point {0} is listed as a partner more than once")]
    DuplicatePartner(PointId),

    /// Point configuration failed validation.
    #[error("invalid point config: {0}")]
    InvalidConfig(String),

    /// The fallback placement hit its configured wriggle limit.
    #[error("fallback placement gave up after {attempts} wriggles")]
    PlacementExhausted { attempts: usize },
}
