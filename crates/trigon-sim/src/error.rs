//! Error types for trigon-sim.

use thiserror::Error;
use trigon_core::PointId;

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or running a simulation.
#[derive(Debug, Error)]
pub enum Error {
    /// A point failed to move or to be configured
    #[error(transparent)]
    Core(#[from] trigon_core::Error),

    /// A partner link points outside the collection
    #[error("unknown point: {0}")]
    UnknownPoint(PointId),

    /// Simulation configuration failed validation
    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),

    /// Config file could not be parsed
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
