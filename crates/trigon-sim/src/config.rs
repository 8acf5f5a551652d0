//! Simulation configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use trigon_core::PointConfig;
use trigon_geometry::SOLVER_DIMENSIONS;

use crate::error::{Error, Result};

/// Minimum number of points that lets every point have two distinct partners.
pub const MIN_POINTS: usize = 3;

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the single generator driving the run
    pub seed: u64,
    /// Number of points to create
    pub point_count: usize,
    /// Dimension of every coordinate
    pub dim: usize,
    /// Allowed deviation for a point to count as converged
    pub tolerance: f64,
    /// Record snapshots and report repeated configurations
    pub detect_loops: bool,
    /// Stop `run` when a loop is detected
    pub stop_on_loop: bool,
    /// Parameters shared by every point
    pub point: PointConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 8,
            point_count: 5,
            dim: SOLVER_DIMENSIONS,
            tolerance: 0.5,
            detect_loops: true,
            stop_on_loop: true,
            point: PointConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parse from JSON text.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.point_count < MIN_POINTS {
            return Err(Error::InvalidConfig(format!(
                "need at least {MIN_POINTS} points for two distinct partners each, got {}",
                self.point_count
            )));
        }
        if self.dim != SOLVER_DIMENSIONS {
            return Err(Error::InvalidConfig(format!(
                "only {SOLVER_DIMENSIONS}-dimensional fields are supported, got {}",
                self.dim
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }
        self.point.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_reference_run() {
        let config = SimulationConfig::default();
        assert_eq!(config.seed, 8);
        assert_eq!(config.point_count, 5);
        assert_eq!(config.tolerance, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = SimulationConfig::from_json(
            r#"{ "seed": 3, "point_count": 7, "point": { "step": 1.5 } }"#,
        )
        .unwrap();

        assert_eq!(config.seed, 3);
        assert_eq!(config.point_count, 7);
        assert_eq!(config.point.step, 1.5);
        assert_eq!(config.point.allowed_closeness, 7.5);
        assert_eq!(config.tolerance, 0.5);
    }

    #[test]
    fn json_bounds_parse() {
        let config = SimulationConfig::from_json(
            r#"{
                "point": {
                    "bounds": [
                        [ { "side": "at_least", "boundary": [0, 0] },
                          { "side": "at_most", "boundary": [50, 50] } ]
                    ]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.point.bounds.len(), 1);
        assert!(config.point.bounds.contains(&[50.0, 50.0]));
        assert!(!config.point.bounds.contains(&[60.0, 50.0]));
    }

    #[test]
    fn too_few_points_rejected() {
        let config = SimulationConfig {
            point_count: 2,
            ..SimulationConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn three_dimensions_rejected() {
        let config = SimulationConfig {
            dim: 3,
            ..SimulationConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            SimulationConfig::from_json("{ not json"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn invalid_point_config_surfaces() {
        assert!(matches!(
            SimulationConfig::from_json(r#"{ "point": { "flip_triangle_rate": 2.0 } }"#),
            Err(Error::Core(trigon_core::Error::InvalidConfig(_)))
        ));
    }
}
