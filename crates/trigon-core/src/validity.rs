//! Validity of a candidate spot.
//!
//! A spot is valid when it keeps its distance from every point already placed
//! this round and lies inside the configured bounds. Only points that have
//! moved earlier in the round count as occupied; later points are ignored
//! until they make their own move.

use trigon_geometry::{distance, Bounds};

use crate::config::PointConfig;
use crate::error::Result;

/// Outcome of testing a candidate spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    /// Far enough from every occupied point and in bounds
    Valid,
    /// Within the allowed closeness of an occupied point
    TooClose,
    /// Outside every bounding region
    OutOfBounds,
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }
}

/// Tests candidate spots against occupancy and bounds.
#[derive(Debug, Clone, Copy)]
pub struct ValidityGate<'a> {
    allowed_closeness: f64,
    bounds: &'a Bounds,
    occupied: &'a [&'a [f64]],
}

impl<'a> ValidityGate<'a> {
    /// Gate for a point with `config`, given the coordinates already placed.
    pub fn new(config: &'a PointConfig, occupied: &'a [&'a [f64]]) -> Self {
        Self {
            allowed_closeness: config.allowed_closeness,
            bounds: &config.bounds,
            occupied,
        }
    }

    /// Too-close is tested before bounds.
    pub fn check(&self, spot: &[f64]) -> Result<Validity> {
        if self.is_too_close(spot)? {
            return Ok(Validity::TooClose);
        }
        if !self.in_bounds(spot) {
            return Ok(Validity::OutOfBounds);
        }
        Ok(Validity::Valid)
    }

    /// Whether any occupied point is within the allowed closeness (inclusive).
    pub fn is_too_close(&self, spot: &[f64]) -> Result<bool> {
        for other in self.occupied {
            if distance(spot, other)? <= self.allowed_closeness {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether the spot lies in at least one bounding region.
    pub fn in_bounds(&self, spot: &[f64]) -> bool {
        self.bounds.contains(spot)
    }

    /// The bounds this gate checks against.
    pub fn bounds(&self) -> &'a Bounds {
        self.bounds
    }}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use trigon_geometry::GeometryError;

    fn config(closeness: f64) -> PointConfig {
        PointConfig {
            allowed_closeness: closeness,
            ..PointConfig::default()
        }
    }

    #[test]
    fn exactly_at_closeness_is_too_close() {
        let config = config(5.0);
        let occupied: [&[f64]; 1] = [&[50.0, 50.0]];
        let gate = ValidityGate::new(&config, &occupied);

        assert_eq!(gate.check(&[55.0, 50.0]).unwrap(), Validity::TooClose);
        assert_eq!(gate.check(&[55.0 + 1e-9, 50.0]).unwrap(), Validity::Valid);
    }

    #[test]
    fn nothing_occupied_only_checks_bounds() {
        let config = config(5.0);
        let gate = ValidityGate::new(&config, &[]);

        assert_eq!(gate.check(&[50.0, 50.0]).unwrap(), Validity::Valid);
        assert_eq!(gate.check(&[150.0, 50.0]).unwrap(), Validity::OutOfBounds);
    }

    #[test]
    fn boundary_corner_is_in_bounds() {
        let config = config(0.0);
        let gate = ValidityGate::new(&config, &[]);

        assert!(gate.check(&[100.0, 100.0]).unwrap().is_valid());
        assert!(gate.check(&[0.0, 0.0]).unwrap().is_valid());
    }

    #[test]
    fn too_close_reported_before_out_of_bounds() {
        let config = config(5.0);
        let occupied: [&[f64]; 1] = [&[101.0, 50.0]];
        let gate = ValidityGate::new(&config, &occupied);

        assert_eq!(gate.check(&[102.0, 50.0]).unwrap(), Validity::TooClose);
    }

    #[test]
    fn mismatched_occupied_dimension_is_an_error() {
        let config = config(5.0);
        let occupied: [&[f64]; 1] = [&[1.0, 2.0, 3.0]];
        let gate = ValidityGate::new(&config, &occupied);

        assert_eq!(
            gate.check(&[50.0, 50.0]),
            Err(Error::Geometry(GeometryError::DimensionMismatch {
                left: 2,
                right: 3
            }))
        );
    }
}
