//! Per-point parameters.

use trigon_geometry::Bounds;

use crate::error::{Error, Result};

/// Default bound on the iterative fix before falling back to random placement.
pub const DEFAULT_MAX_FIX_DEPTH: usize = 1000;

/// Immutable parameters fixed when a point is constructed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PointConfig {
    /// Distance travelled towards the target per round
    pub step: f64,
    /// Upper bound of the extra `Uniform(0, stepping_error)` added to `step`
    pub stepping_error: f64,
    /// Per-axis positional noise `Uniform(-error_radius, error_radius)`
    pub error_radius: f64,
    /// Probability of switching triangle side at the start of a move
    pub flip_triangle_rate: f64,
    /// Minimum distance to any occupied point; equal counts as too close
    pub allowed_closeness: f64,
    /// Upper bound of a single-axis wriggle
    pub wriggle_step: f64,
    /// Regions the point may occupy
    pub bounds: Bounds,
    /// Fix iterations before the random fallback takes over
    pub max_fix_depth: usize,
    /// Cap on wriggles during fallback placement; `None` wriggles forever
    pub fallback_wriggle_limit: Option<usize>,
    /// Lower end of the per-axis range random placements are drawn from
    pub placement_min: f64,
    /// Upper end of the per-axis range random placements are drawn from
    pub placement_max: f64,
}

impl Default for PointConfig {
    fn default() -> Self {
        Self {
            step: 0.25,
            stepping_error: 0.0,
            error_radius: 0.0,
            flip_triangle_rate: 0.0,
            allowed_closeness: 7.5,
            wriggle_step: 0.1,
            bounds: Bounds::default(),
            max_fix_depth: DEFAULT_MAX_FIX_DEPTH,
            fallback_wriggle_limit: None,
            placement_min: 0.0,
            placement_max: 100.0,
        }
    }
}

impl PointConfig {
    /// Check every parameter is usable by the random draws and the resolver.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("step", self.step),
            ("stepping_error", self.stepping_error),
            ("error_radius", self.error_radius),
            ("allowed_closeness", self.allowed_closeness),
            ("wriggle_step", self.wriggle_step),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.flip_triangle_rate) {
            return Err(Error::InvalidConfig(format!(
                "flip_triangle_rate must be within [0, 1], got {}",
                self.flip_triangle_rate
            )));
        }

        if self.bounds.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one bounding region is required".into(),
            ));
        }

        if !(self.placement_min.is_finite()
            && self.placement_max.is_finite()
            && self.placement_min <= self.placement_max)
        {
            return Err(Error::InvalidConfig(format!(
                "placement range [{}, {}] is empty",
                self.placement_min, self.placement_max
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(PointConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_negative_step() {
        let config = PointConfig {
            step: -1.0,
            ..PointConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_flip_rate_above_one() {
        let config = PointConfig {
            flip_triangle_rate: 1.5,
            ..PointConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_empty_bounds() {
        let config = PointConfig {
            bounds: Bounds::new(vec![]),
            ..PointConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_inverted_placement_range() {
        let config = PointConfig {
            placement_min: 10.0,
            placement_max: 5.0,
            ..PointConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}
