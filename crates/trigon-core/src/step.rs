//! Bounded stepping toward a validated target.

use rand::Rng;
use trigon_geometry::{distance, Coord};

use crate::config::PointConfig;
use crate::error::Result;

/// Moves a coordinate a bounded distance toward its target.
///
/// Travel per step is `step + Uniform(0, stepping_error)`. If that reaches the
/// target the point lands on it, otherwise it moves along the straight line.
/// Each resulting component then gets `Uniform(-error_radius, error_radius)`
/// added. With both noise terms zero the motion is deterministic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepIntegrator {
    step: f64,
    stepping_error: f64,
    error_radius: f64,
}

impl StepIntegrator {
    pub fn new(config: &PointConfig) -> Self {
        Self {
            step: config.step,
            stepping_error: config.stepping_error,
            error_radius: config.error_radius,
        }
    }

    /// Draw this step's travel distance and move.
    pub fn step<R: Rng + ?Sized>(&self, from: &[f64], target: &[f64], rng: &mut R) -> Result<Coord> {
        let travel = self.step + rng.gen_range(0.0..=self.stepping_error);
        self.advance_by(from, target, travel, rng)
    }

    /// Move at most `travel` toward `target`, then add positional noise.
    pub fn advance_by<R: Rng + ?Sized>(
        &self,
        from: &[f64],
        target: &[f64],
        travel: f64,
        rng: &mut R,
    ) -> Result<Coord> {
        let remaining = distance(from, target)?;
        let lands = travel >= remaining;
        let scale = if lands { 1.0 } else { travel / remaining };

        let next = from
            .iter()
            .zip(target)
            .map(|(c, t)| {
                let moved = if lands { *t } else { c + (t - c) * scale };
                moved + rng.gen_range(-self.error_radius..=self.error_radius)
            })
            .collect::<Vec<f64>>();

        Ok(next.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use trigon_geometry::GeometryError;

    fn integrator(step: f64, stepping_error: f64, error_radius: f64) -> StepIntegrator {
        StepIntegrator::new(&PointConfig {
            step,
            stepping_error,
            error_radius,
            ..PointConfig::default()
        })
    }

    #[test]
    fn moves_exactly_step_along_the_line() {
        let mut rng = StdRng::seed_from_u64(0);
        let next = integrator(1.0, 0.0, 0.0)
            .step(&[0.0, 0.0], &[3.0, 4.0], &mut rng)
            .unwrap();

        assert!((next[0] - 0.6).abs() < 1e-12);
        assert!((next[1] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn lands_on_target_within_reach() {
        let mut rng = StdRng::seed_from_u64(0);
        let next = integrator(10.0, 0.0, 0.0)
            .step(&[1.0, 1.0], &[4.0, 5.0], &mut rng)
            .unwrap();

        assert_eq!(next.as_slice(), &[4.0, 5.0]);
    }

    #[test]
    fn travel_equal_to_remaining_lands() {
        let mut rng = StdRng::seed_from_u64(0);
        let next = integrator(5.0, 0.0, 0.0)
            .step(&[0.0, 0.0], &[3.0, 4.0], &mut rng)
            .unwrap();

        assert_eq!(next.as_slice(), &[3.0, 4.0]);
    }

    #[test]
    fn already_at_target_stays_put() {
        let mut rng = StdRng::seed_from_u64(0);
        let next = integrator(0.0, 0.0, 0.0)
            .step(&[2.0, 2.0], &[2.0, 2.0], &mut rng)
            .unwrap();

        assert_eq!(next.as_slice(), &[2.0, 2.0]);
        assert!(next.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn noise_stays_within_radius() {
        let mut rng = StdRng::seed_from_u64(21);
        let stepper = integrator(100.0, 0.0, 0.5);

        for _ in 0..200 {
            let next = stepper.step(&[0.0, 0.0], &[10.0, 10.0], &mut rng).unwrap();
            assert!((next[0] - 10.0).abs() <= 0.5);
            assert!((next[1] - 10.0).abs() <= 0.5);
        }
    }

    #[test]
    fn stepping_error_only_adds_travel() {
        let mut rng = StdRng::seed_from_u64(4);
        let stepper = integrator(1.0, 2.0, 0.0);

        for _ in 0..200 {
            let next = stepper.step(&[0.0, 0.0], &[100.0, 0.0], &mut rng).unwrap();
            assert!(next[0] >= 1.0 && next[0] <= 3.0 + 1e-12);
            assert_eq!(next[1], 0.0);
        }
    }

    #[test]
    fn mismatched_target_is_an_error() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            integrator(1.0, 0.0, 0.0).step(&[0.0, 0.0], &[1.0, 1.0, 1.0], &mut rng),
            Err(Error::Geometry(GeometryError::DimensionMismatch {
                left: 2,
                right: 3
            }))
        );
    }

    proptest! {
        #[test]
        fn never_overshoots_without_noise(
            x in 0.0f64..100.0, y in 0.0f64..100.0,
            tx in 0.0f64..100.0, ty in 0.0f64..100.0,
            step in 0.0f64..50.0,
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let from = [x, y];
            let target = [tx, ty];
            let before = distance(&from, &target).unwrap();

            let next = integrator(step, 0.0, 0.0).step(&from, &target, &mut rng).unwrap();
            let after = distance(&next, &target).unwrap();

            prop_assert!(after <= before + 1e-9);
            prop_assert!((before - after - step.min(before)).abs() < 1e-6);
        }
    }
}
