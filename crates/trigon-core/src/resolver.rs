//! Conflict resolution for invalid targets.
//!
//! When the apex a point wants is invalid, the resolver works through three
//! stages until the [`ValidityGate`] passes:
//!
//! 1. **Flip retry** - the first two attempts switch triangle side and solve
//!    the apex again.
//! 2. **Fix** - later attempts repair the spot in place: snap it into the
//!    cheapest bounding region while it is out of bounds, wriggle a random axis
//!    while it is too close. The fix is bounded by `max_fix_depth` iterations.
//! 3. **Fallback** - when the fix runs out of iterations the geometric target
//!    is abandoned for a random spot, wriggled until nothing is too close.
//!
//! The outer loop has no attempt limit. The fallback spot is checked again like
//! any other, and a spot that lands out of bounds goes back through the fix.

use rand::Rng;
use tracing::{debug, trace, warn};
use trigon_geometry::{apex, Coord, TriangleSide};

use crate::config::PointConfig;
use crate::error::{Error, Result};
use crate::validity::ValidityGate;

/// Attempts spent flipping the triangle side before fixing the spot.
pub const FLIP_RETRIES: usize = 2;

/// A valid target and how it was reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The target that passed the gate
    pub target: Coord,
    /// Resolution attempts made (0 when the first target was valid)
    pub attempts: usize,
    /// Times the fix gave up and a random spot was drawn
    pub fallbacks: usize,
}

/// Turns an invalid target into a valid one.
pub struct ConflictResolver<'a> {
    config: &'a PointConfig,
    gate: ValidityGate<'a>,
}

impl<'a> ConflictResolver<'a> {
    pub fn new(config: &'a PointConfig, gate: ValidityGate<'a>) -> Self {
        Self { config, gate }
    }

    /// Resolve `target` into a valid spot.
    ///
    /// `side` is flipped in place during the flip-retry stage and keeps
    /// whatever value it had when the loop ended.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        partners: &[&[f64]],
        side: &mut TriangleSide,
        target: Coord,
        rng: &mut R,
    ) -> Result<Resolution> {
        let mut spot = target;
        let mut attempts = 0;
        let mut fallbacks = 0;

        loop {
            let validity = self.gate.check(&spot)?;
            if validity.is_valid() {
                break;
            }
            trace!(?validity, %spot, attempts, "target rejected");

            if attempts < FLIP_RETRIES {
                side.flip();
                spot = apex(partners, *side)?;
                debug!(%spot, ?side, "spot after flip");
            } else {
                let dim = spot.dim();
                match self.fix(spot, rng)? {
                    Some(fixed) => {
                        debug!(spot = %fixed, "spot after fixing");
                        spot = fixed;
                    }
                    None => {
                        fallbacks += 1;
                        spot = self.fallback(dim, rng)?;
                        debug!(%spot, "fix exhausted, random spot");
                    }
                }
            }
            attempts += 1;
        }

        Ok(Resolution {
            target: spot,
            attempts,
            fallbacks,
        })
    }

    /// Repair a spot by snapping into bounds and wriggling away from
    /// neighbours. `None` when `max_fix_depth` iterations were not enough.
    pub fn fix<R: Rng + ?Sized>(&self, mut spot: Coord, rng: &mut R) -> Result<Option<Coord>> {
        let bounds = self.gate.bounds();

        for _ in 0..self.config.max_fix_depth {
            if !self.gate.in_bounds(&spot) {
                if !bounds.snap_into_cheapest(&mut spot) {
                    return Ok(None);
                }
                continue;
            }
            if self.gate.is_too_close(&spot)? {
                self.wriggle(&mut spot, rng);
                continue;
            }
            return Ok(Some(spot));
        }

        Ok(None)
    }

    /// A random spot in the placement range, wriggled until nothing is too
    /// close. Does not check bounds.
    pub fn fallback<R: Rng + ?Sized>(&self, dim: usize, rng: &mut R) -> Result<Coord> {
        let (min, max) = (self.config.placement_min, self.config.placement_max);
        let mut spot: Coord = (0..dim)
            .map(|_| rng.gen_range(min..=max))
            .collect::<Vec<f64>>()
            .into();

        let mut wriggles = 0;
        while self.gate.is_too_close(&spot)? {
            if let Some(limit) = self.config.fallback_wriggle_limit {
                if wriggles >= limit {
                    warn!(%spot, wriggles, "fallback placement exhausted");
                    return Err(Error::PlacementExhausted { attempts: wriggles });
                }
            }
            self.wriggle(&mut spot, rng);
            wriggles += 1;
        }

        Ok(spot)
    }

    /// Nudge one random axis by `Uniform(0, wriggle_step)`.
    pub fn wriggle<R: Rng + ?Sized>(&self, spot: &mut [f64], rng: &mut R) {
        if spot.is_empty() {
            return;
        }
        let axis = rng.gen_range(0..spot.len());
        let amount = rng.gen_range(0.0..=self.config.wriggle_step);
        spot[axis] += amount;
    }
}
