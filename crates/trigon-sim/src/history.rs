//! Loop detection across rounds.
//!
//! Every observed configuration is recorded by the exact bit pattern of its
//! coordinates. A configuration that matches any earlier one means the run has
//! entered a cycle. With the noise terms switched off a deterministic run that
//! cycles once will cycle forever.

use std::collections::HashMap;

use trigon_geometry::Coord;

use crate::events::LoopEvent;

/// Bit-exact fingerprint of a whole configuration.
type Fingerprint = Vec<Vec<u64>>;

/// Remembers every configuration seen and reports repeats.
#[derive(Debug, Default, Clone)]
pub struct LoopDetector {
    first_seen: HashMap<Fingerprint, u64>,
    observed: usize,
}

impl LoopDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the configuration at `round`.
    ///
    /// Returns the earliest round with an identical configuration, if any.
    /// Coordinates compare by bit pattern, so `0.0` and `-0.0` differ.
    pub fn observe<'a>(
        &mut self,
        round: u64,
        coords: impl IntoIterator<Item = &'a Coord>,
    ) -> Option<LoopEvent> {
        let fingerprint: Fingerprint = coords.into_iter().map(Coord::to_bits).collect();
        self.observed += 1;

        match self.first_seen.get(&fingerprint) {
            Some(&first_round) => Some(LoopEvent { first_round, round }),
            None => {
                self.first_seen.insert(fingerprint, round);
                None
            }
        }
    }

    /// Number of configurations observed, repeats included.
    pub fn observed(&self) -> usize {
        self.observed
    }

    /// Number of distinct configurations seen.
    pub fn distinct(&self) -> usize {
        self.first_seen.len()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.first_seen.clear();
        self.observed = 0;
    }
}
