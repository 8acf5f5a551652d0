//! A mobile point bound to two partners.
//!
//! Points do not own their partners. Partner links are [`PointId`]s into the
//! collection that owns every point, and the owner hands the partners' current
//! coordinates to [`Point::advance`] each round.

use rand::Rng;
use tracing::debug;
use trigon_geometry::{apex, Coord, GeometryError, TriangleSide, PARTNERS_PER_POINT};

use crate::config::PointConfig;
use crate::convergence::PartnerDistances;
use crate::error::{Error, Result};
use crate::resolver::ConflictResolver;
use crate::step::StepIntegrator;
use crate::validity::ValidityGate;

/// Stable point identifier; also the point's index in its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PointId(pub u32);

impl PointId {
    /// Position in the owning collection.
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What happened during one move.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveReport {
    /// Coordinate before the move
    pub from: Coord,
    /// Valid target the point stepped toward
    pub target: Coord,
    /// Coordinate after the move
    pub to: Coord,
    /// Side the point ended up aiming for
    pub side: TriangleSide,
    /// Conflict resolution attempts
    pub attempts: usize,
    /// Random fallback placements
    pub fallbacks: usize,
}

/// A point in the field.
#[derive(Debug, Clone)]
pub struct Point {
    id: PointId,
    coord: Coord,
    partners: Vec<PointId>,
    side: TriangleSide,
    config: PointConfig,
}

impl Point {
    /// Create a point with no coordinate and no partners yet.
    pub fn new(id: PointId, config: PointConfig) -> Self {
        Self {
            id,
            coord: Coord::default(),
            partners: Vec::new(),
            side: TriangleSide::default(),
            config,
        }
    }

    /// Create a point at `coord`.
    pub fn with_coord(id: PointId, config: PointConfig, coord: Coord) -> Self {
        Self {
            coord,
            ..Self::new(id, config)
        }
    }

    pub fn id(&self) -> PointId {
        self.id
    }

    pub fn coord(&self) -> &Coord {
        &self.coord
    }

    pub fn partners(&self) -> &[PointId] {
        &self.partners
    }

    /// Which triangle the point currently aims for.
    pub fn side(&self) -> TriangleSide {
        self.side
    }

    pub fn config(&self) -> &PointConfig {
        &self.config
    }

    /// Dimension fixed by the first coordinate, `None` before one is set.
    pub fn dim(&self) -> Option<usize> {
        (self.coord.dim() > 0).then(|| self.coord.dim())
    }

    /// Replace the coordinate. The dimension may not change once set.
    pub fn set_coord(&mut self, coord: Coord) -> Result<()> {
        if let Some(dim) = self.dim() {
            if dim != coord.dim() {
                return Err(GeometryError::DimensionMismatch {
                    left: dim,
                    right: coord.dim(),
                }
                .into());
            }
        }
        self.coord = coord;
        Ok(())
    }

    /// Assign partners. Exactly two distinct points, neither of them this one.
    pub fn set_partners(&mut self, partners: Vec<PointId>) -> Result<()> {
        if partners.len() != PARTNERS_PER_POINT {
            return Err(GeometryError::UnsupportedPartnerCount {
                count: partners.len(),
            }
            .into());
        }
        if partners.contains(&self.id) {
            return Err(Error::SelfPartner(self.id));
        }
        if partners[0] == partners[1] {
            return Err(Error::DuplicatePartner(partners[0]));
        }
        self.partners = partners;
        Ok(())
    }

    /// Switch triangle side.
    pub fn flip(&mut self) {
        self.side.flip();
    }

    /// Advance one round.
    ///
    /// `partners` are the partners' current coordinates, in partner order.
    /// `occupied` are the coordinates of every point already moved this round.
    /// Randomness is drawn in a fixed order: the flip draw, then any
    /// resolution draws, then the step. An invalid config is rejected before
    /// anything is drawn.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        partners: &[&[f64]],
        occupied: &[&[f64]],
        rng: &mut R,
    ) -> Result<MoveReport> {
        self.config.validate()?;

        if rng.gen::<f64>() < self.config.flip_triangle_rate {
            self.flip();
        }

        let ideal = apex(partners, self.side)?;
        debug!(point = %self.id, %ideal, side = ?self.side, "ideal spot");

        let gate = ValidityGate::new(&self.config, occupied);
        let resolution =
            ConflictResolver::new(&self.config, gate).resolve(partners, &mut self.side, ideal, rng)?;

        let next = StepIntegrator::new(&self.config).step(&self.coord, &resolution.target, rng)?;
        let from = std::mem::replace(&mut self.coord, next);

        Ok(MoveReport {
            from,
            target: resolution.target,
            to: self.coord.clone(),
            side: self.side,
            attempts: resolution.attempts,
            fallbacks: resolution.fallbacks,
        })
    }

    /// Distances to the given partner coordinates.
    pub fn partner_distances(&self, partners: &[&[f64]]) -> Result<PartnerDistances> {
        PartnerDistances::measure(&self.coord, partners)
    }

    /// Whether this point sits on its partners' apex within `tolerance`.
    pub fn is_converged(&self, partners: &[&[f64]], tolerance: f64) -> Result<bool> {
        Ok(self.partner_distances(partners)?.within(tolerance))
    }
}
