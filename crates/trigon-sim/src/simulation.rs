//! Round orchestration with event recording.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use trigon_core::{ConvergenceReport, MoveReport, PartnerDistances, Point, PointId};
use trigon_geometry::{Coord, PARTNERS_PER_POINT};

use crate::config::SimulationConfig;
use crate::error::{Error, Result};
use crate::events::{LoopEvent, PointState, RoundSnapshot, SimEvent};
use crate::history::LoopDetector;

/// What happened during one round.
#[derive(Debug, Clone)]
pub struct RoundReport {
    /// Round number just completed
    pub round: u64,
    /// One report per point, in visiting order
    pub moves: Vec<MoveReport>,
    /// Set when this round repeated an earlier configuration
    pub loop_event: Option<LoopEvent>,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every point converged
    Converged { round: u64 },
    /// A configuration repeated and `stop_on_loop` is set
    Looped(LoopEvent),
    /// The round budget ran out
    RoundLimit { round: u64 },
}

/// Drives every point through rounds of moves.
pub struct Simulation {
    config: SimulationConfig,
    points: Vec<Point>,
    rng: StdRng,
    detector: LoopDetector,
    events: Vec<SimEvent>,
    round: u64,
}

impl Simulation {
    /// Create `point_count` points at random coordinates and assign each two
    /// random partners.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let points = spawn_points(&config, &mut rng)?;
        Self::assemble(config, points, rng)
    }

    /// Run hand-built points. Ids must match positions, every partner must
    /// exist and every point's config must validate. The generator is seeded
    /// from `config.seed`; `config.point` and `config.point_count` only apply
    /// to spawned points.
    pub fn from_points(points: Vec<Point>, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        for (i, point) in points.iter().enumerate() {
            point.config().validate()?;
            if point.id().index() != i {
                return Err(Error::InvalidConfig(format!(
                    "point {} is stored at position {}",
                    point.id(),
                    i
                )));
            }
            if let Some(missing) = point.partners().iter().find(|p| p.index() >= points.len()) {
                return Err(Error::UnknownPoint(*missing));
            }
        }

        let rng = StdRng::seed_from_u64(config.seed);
        Self::assemble(config, points, rng)
    }

    fn assemble(config: SimulationConfig, points: Vec<Point>, rng: StdRng) -> Result<Self> {
        let mut sim = Self {
            config,
            points,
            rng,
            detector: LoopDetector::new(),
            events: Vec::new(),
            round: 0,
        };
        if sim.config.detect_loops {
            sim.detector.observe(0, sim.points.iter().map(Point::coord));
        }
        Ok(sim)
    }

    /// Move every point once, in id order.
    ///
    /// Point `k` treats points `0..k` as occupied at their new coordinates and
    /// reads any partner among `k+1..` at its previous coordinate.
    ///
    /// If a move fails, the points before it keep their new coordinates but the
    /// round counter, the loop history and the event log are left untouched.
    pub fn run_round(&mut self) -> Result<RoundReport> {
        let round = self.round + 1;
        let mut moves = Vec::with_capacity(self.points.len());
        let mut events = Vec::new();

        for k in 0..self.points.len() {
            let (moved, rest) = self.points.split_at_mut(k);
            let Some((point, later)) = rest.split_first_mut() else {
                break;
            };

            let partner_ids = point.partners().to_vec();
            let partners = partner_ids
                .iter()
                .map(|id| coord_at(moved, later, k, *id))
                .collect::<Result<Vec<&[f64]>>>()?;
            let occupied: Vec<&[f64]> = moved.iter().map(|p| p.coord().as_slice()).collect();

            let report = point.advance(&partners, &occupied, &mut self.rng)?;

            if report.fallbacks > 0 {
                debug!(point = %point.id(), fallbacks = report.fallbacks, "random fallback placement");
                events.push(SimEvent::FallbackPlacement {
                    point: point.id(),
                    fallbacks: report.fallbacks,
                    round,
                });
            }
            events.push(SimEvent::PointMoved {
                point: point.id(),
                from: report.from.clone(),
                to: report.to.clone(),
                target: report.target.clone(),
                side: report.side,
                attempts: report.attempts,
                round,
            });
            moves.push(report);
        }

        self.round = round;
        self.events.append(&mut events);

        let loop_event = if self.config.detect_loops {
            self.detector
                .observe(round, self.points.iter().map(Point::coord))
        } else {
            None
        };
        if let Some(event) = loop_event {
            info!(
                first_round = event.first_round,
                round = event.round,
                "configuration looped"
            );
            self.events.push(event.into());
        }

        debug!(round, "round complete");
        Ok(RoundReport {
            round,
            moves,
            loop_event,
        })
    }

    /// Run up to `max_rounds` rounds, stopping early on convergence or, when
    /// `stop_on_loop` is set, on a detected loop.
    pub fn run(&mut self, max_rounds: u64) -> Result<RunOutcome> {
        for _ in 0..max_rounds {
            if self.is_converged()? {
                return Ok(self.converged());
            }

            let report = self.run_round()?;
            if let Some(event) = report.loop_event {
                if self.config.stop_on_loop {
                    return Ok(RunOutcome::Looped(event));
                }
            }
        }

        if self.is_converged()? {
            return Ok(self.converged());
        }
        Ok(RunOutcome::RoundLimit { round: self.round })
    }

    fn converged(&mut self) -> RunOutcome {
        info!(round = self.round, "converged");
        self.events.push(SimEvent::Converged { round: self.round });
        RunOutcome::Converged { round: self.round }
    }

    /// Whether every point is within the configured tolerance.
    pub fn is_converged(&self) -> Result<bool> {
        Ok(self.convergence_report()?.is_converged())
    }

    /// Convergence across all points under the configured tolerance.
    pub fn convergence_report(&self) -> Result<ConvergenceReport> {
        let mut report = ConvergenceReport::default();
        for point in &self.points {
            let distances = self.partner_distances(point.id())?;
            report.record(&distances, self.config.tolerance);
        }
        Ok(report)
    }

    /// Distances from a point to its partners and between them.
    pub fn partner_distances(&self, id: PointId) -> Result<PartnerDistances> {
        let point = self.point(id).ok_or(Error::UnknownPoint(id))?;
        let partners = self.partner_coords(id)?;
        Ok(point.partner_distances(&partners)?)
    }

    /// Current coordinates of a point's partners, in partner order.
    pub fn partner_coords(&self, id: PointId) -> Result<Vec<&[f64]>> {
        let point = self.point(id).ok_or(Error::UnknownPoint(id))?;
        point
            .partners()
            .iter()
            .map(|p| {
                self.point(*p)
                    .map(|partner| partner.coord().as_slice())
                    .ok_or(Error::UnknownPoint(*p))
            })
            .collect()
    }

    /// Move a point by hand.
    pub fn set_coord(&mut self, id: PointId, coord: Coord) -> Result<()> {
        let point = self.points.get_mut(id.index()).ok_or(Error::UnknownPoint(id))?;
        point.set_coord(coord)?;
        Ok(())
    }

    /// Replace a point's partners.
    pub fn set_partners(&mut self, id: PointId, partners: Vec<PointId>) -> Result<()> {
        if let Some(missing) = partners.iter().find(|p| p.index() >= self.points.len()) {
            return Err(Error::UnknownPoint(*missing));
        }
        let point = self.points.get_mut(id.index()).ok_or(Error::UnknownPoint(id))?;
        point.set_partners(partners)?;
        Ok(())
    }

    /// Every point's state now.
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            round: self.round,
            points: self
                .points
                .iter()
                .map(|p| PointState {
                    id: p.id(),
                    coord: p.coord().clone(),
                    partners: p.partners().to_vec(),
                })
                .collect(),
        }
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(id.index())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Rounds completed so far.
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// All recorded events.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Take the recorded events, leaving none behind.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Coordinate of `id` while point `k` is borrowed for its move.
fn coord_at<'a>(moved: &'a [Point], later: &'a [Point], k: usize, id: PointId) -> Result<&'a [f64]> {
    let i = id.index();
    let point = if i < k {
        moved.get(i)
    } else if i > k {
        later.get(i - k - 1)
    } else {
        return Err(trigon_core::Error::SelfPartner(id).into());
    };
    point
        .map(|p| p.coord().as_slice())
        .ok_or(Error::UnknownPoint(id))
}

/// Random coordinates for every point, then random partners for every point.
fn spawn_points<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Result<Vec<Point>> {
    let (min, max) = (config.point.placement_min, config.point.placement_max);

    let mut points: Vec<Point> = (0..config.point_count)
        .map(|i| {
            let coord: Vec<f64> = (0..config.dim)
                .map(|_| rng.gen_range(min..=max))
                .collect();
            Point::with_coord(PointId(i as u32), config.point.clone(), coord.into())
        })
        .collect();

    for point in &mut points {
        let partners = pick_partners(config.point_count, point.id(), rng);
        point.set_partners(partners)?;
    }

    Ok(points)
}

/// Draw distinct partners uniformly, rejecting `id` itself and repeats.
fn pick_partners<R: Rng + ?Sized>(count: usize, id: PointId, rng: &mut R) -> Vec<PointId> {
    let mut partners = Vec::with_capacity(PARTNERS_PER_POINT);
    while partners.len() < PARTNERS_PER_POINT {
        let candidate = PointId(rng.gen_range(0..count) as u32);
        if candidate != id && !partners.contains(&candidate) {
            partners.push(candidate);
        }
    }
    partners
}
