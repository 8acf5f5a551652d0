//! Simulation events and snapshots for consumers.

use serde::{Deserialize, Serialize};
use trigon_core::PointId;
use trigon_geometry::{Coord, TriangleSide};

/// State of a point at the end of a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointState {
    pub id: PointId,
    pub coord: Coord,
    pub partners: Vec<PointId>,
}

/// Every point's state after a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// Round number (0 is the initial placement)
    pub round: u64,
    pub points: Vec<PointState>,
}

impl RoundSnapshot {
    /// Coordinates in point order.
    pub fn coords(&self) -> impl Iterator<Item = &Coord> {
        self.points.iter().map(|p| &p.coord)
    }
}

/// A repeated configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopEvent {
    /// Round the configuration was first seen
    pub first_round: u64,
    /// Round it was seen again
    pub round: u64,
}

impl LoopEvent {
    /// Rounds between the two occurrences.
    pub fn period(&self) -> u64 {
        self.round - self.first_round
    }
}

/// Events that occur during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A point moved
    PointMoved {
        point: PointId,
        from: Coord,
        to: Coord,
        target: Coord,
        side: TriangleSide,
        attempts: usize,
        round: u64,
    },

    /// The fix gave up and a point's target was placed at random
    FallbackPlacement {
        point: PointId,
        fallbacks: usize,
        round: u64,
    },

    /// The whole configuration repeated an earlier round
    LoopDetected { first_round: u64, round: u64 },

    /// Every point sits on its partners' apex within tolerance
    Converged { round: u64 },
}

impl SimEvent {
    /// Round the event belongs to.
    pub fn round(&self) -> u64 {
        match self {
            SimEvent::PointMoved { round, .. }
            | SimEvent::FallbackPlacement { round, .. }
            | SimEvent::LoopDetected { round, .. }
            | SimEvent::Converged { round } => *round,
        }
    }
}

impl From<LoopEvent> for SimEvent {
    fn from(e: LoopEvent) -> Self {
        SimEvent::LoopDetected {
            first_round: e.first_round,
            round: e.round,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = SimEvent::LoopDetected {
            first_round: 3,
            round: 9,
        };
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "LoopDetected");
        assert_eq!(json["first_round"], 3);
        assert_eq!(event.round(), 9);
    }

    #[test]
    fn snapshot_serializes_coords_as_arrays() {
        let snap = RoundSnapshot {
            round: 1,
            points: vec![PointState {
                id: PointId(0),
                coord: Coord::from([1.0, 2.5]),
                partners: vec![PointId(1), PointId(2)],
            }],
        };
        let json = serde_json::to_string(&snap).unwrap();

        assert_eq!(
            json,
            r#"{"round":1,"points":[{"id":0,"coord":[1.0,2.5],"partners":[1,2]}]}"#
        );
    }

    #[test]
    fn loop_period() {
        let e = LoopEvent {
            first_round: 4,
            round: 6,
        };
        assert_eq!(e.period(), 2);
        assert_eq!(SimEvent::from(e).round(), 6);
    }
}
