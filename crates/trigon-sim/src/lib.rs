//! Trigon Simulation
//!
//! Drives a field of partnered points through rounds until every point sits on
//! the apex of its partners' equilateral triangle.
//!
//! # Architecture
//!
//! - **Simulation**: owns every point, the seeded generator, and the round loop
//! - **History**: fingerprints each round's configuration to catch cycles
//! - **Events**: per-move and per-run events plus round snapshots for
//!   renderers and other consumers
//!
//! # Usage
//!
//! ```no_run
//! use trigon_sim::{Simulation, SimulationConfig};
//!
//! let mut sim = Simulation::new(SimulationConfig::default())?;
//! let outcome = sim.run(5_500)?;
//! println!("{:?} after {} rounds", outcome, sim.round());
//! # Ok::<(), trigon_sim::Error>(())
//! ```

mod config;
mod error;
mod events;
mod history;
mod simulation;

pub use config::{SimulationConfig, MIN_POINTS};
pub use error::{Error, Result};
pub use events::{LoopEvent, PointState, RoundSnapshot, SimEvent};
pub use history::LoopDetector;
pub use simulation::{RoundReport, RunOutcome, Simulation};
