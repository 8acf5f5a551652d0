//! Trigon Point Positioning
//!
//! Each point aims for the apex of an equilateral triangle on its two partners
//! and moves toward it a bounded step per round.
//!
//! # One Move
//!
//! 1. Maybe flip triangle side (`flip_triangle_rate`)
//! 2. Solve the apex for the current side
//! 3. Test it against points already placed this round and the bounds
//! 4. While invalid: flip twice, then fix (snap / wriggle), then fall back to a
//!    random spot
//! 5. Step toward the valid target, with optional travel and positional noise
//!
//! # Ordering
//!
//! Points move one at a time. A moving point only treats points that already
//! moved this round as occupied, and reads its partners' coordinates as they
//! are at that moment. Randomness is drawn from a single generator in a fixed
//! order, so a seed reproduces a run exactly.
//!
//! # Equilibrium
//!
//! A point is converged when its distance to each partner matches the distance
//! between its partners, within a tolerance.

mod config;
mod convergence;
mod error;
mod point;
mod resolver;
mod step;
mod validity;

pub use config::{PointConfig, DEFAULT_MAX_FIX_DEPTH};
pub use convergence::{is_converged, ConvergenceReport, PartnerDistances};
pub use error::{Error, Result};
pub use point::{MoveReport, Point, PointId};
pub use resolver::{ConflictResolver, Resolution, FLIP_RETRIES};
pub use step::StepIntegrator;
pub use validity::{Validity, ValidityGate};
