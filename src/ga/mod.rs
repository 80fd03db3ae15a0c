//! GA-based roster optimization.
//!
//! Everything the evolutionary search needs for one scheduling run:
//!
//! - [`AvailabilityIndex`]: per-cell candidate pools derived from submissions
//! - [`RosterChromosome`] / [`Gene`]: the candidate-roster encoding, with
//!   single-point crossover and reassignment mutation
//! - [`CellInfo`] / [`RosterProblem`]: cell enumeration and fitness
//! - [`GaParameters`] / [`GaEngine`]: the generational loop
//!
//! # Encoding
//!
//! One gene per (shift, day) cell, enumerated from the template in stored
//! order. The enumeration is fixed for a run, so every chromosome is
//! positionally comparable and crossover exchanges whole staffing
//! decisions.
//!
//! The usual entry point is [`Scheduler`](crate::scheduler::Scheduler),
//! which wires these pieces together and validates the outcome.

mod availability;
mod chromosome;
mod engine;
mod problem;

pub use availability::AvailabilityIndex;
pub use chromosome::{reassign_mutation, single_point_crossover, Gene, RosterChromosome};
pub use engine::{GaEngine, GaParameters};
pub use problem::{CellInfo, RosterProblem};
