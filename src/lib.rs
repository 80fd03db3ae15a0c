//! Evolutionary shift scheduling for a student-assistant workforce.
//!
//! Given a weekly shift template and each assistant's declared availability,
//! produces a roster assigning a principal and helper assistants to every
//! (shift, weekday) cell. The search is a genetic algorithm whose fitness
//! balances coverage (no idle assistants) against workload fairness
//! (variance of assigned hours); a validation layer gates both the
//! scheduler's output and user-submitted rosters.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `User`, `ScheduleTemplate`, `SchedulePlan`,
//!   `AvailabilitySubmission`, `SchedulingResult`
//! - **`ga`**: The evolutionary search — availability index, chromosome
//!   encoding, genetic operators, fitness, and the generational engine
//! - **`scheduler`**: The `Scheduler` facade running one scheduling pass
//! - **`validation`**: Structural and feasibility checks for templates,
//!   plans, submissions, and rosters
//!
//! # Data Flow
//!
//! ```text
//! Template + Submissions + Users
//!         → AvailabilityIndex
//!         → GaEngine (RosterChromosome × RosterProblem)
//!         → best chromosome
//!         → validation
//!         → Vec<ResultShift>
//! ```
//!
//! Scheduling performs no I/O: repositories are read before a run and
//! written after it, and the crate never touches the network or the clock.
//! Determinism is opt-in via `GaParameters::with_seed`.

pub mod error;
pub mod ga;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::SchedulerError;
