//! Roster GA problem definition.
//!
//! Bridges the domain models to the GA: enumerates the (shift, day) cells
//! that make up a chromosome, precomputes each cell's candidate pools, and
//! scores chromosomes.
//!
//! # Fitness
//!
//! `fitness = −idlePenalty − fairnessWeight × variance`, where the idle
//! penalty counts submitters who end up with zero assigned hours and the
//! variance is taken over every submitter's assigned hours. Higher is
//! better; the value is always ≤ 0.

use std::collections::{BTreeMap, HashSet};

use rand::Rng;

use super::availability::AvailabilityIndex;
use super::chromosome::RosterChromosome;
use crate::error::SchedulerError;
use crate::models::{ScheduleTemplate, User};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Compact descriptor of one (shift, day) cell.
///
/// Extracted from the template and the availability index so the genetic
/// operators never touch full domain objects.
#[derive(Debug, Clone)]
pub struct CellInfo {
    /// Template shift of this cell.
    pub shift_id: i64,
    /// Weekday of this cell, 1..=7.
    pub day: u8,
    /// Total assistants the cell needs, principal included.
    pub required_headcount: u32,
    /// Shift length in hours.
    pub duration_hours: f64,
    /// Users available for this cell, in submission order.
    pub available: Vec<i64>,
    /// The subset of `available` that is principal-eligible.
    pub principal_pool: Vec<i64>,
}

impl CellInfo {
    /// Enumerates the cells of a template.
    ///
    /// Iterates shifts in stored order and each shift's applicable days in
    /// stored order. This enumeration is the positional schema every
    /// chromosome of a run shares; it must be built once and reused.
    pub fn from_template(
        template: &ScheduleTemplate,
        index: &AvailabilityIndex,
        users: &[User],
    ) -> Result<Vec<Self>, SchedulerError> {
        let eligible: HashSet<i64> = users
            .iter()
            .filter(|u| u.is_principal_eligible())
            .map(|u| u.id)
            .collect();

        let mut cells = Vec::with_capacity(template.cell_count());
        for shift in &template.shifts {
            let duration_hours = shift.duration_hours().ok_or_else(|| {
                SchedulerError::Template(ValidationError {
                    kind: ValidationErrorKind::MalformedShiftTime,
                    message: format!("shift {} has malformed times", shift.id),
                })
            })?;

            for &day in &shift.applicable_days {
                let available: Vec<i64> = index.available(shift.id, day).to_vec();
                let principal_pool: Vec<i64> = available
                    .iter()
                    .copied()
                    .filter(|u| eligible.contains(u))
                    .collect();

                cells.push(CellInfo {
                    shift_id: shift.id,
                    day,
                    required_headcount: shift.required_headcount,
                    duration_hours,
                    available,
                    principal_pool,
                });
            }
        }

        Ok(cells)
    }
}

/// GA problem for one scheduling run.
///
/// Owns the cell enumeration, the submitter set, and the fairness weight;
/// creates random individuals and evaluates fitness.
#[derive(Debug, Clone)]
pub struct RosterProblem {
    /// Cells in chromosome position order.
    pub cells: Vec<CellInfo>,
    /// All submitters, in submission order.
    pub submitters: Vec<i64>,
    /// Weight of the workload-variance term in the fitness.
    pub fairness_weight: f64,
}

impl RosterProblem {
    /// Builds the problem from domain inputs.
    pub fn new(
        template: &ScheduleTemplate,
        index: &AvailabilityIndex,
        users: &[User],
        fairness_weight: f64,
    ) -> Result<Self, SchedulerError> {
        let cells = CellInfo::from_template(template, index, users)?;
        Ok(Self {
            cells,
            submitters: index.submitters().to_vec(),
            fairness_weight,
        })
    }

    /// Creates a random individual.
    pub fn random_chromosome<R: Rng>(&self, rng: &mut R) -> RosterChromosome {
        RosterChromosome::random(&self.cells, rng)
    }

    /// Assigned hours per submitter, zero for submitters never staffed.
    ///
    /// `BTreeMap` keeps the accumulation order deterministic, so repeated
    /// evaluation of the same chromosome yields bit-identical fitness.
    pub fn workload(&self, chromosome: &RosterChromosome) -> BTreeMap<i64, f64> {
        let mut hours: BTreeMap<i64, f64> =
            self.submitters.iter().map(|&u| (u, 0.0)).collect();

        for gene in &chromosome.genes {
            if let Some(principal) = gene.principal_id {
                *hours.entry(principal).or_insert(0.0) += gene.duration_hours;
            }
            for &helper in &gene.helper_ids {
                *hours.entry(helper).or_insert(0.0) += gene.duration_hours;
            }
        }

        hours
    }

    /// Scores a chromosome. Higher is better; always ≤ 0.
    pub fn evaluate(&self, chromosome: &RosterChromosome) -> f64 {
        let hours = self.workload(chromosome);
        if hours.is_empty() {
            return 0.0;
        }

        let idle_penalty = hours.values().filter(|&&w| w == 0.0).count() as f64;

        let n = hours.len() as f64;
        let mean = hours.values().sum::<f64>() / n;
        let variance = hours.values().map(|w| (w - mean).powi(2)).sum::<f64>() / n;

        -idle_penalty - self.fairness_weight * variance
    }
}
