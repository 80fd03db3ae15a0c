//! Roster chromosome and genetic operators.
//!
//! # Encoding
//!
//! A chromosome is a flat list of genes, one per (shift, day) cell in the
//! template's enumeration order (see
//! [`CellInfo::from_template`](super::CellInfo::from_template)). Every
//! chromosome of a run shares that order, so position `i` means the same
//! cell in every individual and single-point crossover exchanges comparable
//! material.
//!
//! Operators keep genes internally consistent (principal never among the
//! helpers, helpers distinct, everyone drawn from the cell's availability
//! pool) but deliberately do not police the same user appearing in several
//! cells; an assistant may work more than one shift per week, and workload
//! fairness is the fitness function's job.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use super::CellInfo;

/// The staffing decision for one (shift, day) cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Gene {
    /// Template shift of this cell.
    pub shift_id: i64,
    /// Weekday of this cell, 1..=7.
    pub day: u8,
    /// Designated principal, `None` when no eligible user was available.
    pub principal_id: Option<i64>,
    /// Helper assistants, distinct, never containing the principal.
    pub helper_ids: Vec<i64>,
    /// Total assistants the cell needs, principal included.
    pub required_headcount: u32,
    /// Shift length in hours, used by the workload tally.
    pub duration_hours: f64,
}

/// A candidate weekly roster.
///
/// Higher fitness = better roster (maximisation convention; fitness as
/// computed by [`RosterProblem`](super::RosterProblem) is always ≤ 0).
#[derive(Debug, Clone, PartialEq)]
pub struct RosterChromosome {
    /// Genes in cell-enumeration order.
    pub genes: Vec<Gene>,
    /// Fitness value (higher = better).
    pub fitness: f64,
}

impl RosterChromosome {
    /// Creates a random chromosome over the given cells.
    ///
    /// Per cell: a principal is drawn uniformly from the eligible pool (or
    /// left empty), then the remaining pool is shuffled and the first
    /// `required_headcount − 1` users become helpers. Cells with a thin
    /// pool come out under-filled; that is not an error.
    pub fn random<R: Rng>(cells: &[CellInfo], rng: &mut R) -> Self {
        let genes = cells
            .iter()
            .map(|cell| {
                let principal_id = cell.principal_pool.choose(rng).copied();

                let mut helpers: Vec<i64> = cell
                    .available
                    .iter()
                    .copied()
                    .filter(|&u| Some(u) != principal_id)
                    .collect();
                helpers.shuffle(rng);
                let take = usize::min(
                    cell.required_headcount.saturating_sub(1) as usize,
                    helpers.len(),
                );
                helpers.truncate(take);

                Gene {
                    shift_id: cell.shift_id,
                    day: cell.day,
                    principal_id,
                    helper_ids: helpers,
                    required_headcount: cell.required_headcount,
                    duration_hours: cell.duration_hours,
                }
            })
            .collect();

        Self {
            genes,
            fitness: f64::NEG_INFINITY,
        }
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

/// Single-point crossover: swaps the gene tails of two chromosomes.
///
/// A point `p` is drawn uniformly from `[0, L)` and genes at positions
/// `[p, L)` are exchanged as whole units. No-op if the parents differ in
/// length (should not occur within one run) or are empty.
pub fn single_point_crossover<R: Rng>(
    a: &mut RosterChromosome,
    b: &mut RosterChromosome,
    rng: &mut R,
) {
    if a.genes.len() != b.genes.len() || a.genes.is_empty() {
        return;
    }

    let point = rng.random_range(0..a.genes.len());
    for i in point..a.genes.len() {
        std::mem::swap(&mut a.genes[i], &mut b.genes[i]);
    }
}

/// Reassignment mutation: per gene, re-draws the principal and individual
/// helper slots with probability `rate` each.
///
/// Replacement candidates always come from the cell's availability pool and
/// exclude everyone already staffed in the gene, so gene invariants survive
/// mutation.
pub fn reassign_mutation<R: Rng>(
    chromosome: &mut RosterChromosome,
    cells: &[CellInfo],
    rate: f64,
    rng: &mut R,
) {
    let rate = rate.clamp(0.0, 1.0);
    for (gene, cell) in chromosome.genes.iter_mut().zip(cells) {
        if rng.random_bool(rate) {
            let candidates: Vec<i64> = cell
                .principal_pool
                .iter()
                .copied()
                .filter(|&u| Some(u) != gene.principal_id && !gene.helper_ids.contains(&u))
                .collect();
            if let Some(&pick) = candidates.choose(rng) {
                gene.principal_id = Some(pick);
            }
        }

        for slot in 0..gene.helper_ids.len() {
            if !rng.random_bool(rate) {
                continue;
            }
            let candidates: Vec<i64> = cell
                .available
                .iter()
                .copied()
                .filter(|&u| Some(u) != gene.principal_id && !gene.helper_ids.contains(&u))
                .collect();
            if let Some(&pick) = candidates.choose(rng) {
                gene.helper_ids[slot] = pick;
            }
        }
    }
}
