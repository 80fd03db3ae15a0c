//! Generational GA engine.
//!
//! Evolves a population of [`RosterChromosome`]s: elitism, roulette-wheel
//! selection, single-point crossover, per-gene reassignment mutation, full
//! generational replacement, and best-ever tracking.
//!
//! # Selection under non-positive fitness
//!
//! Fitness as computed by [`RosterProblem`] is always ≤ 0, while classic
//! roulette selection needs positive weights. Weights are therefore shifted
//! by the population minimum minus a small ε before summing, which keeps
//! every weight strictly positive and preserves proportional selection
//! pressure.
//!
//! # Reference
//! Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//! Machine Learning", Ch. 3

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::chromosome::{reassign_mutation, single_point_crossover, RosterChromosome};
use super::problem::RosterProblem;
use crate::error::SchedulerError;

/// Keeps shifted roulette weights strictly positive.
const SELECTION_EPSILON: f64 = 1e-9;

/// GA run parameters.
///
/// Serializes to the request-body shape of the service's "generate"
/// endpoint. `seed` is an optional extra for reproducible runs; when unset
/// the engine draws from OS entropy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaParameters {
    /// Number of chromosomes per generation, ≥ 1.
    pub population_size: usize,
    /// Number of generations to evolve, ≥ 1.
    pub max_generations: usize,
    /// Probability of crossover per parent pair, in [0, 1].
    pub crossover_rate: f64,
    /// Probability of reassignment per gene slot, in [0, 1].
    pub mutation_rate: f64,
    /// Chromosomes copied unchanged into the next generation,
    /// ≤ `population_size`.
    pub elite_count: usize,
    /// Weight of the workload-variance term in the fitness, ≥ 0.
    pub fairness_weight: f64,
    /// Optional RNG seed for reproducible runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GaParameters {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 200,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            elite_count: 2,
            fairness_weight: 1.0,
            seed: None,
        }
    }
}

impl GaParameters {
    /// Sets the population size.
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    /// Sets the generation count.
    pub fn with_max_generations(mut self, max_generations: usize) -> Self {
        self.max_generations = max_generations;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, crossover_rate: f64) -> Self {
        self.crossover_rate = crossover_rate;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, mutation_rate: f64) -> Self {
        self.mutation_rate = mutation_rate;
        self
    }

    /// Sets the elite count.
    pub fn with_elite_count(mut self, elite_count: usize) -> Self {
        self.elite_count = elite_count;
        self
    }

    /// Sets the fairness weight.
    pub fn with_fairness_weight(mut self, fairness_weight: f64) -> Self {
        self.fairness_weight = fairness_weight;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks every parameter against its documented range.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.population_size < 1 {
            return Err(SchedulerError::InvalidParameters(
                "populationSize must be at least 1".into(),
            ));
        }
        if self.max_generations < 1 {
            return Err(SchedulerError::InvalidParameters(
                "maxGenerations must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(SchedulerError::InvalidParameters(
                "crossoverRate must be within [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SchedulerError::InvalidParameters(
                "mutationRate must be within [0, 1]".into(),
            ));
        }
        if self.elite_count > self.population_size {
            return Err(SchedulerError::InvalidParameters(
                "eliteCount must not exceed populationSize".into(),
            ));
        }
        if !self.fairness_weight.is_finite() || self.fairness_weight < 0.0 {
            return Err(SchedulerError::InvalidParameters(
                "fairnessWeight must be finite and non-negative".into(),
            ));
        }
        Ok(())
    }
}

/// Roulette-wheel selection over shifted weights.
///
/// Weight of each chromosome is `fitness − min + ε`, so the worst member
/// still has a sliver of probability and better members draw
/// proportionally more.
fn select_roulette<'p, R: Rng>(
    population: &'p [RosterChromosome],
    rng: &mut R,
) -> &'p RosterChromosome {
    let min = population
        .iter()
        .map(|c| c.fitness)
        .fold(f64::INFINITY, f64::min);
    let total: f64 = population
        .iter()
        .map(|c| c.fitness - min + SELECTION_EPSILON)
        .sum();

    let pick = rng.random::<f64>() * total;
    let mut partial = 0.0;
    for chromosome in population {
        partial += chromosome.fitness - min + SELECTION_EPSILON;
        if partial >= pick {
            return chromosome;
        }
    }

    // Floating-point slack: fall back to the final member.
    &population[population.len() - 1]
}

/// Generational GA runner for one scheduling problem.
pub struct GaEngine<'a> {
    problem: &'a RosterProblem,
    parameters: &'a GaParameters,
}

impl<'a> GaEngine<'a> {
    /// Creates an engine after validating the parameters.
    pub fn new(
        problem: &'a RosterProblem,
        parameters: &'a GaParameters,
    ) -> Result<Self, SchedulerError> {
        parameters.validate()?;
        Ok(Self {
            problem,
            parameters,
        })
    }

    /// Runs the configured number of generations and returns the best
    /// chromosome ever observed.
    pub fn run<R: Rng>(&self, rng: &mut R) -> RosterChromosome {
        let params = self.parameters;

        let mut population: Vec<RosterChromosome> = (0..params.population_size)
            .map(|_| {
                let mut chromosome = self.problem.random_chromosome(rng);
                chromosome.fitness = self.problem.evaluate(&chromosome);
                chromosome
            })
            .collect();

        debug!(
            population = params.population_size,
            generations = params.max_generations,
            cells = self.problem.cells.len(),
            "starting roster evolution"
        );

        // Seeded from generation zero; later generations replace it only on
        // strict improvement, with a deep copy so breeding cannot touch it.
        let mut best_ever = best_of(&population).clone();

        for generation in 0..params.max_generations {
            let generation_best = best_of(&population);
            if generation_best.fitness > best_ever.fitness {
                best_ever = generation_best.clone();
            }
            trace!(
                generation,
                best = generation_best.fitness,
                best_ever = best_ever.fitness,
                "generation evolved"
            );

            population.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
            let mut next: Vec<RosterChromosome> = population
                .iter()
                .take(params.elite_count)
                .cloned()
                .collect();

            while next.len() < params.population_size {
                let mut first = select_roulette(&population, rng).clone();
                let mut second = select_roulette(&population, rng).clone();

                if rng.random_bool(params.crossover_rate) {
                    single_point_crossover(&mut first, &mut second, rng);
                }
                reassign_mutation(&mut first, &self.problem.cells, params.mutation_rate, rng);
                reassign_mutation(&mut second, &self.problem.cells, params.mutation_rate, rng);

                next.push(first);
                if next.len() < params.population_size {
                    next.push(second);
                }
            }

            population = next;
            for chromosome in &mut population {
                chromosome.fitness = self.problem.evaluate(chromosome);
            }
        }

        debug!(best = best_ever.fitness, "roster evolution complete");
        best_ever
    }
}

fn best_of(population: &[RosterChromosome]) -> &RosterChromosome {
    population
        .iter()
        .reduce(|best, c| if c.fitness > best.fitness { c } else { best })
        .unwrap_or(&EMPTY)
}

static EMPTY: RosterChromosome = RosterChromosome {
    genes: Vec::new(),
    fitness: 0.0,
};
