//! Genetic algorithm evolving heuristic weight vectors.
//!
//! The algorithm is a plain generational loop: every individual plays one game,
//! the final score is its fitness, and the whole population is replaced by
//! varied copies of tournament winners.
//!
//! # Algorithm Overview
//!
//! For each generation:
//!
//! 1. **Evaluate** - each individual plays one game with its own piece seed
//!    (see [`PieceSeedPolicy`]). The best individual ever seen is kept; it is
//!    only replaced by a strictly higher fitness.
//! 2. **Log** - max, mean, min, standard deviation and variance of the
//!    generation's fitness are appended to the [`FitnessHistory`].
//! 3. **Select** - `population_size` tournaments, each over
//!    `tournament_size` aspirants drawn with replacement. The fittest
//!    aspirant wins; on equal fitness the one drawn first wins.
//! 4. **Crossover** - neighbouring offspring `(0, 1)`, `(2, 3)`, ... are
//!    blended ([`weights::cx_blend`]) with probability `crossover_prob`.
//! 5. **Mutation** - each offspring is mutated with probability
//!    `mutation_prob`; a mutated offspring gets Gaussian noise on each gene
//!    with probability `gene_mutation_prob` ([`weights::mutate_gaussian`]).
//! 6. **Replace** - the offspring, with fitness unset, become the population.
//!
//! # Parallelization
//!
//! Games are played on scoped threads, one per individual. Piece seeds are
//! drawn before the threads start, and every game owns its session, so
//! results do not depend on scheduling.
//!
//! # Determinism
//!
//! All selection and variation draws come from a [`Pcg32`] seeded with the
//! run seed; piece seeds come from a second [`Pcg32`] seeded with the master
//! [`PieceSeed`]. Fixing both reproduces a run exactly.
//!
//! # Example
//!
//! ```
//! use tetrevo_engine::PieceSeed;
//! use tetrevo_training::genetic::{Evolution, GeneticParams};
//!
//! let params = GeneticParams {
//!     population_size: 4,
//!     generations: 2,
//!     max_pieces: 20,
//!     ..GeneticParams::default()
//! };
//! let mut evolution = Evolution::new(params, 1, PieceSeed::from(2))?;
//! let outcome = evolution.run();
//!
//! assert_eq!(outcome.history.len(), 2);
//! assert!(outcome.best.is_some());
//! # Ok::<(), tetrevo_training::genetic::GeneticParamsError>(())
//! ```

use std::{ops::ControlFlow, thread};

use rand::{Rng, SeedableRng as _};
use rand_distr::Normal;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use tetrevo_engine::PieceSeed;
use tetrevo_evaluator::{
    placement_evaluator::WeightedPlacementEvaluator,
    session_evaluator::{FinalScoreEvaluator, PlayoutConfig, PlayoutDriver, SessionEvaluator},
    turn_evaluator::TurnEvaluator,
    weights::HeuristicWeights,
};

use crate::{
    history::{FitnessHistory, GenerationStats},
    weights,
};

/// How piece seeds are assigned to the games of one generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceSeedPolicy {
    /// Every game gets its own piece sequence.
    #[default]
    Independent,
    /// All games of a generation share one piece sequence, so individuals are
    /// compared on the same stones.
    SharedPerGeneration,
}

/// Parameters of an evolution run.
///
/// Missing fields take their default when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticParams {
    pub population_size: usize,
    pub generations: usize,
    /// Lower bound of the uniform initial gene distribution.
    pub init_min: f64,
    /// Upper bound of the uniform initial gene distribution.
    pub init_max: f64,
    pub tournament_size: usize,
    pub blend_alpha: f64,
    /// Probability that a neighbouring pair of offspring is blended.
    pub crossover_prob: f64,
    /// Probability that an offspring is mutated.
    pub mutation_prob: f64,
    /// Probability that a gene of a mutated offspring receives noise.
    pub gene_mutation_prob: f64,
    pub mutation_mu: f64,
    pub mutation_sigma: f64,
    /// Piece cap of a single game.
    pub max_pieces: usize,
    pub piece_seed_policy: PieceSeedPolicy,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            population_size: 25,
            generations: 50,
            init_min: -1.0,
            init_max: 1.0,
            tournament_size: 5,
            blend_alpha: 0.4,
            crossover_prob: 0.3,
            mutation_prob: 0.05,
            gene_mutation_prob: 0.05,
            mutation_mu: 0.0,
            mutation_sigma: 0.3,
            max_pieces: PlayoutConfig::default().max_pieces,
            piece_seed_policy: PieceSeedPolicy::default(),
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum GeneticParamsError {
    #[display("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[display("population size must be at least 1")]
    EmptyPopulation,
    #[display("tournament size must be at least 1")]
    ZeroTournamentSize,
    #[display("initial weight range [{min}, {max}] is empty")]
    EmptyInitRange { min: f64, max: f64 },
    #[display("mutation sigma must be positive and finite, got {sigma}")]
    NonPositiveSigma { sigma: f64 },
}

impl GeneticParams {
    pub fn validate(&self) -> Result<(), GeneticParamsError> {
        for (name, value) in [
            ("crossover_prob", self.crossover_prob),
            ("mutation_prob", self.mutation_prob),
            ("gene_mutation_prob", self.gene_mutation_prob),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GeneticParamsError::InvalidProbability { name, value });
            }
        }
        if self.population_size == 0 {
            return Err(GeneticParamsError::EmptyPopulation);
        }
        if self.tournament_size == 0 {
            return Err(GeneticParamsError::ZeroTournamentSize);
        }
        if !self.init_min.is_finite() || !self.init_max.is_finite() || self.init_min > self.init_max
        {
            return Err(GeneticParamsError::EmptyInitRange {
                min: self.init_min,
                max: self.init_max,
            });
        }
        if !self.mutation_sigma.is_finite() || self.mutation_sigma <= 0.0 {
            return Err(GeneticParamsError::NonPositiveSigma {
                sigma: self.mutation_sigma,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn playout_config(&self) -> PlayoutConfig {
        PlayoutConfig {
            max_pieces: self.max_pieces,
        }
    }
}

/// A candidate weight vector and its fitness, if evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    weights: HeuristicWeights,
    fitness: Option<f64>,
}

impl Individual {
    #[must_use]
    pub fn new(weights: HeuristicWeights) -> Self {
        Self {
            weights,
            fitness: None,
        }
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    /// Returns the fitness, or `None` if the individual was not evaluated
    /// since it was created or varied.
    #[must_use]
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    fn invalidate(&mut self) {
        self.fitness = None;
    }
}

/// The individuals of one generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates `size` individuals with genes uniform in `[min, max]`.
    #[must_use]
    pub fn random<R>(size: usize, min: f64, max: f64, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let individuals = (0..size)
            .map(|_| Individual::new(weights::random_uniform(rng, min..=max)))
            .collect();
        Self { individuals }
    }

    #[must_use]
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Plays one game per individual in parallel and stores the fitness.
    ///
    /// `seeds[i]` is the piece seed of individual `i`.
    pub fn evaluate_fitness<E>(
        &mut self,
        seeds: &[PieceSeed],
        config: PlayoutConfig,
        session_evaluator: &E,
    ) where
        E: SessionEvaluator + ?Sized,
    {
        assert_eq!(seeds.len(), self.individuals.len());
        thread::scope(|s| {
            for (ind, &seed) in self.individuals.iter_mut().zip(seeds) {
                let placement_evaluator = WeightedPlacementEvaluator::new(ind.weights);
                let driver =
                    PlayoutDriver::new(TurnEvaluator::new(Box::new(placement_evaluator)), config);
                s.spawn(move || {
                    let result = driver.play_seeded(seed);
                    ind.fitness = Some(session_evaluator.evaluate_session(&result));
                });
            }
        });
    }

    /// Summarizes the fitness of the evaluated individuals.
    #[must_use]
    pub fn fitness_stats(&self, generation: usize) -> Option<GenerationStats> {
        GenerationStats::new(
            generation,
            self.individuals.iter().filter_map(Individual::fitness),
        )
    }
}

/// Result of [`Evolution::run`].
#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    /// The final population.
    ///
    /// After a full run these are the unevaluated offspring of the last
    /// generation. If the run was stopped early, it is the last evaluated
    /// population.
    pub population: Population,
    /// The fittest individual seen in any generation.
    pub best: Option<Individual>,
    pub history: FitnessHistory,
}

/// Evolution run state: parameters, random streams and fitness function.
#[derive(Debug)]
pub struct Evolution<E = FinalScoreEvaluator> {
    params: GeneticParams,
    rng: Pcg32,
    piece_rng: Pcg32,
    noise: Normal<f64>,
    session_evaluator: E,
}

impl Evolution {
    /// Creates a run that uses the final game score as fitness.
    pub fn new(
        params: GeneticParams,
        seed: u64,
        piece_seed: PieceSeed,
    ) -> Result<Self, GeneticParamsError> {
        Self::with_session_evaluator(params, seed, piece_seed, FinalScoreEvaluator)
    }
}

impl<E> Evolution<E>
where
    E: SessionEvaluator,
{
    pub fn with_session_evaluator(
        params: GeneticParams,
        seed: u64,
        piece_seed: PieceSeed,
        session_evaluator: E,
    ) -> Result<Self, GeneticParamsError> {
        params.validate()?;
        let noise = Normal::new(params.mutation_mu, params.mutation_sigma).map_err(|_| {
            GeneticParamsError::NonPositiveSigma {
                sigma: params.mutation_sigma,
            }
        })?;
        Ok(Self {
            params,
            rng: Pcg32::seed_from_u64(seed),
            piece_rng: Pcg32::seed_from_u64(piece_seed.value()),
            noise,
            session_evaluator,
        })
    }

    #[must_use]
    pub fn params(&self) -> &GeneticParams {
        &self.params
    }

    /// Draws the initial population.
    pub fn initial_population(&mut self) -> Population {
        Population::random(
            self.params.population_size,
            self.params.init_min,
            self.params.init_max,
            &mut self.rng,
        )
    }

    /// Runs all configured generations.
    pub fn run(&mut self) -> EvolutionOutcome {
        self.run_with(|_| ControlFlow::Continue(()))
    }

    /// Runs generations, calling `on_generation` after each one is evaluated.
    ///
    /// Returning [`ControlFlow::Break`] stops the run before the evaluated
    /// population is replaced.
    pub fn run_with<F>(&mut self, mut on_generation: F) -> EvolutionOutcome
    where
        F: FnMut(&GenerationStats) -> ControlFlow<()>,
    {
        let mut population = self.initial_population();
        let mut best: Option<Individual> = None;
        let mut history = FitnessHistory::new();

        for generation in 0..self.params.generations {
            let seeds = self.draw_piece_seeds(population.len());
            population.evaluate_fitness(
                &seeds,
                self.params.playout_config(),
                &self.session_evaluator,
            );

            for ind in population.individuals() {
                let Some(fitness) = ind.fitness else {
                    continue;
                };
                let best_fitness = best.as_ref().and_then(Individual::fitness);
                if best_fitness.is_none_or(|best_fitness| fitness > best_fitness) {
                    tracing::debug!(generation, fitness, weights = %ind.weights, "new best individual");
                    best = Some(ind.clone());
                }
            }

            let Some(stats) = population.fitness_stats(generation) else {
                break;
            };
            history.push(stats);
            if on_generation(&stats).is_break() {
                tracing::info!(generation, "evolution stopped early");
                return EvolutionOutcome {
                    population,
                    best,
                    history,
                };
            }

            population = self.reproduce(&population);
        }

        EvolutionOutcome {
            population,
            best,
            history,
        }
    }

    fn draw_piece_seeds(&mut self, count: usize) -> Vec<PieceSeed> {
        match self.params.piece_seed_policy {
            PieceSeedPolicy::Independent => {
                (0..count).map(|_| self.piece_rng.random()).collect()
            }
            PieceSeedPolicy::SharedPerGeneration => vec![self.piece_rng.random(); count],
        }
    }

    fn reproduce(&mut self, population: &Population) -> Population {
        let mut offspring = tournament_select(
            population.individuals(),
            population.len(),
            self.params.tournament_size,
            &mut self.rng,
        );

        for pair in offspring.chunks_exact_mut(2) {
            if self.rng.random_bool(self.params.crossover_prob) {
                let (first, second) = pair.split_at_mut(1);
                weights::cx_blend(
                    &mut first[0].weights,
                    &mut second[0].weights,
                    self.params.blend_alpha,
                    &mut self.rng,
                );
            }
        }

        for ind in &mut offspring {
            if self.rng.random_bool(self.params.mutation_prob) {
                weights::mutate_gaussian(
                    &mut ind.weights,
                    &self.noise,
                    self.params.gene_mutation_prob,
                    &mut self.rng,
                );
            }
        }

        // Every offspring is re-evaluated, varied or not.
        for ind in &mut offspring {
            ind.invalidate();
        }
        Population::from_individuals(offspring)
    }
}

/// Runs `count` tournaments over `population` and returns copies of the winners.
///
/// Each tournament draws `tournament_size` aspirants uniformly with
/// replacement and keeps the first one with the highest fitness.
/// Unevaluated individuals lose against evaluated ones.
fn tournament_select<R>(
    population: &[Individual],
    count: usize,
    tournament_size: usize,
    rng: &mut R,
) -> Vec<Individual>
where
    R: Rng + ?Sized,
{
    assert!(tournament_size > 0);
    assert!(!population.is_empty());
    let key = |ind: &Individual| ind.fitness.unwrap_or(f64::NEG_INFINITY);
    (0..count)
        .map(|_| {
            let mut winner = &population[rng.random_range(0..population.len())];
            for _ in 1..tournament_size {
                let aspirant = &population[rng.random_range(0..population.len())];
                if key(aspirant) > key(winner) {
                    winner = aspirant;
                }
            }
            winner.clone()
        })
        .collect()
}
