//! Evolutionary tuning of the heuristic weights used by `tetrevo-evaluator`.
//!
//! Each individual is one [`HeuristicWeights`](tetrevo_evaluator::weights::HeuristicWeights)
//! vector. Its fitness is the final score of a game played autonomously with
//! those weights. A generational genetic algorithm with tournament selection,
//! blend crossover and Gaussian mutation searches for weights that score high.
//!
//! # Architecture
//!
//! ```text
//! Evolution (genetic)
//!     ↓ evolves
//! HeuristicWeights (individuals)
//!     ↓ used by
//! PlayoutDriver (tetrevo-evaluator)
//!     ↓ reports
//! Final score = fitness
//!     ↓ summarized by
//! FitnessHistory (history)
//! ```
//!
//! # Modules
//!
//! - [`genetic`] - parameters, population, selection and the generation loop
//! - [`weights`] - initialization, crossover and mutation of one weight vector
//! - [`history`] - max, mean, min, standard deviation and variance per generation
//!
//! # Current Limitations
//!
//! - **One game per individual**: fitness is a single sample, so a lucky
//!   stone sequence can carry a weak individual. [`genetic::PieceSeedPolicy`]
//!   can at least make every individual of a generation face the same stones.
//! - **No elitism**: the best individual is reported but not copied into the
//!   next generation.

pub mod genetic;
pub mod history;
pub mod weights;
