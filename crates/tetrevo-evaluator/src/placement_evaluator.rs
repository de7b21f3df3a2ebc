//! Placement evaluation: scoring the board a single placement leaves behind.
//!
//! A placement evaluator turns the [`BoardFeatures`] of a result board into a
//! score. Higher is better. The turn evaluator only compares scores against
//! each other, so their scale is irrelevant.

use std::fmt;

use crate::{board_analysis::BoardFeatures, weights::HeuristicWeights};

/// Evaluates piece placements by assigning scores.
pub trait PlacementEvaluator: fmt::Debug + Send + Sync {
    /// Scores the features of a result board (higher is better).
    fn evaluate_placement(&self, features: &BoardFeatures) -> f64;
}

/// Linear placement evaluator.
///
/// ```text
/// score = w₀·aggregate_height + w₁·complete_lines + w₂·holes + w₃·bumpiness
/// ```
///
/// # Example
///
/// ```
/// use tetrevo_evaluator::{
///     board_analysis::BoardFeatures,
///     placement_evaluator::{PlacementEvaluator, WeightedPlacementEvaluator},
///     weights::HeuristicWeights,
/// };
///
/// let evaluator = WeightedPlacementEvaluator::new(HeuristicWeights::new([-1.0, 1.0, -1.0, -1.0]));
/// let features = BoardFeatures { aggregate_height: 4, complete_lines: 1, holes: 0, bumpiness: 2 };
/// assert_eq!(evaluator.evaluate_placement(&features), -5.0);
/// ```
#[derive(Debug, Clone)]
pub struct WeightedPlacementEvaluator {
    weights: HeuristicWeights,
}

impl WeightedPlacementEvaluator {
    #[must_use]
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }
}

impl PlacementEvaluator for WeightedPlacementEvaluator {
    #[inline]
    fn evaluate_placement(&self, features: &BoardFeatures) -> f64 {
        self.weights.score(features)
    }
}
