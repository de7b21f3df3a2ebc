//! Per-generation fitness statistics.

use serde::{Deserialize, Serialize};
use tetrevo_stats::descriptive::DescriptiveStats;

/// Names of the logged metrics, in output order.
pub const METRICS: [&str; 5] = ["max", "mean", "min", "std", "var"];

/// Fitness summary of one evaluated generation.
///
/// `std` and `var` are population measures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub max: f64,
    pub mean: f64,
    pub min: f64,
    pub std: f64,
    pub var: f64,
}

impl GenerationStats {
    /// Summarizes `fitness` values of generation `generation`.
    ///
    /// Returns `None` for an empty generation.
    #[must_use]
    pub fn new<I>(generation: usize, fitness: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let stats = DescriptiveStats::new(fitness)?;
        Some(Self {
            generation,
            max: stats.max,
            mean: stats.mean,
            min: stats.min,
            std: stats.std_dev,
            var: stats.variance,
        })
    }

    /// Returns a metric by its name in [`METRICS`].
    #[must_use]
    pub fn metric(&self, name: &str) -> Option<f64> {
        match name {
            "max" => Some(self.max),
            "mean" => Some(self.mean),
            "min" => Some(self.min),
            "std" => Some(self.std),
            "var" => Some(self.var),
            _ => None,
        }
    }
}

/// Statistics of every evaluated generation, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FitnessHistory {
    generations: Vec<GenerationStats>,
}

impl FitnessHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stats: GenerationStats) {
        tracing::info!(
            generation = stats.generation,
            max = stats.max,
            mean = stats.mean,
            min = stats.min,
            std = stats.std,
            var = stats.var,
            "generation evaluated"
        );
        self.generations.push(stats);
    }

    #[must_use]
    pub fn generations(&self) -> &[GenerationStats] {
        &self.generations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// Returns one metric across all generations, e.g. the `max` series.
    pub fn series<'a>(&'a self, name: &'a str) -> impl Iterator<Item = f64> + 'a {
        self.generations
            .iter()
            .filter_map(move |stats| stats.metric(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_stats_use_population_variance() {
        let stats = GenerationStats::new(0, [100.0, 200.0, 300.0, 400.0]).unwrap();
        assert_eq!(stats.max, 400.0);
        assert_eq!(stats.min, 100.0);
        assert_eq!(stats.mean, 250.0);
        assert_eq!(stats.var, 12_500.0);
        assert!((stats.std - 12_500f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_empty_generation_has_no_stats() {
        assert!(GenerationStats::new(0, std::iter::empty()).is_none());
    }

    #[test]
    fn test_series_follow_push_order() {
        let mut history = FitnessHistory::new();
        history.push(GenerationStats::new(0, [1.0, 3.0]).unwrap());
        history.push(GenerationStats::new(1, [5.0, 7.0]).unwrap());
        assert_eq!(history.len(), 2);
        assert_eq!(history.series("max").collect::<Vec<_>>(), [3.0, 7.0]);
        assert_eq!(history.series("mean").collect::<Vec<_>>(), [2.0, 6.0]);
        assert_eq!(history.series("unknown").count(), 0);
    }

    #[test]
    fn test_series_by_owned_metric_name() {
        let mut history = FitnessHistory::new();
        history.push(GenerationStats::new(0, [4.0, 8.0]).unwrap());
        let series: Vec<Vec<f64>> = METRICS
            .iter()
            .map(|name| {
                let name = (*name).to_owned();
                history.series(&name).collect()
            })
            .collect();
        assert_eq!(series, [[8.0], [6.0], [4.0], [2.0], [4.0]]);
    }

    #[test]
    fn test_every_metric_name_resolves() {
        let stats = GenerationStats::new(0, [2.0]).unwrap();
        for name in METRICS {
            assert!(stats.metric(name).is_some(), "{name}");
        }
    }
}
