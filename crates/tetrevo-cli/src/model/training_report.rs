use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tetrevo_engine::PieceSeed;
use tetrevo_evaluator::weights::HeuristicWeights;
use tetrevo_training::genetic::GeneticParams;

/// Summary of a training run, saved as `model.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainingReport {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    /// Number of generations that were evaluated.
    pub generations: usize,
    pub best_fitness: Option<f64>,
    pub weights: Option<HeuristicWeights>,
    pub seed: u64,
    pub piece_seed: PieceSeed,
    pub params: GeneticParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_json_shape() {
        let report = TrainingReport {
            name: "heuristic".to_owned(),
            trained_at: DateTime::from_timestamp(0, 0).unwrap(),
            generations: 50,
            best_fitness: Some(1234.0),
            weights: Some(HeuristicWeights::new([-0.5, 0.75, -0.25, -1.0])),
            seed: 1,
            piece_seed: PieceSeed::from(255),
            params: GeneticParams::default(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["weights"], serde_json::json!([-0.5, 0.75, -0.25, -1.0]));
        assert_eq!(json["piece_seed"], "00000000000000ff");
        assert_eq!(json["params"]["population_size"], 25);

        let back: TrainingReport = serde_json::from_value(json).unwrap();
        assert_eq!(back.weights, report.weights);
    }
}
