use std::{fs, ops::ControlFlow, path::PathBuf};

use anyhow::Context;
use chrono::Utc;
use rand::Rng as _;
use tetrevo_engine::PieceSeed;
use tetrevo_training::{
    genetic::{Evolution, GeneticParams, Individual, PieceSeedPolicy},
    history::METRICS,
};

use crate::{
    model::training_report::TrainingReport,
    util::{self, Output},
};

const BEST_WEIGHTS_FILE: &str = "best_weights.txt";
const MODEL_FILE: &str = "model.json";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainAiArg {
    /// JSON file with genetic algorithm parameters; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of individuals per generation
    #[arg(long)]
    population: Option<usize>,
    /// Number of generations
    #[arg(long)]
    generations: Option<usize>,
    /// Seed for initialization, selection and variation (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Master piece seed in hex (random if omitted)
    #[arg(long)]
    piece_seed: Option<PieceSeed>,
    /// Let all games of a generation use the same stones
    #[arg(long)]
    shared_pieces: bool,
    /// Stop a single game after this many locked stones
    #[arg(long)]
    max_pieces: Option<usize>,
    /// Directory the statistics, weights and model are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    /// Model name stored in the model file
    #[arg(long, default_value = "heuristic")]
    name: String,
}

impl TrainAiArg {
    fn params(&self) -> anyhow::Result<GeneticParams> {
        let mut params = match &self.config {
            Some(path) => util::read_json_file("genetic parameters", path)?,
            None => GeneticParams::default(),
        };
        if let Some(population) = self.population {
            params.population_size = population;
        }
        if let Some(generations) = self.generations {
            params.generations = generations;
        }
        if let Some(max_pieces) = self.max_pieces {
            params.max_pieces = max_pieces;
        }
        if self.shared_pieces {
            params.piece_seed_policy = PieceSeedPolicy::SharedPerGeneration;
        }
        Ok(params)
    }
}

pub(crate) fn run(arg: &TrainAiArg) -> anyhow::Result<()> {
    let params = arg.params()?;
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let piece_seed = arg.piece_seed.unwrap_or_else(|| rand::rng().random());
    eprintln!("Seed: {seed}");
    eprintln!("Piece seed: {piece_seed}");

    let mut evolution = Evolution::new(params.clone(), seed, piece_seed)
        .context("Invalid genetic algorithm parameters")?;
    let outcome = evolution.run_with(|stats| {
        eprintln!(
            "Generation #{}: max {:.0}, mean {:.1}, min {:.0}, std {:.1}",
            stats.generation + 1,
            stats.max,
            stats.mean,
            stats.min,
            stats.std,
        );
        ControlFlow::Continue(())
    });

    let output_dir = &arg.output_dir;
    fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    for metric in METRICS {
        let path = output_dir.join(format!("{metric}.txt"));
        Output::open(path)?.write_lines(outcome.history.series(metric))?;
    }

    let best_weights = outcome.best.as_ref().map(|best| *best.weights());
    let best_fitness = outcome.best.as_ref().and_then(Individual::fitness);
    if let Some(weights) = best_weights {
        Output::open(output_dir.join(BEST_WEIGHTS_FILE))?.write_lines([weights])?;
    }

    let report = TrainingReport {
        name: arg.name.clone(),
        trained_at: Utc::now(),
        generations: outcome.history.len(),
        best_fitness,
        weights: best_weights,
        seed,
        piece_seed,
        params,
    };
    Output::save_json(&report, output_dir.join(MODEL_FILE))?;

    eprintln!();
    eprintln!("Training completed");
    eprintln!("  Output: {}", output_dir.display());
    eprintln!("  Name: {}", report.name);
    eprintln!("  Trained at: {}", report.trained_at);
    eprintln!("  Generations: {}", report.generations);
    match (report.best_fitness, report.weights) {
        (Some(fitness), Some(weights)) => {
            eprintln!("  Top score: {fitness}");
            eprintln!("  Weights: {weights}");
        }
        _ => eprintln!("  No generation was evaluated"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;
    use crate::command::CommandArgs;

    fn parse(args: &[&str]) -> TrainAiArg {
        let args = CommandArgs::try_parse_from(args).unwrap();
        match args.mode {
            crate::command::Mode::TrainAi(arg) => arg,
            crate::command::Mode::AutoPlay(_) => panic!("unexpected mode"),
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let arg = parse(&[
            "tetrevo",
            "train-ai",
            "--population",
            "10",
            "--generations",
            "3",
            "--shared-pieces",
            "--max-pieces",
            "500",
            "--piece-seed",
            "ff",
        ]);
        let params = arg.params().unwrap();
        assert_eq!(params.population_size, 10);
        assert_eq!(params.generations, 3);
        assert_eq!(params.max_pieces, 500);
        assert_eq!(params.piece_seed_policy, PieceSeedPolicy::SharedPerGeneration);
        assert_eq!(params.tournament_size, 5);
        assert_eq!(arg.piece_seed, Some(PieceSeed::from(255)));
    }

    #[test]
    fn test_defaults_without_flags() {
        let arg = parse(&["tetrevo", "-v", "train-ai"]);
        assert_eq!(arg.params().unwrap(), GeneticParams::default());
        assert_eq!(arg.output_dir, PathBuf::from("."));
    }
}
