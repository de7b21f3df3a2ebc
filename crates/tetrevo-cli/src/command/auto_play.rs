use std::path::PathBuf;

use rand::Rng as _;
use tetrevo_engine::{GameSession, PieceSeed, TickConfig};
use tetrevo_evaluator::{
    placement_evaluator::WeightedPlacementEvaluator,
    session_evaluator::{PlayoutConfig, PlayoutDriver},
    turn_evaluator::TurnEvaluator,
};

use crate::{util, view::TextRenderer};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Weight file, e.g. `best_weights.txt` written by `train-ai`
    #[arg(long)]
    weights: PathBuf,
    /// Piece seed in hex (random if omitted)
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Stop after this many locked stones
    #[arg(long, default_value_t = PlayoutConfig::default().max_pieces)]
    max_pieces: usize,
    /// Print the board after every locked stone
    #[arg(long)]
    show_board: bool,
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        weights,
        seed,
        max_pieces,
        show_board,
    } = arg;

    let weights = util::read_weights_file(weights)?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    eprintln!("Weights: {weights}");
    eprintln!("Piece seed: {seed}");

    let driver = PlayoutDriver::new(
        TurnEvaluator::new(Box::new(WeightedPlacementEvaluator::new(weights))),
        PlayoutConfig {
            max_pieces: *max_pieces,
        },
    );
    let mut session = GameSession::new(seed, TickConfig::default());

    if *show_board {
        let mut renderer = TextRenderer::default();
        session.render(&mut renderer);
        println!("{}", renderer.text());
        while session.session_state().is_playing()
            && session.stats().completed_pieces() < *max_pieces
        {
            if driver.take_turn(&mut session).is_none() {
                break;
            }
            session.render(&mut renderer);
            println!("{}", renderer.text());
        }
    }

    // Finishes the game, or only reports it if it already ended.
    let result = driver.play_session(&mut session);

    println!("Score: {}", result.score);
    println!("Pieces: {}", result.pieces);
    println!("Lines: {}", result.lines);
    println!("Level: {}", result.level);
    if result.capped {
        println!("Stopped at the piece cap ({max_pieces})");
    }
    Ok(())
}
