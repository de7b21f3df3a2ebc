//! Game model for tetrevo.
//!
//! - [`core`] - board, stones, placements and the simulation snapshot used by search
//! - [`engine`] - the live game: session state, scoring, levels, tick interval,
//!   command interface and render sink
//!
//! # Example
//!
//! ```
//! use tetrevo_engine::{Command, GameSession, PieceSeed, TickConfig};
//!
//! let mut session = GameSession::new(PieceSeed::from(42), TickConfig::default());
//! let _ = session.apply(Command::MoveLeft);
//! let _ = session.apply(Command::HardDrop);
//!
//! assert_eq!(session.stats().completed_pieces(), 1);
//! assert!(session.stats().score() > 0); // drop points
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding when setting falling piece")]
pub struct PieceCollisionError;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum CompletePieceDropError {
    #[display("new piece collides at its spawn position")]
    NewPieceCollision,
}
