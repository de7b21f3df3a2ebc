//! Live game logic.
//!
//! This module builds the playable game on top of the core board model:
//!
//! - [`GameField`] - board, falling placement and the seeded piece stream
//! - [`GameSession`] - a whole game: commands, gravity ticks, scoring and pause/game-over state
//! - [`GameStats`] - score, level, line and piece counters
//! - [`TickConfig`] - gravity interval as a function of level
//! - [`PieceBuffer`] / [`PieceSeed`] - deterministic stone stream with one-stone lookahead
//! - [`Command`] - the input vocabulary accepted by a session
//! - [`RenderSink`] / [`Frame`] - the read-only view handed to a renderer
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] from a [`PieceSeed`]
//! 2. Feed it [`Command`]s (from a keyboard or a search driver) and gravity ticks
//! 3. When the falling stone locks, full rows are cleared, points are awarded and
//!    the next stone spawns
//! 4. The game is over when a freshly spawned stone collides at its spawn offset

pub use self::{
    command::*, game_field::*, game_session::*, game_stats::*, piece_buffer::*, render::*,
    tick::*,
};

mod command;
mod game_field;
mod game_session;
mod game_stats;
mod piece_buffer;
mod render;
mod tick;
