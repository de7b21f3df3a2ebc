use std::{ops::ControlFlow, time::Duration};

use crate::{
    PieceCollisionError,
    core::{Board, Placement, StoneKind},
};

use super::{
    Command, Frame, GameStats, RenderSink, TickConfig, game_field::GameField,
    piece_buffer::PieceSeed,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// A whole game from first spawn to top-out.
///
/// The session owns the field, the statistics and the gravity timing. It is
/// driven from outside: an input source calls [`Self::apply`] and a timer
/// calls [`Self::tick`] every [`Self::tick_interval`]. Movement and drops are
/// ignored while paused or after game over.
///
/// # Example
///
/// ```
/// use tetrevo_engine::{Command, GameSession, PieceSeed, TickConfig};
///
/// let mut session = GameSession::new(PieceSeed::from(1), TickConfig::default());
/// while session.session_state().is_playing() {
///     let _ = session.apply(Command::HardDrop);
/// }
/// assert!(session.session_state().is_game_over());
/// assert!(session.stats().completed_pieces() > 0);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    field: GameField,
    stats: GameStats,
    session_state: SessionState,
    tick_config: TickConfig,
}

impl GameSession {
    #[must_use]
    pub fn new(seed: PieceSeed, tick_config: TickConfig) -> Self {
        Self {
            field: GameField::with_seed(seed),
            stats: GameStats::new(),
            session_state: SessionState::Playing,
            tick_config,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.field.board()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    /// Returns the gravity interval for the current level.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_config.interval(self.stats.level())
    }

    #[must_use]
    pub fn falling_placement(&self) -> Placement {
        self.field.falling_placement()
    }

    #[must_use]
    pub fn next_stone(&self) -> StoneKind {
        self.field.next_stone()
    }

    /// Applies one input command.
    ///
    /// Returns [`ControlFlow::Break`] for [`Command::Quit`]; every other command
    /// continues. Commands that cannot be carried out are silently ignored.
    pub fn apply(&mut self, command: Command) -> ControlFlow<()> {
        match command {
            Command::Quit => return ControlFlow::Break(()),
            Command::Pause => self.toggle_pause(),
            Command::Restart => self.restart(),
            _ if !self.session_state.is_playing() => {}
            Command::MoveLeft => {
                let _ = self.try_move_left();
            }
            Command::MoveRight => {
                let _ = self.try_move_right();
            }
            Command::RotateClockwise => {
                let _ = self.try_rotate();
            }
            Command::SoftDrop => {
                self.soft_drop();
            }
            Command::HardDrop => self.hard_drop(),
        }
        ControlFlow::Continue(())
    }

    /// Shifts one column left; a shift into the wall is clamped and succeeds.
    fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.try_shift(-1)
    }

    /// Shifts one column right; a shift into the wall is clamped and succeeds.
    fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.try_shift(1)
    }

    fn try_shift(&mut self, dx: i32) -> Result<(), PieceCollisionError> {
        let placement = self
            .field
            .falling_placement()
            .clamped_shift(self.field.board(), dx)
            .ok_or(PieceCollisionError)?;
        self.field.set_falling_placement(placement)
    }

    /// Rotates clockwise in place; fails if the rotated stone would collide.
    fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        let placement = self
            .field
            .falling_placement()
            .rotated(self.field.board())
            .ok_or(PieceCollisionError)?;
        self.field.set_falling_placement(placement)
    }

    /// One manual drop step: awards 1 point, then moves down or locks.
    ///
    /// Returns `true` if the stone locked.
    fn soft_drop(&mut self) -> bool {
        self.stats.add_drop_points(1);
        self.step_down()
    }

    /// Manual drop steps until the stone locks.
    ///
    /// Each step awards a point, including the one that locks the stone.
    /// Does nothing unless the game is playing.
    pub fn hard_drop(&mut self) {
        while self.session_state.is_playing() && !self.soft_drop() {}
    }

    /// Gravity step: moves the stone down one row, or locks it when blocked.
    ///
    /// Awards no points. Does nothing unless the game is playing.
    pub fn tick(&mut self) {
        if self.session_state.is_playing() {
            self.step_down();
        }
    }

    fn step_down(&mut self) -> bool {
        match self.field.falling_placement().down(self.field.board()) {
            Some(placement) => {
                let moved = self.field.set_falling_placement(placement);
                debug_assert!(moved.is_ok());
                false
            }
            None => {
                self.complete_piece_drop();
                true
            }
        }
    }

    fn complete_piece_drop(&mut self) {
        let (cleared_lines, result) = self.field.complete_piece_drop();
        self.stats.complete_piece_drop(cleared_lines);
        if result.is_err() {
            self.session_state = SessionState::GameOver;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.session_state = match self.session_state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => SessionState::GameOver,
        };
    }

    /// Starts a fresh game after game over, continuing the same stone stream.
    pub fn restart(&mut self) {
        if self.session_state.is_game_over() {
            self.field.reset();
            self.stats = GameStats::new();
            self.session_state = SessionState::Playing;
        }
    }

    #[must_use]
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            board: self.field.board(),
            falling: self.field.falling_placement(),
            next: self.field.next_stone(),
            score: self.stats.score(),
            level: self.stats.level(),
            lines: self.stats.total_cleared_lines(),
            state: self.session_state,
        }
    }

    pub fn render<S>(&self, sink: &mut S)
    where
        S: RenderSink + ?Sized,
    {
        sink.render(&self.frame());
    }
}
