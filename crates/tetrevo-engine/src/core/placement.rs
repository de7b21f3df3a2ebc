use super::{
    COLS,
    board::Board,
    stone::{Stone, StoneKind},
};

/// A stone anchored on the board.
///
/// `(x, y)` is the board coordinate of the stone matrix's top-left corner.
/// Placements are immutable: every move returns a new value, and a move that
/// would collide returns `None`.
///
/// # Example
///
/// ```
/// use tetrevo_engine::{Board, Placement, Stone, StoneKind};
///
/// let board = Board::EMPTY;
/// let placement = Placement::spawn(Stone::new(StoneKind::T));
/// assert_eq!((placement.x(), placement.y()), (3, 0));
///
/// let rest = placement.dropped(&board);
/// assert_eq!(rest.y(), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    stone: Stone,
    x: i32,
    y: i32,
}

impl Placement {
    #[must_use]
    pub fn new(stone: Stone, x: i32, y: i32) -> Self {
        Self { stone, x, y }
    }

    /// Places `stone` at its spawn offset: horizontally centred, top row.
    #[must_use]
    pub fn spawn(stone: Stone) -> Self {
        let x = i32::try_from((COLS - stone.width()) / 2).expect("board width fits in i32");
        Self { stone, x, y: 0 }
    }

    #[must_use]
    pub fn spawn_kind(kind: StoneKind) -> Self {
        Self::spawn(Stone::new(kind))
    }

    #[must_use]
    pub fn stone(&self) -> &Stone {
        &self.stone
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub fn is_colliding(&self, board: &Board) -> bool {
        board.collision(&self.stone, self.x, self.y)
    }

    /// Largest `x` at which the stone still fits horizontally.
    fn max_x(&self) -> i32 {
        i32::try_from(COLS - self.stone.width()).expect("board width fits in i32")
    }

    /// Translates by `dx` columns.
    ///
    /// Fails when the new `x` leaves `[0, COLS - width]` or the stone collides.
    #[must_use]
    pub fn shifted(&self, board: &Board, dx: i32) -> Option<Self> {
        let x = self.x + dx;
        if x < 0 || x > self.max_x() {
            return None;
        }
        let moved = Self { x, ..*self };
        (!moved.is_colliding(board)).then_some(moved)
    }

    /// Translates by `dx` columns the way interactive input does.
    ///
    /// The new `x` is clamped into `[0, COLS - width]` first, so pushing against
    /// a wall succeeds without moving. Fails only when the clamped position
    /// collides.
    #[must_use]
    pub fn clamped_shift(&self, board: &Board, dx: i32) -> Option<Self> {
        let x = (self.x + dx).clamp(0, self.max_x().max(0));
        let moved = Self { x, ..*self };
        (!moved.is_colliding(board)).then_some(moved)
    }

    /// Rotates the stone in place (same anchor), failing on collision.
    #[must_use]
    pub fn rotated(&self, board: &Board) -> Option<Self> {
        let rotated = Self {
            stone: self.stone.rotated_clockwise(),
            ..*self
        };
        (!rotated.is_colliding(board)).then_some(rotated)
    }

    /// Moves one row down, failing on collision.
    #[must_use]
    pub fn down(&self, board: &Board) -> Option<Self> {
        let moved = Self {
            y: self.y + 1,
            ..*self
        };
        (!moved.is_colliding(board)).then_some(moved)
    }

    /// Returns the rest placement reached by moving down until blocked.
    #[must_use]
    pub fn dropped(&self, board: &Board) -> Self {
        let mut dropped = *self;
        while let Some(placement) = dropped.down(board) {
            dropped = placement;
        }
        dropped
    }

    /// Returns a copy of `board` with this placement committed.
    #[must_use]
    pub fn commit_to(&self, board: &Board) -> Board {
        board.commit(&self.stone, self.x, self.y)
    }
}

/// Snapshot of a board together with the stone moving over it.
///
/// This is the unit a search branch works on. Every operation mutates only
/// this snapshot; independent snapshots never share cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationState {
    board: Board,
    placement: Placement,
}

impl SimulationState {
    #[must_use]
    pub fn new(board: Board, placement: Placement) -> Self {
        Self { board, placement }
    }

    /// Starts a simulation with `stone` at its spawn offset on `board`.
    #[must_use]
    pub fn spawn(board: Board, stone: Stone) -> Self {
        Self::new(board, Placement::spawn(stone))
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Tries a one-column translation; returns whether it was applied.
    pub fn shift(&mut self, dx: i32) -> bool {
        match self.placement.shifted(&self.board, dx) {
            Some(placement) => {
                self.placement = placement;
                true
            }
            None => false,
        }
    }

    /// Tries a rotation at the current anchor; returns whether it was applied.
    pub fn rotate(&mut self) -> bool {
        match self.placement.rotated(&self.board) {
            Some(placement) => {
                self.placement = placement;
                true
            }
            None => false,
        }
    }

    /// Drops the stone to rest and merges it into the board.
    ///
    /// Full rows are left in place.
    pub fn hard_drop(&mut self) {
        self.placement = self.placement.dropped(&self.board);
        self.board.fill_stone(
            self.placement.stone(),
            self.placement.x(),
            self.placement.y(),
        );
    }
}
