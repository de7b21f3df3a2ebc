//! Enumeration of reachable rest placements for one stone.
//!
//! Starting from a board and the stone's current placement, the enumerator
//! produces one [`Candidate`] per move sequence, in this fixed order:
//!
//! 1. `[Drop]`
//! 2. `[Left × k, Drop]` for `k = 1, 2, ...` while the shift succeeds
//! 3. `[Right × k, Drop]` likewise
//! 4. for `r = 1..=3` clockwise rotations (stopping at the first rotation that
//!    collides): `[Rotate × r, Drop]`, then the left sweep, then the right
//!    sweep, each prefixed by the rotations
//!
//! A shift fails when the stone would leave `[0, COLS - width]` or collide.
//! The order matters: the turn evaluator breaks score ties in favour of the
//! earliest candidate.
//!
//! Branches only copy the [`Placement`]; the start board is borrowed. The
//! board each candidate leaves behind is stored once in the [`Enumeration`]
//! arena and looked up through its [`SnapshotId`].

use std::iter;

use arrayvec::ArrayVec;
use tetrevo_engine::{Board, Command, Placement};

/// Upper bound on a move sequence: 3 rotations, 9 shifts and a drop fit easily.
pub const MAX_MOVES: usize = 16;

/// Single input used by a search plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Right,
    Rotate,
    Drop,
}

impl Move {
    /// Returns the session command that performs this move.
    #[must_use]
    pub fn command(self) -> Command {
        match self {
            Move::Left => Command::MoveLeft,
            Move::Right => Command::MoveRight,
            Move::Rotate => Command::RotateClockwise,
            Move::Drop => Command::HardDrop,
        }
    }
}

pub type MoveSequence = ArrayVec<Move, MAX_MOVES>;

/// Index of a result board inside an [`Enumeration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapshotId(usize);

/// One enumerated outcome: the moves, where the stone rests, and the board it leaves.
#[derive(Debug, Clone)]
pub struct Candidate {
    moves: MoveSequence,
    placement: Placement,
    snapshot: SnapshotId,
}

impl Candidate {
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Returns the rest placement of the stone.
    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    #[must_use]
    pub fn snapshot(&self) -> SnapshotId {
        self.snapshot
    }
}

/// Candidates in enumeration order plus the arena of their result boards.
///
/// Result boards have the stone merged but full rows are not cleared.
#[derive(Debug, Clone, Default)]
pub struct Enumeration {
    candidates: Vec<Candidate>,
    boards: Vec<Board>,
}

impl Enumeration {
    /// Enumerates every candidate reachable from `start` on `board`.
    ///
    /// # Example
    ///
    /// ```
    /// use tetrevo_engine::{Board, Placement, StoneKind};
    /// use tetrevo_evaluator::move_enumerator::{Enumeration, Move};
    ///
    /// let enumeration = Enumeration::enumerate(&Board::EMPTY, Placement::spawn_kind(StoneKind::O));
    /// // O: drop in place, 4 left, 4 right, and the same 9 again for each of 3 rotations.
    /// assert_eq!(enumeration.len(), 36);
    /// assert_eq!(enumeration.candidates()[0].moves(), &[Move::Drop]);
    /// ```
    #[must_use]
    pub fn enumerate(board: &Board, start: Placement) -> Self {
        let mut enumeration = Self::default();
        let mut prefix = MoveSequence::new();
        enumeration.push_sweeps(board, start, &prefix);

        let mut rotated = start;
        for _ in 0..3 {
            let Some(next) = rotated.rotated(board) else {
                break;
            };
            rotated = next;
            prefix.push(Move::Rotate);
            enumeration.push_sweeps(board, rotated, &prefix);
        }
        enumeration
    }

    fn push_sweeps(&mut self, board: &Board, origin: Placement, prefix: &MoveSequence) {
        self.push(board, origin, prefix, Move::Drop, 0);
        for (shift, dx) in [(Move::Left, -1), (Move::Right, 1)] {
            let sweep = iter::successors(origin.shifted(board, dx), |p| p.shifted(board, dx));
            for (k, placement) in sweep.enumerate() {
                self.push(board, placement, prefix, shift, k + 1);
            }
        }
    }

    fn push(
        &mut self,
        board: &Board,
        placement: Placement,
        prefix: &MoveSequence,
        shift: Move,
        shift_count: usize,
    ) {
        let mut moves = prefix.clone();
        moves.extend(iter::repeat_n(shift, shift_count));
        moves.push(Move::Drop);

        let rest = placement.dropped(board);
        let snapshot = SnapshotId(self.boards.len());
        self.boards.push(rest.commit_to(board));
        self.candidates.push(Candidate {
            moves,
            placement: rest,
            snapshot,
        });
    }

    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Returns the board a candidate leaves behind.
    #[must_use]
    pub fn board(&self, id: SnapshotId) -> &Board {
        &self.boards[id.0]
    }

    /// Iterates candidates with their result boards, in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Candidate, &Board)> + '_ {
        self.candidates
            .iter()
            .map(|candidate| (candidate, self.board(candidate.snapshot)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use tetrevo_engine::{SimulationState, StoneKind};

    use super::*;

    /// Executes `moves` with the simulation primitives.
    fn replay(board: &Board, start: Placement, moves: &[Move]) -> SimulationState {
        let mut state = SimulationState::new(board.clone(), start);
        for mv in moves {
            match mv {
                Move::Left => assert!(state.shift(-1)),
                Move::Right => assert!(state.shift(1)),
                Move::Rotate => assert!(state.rotate()),
                Move::Drop => state.hard_drop(),
            }
        }
        state
    }

    fn bumpy_board() -> Board {
        Board::from_ascii(
            "
            ......#...
            #.....##..
            ##.#..###.
            ",
        )
    }

    #[test]
    fn test_move_sequences_are_unique() {
        for kind in StoneKind::ALL {
            let enumeration = Enumeration::enumerate(&bumpy_board(), Placement::spawn_kind(kind));
            let unique: HashSet<_> = enumeration.candidates().iter().map(Candidate::moves).collect();
            assert_eq!(unique.len(), enumeration.len(), "{kind:?}");
        }
    }

    #[test]
    fn test_result_boards_are_reproducible_by_replay() {
        let board = bumpy_board();
        for kind in StoneKind::ALL {
            let start = Placement::spawn_kind(kind);
            let enumeration = Enumeration::enumerate(&board, start);
            for (candidate, result) in enumeration.iter() {
                let state = replay(&board, start, candidate.moves());
                assert_eq!(state.board(), result, "{kind:?} {:?}", candidate.moves());
                assert_eq!(state.placement(), &candidate.placement());
            }
        }
    }

    #[test]
    fn test_enumeration_order() {
        use Move::{Drop, Left, Right, Rotate};

        let enumeration = Enumeration::enumerate(&Board::EMPTY, Placement::spawn_kind(StoneKind::I));
        let moves: Vec<&[Move]> = enumeration.candidates().iter().map(Candidate::moves).collect();
        // Horizontal I spawns at x = 3: 3 left shifts, 3 right shifts.
        assert_eq!(moves[0], &[Drop]);
        assert_eq!(moves[1], &[Left, Drop]);
        assert_eq!(moves[3], &[Left, Left, Left, Drop]);
        assert_eq!(moves[4], &[Right, Drop]);
        assert_eq!(moves[6], &[Right, Right, Right, Drop]);
        assert_eq!(moves[7], &[Rotate, Drop]);
        assert_eq!(moves[8], &[Rotate, Left, Drop]);
        // Vertical I at x = 3: 3 left, 6 right.
        assert_eq!(moves[16], &[Rotate, Right, Right, Right, Right, Right, Right, Drop]);
        assert_eq!(moves[17], &[Rotate, Rotate, Drop]);
        assert_eq!(enumeration.len(), 7 + 10 + 7 + 10);
    }

    #[test]
    fn test_start_board_is_untouched() {
        let board = bumpy_board();
        let before = board.clone();
        let enumeration = Enumeration::enumerate(&board, Placement::spawn_kind(StoneKind::T));
        assert!(!enumeration.is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn test_result_boards_are_not_cleared() {
        let board = Board::from_ascii("######.###");
        let enumeration = Enumeration::enumerate(&board, Placement::spawn_kind(StoneKind::I));
        let filled = enumeration
            .iter()
            .filter(|(_, result)| result.is_row_full(21))
            .count();
        assert!(filled > 0);
    }

    #[test]
    fn test_blocked_rotation_stops_rotations() {
        // A ceiling right under the spawn row leaves no room to rotate the I.
        let mut board = Board::EMPTY;
        for x in 0..10 {
            board.set_cell(x, 1, 1);
        }
        let enumeration = Enumeration::enumerate(&board, Placement::spawn_kind(StoneKind::I));
        assert!(
            enumeration
                .candidates()
                .iter()
                .all(|c| !c.moves().contains(&Move::Rotate))
        );
        assert_eq!(enumeration.len(), 7);
    }

    #[test]
    fn test_move_commands() {
        assert_eq!(Move::Left.command(), Command::MoveLeft);
        assert_eq!(Move::Drop.command(), Command::HardDrop);
    }
}
