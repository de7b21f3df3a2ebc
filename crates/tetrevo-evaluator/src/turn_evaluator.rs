//! Turn evaluation: selecting the move sequence for the current stone.
//!
//! # How It Works
//!
//! 1. **Enumerate** - list every candidate reachable from the stone's current
//!    placement ([`Enumeration::enumerate`])
//! 2. **Score** - measure each result board and score it with the placement evaluator
//! 3. **Select** - keep the highest score; on ties the earliest candidate in
//!    enumeration order wins
//!
//! The result is a [`TurnPlan`]: the moves to feed the session plus the rest
//! placement they lead to.
//!
//! # Design: Greedy One-Stone Lookahead
//!
//! Only the falling stone is considered. The previewed next stone is ignored
//! and no multi-turn planning is done.

use tetrevo_engine::{Board, GameSession, Placement};

use crate::{
    board_analysis::BoardFeatures,
    move_enumerator::{Enumeration, Move, MoveSequence},
    placement_evaluator::PlacementEvaluator,
};

/// The chosen action for one turn.
#[derive(Debug, Clone)]
pub struct TurnPlan {
    moves: MoveSequence,
    placement: Placement,
    score: f64,
}

impl TurnPlan {
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Returns where the stone rests after the moves.
    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Returns the placement score that won the selection.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Feeds the moves to `session` as commands.
    pub fn apply(&self, session: &mut GameSession) {
        for mv in &self.moves {
            let _ = session.apply(mv.command());
        }
    }
}

/// Evaluates and selects the best placement for the current turn.
#[derive(Debug)]
pub struct TurnEvaluator<'a> {
    placement_evaluator: Box<dyn PlacementEvaluator + 'a>,
}

impl<'a> TurnEvaluator<'a> {
    #[must_use]
    pub fn new(placement_evaluator: Box<dyn PlacementEvaluator + 'a>) -> Self {
        Self {
            placement_evaluator,
        }
    }

    /// Selects the best turn for a stone at `start` on `board`.
    ///
    /// Returns `None` only if there is no candidate at all.
    #[must_use]
    pub fn select_best_turn(&self, board: &Board, start: Placement) -> Option<TurnPlan> {
        let enumeration = Enumeration::enumerate(board, start);
        let mut best: Option<(f64, usize)> = None;

        for (i, (_candidate, result)) in enumeration.iter().enumerate() {
            let features = BoardFeatures::from_board(result);
            let score = self.placement_evaluator.evaluate_placement(&features);
            if best.is_none_or(|(best_score, _)| score > best_score) {
                best = Some((score, i));
            }
        }

        let (score, index) = best?;
        let candidate = &enumeration.candidates()[index];
        Some(TurnPlan {
            moves: candidate.moves().iter().copied().collect(),
            placement: candidate.placement(),
            score,
        })
    }

    /// Selects the best turn for the stone currently falling in `session`.
    #[must_use]
    pub fn select_for_session(&self, session: &GameSession) -> Option<TurnPlan> {
        self.select_best_turn(session.board(), session.falling_placement())
    }
}

#[cfg(test)]
mod tests {
    use tetrevo_engine::{PieceSeed, StoneKind, TickConfig};

    use super::*;
    use crate::{placement_evaluator::WeightedPlacementEvaluator, weights::HeuristicWeights};

    fn evaluator(weights: [f64; 4]) -> TurnEvaluator<'static> {
        TurnEvaluator::new(Box::new(WeightedPlacementEvaluator::new(
            HeuristicWeights::new(weights),
        )))
    }

    #[test]
    fn test_zero_weights_pick_first_candidate() {
        let turn = evaluator([0.0; 4])
            .select_best_turn(&Board::EMPTY, Placement::spawn_kind(StoneKind::T))
            .unwrap();
        assert_eq!(turn.moves(), &[Move::Drop]);
        assert_eq!(turn.score(), 0.0);
    }

    #[test]
    fn test_prefers_completing_a_line() {
        let board = Board::from_ascii(
            "
            ##.#######
            ##.#######
            ##.#######
            ",
        );
        // Reward complete lines, punish everything else.
        let turn = evaluator([-0.1, 10.0, -1.0, -0.1])
            .select_best_turn(&board, Placement::spawn_kind(StoneKind::I))
            .unwrap();
        let placement = turn.placement();
        assert_eq!(placement.stone().width(), 1);
        assert_eq!(placement.x(), 2);
        assert_eq!(placement.y(), 18);
    }

    #[test]
    fn test_applied_plan_locks_stone_at_planned_placement() {
        let mut session = GameSession::new(PieceSeed::from(9), TickConfig::default());
        let evaluator = evaluator([-0.51, 0.76, -0.36, -0.18]);
        let plan = evaluator.select_for_session(&session).unwrap();
        let expected = plan.placement().commit_to(session.board());
        plan.apply(&mut session);
        assert_eq!(session.stats().completed_pieces(), 1);
        assert_eq!(session.board(), &expected);
    }

    #[test]
    fn test_score_ties_keep_earliest() {
        // Only bumpiness matters; on an empty board several placements tie.
        let turn = evaluator([0.0, 0.0, 0.0, -1.0])
            .select_best_turn(&Board::EMPTY, Placement::spawn_kind(StoneKind::O))
            .unwrap();
        // O at any x gives bumpiness 2 + 2 (or 2 at a wall); walls win, leftmost first.
        assert_eq!(turn.placement().x(), 0);
        assert_eq!(turn.moves(), &[Move::Left, Move::Left, Move::Left, Move::Left, Move::Drop]);
    }
}
