//! Board features used to score a candidate placement.
//!
//! All four features are measured on the board right after the stone is
//! merged and *before* full rows are cleared, so a placement that completes
//! rows is seen with those rows still in place:
//!
//! | Feature | Definition |
//! |---|---|
//! | aggregate height | sum of column heights |
//! | complete lines | playable rows with no empty cell |
//! | holes | empty cells below the topmost occupied cell of their column |
//! | bumpiness | sum of absolute height differences between neighbouring columns |
//!
//! A column's height counts from the bottom of the playable area up to and
//! including its topmost occupied cell, regardless of gaps below it.

use std::{cell::OnceCell, iter};

use tetrevo_engine::{Board, COLS};

/// Lazily computed board metrics.
///
/// Column heights are shared by aggregate height and bumpiness and are only
/// computed once.
#[derive(Debug)]
pub struct BoardAnalysis<'a> {
    board: &'a Board,
    column_heights: OnceCell<[usize; COLS]>,
}

impl<'a> BoardAnalysis<'a> {
    #[must_use]
    pub fn from_board(board: &'a Board) -> Self {
        Self {
            board,
            column_heights: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.board
    }

    #[must_use]
    pub fn column_heights(&self) -> &[usize; COLS] {
        self.column_heights
            .get_or_init(|| self.board.column_heights())
    }

    #[must_use]
    pub fn aggregate_height(&self) -> usize {
        self.column_heights().iter().sum()
    }

    #[must_use]
    pub fn complete_lines(&self) -> usize {
        self.board
            .rows()
            .filter(|row| !row.contains(&0))
            .count()
    }

    /// Counts empty cells that have an occupied cell somewhere above them.
    #[must_use]
    pub fn holes(&self) -> usize {
        (0..COLS)
            .map(|x| {
                self.board
                    .rows()
                    .map(|row| row[x])
                    .skip_while(|&cell| cell == 0)
                    .filter(|&cell| cell == 0)
                    .count()
            })
            .sum()
    }

    #[must_use]
    pub fn bumpiness(&self) -> usize {
        let heights = self.column_heights();
        iter::zip(heights, &heights[1..])
            .map(|(a, b)| a.abs_diff(*b))
            .sum()
    }

    #[must_use]
    pub fn features(&self) -> BoardFeatures {
        BoardFeatures {
            aggregate_height: self.aggregate_height(),
            complete_lines: self.complete_lines(),
            holes: self.holes(),
            bumpiness: self.bumpiness(),
        }
    }
}

/// The four heuristic values of one board, in weight order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardFeatures {
    pub aggregate_height: usize,
    pub complete_lines: usize,
    pub holes: usize,
    pub bumpiness: usize,
}

impl BoardFeatures {
    /// Number of features, and therefore of weights.
    pub const LEN: usize = 4;

    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        BoardAnalysis::from_board(board).features()
    }

    /// Returns the features as floats, in weight order.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn to_array(&self) -> [f64; Self::LEN] {
        [
            self.aggregate_height as f64,
            self.complete_lines as f64,
            self.holes as f64,
            self.bumpiness as f64,
        ]
    }
}
