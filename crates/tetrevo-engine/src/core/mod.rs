//! Board and stone model.
//!
//! - [`Board`] - settled cells plus the synthetic floor row
//! - [`Stone`] / [`StoneKind`] - the seven stone shapes and their rotations
//! - [`Placement`] - a stone anchored at a board offset
//! - [`SimulationState`] - board + placement snapshot used as the unit of search branching

pub use self::{board::*, placement::*, stone::*};

mod board;
mod placement;
mod stone;

/// Number of playable rows (the floor row is not counted).
pub const ROWS: usize = 22;
/// Number of columns.
pub const COLS: usize = 10;
