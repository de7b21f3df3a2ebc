//! Heuristic move search for tetrevo.
//!
//! This crate decides where each stone goes. It is organised in the same three
//! levels the game itself has:
//!
//! 1. **Placement** ([`placement_evaluator`]) - scores the board one candidate
//!    placement would leave behind.
//! 2. **Turn** ([`turn_evaluator`]) - enumerates every reachable rest placement
//!    of the current stone ([`move_enumerator`]) and picks the best one.
//! 3. **Session** ([`session_evaluator`]) - plays a whole game through the
//!    engine's command interface and reports the final score.
//!
//! # Architecture
//!
//! ```text
//! Session (play to game over, report score)
//!     ↓ uses per spawned stone
//! Turn (enumerate candidates, arg-max)
//!     ↓ uses per candidate
//! Placement (weighted sum of board features)
//! ```
//!
//! # Supporting Modules
//!
//! - [`board_analysis`] - the four board features: aggregate height, complete
//!   lines, holes and bumpiness
//! - [`weights`] - the four-entry weight vector and its plain-text format
//!
//! # Search Model
//!
//! The search is a single-stone greedy lookahead. For one stone it considers
//! drops straight down, drops after sweeping left or right, and the same after
//! one, two or three clockwise rotations. Rotation never follows a
//! translation, and there are no wall kicks or soft-drop tucks, so only a
//! subset of truly reachable positions is explored.
//!
//! # Example
//!
//! ```
//! use tetrevo_engine::{GameSession, PieceSeed, TickConfig};
//! use tetrevo_evaluator::{
//!     placement_evaluator::WeightedPlacementEvaluator,
//!     session_evaluator::{PlayoutConfig, PlayoutDriver},
//!     turn_evaluator::TurnEvaluator,
//!     weights::HeuristicWeights,
//! };
//!
//! let weights = HeuristicWeights::new([-0.51, 0.76, -0.36, -0.18]);
//! let turn_evaluator = TurnEvaluator::new(Box::new(WeightedPlacementEvaluator::new(weights)));
//! let driver = PlayoutDriver::new(turn_evaluator, PlayoutConfig { max_pieces: 50 });
//!
//! let mut session = GameSession::new(PieceSeed::from(1), TickConfig::default());
//! let result = driver.play_session(&mut session);
//! assert!(result.pieces <= 50);
//! ```

pub mod board_analysis;
pub mod move_enumerator;
pub mod placement_evaluator;
pub mod session_evaluator;
pub mod turn_evaluator;
pub mod weights;
