//! Five-in-a-row move engine.
//!
//! Moves are scored by pattern-matching the lines they form in four
//! directions, and chosen by a breadth-limited negamax search with
//! alpha-beta pruning and time-budgeted iterative deepening.
//!
//! ```
//! use gomoku_negamax::{AIEngine, Board, Role, SearchConfig, SearchDepth};
//!
//! let mut board = Board::new(15);
//! board.put(7, 7, Role::Black);
//! board.put(7, 8, Role::White);
//! board.put(8, 8, Role::Black);
//!
//! let engine = AIEngine::new(SearchConfig::default().with_depth(SearchDepth::Fixed(2)));
//! let report = engine.make_move(&board, Role::White).unwrap();
//! assert!(report.best_move.is_some());
//! ```

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod eval;
pub mod measure;
pub mod patterns;
pub mod player;
pub mod stats;

pub use ai::{AIEngine, Move, MoveReport, SearchOutcome};
pub use board::Board;
pub use config::{SearchConfig, SearchDepth};
pub use error::{EngineError, EngineResult};
pub use eval::{winning_player, Evaluator, THREATENING_SCORE, WINNING_SCORE};
pub use patterns::PatternLibrary;
pub use player::Role;
pub use stats::SearchStats;
