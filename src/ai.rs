//! Heuristic negamax search.
//!
//! Candidate moves are generated around existing stones and ordered by the
//! evaluator. Each node expands a depth-dependent number of them, plus cells
//! the opponent threatens. A move's score is its own heuristic value minus the
//! decayed best reply of the opponent.

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use log::{debug, info, trace};

use crate::board::{Board, MIN_BOARD_SIZE};
use crate::config::{SearchConfig, SearchDepth};
use crate::error::{EngineError, EngineResult};
use crate::eval::{winning_player, Evaluator, THREATENING_SCORE, WINNING_SCORE};
use crate::patterns::PatternLibrary;
use crate::player::Role;
use crate::stats::SearchStats;

pub const MAX: i32 = i32::MAX / 2;

/// How far past the occupied rectangle candidates are looked for.
const WINDOW_MARGIN: usize = 2;

/// A non-blocking move must beat the best block by this fraction to be kept.
const BLOCK_OVERRIDE_RATIO: f32 = 0.2;

/// Opponent threats seeded into the candidate list.
const MAX_BLOCKING_SEEDS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
  pub row: usize,
  pub col: usize,
  /// Evaluator estimate before searching
  pub heuristic_val: i32,
  /// Heuristic value minus the opponent's decayed best reply
  pub actual_score: i32,
}

impl Move {
  pub fn pos(&self) -> (usize, usize) {
    (self.row, self.col)
  }
}

/// Best heuristic value first. Used with a stable sort, so ties keep board order.
pub fn by_heuristic_desc(a: &Move, b: &Move) -> Ordering {
  b.heuristic_val.cmp(&a.heuristic_val)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
  pub actual_depth: u32,
  pub best_move: Option<(usize, usize)>,
  pub score: i32,
}

/// What `make_move` hands back to the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
  pub best_move: Option<(usize, usize)>,
  pub score: i32,
  pub actual_depth: u32,
  /// Winner of the position after the move (or before it, if already decided)
  pub winner: Option<Role>,
  pub stats: SearchStats,
}

pub struct AIEngine {
  pub config: SearchConfig,
  patterns: PatternLibrary,
}

impl AIEngine {
  pub fn new(config: SearchConfig) -> Self {
    Self {
      config,
      patterns: PatternLibrary::new(),
    }
  }

  pub fn evaluator(&self) -> Evaluator<'_> {
    Evaluator::new(&self.patterns)
  }

  /// Pick a move for `role` using the engine's configuration.
  ///
  /// The board is not modified. A decided position returns the winner and no
  /// move; an empty board is answered with the centre point.
  pub fn make_move(&self, board: &Board, role: Role) -> EngineResult<MoveReport> {
    self.config.validate()?;
    if board.size < MIN_BOARD_SIZE {
      return Err(EngineError::BoardSize(board.size));
    }

    let mut stats = SearchStats::default();

    if let Some(winner) = winning_player(board) {
      info!("position already won by {:?}", winner);
      return Ok(MoveReport {
        best_move: None,
        score: 0,
        actual_depth: 0,
        winner: Some(winner),
        stats,
      });
    }

    if board.stone_count() == 0 {
      let centre = board.size / 2;
      return Ok(MoveReport {
        best_move: Some((centre, centre)),
        score: 0,
        actual_depth: 0,
        winner: None,
        stats,
      });
    }

    let started = Instant::now();
    let outcome = self.generate_move(
      board,
      role,
      self.config.depth,
      self.config.time_limit,
      self.config.alpha_beta,
      &mut stats,
    );

    let winner = outcome.best_move.and_then(|(row, col)| {
      let mut after = board.clone();
      after.set(row, col, Some(role));
      winning_player(&after)
    });

    info!(
      "{:?} plays {:?} (score={}, depth={}, nodes={}, evals={}, matches={}, {}ms)",
      role,
      outcome.best_move,
      outcome.score,
      outcome.actual_depth,
      stats.nodes,
      stats.evaluations,
      stats.pattern_matches,
      started.elapsed().as_millis()
    );

    Ok(MoveReport {
      best_move: outcome.best_move,
      score: outcome.score,
      actual_depth: outcome.actual_depth,
      winner,
      stats,
    })
  }

  /// Run a fixed-depth search, or deepen iteratively until the next round
  /// is predicted to overrun `time_limit`.
  pub fn generate_move(
    &self,
    board: &Board,
    player: Role,
    depth: SearchDepth,
    time_limit: Duration,
    ab_enabled: bool,
    stats: &mut SearchStats,
  ) -> SearchOutcome {
    let mut scratch = board.clone();

    // Opening positions get a quick fixed-depth answer
    let depth = if board.stone_count() <= self.config.opening_stone_limit {
      SearchDepth::Fixed(self.config.opening_depth)
    } else {
      depth
    };

    match depth {
      SearchDepth::Fixed(depth) => {
        let (score, best_move) = self.search(&mut scratch, player, depth, depth, ab_enabled, -MAX, MAX, stats);
        SearchOutcome {
          actual_depth: depth,
          best_move,
          score,
        }
      }
      SearchDepth::Iterative => {
        let started = Instant::now();
        let branching = u128::from(self.config.branching_factor);
        let mut depth = self.config.iterative_start_depth;
        loop {
          let round_started = Instant::now();
          let (score, best_move) = self.search(&mut scratch, player, depth, depth, ab_enabled, -MAX, MAX, stats);
          debug_assert_eq!(scratch, *board);

          let round_ms = round_started.elapsed().as_millis();
          let elapsed_ms = started.elapsed().as_millis();
          debug!(
            "depth {} done in {}ms (total {}ms, nodes {}), best {:?} score {}",
            depth, round_ms, elapsed_ms, stats.nodes, best_move, score
          );

          if elapsed_ms + round_ms * branching * branching > time_limit.as_millis() || depth >= self.config.max_depth {
            return SearchOutcome {
              actual_depth: depth,
              best_move,
              score,
            };
          }
          depth += self.config.iterative_step;
        }
      }
    }
  }

  /// Negamax over heuristic differences. Returns the best score for `player`
  /// and the move that achieves it. The board is left as it was found.
  #[allow(clippy::too_many_arguments)]
  pub fn search(
    &self,
    board: &mut Board,
    player: Role,
    initial_depth: u32,
    depth: u32,
    ab_enabled: bool,
    mut alpha: i32,
    beta: i32,
    stats: &mut SearchStats,
  ) -> (i32, Option<(usize, usize)>) {
    stats.nodes += 1;

    let opponent = player.opponent();
    let moves_player = self.order_candidate_moves(board, player, stats);
    let moves_opponent = self.order_candidate_moves(board, opponent, stats);

    let Some(&top) = moves_player.first() else {
      return (0, None);
    };

    // Forced or winning moves are taken without looking further
    if moves_player.len() == 1 || top.heuristic_val >= WINNING_SCORE {
      return (top.heuristic_val, Some(top.pos()));
    }

    let block_opponent = moves_opponent.first().is_some_and(|m| m.heuristic_val >= THREATENING_SCORE);
    let mut candidates = if block_opponent {
      self.blocking_seeds(board, player, &moves_opponent, stats)
    } else {
      Vec::new()
    };

    let breadth = self.breadth(initial_depth, depth);
    candidates.extend(moves_player.iter().take(breadth).copied());

    let mut max_score = i32::MIN;
    let mut best_move = None;
    for candidate in candidates.iter_mut() {
      let reply = {
        let mut trial = board.trial(candidate.row, candidate.col, player);
        if depth > 1 {
          let (reply_alpha, reply_beta) = reply_window(alpha, beta, candidate.heuristic_val);
          let (score, _) = self.search(
            &mut trial,
            opponent,
            initial_depth,
            depth - 1,
            ab_enabled,
            reply_alpha,
            reply_beta,
            stats,
          );
          score
        } else {
          0
        }
      };

      candidate.actual_score = candidate.heuristic_val - self.decay(reply);

      if candidate.actual_score > max_score {
        max_score = candidate.actual_score;
        best_move = Some(candidate.pos());
      }

      if max_score > alpha {
        alpha = max_score;
      }
      if ab_enabled && self.is_cutoff(max_score, beta) {
        break;
      }
    }

    // Losing anyway: prefer blocking unless something else is clearly better
    if depth == initial_depth && block_opponent && max_score < 0 {
      if let Some(blocking) = candidates.first() {
        let b_score = if blocking.actual_score == 0 { 1 } else { blocking.actual_score };
        if ((max_score - b_score) as f32 / b_score.abs() as f32) < BLOCK_OVERRIDE_RATIO {
          trace!("blocking at {:?} instead of {:?} ({} vs {})", blocking.pos(), best_move, blocking.actual_score, max_score);
          best_move = Some(blocking.pos());
          max_score = blocking.actual_score;
        }
      }
    }

    (max_score, best_move)
  }

  /// Empty, non-remote cells near the stones, best heuristic value first.
  pub fn order_candidate_moves(&self, board: &Board, player: Role, stats: &mut SearchStats) -> Vec<Move> {
    let Some((min_r, min_c, max_r, max_c)) = board.occupied_bounds() else {
      return Vec::new();
    };
    let last = board.size - 1;
    let evaluator = self.evaluator();

    let mut moves = Vec::new();
    for row in min_r.saturating_sub(WINDOW_MARGIN)..=(max_r + WINDOW_MARGIN).min(last) {
      for col in min_c.saturating_sub(WINDOW_MARGIN)..=(max_c + WINDOW_MARGIN).min(last) {
        if board.get(row, col).is_some() || board.is_remote(row, col) {
          continue;
        }
        moves.push(Move {
          row,
          col,
          heuristic_val: evaluator.eval_move(board, row, col, player, stats),
          actual_score: 0,
        });
      }
    }
    moves.sort_by(by_heuristic_desc);
    moves
  }

  /// The opponent's strongest cells, re-scored as moves for `player`.
  fn blocking_seeds(&self, board: &Board, player: Role, threats: &[Move], stats: &mut SearchStats) -> Vec<Move> {
    let evaluator = self.evaluator();
    threats
      .iter()
      .take(MAX_BLOCKING_SEEDS)
      .map(|threat| Move {
        // worth to us, not to them
        heuristic_val: evaluator.eval_move(board, threat.row, threat.col, player, stats),
        ..*threat
      })
      .collect()
  }

  // Cut once the decayed best reaches beta
  fn is_cutoff(&self, max_score: i32, beta: i32) -> bool {
    self.decay(max_score) >= beta
  }

  /// Moves expanded at `depth`: wide near the root, narrow further down.
  fn breadth(&self, initial_depth: u32, depth: u32) -> usize {
    let level = i64::from(initial_depth >> 1) - i64::from((depth + 1) >> 1);
    let last = self.config.breadth.len() - 1;
    self.config.breadth[level.clamp(0, last as i64) as usize]
  }

  // Deeper results count for less, so quicker wins are preferred
  fn decay(&self, score: i32) -> i32 {
    if score >= 2 {
      (score as f32 * self.config.score_decay) as i32
    } else {
      score
    }
  }
}

/// Window for the opponent's reply search after a move worth `heuristic_val`.
///
/// The reply is subtracted from `heuristic_val`, so the opponent only needs to
/// beat the gain above our current `alpha`.
fn reply_window(alpha: i32, beta: i32, heuristic_val: i32) -> (i32, i32) {
  (-beta, -alpha + heuristic_val)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn engine() -> AIEngine {
    AIEngine::new(SearchConfig::default())
  }

  #[test]
  fn test_breadth_shrinks_with_depth() {
    let ai = engine();
    assert_eq!(ai.breadth(6, 6), 17);
    assert_eq!(ai.breadth(6, 5), 17);
    assert_eq!(ai.breadth(6, 4), 7);
    assert_eq!(ai.breadth(6, 3), 7);
    assert_eq!(ai.breadth(6, 2), 5);
    assert_eq!(ai.breadth(6, 1), 5);
    assert_eq!(ai.breadth(16, 1), 3);
    // odd requested depths would index below the table
    assert_eq!(ai.breadth(3, 3), 17);
  }

  #[test]
  fn test_decay_truncates() {
    let ai = engine();
    assert_eq!(ai.decay(100), 95);
    assert_eq!(ai.decay(2), 1);
    assert_eq!(ai.decay(1), 1);
    assert_eq!(ai.decay(-100), -100);
  }

  #[test]
  fn test_candidates_stay_near_stones() {
    let ai = engine();
    let mut board = Board::new(15);
    board.set(0, 0, Some(Role::Black));
    let mut stats = SearchStats::default();
    let moves = ai.order_candidate_moves(&board, Role::Black, &mut stats);
    assert_eq!(moves.len(), 8);
    assert!(moves.iter().all(|m| m.row <= 2 && m.col <= 2));
    assert_eq!(stats.evaluations, 8);

    assert!(ai.order_candidate_moves(&Board::new(15), Role::Black, &mut stats).is_empty());
  }

  #[test]
  fn test_candidates_sorted_with_stable_ties() {
    let ai = engine();
    let mut board = Board::new(15);
    board.set(7, 7, Some(Role::Black));
    board.set(7, 8, Some(Role::Black));
    board.set(8, 8, Some(Role::White));
    let mut stats = SearchStats::default();
    let moves = ai.order_candidate_moves(&board, Role::Black, &mut stats);

    for pair in moves.windows(2) {
      assert!(pair[0].heuristic_val >= pair[1].heuristic_val);
      if pair[0].heuristic_val == pair[1].heuristic_val {
        // equal values keep row-major order
        assert!(pair[0].pos() < pair[1].pos());
      }
    }
  }

  #[test]
  fn test_comparator_orders_descending() {
    let a = Move { row: 0, col: 0, heuristic_val: 5, actual_score: 0 };
    let b = Move { row: 0, col: 1, heuristic_val: 9, actual_score: 0 };
    assert_eq!(by_heuristic_desc(&a, &b), Ordering::Greater);
    assert_eq!(by_heuristic_desc(&b, &a), Ordering::Less);
    assert_eq!(by_heuristic_desc(&a, &a), Ordering::Equal);
  }

  #[test]
  fn test_search_takes_winning_move_immediately() {
    let ai = engine();
    let mut board = Board::new(15);
    for c in 3..7 {
      board.set(7, c, Some(Role::Black));
    }
    board.set(8, 8, Some(Role::White));
    let before = board.clone();
    let mut stats = SearchStats::default();
    let (score, best) = ai.search(&mut board, Role::Black, 4, 4, true, -MAX, MAX, &mut stats);
    assert!(score >= WINNING_SCORE);
    assert!(matches!(best, Some((7, 2)) | Some((7, 7))));
    assert_eq!(stats.nodes, 1);
    assert_eq!(board, before);
  }

  #[test]
  fn test_search_on_full_board_has_no_move() {
    let ai = engine();
    let cells: Vec<u8> = (0..25).map(|i| if (i / 5 + i % 5 / 2) % 2 == 0 { 1 } else { 2 }).collect();
    let mut board = Board::from_cells(5, &cells).unwrap();
    let mut stats = SearchStats::default();
    assert_eq!(ai.search(&mut board, Role::Black, 2, 2, true, -MAX, MAX, &mut stats), (0, None));
  }

  fn midgame_board() -> Board {
    Board::parse(
      "\
. . . . . . . . .
. . . . . . . . .
. . . X . . . . .
. . . O X . . . .
. . . O X O . . .
. . . . . . . . .
. . . . . . . . .
. . . . . . . . .
. . . . . . . . .
",
    )
    .unwrap()
  }

  #[test]
  fn test_pruning_visits_fewer_nodes() {
    let ai = engine();
    let board = midgame_board();
    for depth in [3, 5] {
      let mut pruned = SearchStats::default();
      let mut full = SearchStats::default();
      let with_ab = ai.generate_move(&board, Role::White, SearchDepth::Fixed(depth), Duration::ZERO, true, &mut pruned);
      let without = ai.generate_move(&board, Role::White, SearchDepth::Fixed(depth), Duration::ZERO, false, &mut full);
      assert!(pruned.nodes < full.nodes, "depth {}: {} vs {}", depth, pruned.nodes, full.nodes);
      assert_eq!(with_ab.best_move, without.best_move, "depth {}", depth);
    }
  }

  #[test]
  fn test_make_move_follows_pruning_switch() {
    let board = midgame_board();
    let config = SearchConfig::default().with_depth(SearchDepth::Fixed(3));
    let pruned = AIEngine::new(config.clone()).make_move(&board, Role::White).unwrap();
    let full = AIEngine::new(config.with_alpha_beta(false)).make_move(&board, Role::White).unwrap();
    assert!(pruned.stats.nodes < full.stats.nodes);
    assert_eq!(pruned.best_move, full.best_move);
  }

  #[test]
  fn test_reply_window_adds_heuristic_gain() {
    assert_eq!(reply_window(-10, 50, 30), (-50, 40));
    assert_eq!(reply_window(-MAX, MAX, 703), (-MAX, MAX + 703));
  }

  #[test]
  fn test_cutoff_compares_decayed_best() {
    let ai = engine();
    assert!(ai.is_cutoff(100, 95));
    assert!(!ai.is_cutoff(100, 96));
    assert!(!ai.is_cutoff(100, 100));
    assert!(ai.is_cutoff(1, 1));
  }

  // Black to move with an open three; white is scattered and threatens nothing
  fn open_three_board() -> Board {
    let mut board = Board::new(15);
    for c in 5..8 {
      board.set(7, c, Some(Role::Black));
    }
    board.set(4, 10, Some(Role::White));
    board.set(10, 2, Some(Role::White));
    board
  }

  #[test]
  fn test_root_cuts_off_on_decayed_score() {
    let ai = engine();
    let board = open_three_board();
    let mut stats = SearchStats::default();
    let moves = ai.order_candidate_moves(&board, Role::Black, &mut stats);
    let top = moves[0];
    assert!(moves.len() > 2);
    assert!(top.heuristic_val < WINNING_SCORE);
    assert!(ai.order_candidate_moves(&board, Role::White, &mut stats)[0].heuristic_val < THREATENING_SCORE);

    // score of the first root candidate, as the root will compute it
    let reply = {
      let mut scratch = board.clone();
      let mut trial = scratch.trial(top.row, top.col, Role::Black);
      ai.search(&mut trial, Role::White, 2, 1, true, -MAX, MAX, &mut stats).0
    };
    let first_score = top.heuristic_val - ai.decay(reply);
    assert!(first_score >= 2);

    // decayed first score reaches beta: root + one reply node
    let mut scratch = board.clone();
    let mut cut = SearchStats::default();
    ai.search(&mut scratch, Role::Black, 2, 2, true, -MAX, ai.decay(first_score), &mut cut);
    assert_eq!(cut.nodes, 2);

    // only the undecayed score reaches beta: the search goes on
    let mut wide = SearchStats::default();
    ai.search(&mut scratch, Role::Black, 2, 2, true, -MAX, first_score, &mut wide);
    assert!(wide.nodes > 2);
    assert_eq!(scratch, board);
  }

  #[test]
  fn test_blocking_seeds_are_scored_for_the_mover() {
    let ai = engine();
    let mut board = Board::new(15);
    for c in 5..8 {
      board.set(7, c, Some(Role::White));
    }
    board.set(9, 9, Some(Role::Black));
    let mut stats = SearchStats::default();
    let threats = ai.order_candidate_moves(&board, Role::White, &mut stats);
    assert!(threats[0].heuristic_val >= THREATENING_SCORE);

    let seeds = ai.blocking_seeds(&board, Role::Black, &threats, &mut stats);
    assert_eq!(seeds.len(), MAX_BLOCKING_SEEDS);
    let evaluator = ai.evaluator();
    for (seed, threat) in seeds.iter().zip(&threats) {
      assert_eq!(seed.pos(), threat.pos());
      let ours = evaluator.eval_move(&board, seed.row, seed.col, Role::Black, &mut stats);
      assert_eq!(seed.heuristic_val, ours);
      assert!(seed.heuristic_val < threat.heuristic_val);
    }
  }
}
