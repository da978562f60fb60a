//! Heuristic scoring of candidate moves.
//!
//! A move is scored by measuring the lines it would form in the four
//! directions and matching those measurements against the pattern library.

use crate::board::Board;
use crate::measure::{measure_all, measure_direction, DirectionMeasurement, DIRECTIONS};
use crate::patterns::{PatternLibrary, ScoredPattern, ANY};
use crate::player::Role;
use crate::stats::SearchStats;

/// A move scoring at least this completes five in a row.
pub const WINNING_SCORE: i32 = 10000;

/// A move scoring at least this must be answered.
pub const THREATENING_SCORE: i32 = 300;

pub struct Evaluator<'a> {
  patterns: &'a PatternLibrary,
}

impl<'a> Evaluator<'a> {
  pub fn new(patterns: &'a PatternLibrary) -> Self {
    Self { patterns }
  }

  /// Score placing `player`'s stone at `(row, col)`.
  ///
  /// Lines are measured both strictly and allowing one gap, and the better
  /// of the two shapes counts.
  pub fn eval_move(&self, board: &Board, row: usize, col: usize, player: Role, stats: &mut SearchStats) -> i32 {
    stats.evaluations += 1;

    let mut max_score = 0;
    for consecutive in [false, true] {
      let measurements = measure_all(board, row, col, player, consecutive);
      max_score = max_score.max(self.eval_from_measurements(&measurements, stats));
    }
    max_score
  }

  pub fn eval_from_measurements(&self, measurements: &[DirectionMeasurement; 4], stats: &mut SearchStats) -> i32 {
    // Longer lines are better regardless of shape
    let mut score: i32 = measurements.iter().map(|m| i32::from(m.length) - 1).sum();
    let max_length = measurements.iter().map(|m| m.length.max(0) as usize).max().unwrap_or(0);

    let start = self.patterns.first_candidate(max_length);
    for pattern in &self.patterns.patterns()[start..] {
      stats.pattern_matches += 1;
      score += match_count(measurements, pattern) * pattern.score;

      // Fine-grained shapes no longer matter once the move is a threat
      if score >= THREATENING_SCORE {
        break;
      }
    }
    score
  }

  /// Sum of `eval_move` over every cell of the board.
  pub fn eval_state(&self, board: &Board, player: Role, stats: &mut SearchStats) -> i32 {
    let mut score = 0;
    for row in 0..board.size {
      for col in 0..board.size {
        score += self.eval_move(board, row, col, player, stats);
      }
    }
    score
  }
}

/// How many times `pattern` occurs among the four measurements.
///
/// Each template is counted separately and divided by its minimum occurrence;
/// the weaker template decides.
pub fn match_count(measurements: &[DirectionMeasurement; 4], pattern: &ScoredPattern) -> i32 {
  let mut match_count = i32::MAX;
  for template in pattern.templates.iter().flatten() {
    let matched = measurements
      .iter()
      .filter(|m| {
        m.length == template.length
          && (template.block_count == ANY || m.block_count == template.block_count)
          && (template.space_count == ANY || m.space_count == template.space_count)
      })
      .count() as i32;
    match_count = match_count.min(matched / i32::from(template.min_occurrence));
  }
  if match_count == i32::MAX {
    0
  } else {
    match_count
  }
}

/// The owner of any unbroken line of five or more, if there is one.
pub fn winning_player(board: &Board) -> Option<Role> {
  for row in 0..board.size {
    for col in 0..board.size {
      let Some(owner) = board.get(row, col) else {
        continue;
      };
      for direction in DIRECTIONS {
        if measure_direction(board, row, col, direction, owner, true).length >= 5 {
          return Some(owner);
        }
      }
    }
  }
  None
}
