//! Line measurement around an anchor cell.
//!
//! The anchor is treated as belonging to the measured player whether or not a
//! stone is actually there, so the same code scores hypothetical moves and
//! checks finished lines.

use crate::board::Board;
use crate::player::Role;

/// The four axes: horizontal, falling diagonal, vertical, rising diagonal.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 1), (1, 0), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionMeasurement {
  /// Stones of the player on the line, anchor included
  pub length: i8,
  /// Ends closed by the opponent or the board edge (0-2)
  pub block_count: i8,
  /// Single-cell gaps jumped while extending
  pub space_count: i8,
}

/// Measure the run through `(row, col)` along `(dr, dc)` and its reverse.
///
/// With `consecutive == false` one empty cell may be jumped over, provided
/// the cell behind it holds the player's stone.
pub fn measure_direction(
  board: &Board,
  row: usize,
  col: usize,
  (dr, dc): (isize, isize),
  player: Role,
  consecutive: bool,
) -> DirectionMeasurement {
  let mut result = DirectionMeasurement {
    length: 1,
    block_count: 2,
    space_count: 0,
  };
  let mut space_allowance = if consecutive { 0 } else { 1 };

  for (dr, dc) in [(dr, dc), (-dr, -dc)] {
    let (mut r, mut c) = (row as isize, col as isize);
    loop {
      r += dr;
      c += dc;
      if !board.in_bounds(r, c) {
        break;
      }
      match board.cell(r, c) {
        None => {
          if space_allowance > 0 && board.cell(r + dr, c + dc) == Some(player) {
            space_allowance -= 1;
            result.space_count += 1;
            continue;
          }
          // open end
          result.block_count -= 1;
          break;
        }
        Some(stone) if stone != player => break,
        // boards wider than i8::MAX still collapse to a five below
        Some(_) => result.length = result.length.saturating_add(1),
      }
    }
  }

  // Overlines: unbroken counts as five, broken only as a blocked four
  if result.length >= 5 {
    if result.space_count == 0 {
      result.length = 5;
      result.block_count = 0;
    } else {
      result.length = 4;
      result.block_count = 1;
    }
  }
  result
}

pub fn measure_all(
  board: &Board,
  row: usize,
  col: usize,
  player: Role,
  consecutive: bool,
) -> [DirectionMeasurement; 4] {
  DIRECTIONS.map(|direction| measure_direction(board, row, col, direction, player, consecutive))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn dm(length: i8, block_count: i8, space_count: i8) -> DirectionMeasurement {
    DirectionMeasurement {
      length,
      block_count,
      space_count,
    }
  }

  #[test]
  fn test_lone_stone_is_open_both_ends() {
    let board = Board::new(15);
    let all = measure_all(&board, 7, 7, Role::Black, true);
    assert_eq!(all, [dm(1, 0, 0); 4]);
  }

  #[test]
  fn test_corner_is_blocked_by_edges() {
    let board = Board::new(15);
    let m = measure_direction(&board, 0, 0, (0, 1), Role::Black, true);
    assert_eq!(m, dm(1, 1, 0));
    let m = measure_direction(&board, 0, 0, (1, -1), Role::Black, true);
    assert_eq!(m, dm(1, 2, 0));
  }

  #[test]
  fn test_opponent_stone_blocks() {
    let mut board = Board::new(15);
    board.set(7, 5, Some(Role::White));
    board.set(7, 6, Some(Role::Black));
    let m = measure_direction(&board, 7, 7, (0, 1), Role::Black, true);
    assert_eq!(m, dm(2, 1, 0));
  }

  #[test]
  fn test_gap_is_only_taken_when_allowed() {
    let mut board = Board::new(15);
    // X X _ [X] X
    board.set(7, 4, Some(Role::Black));
    board.set(7, 5, Some(Role::Black));
    board.set(7, 8, Some(Role::Black));

    let strict = measure_direction(&board, 7, 7, (0, 1), Role::Black, true);
    assert_eq!(strict, dm(2, 0, 0));

    let gapped = measure_direction(&board, 7, 7, (0, 1), Role::Black, false);
    assert_eq!(gapped, dm(4, 0, 1));
  }

  #[test]
  fn test_gap_budget_is_shared_by_both_ends() {
    let mut board = Board::new(15);
    // X _ [X] _ X
    board.set(7, 5, Some(Role::Black));
    board.set(7, 9, Some(Role::Black));
    let m = measure_direction(&board, 7, 7, (0, 1), Role::Black, false);
    assert_eq!(m, dm(2, 0, 1));
  }

  #[test]
  fn test_overline_collapses_to_five() {
    let mut board = Board::new(15);
    for c in 2..8 {
      board.set(3, c, Some(Role::White));
    }
    let m = measure_direction(&board, 3, 2, (0, 1), Role::White, true);
    assert_eq!(m, dm(5, 0, 0));
  }

  #[test]
  fn test_gapped_long_line_counts_as_blocked_four() {
    let mut board = Board::new(15);
    // X X X _ [X] X
    for c in [1, 2, 3, 6] {
      board.set(5, c, Some(Role::Black));
    }
    let m = measure_direction(&board, 5, 5, (0, 1), Role::Black, false);
    assert_eq!(m, dm(4, 1, 1));
  }

  #[test]
  fn test_line_longer_than_i8_saturates() {
    let mut board = Board::new(140);
    for c in 0..130 {
      board.set(5, c, Some(Role::Black));
    }
    let m = measure_direction(&board, 5, 64, (0, 1), Role::Black, true);
    assert_eq!(m, dm(5, 0, 0));
  }
}
