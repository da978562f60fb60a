use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::error::{EngineError, EngineResult};
use crate::player::Role;

/// Cells within this Chebyshev distance of a stone are worth considering.
pub const REMOTE_RADIUS: isize = 2;

/// Smallest board that can still hold a line of five.
pub const MIN_BOARD_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
  pub size: usize,
  cells: Vec<Option<Role>>,               // row-major, None=empty
  history: Vec<(usize, usize, Role)>,     // History of moves made through `put`
}

impl Board {
  // Create an empty board with the given size
  pub fn new(size: usize) -> Self {
    Self {
      size,
      cells: vec![None; size * size],
      history: Vec::new(),
    }
  }

  /// Build a board from a flat row-major buffer (0 empty, 1 black, 2 white).
  pub fn from_cells(size: usize, cells: &[u8]) -> EngineResult<Self> {
    if size < MIN_BOARD_SIZE {
      return Err(EngineError::BoardSize(size));
    }
    if cells.len() != size * size {
      return Err(EngineError::CellCount {
        expected: size * size,
        actual: cells.len(),
      });
    }
    let mut board = Board::new(size);
    for (index, &value) in cells.iter().enumerate() {
      board.cells[index] = match value {
        0 => None,
        id => Some(Role::from_id(id).ok_or(EngineError::InvalidCell { index, value })?),
      };
    }
    Ok(board)
  }

  /// Parse the text form: one row per line, `.` empty, `X` black, `O` white.
  /// Whitespace between symbols and blank lines are ignored.
  pub fn parse(text: &str) -> EngineResult<Self> {
    let mut rows: Vec<Vec<Option<Role>>> = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
      let mut row = Vec::new();
      for symbol in line.chars().filter(|ch| !ch.is_whitespace()) {
        let cell = match symbol {
          '.' | '+' => None,
          'X' | 'x' => Some(Role::Black),
          'O' | 'o' => Some(Role::White),
          _ => {
            return Err(EngineError::InvalidSymbol {
              line: line_no + 1,
              symbol,
            })
          }
        };
        row.push(cell);
      }
      if !row.is_empty() {
        rows.push(row);
      }
    }

    let size = rows.len();
    if size < MIN_BOARD_SIZE {
      return Err(EngineError::BoardSize(size));
    }
    let mut board = Board::new(size);
    for (r, row) in rows.into_iter().enumerate() {
      if row.len() != size {
        return Err(EngineError::RaggedRow {
          line: r + 1,
          expected: size,
          actual: row.len(),
        });
      }
      board.cells[r * size..(r + 1) * size].copy_from_slice(&row);
    }
    Ok(board)
  }

  /// Flat row-major buffer (0 empty, 1 black, 2 white).
  pub fn to_cells(&self) -> Vec<u8> {
    self.cells.iter().map(|cell| cell.map_or(0, |role| role.id())).collect()
  }

  #[inline]
  pub fn get(&self, row: usize, col: usize) -> Option<Role> {
    self.cells[row * self.size + col]
  }

  #[inline]
  pub fn set(&mut self, row: usize, col: usize, value: Option<Role>) {
    self.cells[row * self.size + col] = value;
  }

  /// Read a cell by signed coordinates; anything off the grid reads as empty.
  #[inline]
  pub fn cell(&self, row: isize, col: isize) -> Option<Role> {
    if self.in_bounds(row, col) {
      self.get(row as usize, col as usize)
    } else {
      None
    }
  }

  #[inline]
  pub fn in_bounds(&self, row: isize, col: isize) -> bool {
    row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
  }

  // True when no stone lies within REMOTE_RADIUS of (row, col)
  pub fn is_remote(&self, row: usize, col: usize) -> bool {
    let (row, col) = (row as isize, col as isize);
    for dr in -REMOTE_RADIUS..=REMOTE_RADIUS {
      for dc in -REMOTE_RADIUS..=REMOTE_RADIUS {
        if self.cell(row + dr, col + dc).is_some() {
          return false;
        }
      }
    }
    true
  }

  pub fn stone_count(&self) -> usize {
    self.cells.iter().filter(|cell| cell.is_some()).count()
  }

  pub fn is_full(&self) -> bool {
    self.cells.iter().all(|cell| cell.is_some())
  }

  /// Bounding rectangle `(min_row, min_col, max_row, max_col)` of all stones.
  pub fn occupied_bounds(&self) -> Option<(usize, usize, usize, usize)> {
    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for (index, cell) in self.cells.iter().enumerate() {
      if cell.is_none() {
        continue;
      }
      let (r, c) = (index / self.size, index % self.size);
      bounds = Some(match bounds {
        None => (r, c, r, c),
        Some((min_r, min_c, max_r, max_c)) => (min_r.min(r), min_c.min(c), max_r.max(r), max_c.max(c)),
      });
    }
    bounds
  }

  // Place a stone on the board and remember it for `undo`
  pub fn put(&mut self, row: usize, col: usize, role: Role) -> bool {
    if row >= self.size || col >= self.size {
      return false;
    }
    if self.get(row, col).is_some() {
      return false;
    }
    self.set(row, col, Some(role));
    self.history.push((row, col, role));
    true
  }

  // Undo the last move made with `put`
  pub fn undo(&mut self) -> bool {
    match self.history.pop() {
      None => false,
      Some((row, col, _role)) => {
        self.set(row, col, None);
        true
      }
    }
  }

  pub fn last_move(&self) -> Option<(usize, usize, Role)> {
    self.history.last().copied()
  }

  /// Place a stone for the lifetime of the returned guard.
  ///
  /// The cell is cleared again when the guard drops, whichever way the
  /// caller leaves its scope.
  pub fn trial(&mut self, row: usize, col: usize, role: Role) -> TrialMove<'_> {
    debug_assert!(self.get(row, col).is_none(), "trial move on occupied cell ({row}, {col})");
    self.set(row, col, Some(role));
    TrialMove { board: self, row, col }
  }
}

impl fmt::Display for Board {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for r in 0..self.size {
      let line: Vec<String> = (0..self.size)
        .map(|c| self.get(r, c).map_or('.', |role| role.symbol()).to_string())
        .collect();
      writeln!(f, "{}", line.join(" "))?;
    }
    Ok(())
  }
}

/// A stone placed by [`Board::trial`], removed on drop.
pub struct TrialMove<'a> {
  board: &'a mut Board,
  row: usize,
  col: usize,
}

impl Deref for TrialMove<'_> {
  type Target = Board;

  fn deref(&self) -> &Board {
    &*self.board
  }
}

impl DerefMut for TrialMove<'_> {
  fn deref_mut(&mut self) -> &mut Board {
    &mut *self.board
  }
}

impl Drop for TrialMove<'_> {
  fn drop(&mut self) {
    self.board.set(self.row, self.col, None);
  }
}
