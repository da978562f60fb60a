/// Errors raised at the engine boundary.
///
/// The search itself never fails; these cover malformed boards and settings.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
  /// Board too small to hold a line of five
  #[error("board size {0} is too small (minimum 5)")]
  BoardSize(usize),

  /// Flat buffer length does not match size * size
  #[error("expected {expected} cells, got {actual}")]
  CellCount { expected: usize, actual: usize },

  /// Cell value other than 0, 1 or 2
  #[error("invalid cell value {value} at index {index}")]
  InvalidCell { index: usize, value: u8 },

  /// Unknown character in a text board
  #[error("invalid symbol {symbol:?} at line {line}")]
  InvalidSymbol { line: usize, symbol: char },

  /// Text board row of the wrong width
  #[error("row {line} has {actual} cells, expected {expected}")]
  RaggedRow { line: usize, expected: usize, actual: usize },

  /// Fixed depth outside 1..=10
  #[error("search depth {0} is out of range (1..=10)")]
  InvalidDepth(u32),

  /// File I/O error
  #[error(transparent)]
  Io(#[from] std::io::Error),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
