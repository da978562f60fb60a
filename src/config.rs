use std::time::Duration;

use crate::error::{EngineError, EngineResult};

/// Deepest fixed depth a caller may request.
pub const MAX_FIXED_DEPTH: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDepth {
  /// Search exactly this many plies
  Fixed(u32),
  /// Deepen until the time budget runs out
  Iterative,
}

/// Search policy knobs. `Default` reproduces the reference engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
  pub depth: SearchDepth,
  pub time_limit: Duration,
  pub alpha_beta: bool,

  // Positions with at most `opening_stone_limit` stones are searched at `opening_depth`
  pub opening_depth: u32,
  pub opening_stone_limit: usize,

  pub iterative_start_depth: u32,
  pub iterative_step: u32,
  pub max_depth: u32,
  /// Estimated average branching factor used to predict the next round's cost
  pub branching_factor: u32,

  /// Moves expanded per node, from the root downwards
  pub breadth: [usize; 5],
  /// Multiplier applied to scores coming back from deeper plies
  pub score_decay: f32,
}

impl Default for SearchConfig {
  fn default() -> Self {
    Self {
      depth: SearchDepth::Iterative,
      time_limit: Duration::from_millis(1000),
      alpha_beta: true,
      opening_depth: 6,
      opening_stone_limit: 2,
      iterative_start_depth: 6,
      iterative_step: 2,
      max_depth: 16,
      branching_factor: 3,
      breadth: [17, 7, 5, 3, 3],
      score_decay: 0.95,
    }
  }
}

impl SearchConfig {
  pub fn with_depth(mut self, depth: SearchDepth) -> Self {
    self.depth = depth;
    self
  }

  pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
    self.time_limit = time_limit;
    self
  }

  pub fn with_alpha_beta(mut self, enabled: bool) -> Self {
    self.alpha_beta = enabled;
    self
  }

  /// Reject depths the engine does not accept from callers.
  pub fn validate(&self) -> EngineResult<()> {
    match self.depth {
      SearchDepth::Fixed(depth) if depth == 0 || depth > MAX_FIXED_DEPTH => Err(EngineError::InvalidDepth(depth)),
      _ => Ok(()),
    }
  }
}
