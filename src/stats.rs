/// Work counters for one top-level search, threaded through every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
  /// Search nodes expanded
  pub nodes: u64,
  /// Candidate moves scored by the evaluator
  pub evaluations: u64,
  /// Pattern/measurement comparisons
  pub pattern_matches: u64,
}

impl SearchStats {
  pub fn merge(&mut self, other: &SearchStats) {
    self.nodes += other.nodes;
    self.evaluations += other.evaluations;
    self.pattern_matches += other.pattern_matches;
  }
}
