//! Scored line shapes used by the evaluator.
//!
//! A pattern is one or two direction templates that must all be present among
//! the four measured directions of a move. Templates describe absolute line
//! lengths, so the library also keeps a skip table that lets the evaluator
//! jump past patterns longer than anything it measured.

/// Template field value meaning "any value matches".
pub const ANY: i8 = -1;

/// Longest line a measurement can report after overline collapsing.
pub const MAX_LINE_LENGTH: usize = 5;

/// One direction template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionPattern {
  /// How many directions must match for one unit of score
  pub min_occurrence: i8,
  pub length: i8,
  pub block_count: i8,
  pub space_count: i8,
}

impl DirectionPattern {
  const fn new(min_occurrence: i8, length: i8, block_count: i8, space_count: i8) -> Self {
    Self {
      min_occurrence,
      length,
      block_count,
      space_count,
    }
  }
}

/// One or two templates combined with AND, worth `score` per match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredPattern {
  pub templates: [Option<DirectionPattern>; 2],
  pub score: i32,
}

#[derive(Debug, Clone)]
pub struct PatternLibrary {
  patterns: Vec<ScoredPattern>,
  skip: [usize; MAX_LINE_LENGTH + 1],
}

#[rustfmt::skip]
const PRESET: [(DirectionPattern, Option<DirectionPattern>, i32); 11] = [
  (DirectionPattern::new(1, 5, 0, 0),     None,                                   10000),
  (DirectionPattern::new(1, 4, 0, 0),     None,                                     700),
  (DirectionPattern::new(2, 4, 1, 0),     None,                                     700),
  (DirectionPattern::new(2, 4, ANY, 1),   None,                                     700),
  (DirectionPattern::new(1, 4, 1, 0),     Some(DirectionPattern::new(1, 4, ANY, 1)),  700),
  (DirectionPattern::new(1, 4, 1, 0),     Some(DirectionPattern::new(1, 3, 0, ANY)),  500),
  (DirectionPattern::new(1, 4, ANY, 1),   Some(DirectionPattern::new(1, 3, 0, ANY)),  500),
  (DirectionPattern::new(2, 3, 0, ANY),   None,                                     300),
  (DirectionPattern::new(3, 2, 0, ANY),   None,                                      50),
  (DirectionPattern::new(1, 3, 0, ANY),   None,                                      20),
  (DirectionPattern::new(1, 2, 0, ANY),   None,                                       9),
];

impl PatternLibrary {
  /// The standard table. Build it once and share it by reference.
  pub fn new() -> Self {
    let patterns: Vec<ScoredPattern> = PRESET
      .iter()
      .map(|&(first, second, score)| ScoredPattern {
        templates: [Some(first), second],
        score,
      })
      .collect();

    // index of the first pattern worth checking, by longest measured line
    let end = patterns.len();
    let skip = [end, end, 10, 7, 1, 0];

    Self { patterns, skip }
  }

  pub fn patterns(&self) -> &[ScoredPattern] {
    &self.patterns
  }

  /// First pattern index that can match when the longest line is `max_length`.
  pub fn first_candidate(&self, max_length: usize) -> usize {
    self.skip[max_length.min(MAX_LINE_LENGTH)]
  }

  pub fn len(&self) -> usize {
    self.patterns.len()
  }

  pub fn is_empty(&self) -> bool {
    self.patterns.is_empty()
  }
}

impl Default for PatternLibrary {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_scores_in_table_order() {
    let lib = PatternLibrary::new();
    let scores: Vec<i32> = lib.patterns().iter().map(|p| p.score).collect();
    assert_eq!(scores, vec![10000, 700, 700, 700, 700, 500, 500, 300, 50, 20, 9]);
  }

  #[test]
  fn test_two_template_rows() {
    let lib = PatternLibrary::new();
    let paired: Vec<usize> = lib
      .patterns()
      .iter()
      .enumerate()
      .filter(|(_, p)| p.templates[1].is_some())
      .map(|(i, _)| i)
      .collect();
    assert_eq!(paired, vec![4, 5, 6]);

    let gapped_four_and_three = lib.patterns()[6];
    assert_eq!(gapped_four_and_three.templates[0], Some(DirectionPattern::new(1, 4, ANY, 1)));
    assert_eq!(gapped_four_and_three.templates[1], Some(DirectionPattern::new(1, 3, 0, ANY)));
  }

  #[test]
  fn test_skip_table_points_at_first_pattern_of_that_length() {
    let lib = PatternLibrary::new();
    assert_eq!(lib.first_candidate(5), 0);
    assert_eq!(lib.first_candidate(4), 1);
    assert_eq!(lib.first_candidate(3), 7);
    assert_eq!(lib.first_candidate(2), 10);
    assert_eq!(lib.first_candidate(1), lib.len());
    assert_eq!(lib.first_candidate(0), lib.len());

    for len in 2..=MAX_LINE_LENGTH {
      let first = lib.first_candidate(len);
      let longest = lib.patterns()[first].templates[0].map(|t| t.length as usize);
      assert_eq!(longest, Some(len));
      // nothing before the skip index is shorter than the measured line
      for p in &lib.patterns()[..first] {
        assert!(p.templates[0].map_or(0, |t| t.length as usize) >= len);
      }
    }
  }
}
