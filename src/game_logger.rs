use gomoku_negamax::{Board, Move, MoveReport, Role, SearchStats, THREATENING_SCORE, WINNING_SCORE};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Move-by-move transcript of a game.
pub struct GameLogger {
  out: BufWriter<File>,
}

impl GameLogger {
  pub fn new(path: &Path) -> std::io::Result<Self> {
    let file = File::create(path)?;
    Ok(Self { out: BufWriter::new(file) })
  }

  pub fn log_move_start(&mut self, role: Role, round: u32) -> std::io::Result<()> {
    writeln!(
      self.out,
      "\n{}\nMove #{} - Player: {:?} ({})\n{}",
      "=".repeat(60),
      round,
      role,
      role.symbol(),
      "=".repeat(60)
    )
  }

  pub fn log_board_state(&mut self, board: &Board) -> std::io::Result<()> {
    writeln!(self.out, "\nCurrent board state:")?;
    write!(self.out, "{}", board)
  }

  pub fn log_candidates(&mut self, candidates: &[Move]) -> std::io::Result<()> {
    writeln!(self.out, "\nCandidate moves ({}):", candidates.len())?;
    for (i, m) in candidates.iter().enumerate().take(10) {
      if i > 0 && i % 5 == 0 {
        writeln!(self.out)?;
      }
      write!(self.out, "  ({:2},{:2})={:<6}", m.row, m.col, m.heuristic_val)?;
    }
    if candidates.len() > 10 {
      write!(self.out, "\n  ... and {} more", candidates.len() - 10)?;
    }
    writeln!(self.out)
  }

  pub fn log_decision(&mut self, report: &MoveReport) -> std::io::Result<()> {
    let reason = if report.best_move.is_none() {
      "No valid moves"
    } else if report.score >= WINNING_SCORE {
      "Winning move (FIVE)"
    } else if report.score >= THREATENING_SCORE {
      "Threat"
    } else if report.score < 0 {
      "Defensive/forced move"
    } else {
      "Search result"
    };
    writeln!(self.out, "\n*** DECISION ***")?;
    writeln!(self.out, "  Chosen move: {:?}", report.best_move)?;
    writeln!(self.out, "  Score: {}", report.score)?;
    writeln!(self.out, "  Depth: {}", report.actual_depth)?;
    writeln!(self.out, "  Reason: {}", reason)?;
    self.log_stats("  Work", &report.stats)
  }

  pub fn log_stats(&mut self, label: &str, stats: &SearchStats) -> std::io::Result<()> {
    writeln!(
      self.out,
      "{}: {} nodes, {} evaluations, {} pattern matches",
      label, stats.nodes, stats.evaluations, stats.pattern_matches
    )
  }

  pub fn log_game_end(&mut self, winner: Option<Role>, total_moves: u32, totals: &SearchStats) -> std::io::Result<()> {
    writeln!(self.out, "\n{}\nGAME OVER\n{}", "=".repeat(60), "=".repeat(60))?;
    match winner {
      Some(role) => writeln!(self.out, "Result: {:?} ({}) WINS!", role, role.symbol())?,
      None => writeln!(self.out, "Result: DRAW")?,
    }
    writeln!(self.out, "Total moves: {}", total_moves)?;
    self.log_stats("Total work", totals)?;
    self.out.flush()
  }
}
