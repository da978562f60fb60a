use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use gomoku_negamax::{Role, SearchConfig, SearchDepth};

/// Game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GameModeArg {
  /// Human vs Human
  HumanHuman,
  /// Human vs AI
  HumanAi,
  /// AI vs AI
  AiAi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
  Black,
  White,
}

impl From<RoleArg> for Role {
  fn from(arg: RoleArg) -> Role {
    match arg {
      RoleArg::Black => Role::Black,
      RoleArg::White => Role::White,
    }
  }
}

/// Gomoku with a heuristic negamax opponent
#[derive(Parser, Debug)]
#[command(name = "gomoku_negamax", version)]
pub struct CliArgs {
  /// Game mode
  #[arg(long, value_enum, default_value_t=GameModeArg::HumanAi)]
  pub mode: GameModeArg,

  /// Field size
  #[arg(long, default_value_t = 15)]
  pub size: usize,

  /// Fixed AI depth (1-10); deepens iteratively within the time limit when omitted
  #[arg(long, value_parser = clap::value_parser!(u32).range(1..=10))]
  pub depth: Option<u32>,

  /// Time budget per AI move in milliseconds
  #[arg(long, default_value_t = 1000)]
  pub time_limit: u64,

  /// Disable alpha-beta pruning
  #[arg(long)]
  pub no_pruning: bool,

  /// Analyse the position in this file and print the chosen move
  #[arg(long)]
  pub board: Option<PathBuf>,

  /// Side to move when analysing a position
  #[arg(long, value_enum, default_value_t=RoleArg::Black)]
  pub role: RoleArg,

  /// Log file used while the terminal UI is active
  #[arg(long, default_value = "gomoku.log")]
  pub log_file: PathBuf,

  /// Play AI vs AI without the UI and write a transcript to this file
  #[arg(long)]
  pub transcript: Option<PathBuf>,
}

impl CliArgs {
  pub fn search_config(&self) -> SearchConfig {
    let depth = match self.depth {
      Some(depth) => SearchDepth::Fixed(depth),
      None => SearchDepth::Iterative,
    };
    SearchConfig::default()
      .with_depth(depth)
      .with_time_limit(Duration::from_millis(self.time_limit))
      .with_alpha_beta(!self.no_pruning)
  }
}
