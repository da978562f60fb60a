mod cli;
mod game;
mod game_logger;
mod terminal_ui;

use crate::cli::{CliArgs, GameModeArg};
use crate::game::{Game, GameMode};
use crate::game_logger::GameLogger;
use clap::Parser;
use gomoku_negamax::player::{Player, PlayerType};
use gomoku_negamax::{AIEngine, Board, EngineResult, Role};
use log::error;
use simplelog::{LevelFilter, WriteLogger};
use std::fs::{self, File};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
  let args = CliArgs::parse();
  match run(&args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      error!("{}", err);
      eprintln!("error: {}", err);
      ExitCode::FAILURE
    }
  }
}

fn init_stderr_logging() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn run(args: &CliArgs) -> EngineResult<()> {
  let config = args.search_config();

  // One-shot analysis of a position
  if let Some(path) = &args.board {
    init_stderr_logging();
    return analyse(path, args.role.into(), AIEngine::new(config));
  }

  let mode = match args.mode {
    GameModeArg::HumanHuman => GameMode::HumanvHuman,
    GameModeArg::HumanAi => GameMode::AIvHuman,
    GameModeArg::AiAi => GameMode::AIvAI,
  };
  let seat = |is_ai: bool, role: Role| Player {
    player_type: if is_ai { PlayerType::AI } else { PlayerType::Human },
    role,
  };

  // Headless AI vs AI with a transcript
  if let Some(path) = &args.transcript {
    init_stderr_logging();
    let mut logger = GameLogger::new(path)?;
    let mut game = Game::new(args.size, GameMode::AIvAI, seat(true, Role::Black), seat(true, Role::White), config)?;
    return game.run_with_logging(&mut logger);
  }

  // The UI owns the terminal, so log records go to a file
  if let Err(err) = WriteLogger::init(LevelFilter::Info, simplelog::Config::default(), File::create(&args.log_file)?) {
    eprintln!("logging disabled: {}", err);
  }

  // Black moves first; in human-ai mode the AI takes black
  let player1 = seat(mode != GameMode::HumanvHuman, Role::Black);
  let player2 = seat(mode == GameMode::AIvAI, Role::White);
  let mut game = Game::new(args.size, mode, player1, player2, config)?;
  game.run()
}

fn analyse(path: &Path, role: Role, engine: AIEngine) -> EngineResult<()> {
  let board = Board::parse(&fs::read_to_string(path)?)?;
  let report = engine.make_move(&board, role)?;

  match report.best_move {
    Some((row, col)) => {
      let mut after = board.clone();
      after.set(row, col, Some(role));
      print!("{}", after);
      println!("move: {} {}", row, col);
    }
    None => println!("move: none"),
  }
  println!("score: {}", report.score);
  println!("depth: {}", report.actual_depth);
  println!(
    "winner: {}",
    report.winner.map_or_else(|| "none".to_string(), |role| format!("{:?}", role))
  );
  println!(
    "nodes: {} evaluations: {} pattern matches: {}",
    report.stats.nodes, report.stats.evaluations, report.stats.pattern_matches
  );
  Ok(())
}
