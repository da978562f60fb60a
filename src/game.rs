use crate::game_logger::GameLogger;
use crate::terminal_ui::{BoardView, GameAction, TerminalUI};
use gomoku_negamax::board::MIN_BOARD_SIZE;
use gomoku_negamax::player::{Player, PlayerType};
use gomoku_negamax::{winning_player, AIEngine, Board, EngineError, EngineResult, Role, SearchConfig, SearchStats};
use log::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
  AIvAI,
  AIvHuman,
  HumanvHuman,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
  Win(Role),
  Draw,
}

pub struct Game {
  pub board: Board,
  pub mode: GameMode,

  pub player1: Player,
  pub player2: Player,

  // Both seats share one engine; it keeps no state between moves
  pub ai: AIEngine,

  // Cursor for human moves, (row, col)
  pub cursor: (usize, usize),

  pub ui: TerminalUI,

  pub current_role: Role,
  pub round: u32,
  pub totals: SearchStats,
}

impl Game {
  pub fn new(size: usize, mode: GameMode, p1: Player, p2: Player, config: SearchConfig) -> EngineResult<Self> {
    if size < MIN_BOARD_SIZE {
      return Err(EngineError::BoardSize(size));
    }
    config.validate()?;
    Ok(Self {
      board: Board::new(size),
      mode,
      player1: p1,
      player2: p2,
      ai: AIEngine::new(config),
      cursor: (size / 2, size / 2),
      ui: TerminalUI::new(),
      current_role: p1.role,
      round: 1,
      totals: SearchStats::default(),
    })
  }

  fn current_player(&self) -> Player {
    if self.current_role == self.player1.role {
      self.player1
    } else {
      self.player2
    }
  }

  fn outcome(&self) -> Option<Outcome> {
    if let Some(winner) = winning_player(&self.board) {
      Some(Outcome::Win(winner))
    } else if self.board.is_full() {
      Some(Outcome::Draw)
    } else {
      None
    }
  }

  /// Interactive game in the terminal.
  pub fn run(&mut self) -> EngineResult<()> {
    self.ui.init_screen()?;
    let result = self.game_loop();
    self.ui.restore_terminal()?;
    result
  }

  fn game_loop(&mut self) -> EngineResult<()> {
    let mut paused = false;
    let mut game_over = false;

    loop {
      let player = self.current_player();
      self.ui.set_status(format!(
        "Move #{} - {:?} ({}) to play{}",
        self.round,
        self.current_role,
        self.current_role.symbol(),
        if paused { " [paused]" } else { "" }
      ));
      let view = BoardView {
        cursor: self.cursor,
        last_stone: self.board.last_move().map(|(row, col, _)| (row, col)),
        show_cursor: player.player_type == PlayerType::Human && !game_over,
      };
      self.ui.draw_board(&self.board, &view);

      if paused || game_over {
        match self.ui.read_input() {
          _ if game_over => break,
          GameAction::Quit => break,
          GameAction::TogglePause => paused = false,
          _ => {}
        }
        continue;
      }

      match player.player_type {
        PlayerType::AI => {
          if self.mode == GameMode::HumanvHuman {
            warn!("AI seat in a human-only game, stopping");
            break;
          }
          if !self.ai_turn()? {
            game_over = true;
          }
        }
        PlayerType::Human => match self.ui.read_input() {
          GameAction::TogglePause => {
            paused = !paused;
            continue;
          }
          GameAction::Quit => break,
          GameAction::Undo => {
            self.undo_to_human();
            continue;
          }
          GameAction::MoveLeft => self.cursor.1 = self.cursor.1.saturating_sub(1),
          GameAction::MoveRight => self.cursor.1 = (self.cursor.1 + 1).min(self.board.size - 1),
          GameAction::MoveUp => self.cursor.0 = self.cursor.0.saturating_sub(1),
          GameAction::MoveDown => self.cursor.0 = (self.cursor.0 + 1).min(self.board.size - 1),
          GameAction::PlaceStone => {
            let (row, col) = self.cursor;
            if self.board.put(row, col, self.current_role) {
              info!("{:?} (human) plays ({}, {})", self.current_role, row, col);
              self.next_turn();
            } else {
              self.ui.show_message("That point is taken.");
            }
          }
          GameAction::None => continue,
        },
      }

      if let Some(outcome) = self.outcome() {
        self.print_outcome(outcome);
        game_over = true;
      }
    }
    Ok(())
  }

  fn next_turn(&mut self) {
    self.current_role = self.current_role.opponent();
    self.round += 1;
  }

  // Take back moves until a human is to play again
  fn undo_to_human(&mut self) {
    let steps = if self.mode == GameMode::AIvHuman { 2 } else { 1 };
    for _ in 0..steps {
      if !self.board.undo() {
        self.ui.show_message("No moves to undo.");
        return;
      }
      self.current_role = self.current_role.opponent();
      self.round = self.round.saturating_sub(1).max(1);
    }
  }

  // Returns false when the engine found nothing to play
  fn ai_turn(&mut self) -> EngineResult<bool> {
    self.ui.show_message(&format!("AI ({:?}) is thinking...", self.current_role));
    let report = self.ai.make_move(&self.board, self.current_role)?;
    self.totals.merge(&report.stats);

    let Some((row, col)) = report.best_move else {
      self.ui.show_message("AI chose no move");
      return Ok(false);
    };
    if !self.board.put(row, col, self.current_role) {
      warn!("engine chose occupied or off-board cell ({}, {})", row, col);
      self.ui.show_message("AI chose an illegal move");
      return Ok(false);
    }
    self.ui.show_message(&format!(
      "AI ({:?}) played ({}, {}) score={} depth={} nodes={}",
      self.current_role, row, col, report.score, report.actual_depth, report.stats.nodes
    ));
    self.next_turn();
    Ok(true)
  }

  fn print_outcome(&mut self, outcome: Outcome) {
    let msg = match outcome {
      Outcome::Win(role) => format!("Game over. {:?} ({}) wins! Press any key.", role, role.symbol()),
      Outcome::Draw => "Game over. Draw! Press any key.".to_string(),
    };
    info!("{}", msg);
    self.ui.show_message(&msg);
  }

  /// AI vs AI without the UI, writing every decision to `logger`.
  pub fn run_with_logging(&mut self, logger: &mut GameLogger) -> EngineResult<()> {
    self.ui = TerminalUI::detached();
    println!("Starting AI vs AI game with logging...");
    println!("Board size: {}", self.board.size);
    println!("Search: {:?}, {}ms per move", self.ai.config.depth, self.ai.config.time_limit.as_millis());
    println!();

    let winner = loop {
      logger.log_move_start(self.current_role, self.round)?;
      logger.log_board_state(&self.board)?;

      let mut scratch = SearchStats::default();
      let candidates = self.ai.order_candidate_moves(&self.board, self.current_role, &mut scratch);
      logger.log_candidates(&candidates)?;

      println!("Move #{} - {:?} thinking...", self.round, self.current_role);
      let report = self.ai.make_move(&self.board, self.current_role)?;
      logger.log_decision(&report)?;
      self.totals.merge(&report.stats);

      let Some((row, col)) = report.best_move else {
        break None;
      };
      println!("  -> Move: ({}, {}) Score: {} Depth: {}", row, col, report.score, report.actual_depth);
      if !self.board.put(row, col, self.current_role) {
        warn!("engine chose occupied or off-board cell ({}, {})", row, col);
        break None;
      }

      match self.outcome() {
        Some(Outcome::Win(role)) => break Some(role),
        Some(Outcome::Draw) => break None,
        None => self.next_turn(),
      }
    };

    logger.log_board_state(&self.board)?;
    logger.log_game_end(winner, self.round, &self.totals)?;

    println!("\nGame Over!");
    match winner {
      Some(role) => println!("Result: {:?} ({}) WINS!", role, role.symbol()),
      None => println!("Result: DRAW"),
    }
    println!("Total moves: {}", self.round);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use gomoku_negamax::SearchDepth;

  fn ai_seat(role: Role) -> Player {
    Player {
      player_type: PlayerType::AI,
      role,
    }
  }

  #[test]
  fn test_new_rejects_tiny_board() {
    let config = SearchConfig::default();
    let result = Game::new(4, GameMode::AIvAI, ai_seat(Role::Black), ai_seat(Role::White), config);
    assert!(matches!(result, Err(EngineError::BoardSize(4))));
  }

  #[test]
  fn test_ai_turn_places_stone_and_switches_side() {
    let config = SearchConfig::default().with_depth(SearchDepth::Fixed(1));
    let mut game = Game::new(9, GameMode::AIvAI, ai_seat(Role::Black), ai_seat(Role::White), config).unwrap();
    game.ui = TerminalUI::detached();
    game.board.put(4, 4, Role::Black);
    game.board.put(4, 5, Role::White);
    game.board.put(5, 5, Role::Black);
    game.current_role = Role::White;

    // the opening override is limited to two stones, three are on the board
    assert!(game.ai_turn().unwrap());
    assert_eq!(game.board.stone_count(), 4);
    assert_eq!(game.current_role, Role::Black);
    assert_eq!(game.totals.nodes, 1);
  }

  #[test]
  fn test_ai_turn_stops_when_nothing_to_play() {
    let config = SearchConfig::default().with_depth(SearchDepth::Fixed(1));
    let mut game = Game::new(5, GameMode::AIvAI, ai_seat(Role::Black), ai_seat(Role::White), config).unwrap();
    game.ui = TerminalUI::detached();
    let cells: Vec<u8> = (0..25).map(|i| if (i / 5 + i % 5 / 2) % 2 == 0 { 1 } else { 2 }).collect();
    game.board = Board::from_cells(5, &cells).unwrap();

    assert!(!game.ai_turn().unwrap());
    assert_eq!(game.current_role, Role::Black);
    assert_eq!(game.round, 1);
  }
}
