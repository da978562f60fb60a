use crossterm::{
  cursor::{Hide, MoveTo, Show},
  event::{read, Event, KeyCode, KeyEvent, KeyEventKind},
  execute,
  style::{Color, Print, ResetColor, SetForegroundColor},
  terminal::{disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use gomoku_negamax::{Board, Role};
use std::io::{stdout, Result as IoResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
  None,
  Quit,
  TogglePause,
  Undo,
  MoveLeft,
  MoveRight,
  MoveUp,
  MoveDown,
  PlaceStone,
}

/// What the board view highlights besides the stones.
pub struct BoardView {
  pub cursor: (usize, usize),
  pub last_stone: Option<(usize, usize)>,
  pub show_cursor: bool,
}

pub struct TerminalUI {
  /// Shown on the bottom line, survives redraws
  last_message: String,
  /// Shown above the board (side to move, last search)
  status: String,
  /// False when nothing should reach the terminal (headless play)
  attached: bool,
}

impl TerminalUI {
  const CURSOR_COLOR: Color = Color::Rgb { r: 120, g: 255, b: 120 };
  const LAST_STONE_COLOR: Color = Color::Rgb { r: 255, g: 140, b: 140 };
  const CELL_WIDTH: u16 = 2;

  pub fn new() -> Self {
    Self {
      last_message: String::new(),
      status: String::new(),
      attached: true,
    }
  }

  /// A UI that keeps messages but never draws.
  pub fn detached() -> Self {
    Self {
      attached: false,
      ..Self::new()
    }
  }

  pub fn init_screen(&mut self) -> IoResult<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, Hide)?;
    Ok(())
  }

  pub fn restore_terminal(&mut self) -> IoResult<()> {
    execute!(stdout(), Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
  }

  /// Block until a key press and map it to an action.
  pub fn read_input(&mut self) -> GameAction {
    let Ok(Event::Key(KeyEvent { code, kind, .. })) = read() else {
      return GameAction::None;
    };
    if kind == KeyEventKind::Release {
      return GameAction::None;
    }
    match code {
      KeyCode::Esc | KeyCode::Char('q') => GameAction::Quit,
      KeyCode::Char('p') => GameAction::TogglePause,
      KeyCode::Backspace | KeyCode::Char('u') => GameAction::Undo,
      KeyCode::Left | KeyCode::Char('h') => GameAction::MoveLeft,
      KeyCode::Right | KeyCode::Char('l') => GameAction::MoveRight,
      KeyCode::Up | KeyCode::Char('k') => GameAction::MoveUp,
      KeyCode::Down | KeyCode::Char('j') => GameAction::MoveDown,
      KeyCode::Enter | KeyCode::Char(' ') => GameAction::PlaceStone,
      _ => GameAction::None,
    }
  }

  pub fn show_message(&mut self, msg: &str) {
    self.last_message = msg.to_string();
    self.draw_line(self.last_message.clone(), 2);
  }

  pub fn set_status(&mut self, status: String) {
    self.status = status;
  }

  // Print `text` centred on the line `from_bottom` rows above the bottom edge
  fn draw_line(&self, text: String, from_bottom: u16) {
    if !self.attached {
      return;
    }
    let (cols, rows) = size().unwrap_or((80, 24));
    let y = rows.saturating_sub(from_bottom);
    let x = cols.saturating_sub(text.chars().count() as u16) / 2;
    execute!(stdout(), MoveTo(0, y), Clear(ClearType::CurrentLine), MoveTo(x, y), Print(text)).ok();
  }

  pub fn draw_board(&mut self, board: &Board, view: &BoardView) {
    if !self.attached {
      return;
    }
    let (cols, rows) = size().unwrap_or((80, 24));

    let bsize = board.size as u16;
    let used_width = bsize * Self::CELL_WIDTH + 1;
    let offset_x = cols.saturating_sub(used_width) / 2;
    let offset_y = rows.saturating_sub(bsize + 2) / 2 + 1;

    let mut out = stdout();
    execute!(out, Clear(ClearType::All)).ok();
    self.draw_line(self.status.clone(), rows.saturating_sub(offset_y.saturating_sub(1)));

    execute!(out, MoveTo(offset_x, offset_y), Print("╔"), Print("═".repeat(used_width as usize)), Print("╗")).ok();

    for row in 0..board.size {
      let y = offset_y + 1 + row as u16;
      execute!(out, MoveTo(offset_x, y), Print("║ ")).ok();
      for col in 0..board.size {
        let is_cursor = view.show_cursor && view.cursor == (row, col);
        let is_last = view.last_stone == Some((row, col));

        let symbol = match board.get(row, col) {
          Some(Role::Black) => "X",
          Some(Role::White) => "O",
          None if is_cursor => "+",
          None => ".",
        };
        let color = if is_cursor {
          Some(Self::CURSOR_COLOR)
        } else if is_last {
          Some(Self::LAST_STONE_COLOR)
        } else {
          None
        };

        match color {
          Some(color) => execute!(out, SetForegroundColor(color), Print(symbol), ResetColor, Print(" ")).ok(),
          None => execute!(out, Print(symbol), Print(" ")).ok(),
        };
      }
      execute!(out, Print("║")).ok();
    }

    let bottom = offset_y + 1 + bsize;
    execute!(out, MoveTo(offset_x, bottom), Print("╚"), Print("═".repeat(used_width as usize)), Print("╝")).ok();

    self.draw_line(self.last_message.clone(), 2);
  }
}
