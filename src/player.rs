#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerType {
  Human,
  AI,
}

// Colour of the stone. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
  Black, // 1
  White, // 2
}

impl Role {
  // Get the opponent's role
  pub fn opponent(&self) -> Role {
    match self {
      Role::Black => Role::White,
      Role::White => Role::Black,
    }
  }

  // Cell value used in flat board buffers
  pub fn id(&self) -> u8 {
    match self {
      Role::Black => 1,
      Role::White => 2,
    }
  }

  pub fn from_id(id: u8) -> Option<Role> {
    match id {
      1 => Some(Role::Black),
      2 => Some(Role::White),
      _ => None,
    }
  }

  pub fn symbol(&self) -> char {
    match self {
      Role::Black => 'X',
      Role::White => 'O',
    }
  }
}

#[derive(Debug, Clone, Copy)]
pub struct Player {
  pub player_type: PlayerType,
  pub role: Role,
}
