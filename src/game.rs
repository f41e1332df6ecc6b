use std::fmt;
use std::str::FromStr;

use strum::EnumIter;
use thiserror::Error;

mod board;
mod otrio;
mod win;

pub use board::{BOARD_SIZE, Board, Cell};
pub use otrio::{Inventory, Otrio, PIECES_PER_SIZE};
pub use win::{Line, Pattern, Win, find_win, has_win};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub(crate) fn index(self) -> usize {
        usize::from(self.number() - 1)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Piece size. Declaration order is the nesting order, smallest first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, EnumIter)]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    /// 1 for Small up to 3 for Large.
    pub fn ordinal(self) -> u8 {
        match self {
            Size::Small => 1,
            Size::Medium => 2,
            Size::Large => 3,
        }
    }

    pub(crate) fn index(self) -> usize {
        usize::from(self.ordinal() - 1)
    }

    pub fn letter(self) -> char {
        match self {
            Size::Small => 'S',
            Size::Medium => 'M',
            Size::Large => 'L',
        }
    }
}

impl FromStr for Size {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "S" => Ok(Size::Small),
            "M" => Ok(Size::Medium),
            "L" => Ok(Size::Large),
            _ => Err(MoveError::InvalidSize),
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Small => write!(f, "Small"),
            Size::Medium => write!(f, "Medium"),
            Size::Large => write!(f, "Large"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    pub size: Size,
    pub owner: Player,
}

impl Piece {
    pub fn new(size: Size, owner: Player) -> Self {
        Piece { size, owner }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.size.letter(), self.owner.number())
    }
}

/// Final state of a finished game.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameResult {
    Win(Player),
    Draw,
}

/// What an accepted move did to the game.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Continue,
    Win(Player),
    Draw,
}

/// Why a move was rejected. A rejected move leaves the game untouched.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum MoveError {
    #[error("Game is over!")]
    GameAlreadyOver,
    #[error("Invalid size. Choose S, M, or L.")]
    InvalidSize,
    #[error("Invalid coordinates.")]
    InvalidCoordinate,
    #[error("No pieces of that size left.")]
    NoPiecesRemaining,
    #[error("Cannot place piece there.")]
    CellRejectsPiece,
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn size_letters_parse_in_any_case() {
        assert_eq!("S".parse::<Size>(), Ok(Size::Small));
        assert_eq!("m".parse::<Size>(), Ok(Size::Medium));
        assert_eq!("l".parse::<Size>(), Ok(Size::Large));
    }

    #[test]
    fn unknown_size_letters_are_rejected() {
        for input in ["", "X", "SM", "small", "1"] {
            assert_eq!(input.parse::<Size>(), Err(MoveError::InvalidSize), "{input:?}");
        }
    }

    #[test]
    fn sizes_iterate_smallest_first() {
        let ordinals: Vec<u8> = Size::iter().map(Size::ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3]);
    }

    #[test]
    fn opponent_toggles() {
        for player in Player::iter() {
            assert_ne!(player.opponent(), player);
            assert_eq!(player.opponent().opponent(), player);
        }
    }

    #[test]
    fn pieces_display_as_letter_and_owner() {
        assert_eq!(Piece::new(Size::Small, Player::One).to_string(), "S1");
        assert_eq!(Piece::new(Size::Large, Player::Two).to_string(), "L2");
    }
}
