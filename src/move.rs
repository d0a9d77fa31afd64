use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;
use crate::position::Position;

/// A turn: a stone placed at `(row, col)`, or a pass when the side to move
/// has no flipping placement.
///
/// Written in the usual Othello notation, column letter then 1-based row,
/// so `Move::place(2, 3)` is `d3`. Columns beyond `z` print as `(row,col)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Place { row: usize, col: usize },
    Pass,
}

impl Move {
    pub fn place(row: usize, col: usize) -> Self {
        Move::Place { row, col }
    }

    pub fn pass() -> Self {
        Move::Pass
    }

    pub fn is_pass(&self) -> bool {
        *self == Move::Pass
    }

    pub fn position(&self) -> Option<Position> {
        if let Move::Place { row, col } = *self {
            Some(Position::new(row, col))
        } else {
            None
        }
    }

    pub fn row(&self) -> Option<usize> {
        self.position().map(|pos| pos.row)
    }

    pub fn col(&self) -> Option<usize> {
        self.position().map(|pos| pos.col)
    }
}

impl From<Position> for Move {
    fn from(pos: Position) -> Self {
        Move::place(pos.row, pos.col)
    }
}

/// `a` for column 0 through `z` for column 25.
fn column_letter(col: usize) -> Option<char> {
    u8::try_from(col)
        .ok()
        .filter(|&c| c < 26)
        .map(|c| (b'a' + c) as char)
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Place { row, col } => match (column_letter(col), row.checked_add(1)) {
                (Some(letter), Some(rank)) => write!(f, "{}{}", letter, rank),
                _ => write!(f, "({},{})", row, col),
            },
            Move::Pass => f.write_str("pass"),
        }
    }
}

impl FromStr for Move {
    type Err = BoardError;

    /// Parses `d3`-style notation (either letter case) or `pass`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        if text == "pass" {
            return Ok(Move::Pass);
        }

        let invalid = || BoardError::InvalidNotation(s.to_string());
        let mut chars = text.chars();
        let letter = chars.next().filter(char::is_ascii_lowercase).ok_or_else(invalid)?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let row: usize = digits.parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }

        Ok(Move::place(row - 1, (letter as u8 - b'a') as usize))
    }
}
