use std::cmp::Ordering;
use std::fmt;

use crate::board::Board;
use crate::player::Player;

/// Result of a finished game: whoever owns more discs wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    FirstWin,
    SecondWin,
    Draw,
}

impl GameOutcome {
    pub fn from_disc_counts(first: u32, second: u32) -> Self {
        match first.cmp(&second) {
            Ordering::Greater => GameOutcome::FirstWin,
            Ordering::Less => GameOutcome::SecondWin,
            Ordering::Equal => GameOutcome::Draw,
        }
    }

    /// Scores `board` as it stands, whether or not play could continue.
    pub fn from_board(board: &Board) -> Self {
        Self::from_disc_counts(
            board.disc_count(Player::First),
            board.disc_count(Player::Second),
        )
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            GameOutcome::FirstWin => Some(Player::First),
            GameOutcome::SecondWin => Some(Player::Second),
            GameOutcome::Draw => None,
        }
    }

    /// The winner's color tag as a float, 0.0 on a draw.
    pub fn encode_winner_absolute(&self) -> f32 {
        self.winner().map_or(0.0, |player| f32::from(player as i8))
    }

    pub fn encode_winner_from_perspective(&self, perspective: Player) -> f32 {
        match self.winner() {
            Some(winner) if winner == perspective => 1.0,
            Some(_) => -1.0,
            None => 0.0,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.winner().is_none()
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(player) => write!(f, "{} wins", player),
            None => f.write_str("Draw"),
        }
    }
}
