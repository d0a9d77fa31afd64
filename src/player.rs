use crate::error::BoardError;

/// The two sides. The discriminants double as the matrix export values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Player {
    First = -1,
    Second = 1,
}

impl Player {
    pub fn opposite(&self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Player::First => 'B',
            Player::Second => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Player> {
        match c {
            'B' | 'b' => Some(Player::First),
            'W' | 'w' => Some(Player::Second),
            _ => None,
        }
    }

    pub fn from_int(i: i8) -> Option<Player> {
        match i {
            -1 => Some(Player::First),
            1 => Some(Player::Second),
            _ => None,
        }
    }

    /// Parse an integer tag coming from a host environment.
    pub fn try_from_int(i: i64) -> Result<Player, BoardError> {
        match i {
            -1 => Ok(Player::First),
            1 => Ok(Player::Second),
            _ => Err(BoardError::InvalidColor(i.to_string())),
        }
    }

    /// Parse a color name. Accepts the historical "black"/"white" names as
    /// well as "first"/"second", case-insensitively.
    pub fn try_from_name(name: &str) -> Result<Player, BoardError> {
        match name.to_ascii_lowercase().as_str() {
            "black" | "first" => Ok(Player::First),
            "white" | "second" => Ok(Player::Second),
            _ => Err(BoardError::InvalidColor(name.to_string())),
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let player_str = match self {
            Player::First => "First",
            Player::Second => "Second",
        };
        write!(f, "{}", player_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(Player::First.opposite(), Player::Second);
        assert_eq!(Player::Second.opposite(), Player::First);
    }

    #[test]
    fn test_int_tags() {
        assert_eq!(Player::First as i8, -1);
        assert_eq!(Player::Second as i8, 1);
        assert_eq!(Player::from_int(-1), Some(Player::First));
        assert_eq!(Player::from_int(0), None);
        assert_eq!(Player::try_from_int(1), Ok(Player::Second));
        assert_eq!(
            Player::try_from_int(2),
            Err(BoardError::InvalidColor("2".to_string()))
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(Player::try_from_name("black"), Ok(Player::First));
        assert_eq!(Player::try_from_name("White"), Ok(Player::Second));
        assert!(Player::try_from_name("red").is_err());
    }
}
