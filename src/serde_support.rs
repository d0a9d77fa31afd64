use crate::board::Board;
use crate::game::Game;
use crate::player::Player;
use crate::r#move::Move;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

fn parse_dimensions<E: serde::de::Error>(dims: &str) -> Result<(usize, usize), E> {
    let (r, c) = dims
        .split_once('x')
        .ok_or_else(|| E::custom("Invalid dimensions format"))?;
    let rows: usize = r
        .parse()
        .map_err(|e| E::custom(format!("Invalid rows: {}", e)))?;
    let columns: usize = c
        .parse()
        .map_err(|e| E::custom(format!("Invalid columns: {}", e)))?;
    Ok((rows, columns))
}

fn parse_move<E: serde::de::Error>(s: &str) -> Result<Move, E> {
    let s = s.trim();
    if s == "pass" {
        return Ok(Move::pass());
    }

    let (r, c) = s
        .split_once(',')
        .ok_or_else(|| E::custom(format!("Invalid move format: {}", s)))?;
    let row: usize = r
        .trim()
        .parse()
        .map_err(|e| E::custom(format!("Invalid row: {}", e)))?;
    let col: usize = c
        .trim()
        .parse()
        .map_err(|e| E::custom(format!("Invalid column: {}", e)))?;

    Ok(Move::place(row, col))
}

fn format_move(move_: &Move) -> String {
    match move_ {
        Move::Place { row, col } => format!("{},{}", row, col),
        Move::Pass => "pass".to_string(),
    }
}

fn parse_bitboard<E: serde::de::Error>(hex: &str, which: &str) -> Result<u64, E> {
    u64::from_str_radix(hex, 16).map_err(|e| E::custom(format!("Invalid {} bitboard: {}", which, e)))
}

fn parse_turn<E: serde::de::Error>(s: &str) -> Result<Player, E> {
    let mut chars = s.chars();
    match (chars.next().and_then(Player::from_char), chars.next()) {
        (Some(player), None) => Ok(player),
        _ => Err(E::custom(format!("Invalid side to move: {}", s))),
    }
}

/// "RxC:moves" for games from the standard start, otherwise
/// "RxC:first:second:turn:moves" with the starting bitboards in hex and the
/// side to move as `B`/`W`. Moves are separated by ';'.
impl Serialize for Game {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let moves: Vec<String> = self.move_history().iter().map(format_move).collect();
        let moves = moves.join(";");
        let full = if self.has_standard_start() {
            format!("{}x{}:{}", self.rows(), self.columns(), moves)
        } else {
            let start = self.initial_board();
            format!(
                "{}x{}:{:x}:{:x}:{}:{}",
                self.rows(),
                self.columns(),
                start.first_bits(),
                start.second_bits(),
                self.initial_turn().to_char(),
                moves
            )
        };
        serializer.serialize_str(&full)
    }
}

/// Replays the recorded moves from the starting position.
impl<'de> Deserialize<'de> for Game {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let parts: Vec<&str> = s.split(':').collect();

        let (mut game, moves_str) = match parts.as_slice() {
            [dims, moves] => {
                let (rows, columns) = parse_dimensions(dims)?;
                let game = Game::new(rows, columns).map_err(serde::de::Error::custom)?;
                (game, *moves)
            }
            [dims, first, second, turn, moves] => {
                let (rows, columns) = parse_dimensions(dims)?;
                let first = parse_bitboard(first, "first")?;
                let second = parse_bitboard(second, "second")?;
                let board =
                    Board::from_bits(rows, columns, first, second).map_err(serde::de::Error::custom)?;
                (Game::from_board(board, parse_turn(turn)?), *moves)
            }
            [_] => return Err(serde::de::Error::custom("Missing board dimensions")),
            _ => return Err(serde::de::Error::custom(format!("Invalid game format: {}", s))),
        };

        if moves_str.is_empty() {
            return Ok(game);
        }

        for move_str in moves_str.split(';') {
            let mv = parse_move(move_str)?;
            if !game.make_move(&mv) {
                return Err(serde::de::Error::custom(format!("Invalid move: {:?}", mv)));
            }
        }

        Ok(game)
    }
}

/// "RxC:first:second" with both bitboards in hex.
impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let full = format!(
            "{}x{}:{:x}:{:x}",
            self.rows(),
            self.columns(),
            self.first_bits(),
            self.second_bits()
        );
        serializer.serialize_str(&full)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let mut parts = s.split(':');
        let (Some(dims), Some(first), Some(second), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(serde::de::Error::custom(format!(
                "Invalid board format: {}",
                s
            )));
        };

        let (rows, columns) = parse_dimensions(dims)?;
        let first = parse_bitboard(first, "first")?;
        let second = parse_bitboard(second, "second")?;

        Board::from_bits(rows, columns, first, second).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Move {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_move(self))
    }
}

impl<'de> Deserialize<'de> for Move {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_move(&s)
    }
}

/// Serialized as its integer tag (-1 / 1).
impl Serialize for Player {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i8(*self as i8)
    }
}

impl<'de> Deserialize<'de> for Player {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = i64::deserialize(deserializer)?;
        Player::try_from_int(tag).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_serde_empty() {
        let game = Game::standard();

        let json = serde_json::to_string(&game).unwrap();
        assert_eq!(json, r#""8x8:""#);

        let game2: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(game2.move_count(), 0);
        assert!(!game2.is_over());
    }

    #[test]
    fn test_game_serde_with_moves() {
        let mut game = Game::standard();
        game.make_move(&Move::place(2, 3));
        game.make_move(&Move::place(2, 2));

        let json = serde_json::to_string(&game).unwrap();
        assert_eq!(json, r#""8x8:2,3;2,2""#);

        let game2: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(game2.move_history(), game.move_history());
        assert_eq!(game2.board(), game.board());
    }

    #[test]
    fn test_game_serde_rejects_illegal_replay() {
        // (0,2) sandwiches nothing from the 4x4 start.
        assert!(serde_json::from_str::<Game>(r#""4x4:0,2""#).is_err());
        // Passing is illegal while a placement exists.
        assert!(serde_json::from_str::<Game>(r#""4x4:pass""#).is_err());
        assert!(serde_json::from_str::<Game>(r#""4x4:0,1""#).is_ok());
    }

    #[test]
    fn test_game_serde_custom_start() {
        let board: Board = "B W . .
                            . . . .
                            . . . .
                            . . . ."
            .parse()
            .unwrap();
        let mut game = Game::from_board(board, Player::Second);
        assert!(game.make_move(&Move::pass()));

        let json = serde_json::to_string(&game).unwrap();
        assert_eq!(json, r#""4x4:8000:4000:W:pass""#);

        let back: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(back.initial_board(), &board);
        assert_eq!(back.initial_turn(), Player::Second);
        assert_eq!(back.board(), game.board());
        assert_eq!(back.turn(), Player::First);
        assert_eq!(back.move_history(), game.move_history());
    }

    #[test]
    fn test_game_serde_standard_board_second_to_move() {
        let game = Game::from_board(Board::standard(), Player::Second);
        let json = serde_json::to_string(&game).unwrap();
        assert_eq!(json, r#""8x8:810000000:1008000000:W:""#);

        let back: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(back.turn(), Player::Second);
        assert_eq!(back.board(), game.board());
    }

    #[test]
    fn test_game_serde_rejects_bad_start() {
        assert!(serde_json::from_str::<Game>(r#""4x4:3:2:B:""#).is_err());
        assert!(serde_json::from_str::<Game>(r#""4x4:8000:4000:X:""#).is_err());
        assert!(serde_json::from_str::<Game>(r#""4x4:8000:4000:BW:""#).is_err());
        assert!(serde_json::from_str::<Game>(r#""4x4:8000:4000:""#).is_err());
    }

    #[test]
    fn test_game_serde_bad_dimensions() {
        assert!(serde_json::from_str::<Game>(r#""9x9:""#).is_err());
        assert!(serde_json::from_str::<Game>(r#""8by8:""#).is_err());
        assert!(serde_json::from_str::<Game>(r#""2,3""#).is_err());
    }

    #[test]
    fn test_board_serde() {
        let board = Board::standard();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#""8x8:810000000:1008000000""#);

        let board2: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board2, board);
    }

    #[test]
    fn test_board_serde_rejects_overlap() {
        assert!(serde_json::from_str::<Board>(r#""4x4:3:2""#).is_err());
        assert!(serde_json::from_str::<Board>(r#""4x4:3""#).is_err());
    }

    #[test]
    fn test_move_serde() {
        let move_ = Move::place(3, 4);
        let json = serde_json::to_string(&move_).unwrap();
        assert_eq!(json, r#""3,4""#);
        assert_eq!(serde_json::from_str::<Move>(&json).unwrap(), move_);

        let json = serde_json::to_string(&Move::pass()).unwrap();
        assert_eq!(json, r#""pass""#);
        assert!(serde_json::from_str::<Move>(&json).unwrap().is_pass());
    }

    #[test]
    fn test_player_serde() {
        assert_eq!(serde_json::to_string(&Player::First).unwrap(), "-1");
        assert_eq!(serde_json::from_str::<Player>("1").unwrap(), Player::Second);
        assert!(serde_json::from_str::<Player>("0").is_err());
    }
}
