use std::fmt;
use std::str::FromStr;

use crate::bitboard::{Bitboard, Geometry, MAX_CELLS};
use crate::error::BoardError;
use crate::player::Player;
use crate::position::Position;

pub const STANDARD_ROWS: usize = 8;
pub const STANDARD_COLS: usize = 8;

/// Check that `rows × columns` is a square that fits in one bitboard word.
pub fn validate_dimensions(rows: usize, columns: usize) -> Result<(), BoardError> {
    if rows != columns || rows < 2 || rows * columns > MAX_CELLS {
        return Err(BoardError::InvalidDimensions { rows, columns });
    }
    Ok(())
}

/// An Othello position: one bitboard per player over a fixed square grid.
///
/// The two bitboards never share a bit. Boards are plain values; cloning
/// duplicates both bitboards and the geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    first: Bitboard,
    second: Bitboard,
    geometry: Geometry,
}

impl Board {
    /// A board with the four-stone starting layout.
    pub fn new(rows: usize, columns: usize) -> Result<Self, BoardError> {
        validate_dimensions(rows, columns)?;
        Ok(Self::with_start_layout(Geometry::new(rows, columns)))
    }

    /// The 8×8 starting position.
    pub fn standard() -> Self {
        Self::with_start_layout(Geometry::new(STANDARD_ROWS, STANDARD_COLS))
    }

    /// A board with no stones on it.
    pub fn empty(rows: usize, columns: usize) -> Result<Self, BoardError> {
        validate_dimensions(rows, columns)?;
        Ok(Board {
            first: Bitboard::empty(),
            second: Bitboard::empty(),
            geometry: Geometry::new(rows, columns),
        })
    }

    /// A board from explicit bitboards, laid out as [`Geometry::index`] describes.
    pub fn from_bits(rows: usize, columns: usize, first: u64, second: u64) -> Result<Self, BoardError> {
        validate_dimensions(rows, columns)?;
        let geometry = Geometry::new(rows, columns);
        let first = Bitboard::from_bits(first);
        let second = Bitboard::from_bits(second);

        if first.intersects(second) {
            return Err(BoardError::OverlappingStones);
        }
        if ((first | second) & !geometry.board_mask).is_nonzero() {
            return Err(BoardError::BitsOutsideBoard { rows, columns });
        }

        Ok(Board {
            first,
            second,
            geometry,
        })
    }

    fn with_start_layout(geometry: Geometry) -> Self {
        let center_row = geometry.rows / 2;
        let center_col = geometry.columns / 2;
        let at = |row: usize, col: usize| Bitboard::single(geometry.index(row, col));

        Board {
            first: at(center_row, center_col - 1) | at(center_row - 1, center_col),
            second: at(center_row, center_col) | at(center_row - 1, center_col - 1),
            geometry,
        }
    }

    pub fn rows(&self) -> usize {
        self.geometry.rows
    }

    pub fn columns(&self) -> usize {
        self.geometry.columns
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Raw bitboard of the first player's stones.
    pub fn first_bits(&self) -> u64 {
        self.first.bits()
    }

    /// Raw bitboard of the second player's stones.
    pub fn second_bits(&self) -> u64 {
        self.second.bits()
    }

    pub fn get_piece(&self, pos: &Position) -> Result<Option<Player>, BoardError> {
        let idx = pos.checked_index(&self.geometry)?;
        Ok(self.piece_at(idx))
    }

    /// Place or remove a stone directly, without flipping anything.
    pub fn set_piece(&mut self, pos: &Position, player: Option<Player>) -> Result<(), BoardError> {
        let idx = pos.checked_index(&self.geometry)?;
        self.first.clear(idx);
        self.second.clear(idx);
        match player {
            Some(Player::First) => self.first.set(idx),
            Some(Player::Second) => self.second.set(idx),
            None => {}
        }
        Ok(())
    }

    pub fn is_empty(&self, pos: &Position) -> Result<bool, BoardError> {
        let idx = pos.checked_index(&self.geometry)?;
        Ok(self.is_empty_at(idx))
    }

    /// Every empty cell, in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        self.row_major()
            .filter(|&(_, idx)| self.is_empty_at(idx))
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn empty_count(&self) -> u32 {
        self.empty_squares().count()
    }

    pub fn disc_count(&self, player: Player) -> u32 {
        self.stones_for(player).count()
    }

    /// Opponent stones that `player` would flip by playing at `pos`.
    /// Empty when `pos` is occupied or the move sandwiches nothing.
    pub fn flip_pattern(&self, pos: &Position, player: Player) -> Result<Bitboard, BoardError> {
        let idx = pos.checked_index(&self.geometry)?;
        Ok(self.flip_pattern_at(idx, player))
    }

    pub fn is_valid_move(&self, pos: &Position, player: Player) -> Result<bool, BoardError> {
        let idx = pos.checked_index(&self.geometry)?;
        Ok(self.is_empty_at(idx) && self.flip_pattern_at(idx, player).is_nonzero())
    }

    /// Play `player` at `pos`, flipping every sandwiched stone.
    ///
    /// Returns `Ok(false)` and leaves the board untouched when the move
    /// flips nothing.
    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn apply_move(&mut self, pos: &Position, player: Player) -> Result<bool, BoardError> {
        let idx = pos.checked_index(&self.geometry)?;
        Ok(self.apply_move_at(idx, player).is_nonzero())
    }

    /// A copy of this board with the move applied. `self` is not modified.
    pub fn next_board_state(&self, pos: &Position, player: Player) -> Result<Board, BoardError> {
        let mut next = *self;
        next.apply_move(pos, player)?;
        Ok(next)
    }

    pub fn has_any_valid_move(&self, player: Player) -> bool {
        self.empty_squares()
            .iter_ones()
            .any(|idx| self.flip_pattern_at(idx, player).is_nonzero())
    }

    /// True when neither player has a legal move.
    pub fn is_terminal(&self) -> bool {
        !self.has_any_valid_move(Player::First) && !self.has_any_valid_move(Player::Second)
    }

    /// Legal moves for `player`, in row-major order.
    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn legal_moves(&self, player: Player) -> Vec<Position> {
        self.row_major()
            .filter(|&(_, idx)| self.is_empty_at(idx) && self.flip_pattern_at(idx, player).is_nonzero())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Every board reachable by one move of `player`, in row-major move order.
    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn successors(&self, player: Player) -> Vec<Board> {
        self.successors_with_moves(player)
            .into_iter()
            .map(|(_, board)| board)
            .collect()
    }

    /// Like [`Board::successors`], paired with the move that produced each board.
    pub fn successors_with_moves(&self, player: Player) -> Vec<(Position, Board)> {
        let mut states = Vec::new();
        for (pos, idx) in self.row_major() {
            if !self.is_empty_at(idx) {
                continue;
            }
            let mut next = *self;
            next.apply_move_at(idx, player);
            if next == *self {
                continue;
            }
            states.push((pos, next));
        }
        states
    }

    #[inline]
    pub fn stones_for(&self, player: Player) -> Bitboard {
        match player {
            Player::First => self.first,
            Player::Second => self.second,
        }
    }

    #[inline]
    pub(crate) fn occupied(&self) -> Bitboard {
        self.first | self.second
    }

    #[inline]
    pub(crate) fn empty_squares(&self) -> Bitboard {
        self.geometry.board_mask & !self.occupied()
    }

    #[inline]
    fn is_empty_at(&self, idx: usize) -> bool {
        !self.occupied().get(idx)
    }

    #[inline]
    fn piece_at(&self, idx: usize) -> Option<Player> {
        if self.first.get(idx) {
            Some(Player::First)
        } else if self.second.get(idx) {
            Some(Player::Second)
        } else {
            None
        }
    }

    #[inline]
    fn flip_pattern_at(&self, idx: usize, player: Player) -> Bitboard {
        if !self.is_empty_at(idx) {
            return Bitboard::empty();
        }
        self.geometry.flip_pattern(
            Bitboard::single(idx),
            self.stones_for(player),
            self.stones_for(player.opposite()),
        )
    }

    /// Apply a move at a known in-range index, returning the flipped stones.
    pub(crate) fn apply_move_at(&mut self, idx: usize, player: Player) -> Bitboard {
        let flips = self.flip_pattern_at(idx, player);
        if flips.is_empty() {
            return flips;
        }
        let placed = Bitboard::single(idx) | flips;
        match player {
            Player::First => {
                self.first ^= placed;
                self.second ^= flips;
            }
            Player::Second => {
                self.second ^= placed;
                self.first ^= flips;
            }
        }
        flips
    }

    /// Reverse [`Board::apply_move_at`] given the flips it returned.
    pub(crate) fn undo_move_at(&mut self, idx: usize, player: Player, flips: Bitboard) {
        let placed = Bitboard::single(idx) | flips;
        match player {
            Player::First => {
                self.first ^= placed;
                self.second ^= flips;
            }
            Player::Second => {
                self.second ^= placed;
                self.first ^= flips;
            }
        }
    }

    /// Cells in row-major order with their bit indices.
    fn row_major(&self) -> impl Iterator<Item = (Position, usize)> + '_ {
        let geometry = &self.geometry;
        (0..geometry.rows).flat_map(move |row| {
            (0..geometry.columns).map(move |col| (Position::new(row, col), geometry.index(row, col)))
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in 0..self.columns() {
            write!(f, " {}", col)?;
        }
        writeln!(f)?;

        for (pos, idx) in self.row_major() {
            if pos.col == 0 {
                write!(f, "{}", pos.row)?;
            }
            let c = self.piece_at(idx).map_or('.', |player| player.to_char());
            write!(f, " {}", c)?;
            if pos.col + 1 == self.columns() {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

/// Parse a diagram of rows made of `.`, `B` and `W`, one row per line.
/// Whitespace inside a line is ignored.
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<Vec<char>> = s
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|cells| !cells.is_empty())
            .collect();

        let rows = lines.len();
        let columns = lines.first().map_or(0, |cells| cells.len());
        if lines.iter().any(|cells| cells.len() != columns) {
            return Err(BoardError::InvalidDimensions { rows, columns });
        }

        let mut board = Board::empty(rows, columns)?;
        for (row, cells) in lines.iter().enumerate() {
            for (col, &c) in cells.iter().enumerate() {
                let player = match c {
                    '.' => None,
                    other => Some(
                        Player::from_char(other)
                            .ok_or_else(|| BoardError::InvalidColor(other.to_string()))?,
                    ),
                };
                board.set_piece(&Position::new(row, col), player)?;
            }
        }
        Ok(board)
    }
}
