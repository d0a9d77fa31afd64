use crate::bitboard::Geometry;
use crate::error::BoardError;

/// A cell coordinate. Row 0 is the top row, column 0 the leftmost column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    pub fn from_index(index: usize, geometry: &Geometry) -> Self {
        let (row, col) = geometry.coords(index);
        Position { row, col }
    }

    pub fn to_index(&self, geometry: &Geometry) -> usize {
        geometry.index(self.row, self.col)
    }

    pub fn is_valid(&self, rows: usize, columns: usize) -> bool {
        self.row < rows && self.col < columns
    }

    /// Range-check against `geometry`, producing the bit index on success.
    pub fn checked_index(&self, geometry: &Geometry) -> Result<usize, BoardError> {
        if self.is_valid(geometry.rows, geometry.columns) {
            Ok(self.to_index(geometry))
        } else {
            Err(BoardError::OutOfRange {
                row: self.row,
                col: self.col,
                rows: geometry.rows,
                columns: geometry.columns,
            })
        }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position { row, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
