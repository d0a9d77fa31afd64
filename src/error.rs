/// Errors raised at the edges of the board engine.
///
/// Illegal but in-range moves are not errors: applying one leaves the
/// board untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("position ({row}, {col}) is outside a {rows}x{columns} board")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        columns: usize,
    },

    #[error("unrecognized color tag: {0}")]
    InvalidColor(String),

    #[error("unsupported board dimensions {rows}x{columns} (must be square, at least 2x2, at most 64 cells)")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("a cell is occupied by both players")]
    OverlappingStones,

    #[error("stones set outside the {rows}x{columns} board area")]
    BitsOutsideBoard { rows: usize, columns: usize },

    #[error("cannot parse move {0:?}")]
    InvalidNotation(String),
}
