pub mod bitboard;
pub mod board;
pub mod encode;
pub mod error;
pub mod game;
pub mod r#move;
pub mod outcome;
pub mod player;
pub mod position;

#[cfg(feature = "serde")]
pub mod serde_support;

pub use board::Board;
pub use error::BoardError;
pub use player::Player;
pub use position::Position;

#[cfg(feature = "python")]
extern crate pyo3;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule(gil_used = false)]
fn flipstone(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use player::Player;
    use python_bindings::*;
    m.add_class::<PyBoard>()?;
    m.add_class::<PyGame>()?;
    m.add_class::<PyMove>()?;
    m.add_class::<PyGameOutcome>()?;
    m.add("FIRST", Player::First as i8)?;
    m.add("SECOND", Player::Second as i8)?;
    m.add("TOTAL_INPUT_PLANES", encode::TOTAL_INPUT_PLANES)?;
    Ok(())
}

#[cfg(feature = "python")]
mod python_bindings {
    use super::*;
    use crate::board::Board;
    use crate::encode;
    use crate::error::BoardError;
    use crate::game::Game;
    use crate::outcome::GameOutcome;
    use crate::player::Player;
    use crate::position::Position;
    use crate::r#move::Move;

    impl From<BoardError> for PyErr {
        fn from(err: BoardError) -> PyErr {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(err.to_string())
        }
    }

    /// Colors arrive either as the integer tag or as a name.
    #[derive(FromPyObject)]
    pub enum ColorArg {
        Tag(i64),
        Name(String),
    }

    impl ColorArg {
        fn player(&self) -> Result<Player, BoardError> {
            match self {
                ColorArg::Tag(tag) => Player::try_from_int(*tag),
                ColorArg::Name(name) => Player::try_from_name(name),
            }
        }
    }

    fn to_position((row, col): (usize, usize)) -> Position {
        Position::new(row, col)
    }

    fn coords(pos: Position) -> (usize, usize) {
        (pos.row, pos.col)
    }

    #[pyclass(name = "Board")]
    pub struct PyBoard {
        board: Board,
    }

    #[pymethods]
    impl PyBoard {
        #[new]
        #[pyo3(signature = (rows=8, columns=8))]
        pub fn new(rows: usize, columns: usize) -> PyResult<Self> {
            Ok(PyBoard {
                board: Board::new(rows, columns)?,
            })
        }

        #[staticmethod]
        pub fn from_bits(rows: usize, columns: usize, first: u64, second: u64) -> PyResult<Self> {
            Ok(PyBoard {
                board: Board::from_bits(rows, columns, first, second)?,
            })
        }

        #[staticmethod]
        pub fn standard() -> Self {
            PyBoard {
                board: Board::standard(),
            }
        }

        pub fn rows(&self) -> usize {
            self.board.rows()
        }

        pub fn columns(&self) -> usize {
            self.board.columns()
        }

        pub fn first_bits(&self) -> u64 {
            self.board.first_bits()
        }

        pub fn second_bits(&self) -> u64 {
            self.board.second_bits()
        }

        pub fn get_piece(&self, position: (usize, usize)) -> PyResult<Option<i8>> {
            Ok(self.board.get_piece(&to_position(position))?.map(|p| p as i8))
        }

        pub fn is_empty_position(&self, position: (usize, usize)) -> PyResult<bool> {
            Ok(self.board.is_empty(&to_position(position))?)
        }

        pub fn is_valid_move(&self, position: (usize, usize), color: ColorArg) -> PyResult<bool> {
            Ok(self
                .board
                .is_valid_move(&to_position(position), color.player()?)?)
        }

        /// Returns whether the move changed the board.
        pub fn apply_new_move(&mut self, position: (usize, usize), color: ColorArg) -> PyResult<bool> {
            Ok(self
                .board
                .apply_move(&to_position(position), color.player()?)?)
        }

        pub fn has_valid_move(&self, color: ColorArg) -> PyResult<bool> {
            Ok(self.board.has_any_valid_move(color.player()?))
        }

        pub fn is_end_state(&self) -> bool {
            self.board.is_terminal()
        }

        pub fn list_all_valid_moves(&self, color: ColorArg) -> PyResult<Vec<(usize, usize)>> {
            Ok(self
                .board
                .legal_moves(color.player()?)
                .into_iter()
                .map(coords)
                .collect())
        }

        pub fn list_all_empty_positions(&self) -> Vec<(usize, usize)> {
            self.board.empty_positions().into_iter().map(coords).collect()
        }

        pub fn list_all_next_states(&self, color: ColorArg) -> PyResult<Vec<PyBoard>> {
            Ok(self
                .board
                .successors(color.player()?)
                .into_iter()
                .map(|board| PyBoard { board })
                .collect())
        }

        pub fn next_board_state(&self, position: (usize, usize), color: ColorArg) -> PyResult<PyBoard> {
            Ok(PyBoard {
                board: self
                    .board
                    .next_board_state(&to_position(position), color.player()?)?,
            })
        }

        pub fn as_matrix(&self) -> Vec<Vec<i8>> {
            encode::board_matrix(&self.board)
        }

        pub fn clone(&self) -> PyBoard {
            PyBoard { board: self.board }
        }

        pub fn __eq__(&self, other: &PyBoard) -> bool {
            self.board == other.board
        }

        pub fn __hash__(&self) -> u64 {
            use std::hash::{Hash, Hasher};
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            self.board.hash(&mut hasher);
            hasher.finish()
        }

        pub fn __str__(&self) -> String {
            self.board.to_string()
        }

        pub fn __repr__(&self) -> String {
            format!(
                "Board(rows={}, columns={}, first=0x{:016x}, second=0x{:016x})",
                self.board.rows(),
                self.board.columns(),
                self.board.first_bits(),
                self.board.second_bits()
            )
        }
    }

    #[pyclass(name = "Game")]
    pub struct PyGame {
        game: Game,
    }

    #[pymethods]
    impl PyGame {
        #[new]
        #[pyo3(signature = (rows=8, columns=8))]
        pub fn new(rows: usize, columns: usize) -> PyResult<Self> {
            Ok(PyGame {
                game: Game::new(rows, columns)?,
            })
        }

        #[staticmethod]
        pub fn from_board(board: &PyBoard, to_move: ColorArg) -> PyResult<Self> {
            Ok(PyGame {
                game: Game::from_board(board.board, to_move.player()?),
            })
        }

        #[staticmethod]
        pub fn standard() -> Self {
            PyGame {
                game: Game::standard(),
            }
        }

        pub fn move_count(&self) -> usize {
            self.game.move_count()
        }

        pub fn disc_counts(&self) -> (u32, u32) {
            self.game.disc_counts()
        }

        pub fn turn(&self) -> i8 {
            self.game.turn() as i8
        }

        pub fn is_over(&self) -> bool {
            self.game.is_over()
        }

        // ---------------------------------------------------------------------
        // Unified Game Protocol Methods
        // ---------------------------------------------------------------------

        pub fn legal_action_indices(&self) -> Vec<usize> {
            let (rows, columns) = self.dims();
            self.game
                .legal_moves()
                .iter()
                .map(|m| encode::encode_move(m, rows, columns))
                .collect()
        }

        pub fn apply_action(&mut self, action: usize) -> bool {
            let (rows, columns) = self.dims();
            encode::decode_move(action, rows, columns).is_some_and(|mv| self.game.make_move(&mv))
        }

        pub fn action_size(&self) -> usize {
            let (rows, columns) = self.dims();
            encode::total_actions(rows, columns)
        }

        pub fn board_shape(&self) -> (usize, usize) {
            self.dims()
        }

        pub fn input_plane_count(&self) -> usize {
            encode::TOTAL_INPUT_PLANES
        }

        /// +1 when Second won, -1 when First won, 0 for a draw or a game in progress.
        pub fn reward_absolute(&self) -> f32 {
            self.game.outcome().map_or(0.0, |o| o.encode_winner_absolute())
        }

        pub fn reward_from_perspective(&self, perspective: ColorArg) -> PyResult<f32> {
            let perspective = perspective.player()?;
            Ok(self
                .game
                .outcome()
                .map_or(0.0, |o| o.encode_winner_from_perspective(perspective)))
        }

        pub fn name(&self) -> String {
            let (rows, columns) = self.dims();
            format!("othello_{}x{}", rows, columns)
        }

        pub fn outcome(&self) -> Option<PyGameOutcome> {
            self.game.outcome().map(|o| PyGameOutcome { outcome: o })
        }

        pub fn legal_moves(&self) -> Vec<PyMove> {
            self.game
                .legal_moves()
                .into_iter()
                .map(|m| PyMove { move_: m })
                .collect()
        }

        pub fn is_legal_move(&self, move_: &PyMove) -> bool {
            self.game.is_legal_move(&move_.move_)
        }

        pub fn make_move(&mut self, move_: &PyMove) -> bool {
            self.game.make_move(&move_.move_)
        }

        pub fn unmake_move(&mut self) -> bool {
            self.game.unmake_move()
        }

        pub fn board(&self) -> PyBoard {
            PyBoard {
                board: *self.game.board(),
            }
        }

        pub fn clone(&self) -> PyGame {
            PyGame {
                game: self.game.clone(),
            }
        }

        /// Hashes the position and side to move; history is ignored.
        pub fn __hash__(&self) -> u64 {
            use std::hash::{Hash, Hasher};
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            (self.game.board(), self.game.turn()).hash(&mut hasher);
            hasher.finish()
        }

        pub fn move_history(&self) -> Vec<String> {
            self.game.move_history().iter().map(Move::to_string).collect()
        }

        pub fn encode_game_planes(&self) -> (Vec<f32>, usize, usize, usize) {
            encode::encode_game_planes(&self.game)
        }

        pub fn decode_action(&self, action: usize) -> Option<PyMove> {
            let (rows, columns) = self.dims();
            encode::decode_move(action, rows, columns).map(|move_| PyMove { move_ })
        }

        pub fn __str__(&self) -> String {
            self.game.to_string()
        }

        pub fn __repr__(&self) -> String {
            let (first, second) = self.game.disc_counts();
            format!(
                "Game({}x{}, moves={}, discs={}:{}, turn={})",
                self.game.rows(),
                self.game.columns(),
                self.game.move_count(),
                first,
                second,
                self.game.turn()
            )
        }
    }

    impl PyGame {
        fn dims(&self) -> (usize, usize) {
            (self.game.rows(), self.game.columns())
        }
    }

    #[pyclass(name = "Move")]
    #[derive(Clone, Debug)]
    pub struct PyMove {
        move_: Move,
    }

    #[pymethods]
    impl PyMove {
        #[staticmethod]
        pub fn place(row: usize, col: usize) -> Self {
            PyMove {
                move_: Move::place(row, col),
            }
        }

        #[staticmethod]
        pub fn pass_move() -> Self {
            PyMove {
                move_: Move::pass(),
            }
        }

        /// Parses `d3`-style notation or `pass`.
        #[staticmethod]
        pub fn parse(notation: &str) -> PyResult<Self> {
            Ok(PyMove {
                move_: notation.parse()?,
            })
        }

        pub fn is_pass(&self) -> bool {
            self.move_.is_pass()
        }

        pub fn row(&self) -> Option<usize> {
            self.move_.row()
        }

        pub fn col(&self) -> Option<usize> {
            self.move_.col()
        }

        pub fn encode(&self, rows: usize, columns: usize) -> PyResult<usize> {
            if let Move::Place { row, col } = self.move_ {
                if row >= rows || col >= columns {
                    return Err(BoardError::OutOfRange {
                        row,
                        col,
                        rows,
                        columns,
                    }
                    .into());
                }
            }
            Ok(encode::encode_move(&self.move_, rows, columns))
        }

        #[staticmethod]
        pub fn decode(action: usize, rows: usize, columns: usize) -> PyResult<Self> {
            match encode::decode_move(action, rows, columns) {
                Some(mv) => Ok(PyMove { move_: mv }),
                _ => Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(
                    "invalid action",
                )),
            }
        }

        pub fn __str__(&self) -> String {
            self.move_.to_string()
        }

        pub fn __repr__(&self) -> String {
            format!("Move({:?})", self.move_.to_string())
        }

        pub fn __eq__(&self, other: &PyMove) -> bool {
            self.move_ == other.move_
        }

        pub fn __hash__(&self) -> u64 {
            use std::hash::{Hash, Hasher};
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            self.move_.hash(&mut hasher);
            hasher.finish()
        }
    }

    #[pyclass(name = "GameOutcome")]
    #[derive(Clone, Copy, Debug)]
    pub struct PyGameOutcome {
        outcome: GameOutcome,
    }

    #[pymethods]
    impl PyGameOutcome {
        pub fn winner(&self) -> Option<i8> {
            self.outcome.winner().map(|player| player as i8)
        }

        pub fn encode_winner_absolute(&self) -> f32 {
            self.outcome.encode_winner_absolute()
        }

        pub fn encode_winner_from_perspective(&self, perspective: ColorArg) -> PyResult<f32> {
            Ok(self
                .outcome
                .encode_winner_from_perspective(perspective.player()?))
        }

        pub fn is_draw(&self) -> bool {
            self.outcome.is_draw()
        }

        pub fn __str__(&self) -> String {
            self.outcome.to_string()
        }

        pub fn __repr__(&self) -> String {
            format!("GameOutcome({})", self.outcome)
        }

        pub fn __eq__(&self, other: &PyGameOutcome) -> bool {
            self.outcome == other.outcome
        }
    }
}
