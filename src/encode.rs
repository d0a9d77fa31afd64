use crate::board::Board;
use crate::game::Game;
use crate::player::Player;
use crate::r#move::Move;

/// Number of planes for stone positions (side to move + opponent)
const STONE_PLANES: usize = 2;

/// One plane marking the side to move's legal placements
const LEGAL_MOVE_PLANES: usize = 1;

/// Number of constant planes (1 for current player color)
const CONSTANT_PLANES: usize = 1;

/// Total number of input planes for the neural network
pub const TOTAL_INPUT_PLANES: usize = STONE_PLANES + LEGAL_MOVE_PLANES + CONSTANT_PLANES;

/// Row-major grid of the board: -1 for First, +1 for Second, 0 for empty.
pub fn board_matrix(board: &Board) -> Vec<Vec<i8>> {
    let (flat, rows, columns) = encode_board_matrix(board);
    debug_assert_eq!(flat.len(), rows * columns);
    flat.chunks(columns).map(|row| row.to_vec()).collect()
}

/// Flat form of [`board_matrix`]. Returns (data, rows, columns).
pub fn encode_board_matrix(board: &Board) -> (Vec<i8>, usize, usize) {
    let geometry = board.geometry();
    let rows = geometry.rows;
    let columns = geometry.columns;
    let mut data = vec![0i8; rows * columns];

    for player in [Player::First, Player::Second] {
        for idx in board.stones_for(player).iter_ones() {
            let (row, col) = geometry.coords(idx);
            data[row * columns + col] = player as i8;
        }
    }

    (data, rows, columns)
}

/// Encode the game state into a flat f32 array for efficient transfer to Python/numpy.
/// Returns (flat_data, num_planes, rows, columns), where flat_data is in row-major order.
pub fn encode_game_planes(game: &Game) -> (Vec<f32>, usize, usize, usize) {
    let perspective = game.turn();
    let board = game.board();
    let geometry = board.geometry();
    let rows = geometry.rows;
    let columns = geometry.columns;
    let num_planes = TOTAL_INPUT_PLANES;
    let board_size = rows * columns;
    let mut data = vec![0.0f32; num_planes * board_size];

    let cell = |idx: usize| {
        let (row, col) = geometry.coords(idx);
        row * columns + col
    };

    // Plane 0: side to move, plane 1: opponent
    for idx in board.stones_for(perspective).iter_ones() {
        data[cell(idx)] = 1.0;
    }
    for idx in board.stones_for(perspective.opposite()).iter_ones() {
        data[board_size + cell(idx)] = 1.0;
    }

    // Plane 2: legal placements
    if !game.is_over() {
        let offset = 2 * board_size;
        for pos in board.legal_moves(perspective) {
            data[offset + pos.row * columns + pos.col] = 1.0;
        }
    }

    // Color plane (last plane)
    let color_plane_offset = (STONE_PLANES + LEGAL_MOVE_PLANES) * board_size;
    let color_value = if perspective == Player::First { 1.0 } else { 0.0 };
    for value in &mut data[color_plane_offset..] {
        *value = color_value;
    }

    (data, num_planes, rows, columns)
}

/// Encode a move as an action index for the policy head.
///
/// Placements must lie on a `rows`×`columns` board; anything else would
/// alias another cell's index.
pub fn encode_move(move_: &Move, rows: usize, columns: usize) -> usize {
    match *move_ {
        Move::Place { row, col } => {
            debug_assert!(
                row < rows && col < columns,
                "{} is off a {}x{} board",
                move_,
                rows,
                columns
            );
            row * columns + col
        }
        Move::Pass => rows * columns,
    }
}

pub fn decode_move(action: usize, rows: usize, columns: usize) -> Option<Move> {
    let board_size = rows * columns;

    if action == board_size {
        return Some(Move::pass());
    }

    if action > board_size {
        return None;
    }

    Some(Move::place(action / columns, action % columns))
}

pub fn total_actions(rows: usize, columns: usize) -> usize {
    rows * columns + 1
}
