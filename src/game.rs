use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::error::BoardError;
use crate::outcome::GameOutcome;
use crate::player::Player;
use crate::position::Position;
use crate::r#move::Move;

#[derive(Clone, Debug)]
struct MoveHistoryEntry {
    move_: Move,
    player: Player,
    flipped: Bitboard,
}

/// Turn-taking driver around a [`Board`].
///
/// `Player::First` moves first. A side with no legal placement must pass;
/// the game ends when neither side can place a stone.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    start: Board,
    start_player: Player,
    current_player: Player,
    move_history: Vec<MoveHistoryEntry>,
    is_over: bool,
    outcome: Option<GameOutcome>,
}

impl Game {
    pub fn new(rows: usize, columns: usize) -> Result<Self, BoardError> {
        Ok(Self::from_board(Board::new(rows, columns)?, Player::First))
    }

    pub fn standard() -> Self {
        Self::from_board(Board::standard(), Player::First)
    }

    /// Start from an arbitrary position with `to_move` on turn.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let mut game = Game {
            board,
            start: board,
            start_player: to_move,
            current_player: to_move,
            move_history: Vec::new(),
            is_over: false,
            outcome: None,
        };
        game.update_status();
        game
    }

    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    pub fn columns(&self) -> usize {
        self.board.columns()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Player {
        self.current_player
    }

    /// The position the recorded history starts from.
    pub fn initial_board(&self) -> &Board {
        &self.start
    }

    pub fn initial_turn(&self) -> Player {
        self.start_player
    }

    /// True when play began from the four-stone layout with First on turn.
    pub fn has_standard_start(&self) -> bool {
        self.start_player == Player::First
            && Board::new(self.rows(), self.columns()).is_ok_and(|board| board == self.start)
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn move_count(&self) -> usize {
        self.move_history.len()
    }

    pub fn move_history(&self) -> Vec<Move> {
        self.move_history.iter().map(|e| e.move_).collect()
    }

    pub fn get_piece(&self, pos: &Position) -> Result<Option<Player>, BoardError> {
        self.board.get_piece(pos)
    }

    /// Disc counts as `(first, second)`.
    pub fn disc_counts(&self) -> (u32, u32) {
        (
            self.board.disc_count(Player::First),
            self.board.disc_count(Player::Second),
        )
    }

    /// Placements for the side to move, or a lone pass when it is blocked.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over {
            return Vec::new();
        }

        let placements: Vec<Move> = self
            .board
            .legal_moves(self.current_player)
            .into_iter()
            .map(Move::from)
            .collect();

        if placements.is_empty() {
            vec![Move::pass()]
        } else {
            placements
        }
    }

    pub fn is_legal_move(&self, move_: &Move) -> bool {
        if self.is_over {
            return false;
        }

        match move_ {
            Move::Pass => !self.board.has_any_valid_move(self.current_player),
            Move::Place { row, col } => self
                .board
                .is_valid_move(&Position::new(*row, *col), self.current_player)
                .unwrap_or(false),
        }
    }

    pub fn make_move(&mut self, move_: &Move) -> bool {
        if !self.is_legal_move(move_) {
            return false;
        }

        let player = self.current_player;
        let flipped = match move_ {
            Move::Pass => Bitboard::empty(),
            Move::Place { row, col } => {
                let idx = Position::new(*row, *col).to_index(self.board.geometry());
                self.board.apply_move_at(idx, player)
            }
        };

        self.move_history.push(MoveHistoryEntry {
            move_: *move_,
            player,
            flipped,
        });

        self.current_player = player.opposite();
        self.update_status();

        true
    }

    pub fn unmake_move(&mut self) -> bool {
        if let Some(entry) = self.move_history.pop() {
            if let Move::Place { row, col } = entry.move_ {
                let idx = Position::new(row, col).to_index(self.board.geometry());
                self.board.undo_move_at(idx, entry.player, entry.flipped);
            }
            self.current_player = entry.player;
            self.is_over = false;
            self.outcome = None;
            true
        } else {
            false
        }
    }

    fn update_status(&mut self) {
        if self.board.is_terminal() {
            let (first, second) = self.disc_counts();
            let outcome = GameOutcome::from_board(&self.board);
            self.is_over = true;
            self.outcome = Some(outcome);
            tracing::info!(
                first,
                second,
                moves = self.move_history.len(),
                "no legal moves for either player, game over: {}",
                outcome
            );
        } else if !self.board.has_any_valid_move(self.current_player) {
            tracing::debug!(player = %self.current_player, "no legal moves, must pass");
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Game(turn: {}, is_over: {}, outcome: {:?})\n{}",
            self.current_player, self.is_over, self.outcome, self.board
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::IndexedRandom;
    use rand::SeedableRng;

    #[test]
    fn test_new_game() {
        let game = Game::standard();
        assert_eq!(game.turn(), Player::First);
        assert!(!game.is_over());
        assert!(game.outcome().is_none());
        assert_eq!(game.disc_counts(), (2, 2));
    }

    #[test]
    fn test_legal_moves_initial() {
        let game = Game::standard();
        let moves = game.legal_moves();
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| !m.is_pass()));
        assert!(!game.is_legal_move(&Move::pass()));
    }

    #[test]
    fn test_make_move() {
        let mut game = Game::standard();
        let move_ = Move::place(2, 3);

        assert!(game.is_legal_move(&move_));
        assert!(game.make_move(&move_));
        assert_eq!(game.turn(), Player::Second);
        assert_eq!(game.disc_counts(), (4, 1));
    }

    #[test]
    fn test_make_invalid_move() {
        let mut game = Game::standard();

        assert!(!game.make_move(&Move::place(0, 0)));
        assert!(!game.make_move(&Move::place(8, 0)));
        assert!(!game.make_move(&Move::place(3, 3)));
        assert_eq!(game.turn(), Player::First);
        assert_eq!(game.move_count(), 0);
    }

    #[test]
    fn test_unmake_move() {
        let mut game = Game::standard();
        game.make_move(&Move::place(2, 3));
        game.make_move(&Move::place(2, 2));

        assert!(game.unmake_move());
        assert!(game.unmake_move());
        assert_eq!(game.turn(), Player::First);
        assert_eq!(game.board(), &Board::standard());
        assert!(!game.unmake_move());
    }

    #[test]
    fn test_forced_pass() {
        let board: Board = "B W . .
                            . . . .
                            . . . .
                            . . . ."
            .parse()
            .unwrap();
        let mut game = Game::from_board(board, Player::Second);

        assert!(!game.is_over());
        assert_eq!(game.legal_moves(), vec![Move::pass()]);
        assert!(game.make_move(&Move::pass()));
        assert_eq!(game.turn(), Player::First);
        assert!(!game.is_legal_move(&Move::pass()));

        assert_eq!(game.legal_moves(), vec![Move::place(0, 2)]);
        assert!(game.make_move(&Move::place(0, 2)));
        assert!(game.is_over());
        assert_eq!(game.outcome(), Some(GameOutcome::FirstWin));
        assert!(game.legal_moves().is_empty());

        assert!(game.unmake_move());
        assert!(!game.is_over());
        assert!(game.unmake_move());
        assert_eq!(game.turn(), Player::Second);
        assert_eq!(game.board(), &board);
        assert_eq!(game.initial_board(), &board);
        assert_eq!(game.initial_turn(), Player::Second);
        assert!(!game.has_standard_start());
    }

    #[test]
    fn test_standard_start_detection() {
        let mut game = Game::new(6, 6).unwrap();
        assert!(game.has_standard_start());
        let first_move = game.legal_moves()[0];
        assert!(game.make_move(&first_move));
        assert!(game.has_standard_start());
        assert_eq!(game.initial_board(), &Board::new(6, 6).unwrap());

        let second_first = Game::from_board(Board::standard(), Player::Second);
        assert!(!second_first.has_standard_start());
    }

    #[test]
    fn test_terminal_start_position() {
        let board = Board::from_bits(4, 4, 0xaaaa, 0x5555).unwrap();
        let game = Game::from_board(board, Player::First);
        assert!(game.is_over());
        assert_eq!(game.outcome(), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_random_playouts_finish() {
        for size in [4, 6, 8] {
            let mut rng = rand::rngs::StdRng::seed_from_u64(size as u64);
            for _ in 0..20 {
                let mut game = Game::new(size, size).unwrap();
                while !game.is_over() {
                    let moves = game.legal_moves();
                    let chosen = moves.choose(&mut rng).unwrap();
                    assert!(game.make_move(chosen), "{}", game);
                    assert_eq!(
                        game.board().first_bits() & game.board().second_bits(),
                        0
                    );
                }

                let (first, second) = game.disc_counts();
                assert_eq!(
                    game.outcome(),
                    Some(GameOutcome::from_disc_counts(first, second))
                );
                assert!(game.board().is_terminal());

                let played = game.move_count();
                for _ in 0..played {
                    assert!(game.unmake_move());
                }
                assert_eq!(game.board(), &Board::new(size, size).unwrap());
            }
        }
    }

    #[test]
    fn test_clone() {
        let mut game = Game::standard();
        game.make_move(&Move::place(2, 3));

        let cloned = game.clone();
        assert_eq!(cloned.turn(), game.turn());
        assert_eq!(cloned.board(), game.board());
        assert_eq!(cloned.move_history(), game.move_history());
    }
}
