use flipstone::board::Board;
use flipstone::game::Game;
use flipstone::player::Player;
use flipstone::position::Position;
use proptest::prelude::*;

/// Replays `choices` as indices into the legal move list, stopping at game over.
fn play(size: usize, choices: &[usize]) -> Game {
    let mut game = Game::new(size, size).unwrap();
    for &choice in choices {
        if game.is_over() {
            break;
        }
        let moves = game.legal_moves();
        let mv = moves[choice % moves.len()];
        assert!(game.make_move(&mv));
    }
    game
}

fn sizes() -> impl Strategy<Value = usize> {
    prop::sample::select(vec![2usize, 4, 6, 8])
}

fn players() -> impl Strategy<Value = Player> {
    prop::sample::select(vec![Player::First, Player::Second])
}

proptest! {
    #[test]
    fn stones_never_overlap(size in sizes(), choices in prop::collection::vec(0usize..64, 0..70)) {
        let game = play(size, &choices);
        let board = game.board();
        prop_assert_eq!(board.first_bits() & board.second_bits(), 0);

        let (first, second) = game.disc_counts();
        prop_assert_eq!(first + second + board.empty_count(), (size * size) as u32);
    }

    #[test]
    fn illegal_move_leaves_board_unchanged(
        size in sizes(),
        choices in prop::collection::vec(0usize..64, 0..40),
        player in players(),
        cell in 0usize..64,
    ) {
        let board = *play(size, &choices).board();
        let pos = Position::new(cell / size % size, cell % size);

        if !board.is_valid_move(&pos, player).unwrap() {
            let mut copy = board;
            prop_assert!(!copy.apply_move(&pos, player).unwrap());
            prop_assert_eq!(copy, board);
        }
    }

    #[test]
    fn successors_match_legal_moves(
        size in sizes(),
        choices in prop::collection::vec(0usize..64, 0..40),
        player in players(),
    ) {
        let board = *play(size, &choices).board();
        let moves = board.legal_moves(player);
        let successors = board.successors(player);
        prop_assert_eq!(moves.len(), successors.len());

        for (pos, next) in moves.iter().zip(&successors) {
            prop_assert_eq!(&board.next_board_state(pos, player).unwrap(), next);
            prop_assert_eq!(next.get_piece(pos).unwrap(), Some(player));
            prop_assert!(next.disc_count(player) >= board.disc_count(player) + 2);
        }
    }

    #[test]
    fn legal_moves_are_exactly_the_state_changing_ones(
        size in sizes(),
        choices in prop::collection::vec(0usize..64, 0..40),
        player in players(),
    ) {
        let board = *play(size, &choices).board();
        let changing: Vec<Position> = board
            .empty_positions()
            .into_iter()
            .filter(|pos| board.next_board_state(pos, player).unwrap() != board)
            .collect();

        prop_assert_eq!(board.legal_moves(player), changing.clone());
        prop_assert_eq!(board.has_any_valid_move(player), !changing.is_empty());
    }

    #[test]
    fn terminal_means_nobody_can_move(
        size in sizes(),
        choices in prop::collection::vec(0usize..64, 0..70),
    ) {
        let board = *play(size, &choices).board();
        let blocked = board.legal_moves(Player::First).is_empty()
            && board.legal_moves(Player::Second).is_empty();
        prop_assert_eq!(board.is_terminal(), blocked);
    }

    #[test]
    fn from_bits_round_trips_reachable_boards(
        size in sizes(),
        choices in prop::collection::vec(0usize..64, 0..40),
    ) {
        let board = *play(size, &choices).board();
        let rebuilt = Board::from_bits(size, size, board.first_bits(), board.second_bits()).unwrap();
        prop_assert_eq!(rebuilt, board);
    }
}
